//! Provider module for Ocean NLI
//!
//! This module contains the text-generation provider abstraction and the
//! Gemini implementation.

pub mod base;
pub mod gemini;

pub use base::{Provider, ANSWER_MAX_TOKENS, PARSE_MAX_TOKENS};
pub use gemini::GeminiProvider;

use crate::config::GenerationConfig;
use crate::error::Result;
use std::sync::Arc;

/// Create the configured text-generation provider
///
/// # Errors
///
/// Returns error if provider initialization fails (e.g. missing API key)
pub fn create_provider(config: &GenerationConfig) -> Result<Arc<dyn Provider>> {
    Ok(Arc::new(GeminiProvider::new(config.clone())?))
}
