//! Base provider trait for text generation
//!
//! This module defines the Provider trait that text-generation backends
//! implement. The pipeline only ever needs "prompt in, text out", so the
//! trait stays that small.

use crate::error::Result;
use async_trait::async_trait;

/// Token cap used when parsing a question into a structured query
pub const PARSE_MAX_TOKENS: u32 = 1024;

/// Token cap used when writing the final answer
pub const ANSWER_MAX_TOKENS: u32 = 2000;

/// Text-generation provider
///
/// Implementations must treat a non-success status, a timeout, or a
/// response without generated text as an error. Callers decide how to
/// degrade.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Generate text for a single prompt
    ///
    /// # Arguments
    ///
    /// * `prompt` - Complete prompt text
    /// * `max_tokens` - Upper bound on generated tokens
    ///
    /// # Errors
    ///
    /// Returns error if the call fails or yields no text
    async fn generate(&self, prompt: &str, max_tokens: u32) -> Result<String>;

    /// Short provider name used in logs and the health endpoint
    fn name(&self) -> &str;
}
