//! Answer formatting
//!
//! Each answer comes from an ordered chain: a generated narrative first,
//! then a static template. The generation stage is bounded by its own
//! timeout; the template stage cannot fail.

use std::sync::Arc;
use std::time::Duration;

use crate::erddap::FetchedData;
use crate::prompts::{generate_data_prompt, generate_fallback_prompt, templates};
use crate::providers::{Provider, ANSWER_MAX_TOKENS};
use crate::query::StructuredQuery;

/// Turns fetched data or a bare structured query into prose
#[derive(Clone)]
pub struct ResponseFormatter {
    provider: Arc<dyn Provider>,
    stage_timeout: Duration,
}

impl ResponseFormatter {
    /// Create a formatter whose generation stage is bounded by `stage_timeout`
    pub fn new(provider: Arc<dyn Provider>, stage_timeout: Duration) -> Self {
        Self {
            provider,
            stage_timeout,
        }
    }

    /// Narrate retrieved data
    pub async fn answer_with_data(&self, user_query: &str, data: &FetchedData) -> String {
        let prompt = generate_data_prompt(user_query, data);
        match self.generate(&prompt).await {
            Some(text) => text,
            None => templates::data_summary(data),
        }
    }

    /// Answer from general knowledge when no data was retrieved
    pub async fn answer_without_data(&self, user_query: &str, query: &StructuredQuery) -> String {
        let prompt = generate_fallback_prompt(user_query, query);
        match self.generate(&prompt).await {
            Some(text) => text,
            None => templates::general_guidance(query),
        }
    }

    async fn generate(&self, prompt: &str) -> Option<String> {
        let call = self.provider.generate(prompt, ANSWER_MAX_TOKENS);
        match tokio::time::timeout(self.stage_timeout, call).await {
            Ok(Ok(text)) if !text.trim().is_empty() => Some(text),
            Ok(Ok(_)) => {
                tracing::warn!("{} returned an empty answer, using template", self.provider.name());
                None
            }
            Ok(Err(e)) => {
                tracing::error!("Answer generation failed, using template: {}", e);
                None
            }
            Err(_) => {
                tracing::error!(
                    "Answer generation timed out after {:?}, using template",
                    self.stage_timeout
                );
                None
            }
        }
    }
}
