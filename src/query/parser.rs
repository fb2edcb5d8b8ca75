//! Natural-language query parser
//!
//! Resolves a question into a [`StructuredQuery`]: canned intents first,
//! then the generation service. A reply that is not a JSON object degrades
//! to the all-null query; a failed service call is returned as an error so
//! the orchestrator can report it.

use std::sync::Arc;

use serde_json::Value;

use super::shortcuts::match_intent;
use super::types::StructuredQuery;
use crate::error::Result;
use crate::prompts::generate_parse_prompt;
use crate::providers::{Provider, PARSE_MAX_TOKENS};

/// Parses free text into structured queries
#[derive(Clone)]
pub struct QueryParser {
    provider: Arc<dyn Provider>,
}

impl QueryParser {
    /// Create a parser backed by `provider`
    pub fn new(provider: Arc<dyn Provider>) -> Self {
        Self { provider }
    }

    /// Parse `user_query` into a structured query
    ///
    /// # Errors
    ///
    /// Returns error only when the generation service call itself fails
    pub async fn parse(&self, user_query: &str) -> Result<StructuredQuery> {
        if let Some(intent) = match_intent(user_query) {
            tracing::info!("Matched canned intent: {}", intent.name);
            return Ok(intent.structured_query());
        }

        let prompt = generate_parse_prompt(user_query);
        let reply = self.provider.generate(&prompt, PARSE_MAX_TOKENS).await?;

        Ok(parse_reply(&reply, user_query))
    }
}

/// Interpret a generation reply as a structured query
///
/// # Examples
///
/// ```
/// use ocean_nli::query::parser::parse_reply;
///
/// let query = parse_reply("```json\n{\"variable\": \"sst\"}\n```", "sst please");
/// assert_eq!(query.variable.as_deref(), Some("sst"));
///
/// let query = parse_reply("Sorry, I cannot help.", "sst please");
/// assert!(query.variable.is_none());
/// assert_eq!(query.additional_context.as_deref(), Some("sst please"));
/// ```
pub fn parse_reply(reply: &str, user_query: &str) -> StructuredQuery {
    let cleaned = strip_code_fence(reply);

    match serde_json::from_str::<Value>(cleaned) {
        Ok(value) => StructuredQuery::from_value(value).unwrap_or_else(|| {
            tracing::warn!("Parser reply was JSON but not an object");
            StructuredQuery::unparsed(user_query)
        }),
        Err(e) => {
            tracing::warn!("Parser reply was not valid JSON: {}", e);
            StructuredQuery::unparsed(user_query)
        }
    }
}

/// Remove surrounding markdown code-fence markers
pub fn strip_code_fence(reply: &str) -> &str {
    let mut text = reply.trim();
    if let Some(rest) = text.strip_prefix("```json") {
        text = rest;
    }
    if let Some(rest) = text.strip_prefix("```") {
        text = rest;
    }
    if let Some(rest) = text.strip_suffix("```") {
        text = rest;
    }
    text.trim()
}
