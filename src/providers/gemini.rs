//! Gemini provider implementation for Ocean NLI
//!
//! This module implements the Provider trait for Google's Gemini
//! `generateContent` endpoint.

use crate::config::GenerationConfig;
use crate::error::{OceanError, Result};
use crate::providers::Provider;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Header carrying the API key. The key must stay out of request URLs.
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Gemini API provider
///
/// # Examples
///
/// ```
/// use ocean_nli::config::GenerationConfig;
/// use ocean_nli::providers::GeminiProvider;
///
/// let config = GenerationConfig {
///     api_key: "test-key".to_string(),
///     ..GenerationConfig::default()
/// };
/// let provider = GeminiProvider::new(config).unwrap();
/// assert_eq!(provider.model(), "gemini-1.5-flash");
/// ```
pub struct GeminiProvider {
    client: Client,
    config: GenerationConfig,
}

/// Request body for `generateContent`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<GeminiContent>,
    generation_config: GeminiGenerationConfig,
}

#[derive(Debug, Serialize, Deserialize, Default)]
struct GeminiContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiPart {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiGenerationConfig {
    max_output_tokens: u32,
    temperature: f64,
    top_p: f64,
    top_k: u32,
}

/// Response body from `generateContent`
#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    #[serde(default)]
    content: Option<GeminiContent>,
}

impl GenerateContentResponse {
    /// Text of the first part of the first candidate
    fn into_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .next()?
            .text
    }
}

impl GeminiProvider {
    /// Create a new Gemini provider instance
    ///
    /// # Errors
    ///
    /// Returns error if the API key is empty or the HTTP client cannot be built
    pub fn new(config: GenerationConfig) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            return Err(OceanError::MissingCredentials("gemini".to_string()).into());
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(concat!("ocean-nli/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| OceanError::Generation(format!("Failed to create HTTP client: {}", e)))?;

        tracing::info!(
            "Initialized Gemini provider: base={}, model={}",
            config.api_base,
            config.model
        );

        Ok(Self { client, config })
    }

    /// Get the configured model name
    pub fn model(&self) -> &str {
        &self.config.model
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.api_base.trim_end_matches('/'),
            self.config.model
        )
    }

    fn build_request(&self, prompt: &str, max_tokens: u32) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart {
                    text: Some(prompt.to_string()),
                }],
            }],
            generation_config: GeminiGenerationConfig {
                max_output_tokens: max_tokens,
                temperature: self.config.temperature,
                top_p: self.config.top_p,
                top_k: self.config.top_k,
            },
        }
    }
}

#[async_trait]
impl Provider for GeminiProvider {
    async fn generate(&self, prompt: &str, max_tokens: u32) -> Result<String> {
        let request = self.build_request(prompt, max_tokens);

        tracing::debug!(
            "Sending Gemini request: model={}, prompt_chars={}, max_tokens={}",
            self.config.model,
            prompt.len(),
            max_tokens
        );

        let response = self
            .client
            .post(self.endpoint())
            .header(API_KEY_HEADER, self.config.api_key.as_str())
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                let e = e.without_url();
                if e.is_timeout() {
                    tracing::error!("Gemini request timed out");
                    OceanError::Generation("Gemini API request timed out".to_string())
                } else {
                    tracing::error!("Gemini request failed: {}", e);
                    OceanError::Generation(format!("Gemini request failed: {}", e))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("Gemini returned error {}: {}", status, error_text);
            return Err(OceanError::Generation(format!(
                "Gemini API error: {} {}",
                status, error_text
            ))
            .into());
        }

        let payload: GenerateContentResponse = response.json().await.map_err(|e| {
            let e = e.without_url();
            tracing::error!("Failed to parse Gemini response: {}", e);
            OceanError::Generation(format!("Failed to parse Gemini response: {}", e))
        })?;

        payload.into_text().ok_or_else(|| {
            tracing::warn!("Gemini response contained no generated text");
            OceanError::Generation("Gemini response contained no generated text".to_string())
                .into()
        })
    }

    fn name(&self) -> &str {
        "gemini"
    }
}
