//! Error types for Ocean NLI
//!
//! This module defines the error types used throughout the service,
//! using `thiserror` for ergonomic error handling. Most upstream failures
//! never escape their call site: they are logged and turned into a
//! degraded result. The variants here describe what went wrong when they do.

use thiserror::Error;

/// Main error type for Ocean NLI operations
#[derive(Error, Debug)]
pub enum OceanError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Text-generation service errors (non-200, timeout, missing text)
    #[error("Generation error: {0}")]
    Generation(String),

    /// ERDDAP catalog search errors
    #[error("Catalog search error: {0}")]
    Catalog(String),

    /// ERDDAP metadata or griddap fetch errors
    #[error("Fetch error: {0}")]
    Fetch(String),

    /// Required secret for an outbound service is not configured
    #[error("Missing credentials for service: {0}")]
    MissingCredentials(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type alias for Ocean NLI operations
///
/// Uses `anyhow::Error` so call sites can attach context while still
/// downcasting to [`OceanError`] where the variant matters.
pub type Result<T> = anyhow::Result<T>;
