//! Configuration management for Ocean NLI
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from files, environment variables, and CLI overrides.
//!
//! Precedence, lowest to highest: built-in defaults, the YAML file,
//! environment variables (including a `.env` file loaded by `main`),
//! command-line flags.

use crate::error::{OceanError, Result};
use crate::query::BoundingBox;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

/// Environment variable holding the generation service secret
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Main configuration structure for Ocean NLI
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Text-generation service settings
    #[serde(default)]
    pub generation: GenerationConfig,
    /// ERDDAP catalog and data fetch settings
    #[serde(default)]
    pub erddap: ErddapConfig,
    /// Session history settings
    #[serde(default)]
    pub session: SessionConfig,
    /// HTTP listener settings
    #[serde(default)]
    pub server: ServerConfig,
}

/// Gemini text-generation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// API key; normally supplied through `GEMINI_API_KEY`
    #[serde(default)]
    pub api_key: String,

    /// Model used for `generateContent`
    #[serde(default = "default_model")]
    pub model: String,

    /// API base URL (overridable for tests and local mocks)
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f64,

    /// Nucleus sampling cutoff
    #[serde(default = "default_top_p")]
    pub top_p: f64,

    /// Top-k sampling cutoff
    #[serde(default = "default_top_k")]
    pub top_k: u32,

    /// Per-call timeout in seconds
    #[serde(default = "default_generation_timeout")]
    pub timeout_seconds: u64,
}

fn default_model() -> String {
    "gemini-1.5-flash".to_string()
}

fn default_api_base() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_temperature() -> f64 {
    0.3
}

fn default_top_p() -> f64 {
    0.8
}

fn default_top_k() -> u32 {
    40
}

fn default_generation_timeout() -> u64 {
    30
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: default_model(),
            api_base: default_api_base(),
            temperature: default_temperature(),
            top_p: default_top_p(),
            top_k: default_top_k(),
            timeout_seconds: default_generation_timeout(),
        }
    }
}

/// ERDDAP federation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErddapConfig {
    /// Server base URLs, queried in declaration order
    #[serde(default = "default_servers")]
    pub servers: Vec<String>,

    /// Timeout for a catalog search request (seconds)
    #[serde(default = "default_search_timeout")]
    pub search_timeout_seconds: u64,

    /// Timeout for metadata and griddap requests (seconds)
    #[serde(default = "default_fetch_timeout")]
    pub fetch_timeout_seconds: u64,

    /// Page size requested from each catalog search
    #[serde(default = "default_items_per_page")]
    pub items_per_page: u32,

    /// Maximum candidates kept after merging all servers
    #[serde(default = "default_max_datasets")]
    pub max_datasets: usize,

    /// Maximum candidates tried before falling back
    #[serde(default = "default_max_fetch_attempts")]
    pub max_fetch_attempts: usize,

    /// Maximum rows retained from a griddap response
    #[serde(default = "default_max_rows")]
    pub max_rows: usize,

    /// Trailing window used when a query carries no time bounds (days)
    #[serde(default = "default_window_days")]
    pub default_window_days: i64,

    /// Area used when a query carries neither coordinates nor a bbox
    #[serde(default = "default_bbox")]
    pub default_bbox: BoundingBox,
}

fn default_servers() -> Vec<String> {
    vec![
        "https://coastwatch.pfeg.noaa.gov/erddap/".to_string(),
        "https://upwell.pfeg.noaa.gov/erddap/".to_string(),
        "https://oceandata.sci.gsfc.nasa.gov/erddap/".to_string(),
        "https://data.marine.copernicus.eu/erddap/".to_string(),
    ]
}

fn default_search_timeout() -> u64 {
    15
}

fn default_fetch_timeout() -> u64 {
    30
}

fn default_items_per_page() -> u32 {
    20
}

fn default_max_datasets() -> usize {
    10
}

fn default_max_fetch_attempts() -> usize {
    3
}

fn default_max_rows() -> usize {
    100
}

fn default_window_days() -> i64 {
    30
}

fn default_bbox() -> BoundingBox {
    BoundingBox {
        min_lat: 20.0,
        max_lat: 25.0,
        min_lon: 60.0,
        max_lon: 80.0,
    }
}

impl Default for ErddapConfig {
    fn default() -> Self {
        Self {
            servers: default_servers(),
            search_timeout_seconds: default_search_timeout(),
            fetch_timeout_seconds: default_fetch_timeout(),
            items_per_page: default_items_per_page(),
            max_datasets: default_max_datasets(),
            max_fetch_attempts: default_max_fetch_attempts(),
            max_rows: default_max_rows(),
            default_window_days: default_window_days(),
            default_bbox: default_bbox(),
        }
    }
}

/// Session history configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Entries kept per session; older entries are dropped first
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,
}

fn default_max_entries() -> usize {
    50
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_entries: default_max_entries(),
        }
    }
}

/// HTTP listener configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// Socket address string for binding
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Config {
    /// Load configuration from file, environment, and CLI
    ///
    /// A missing file is not an error: defaults are used and a warning is
    /// logged.
    ///
    /// # Errors
    ///
    /// Returns error if the file exists but cannot be read or parsed
    pub fn load(path: &str, cli: &crate::cli::Cli) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            tracing::warn!("Config file not found at {}, using defaults", path);
            Self::default()
        };

        config.apply_env_vars();
        config.apply_cli_overrides(cli);

        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| OceanError::Config(format!("Failed to read config file: {}", e)))?;
        serde_yaml::from_str(&contents)
            .map_err(|e| OceanError::Config(format!("Failed to parse config: {}", e)).into())
    }

    fn apply_env_vars(&mut self) {
        if let Ok(api_key) = std::env::var(API_KEY_ENV) {
            self.generation.api_key = api_key;
        }

        if let Ok(model) = std::env::var("OCEAN_NLI_GEMINI_MODEL") {
            self.generation.model = model;
        }

        if let Ok(api_base) = std::env::var("OCEAN_NLI_GEMINI_API_BASE") {
            self.generation.api_base = api_base;
        }

        if let Ok(host) = std::env::var("OCEAN_NLI_HOST") {
            self.server.host = host;
        }

        if let Some(port) = parse_env("OCEAN_NLI_PORT") {
            self.server.port = port;
        }

        if let Ok(servers) = std::env::var("OCEAN_NLI_ERDDAP_SERVERS") {
            let servers: Vec<String> = servers
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect();
            if servers.is_empty() {
                tracing::warn!("OCEAN_NLI_ERDDAP_SERVERS is empty, keeping configured servers");
            } else {
                self.erddap.servers = servers;
            }
        }

        if let Some(max_rows) = parse_env("OCEAN_NLI_MAX_ROWS") {
            self.erddap.max_rows = max_rows;
        }

        if let Some(max_entries) = parse_env("OCEAN_NLI_MAX_SESSION_ENTRIES") {
            self.session.max_entries = max_entries;
        }
    }

    fn apply_cli_overrides(&mut self, cli: &crate::cli::Cli) {
        if cli.verbose {
            tracing::debug!("Verbose mode enabled");
        }

        if let crate::cli::Commands::Serve { host, port } = &cli.command {
            if let Some(host) = host {
                self.server.host = host.clone();
            }
            if let Some(port) = port {
                self.server.port = *port;
            }
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns error if the API key is missing, no usable ERDDAP server is
    /// configured, or any bound is zero
    pub fn validate(&self) -> Result<()> {
        if self.generation.api_key.trim().is_empty() {
            return Err(OceanError::MissingCredentials(format!(
                "{} must be set in environment",
                API_KEY_ENV
            ))
            .into());
        }

        if self.generation.model.is_empty() {
            return Err(OceanError::Config("generation.model cannot be empty".to_string()).into());
        }

        if self.generation.timeout_seconds == 0 {
            return Err(OceanError::Config(
                "generation.timeout_seconds must be greater than 0".to_string(),
            )
            .into());
        }

        self.validate_erddap()
    }

    /// Validate only the ERDDAP federation and bounds
    ///
    /// Used by commands that never call the generation service.
    ///
    /// # Errors
    ///
    /// Returns error if no usable ERDDAP server is configured or any bound is zero
    pub fn validate_erddap(&self) -> Result<()> {
        if self.erddap.servers.is_empty() {
            return Err(
                OceanError::Config("At least one ERDDAP server is required".to_string()).into(),
            );
        }

        for server in &self.erddap.servers {
            let parsed = url::Url::parse(server).map_err(|e| {
                OceanError::Config(format!("Invalid ERDDAP server URL {}: {}", server, e))
            })?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(OceanError::Config(format!(
                    "ERDDAP server must use http or https: {}",
                    server
                ))
                .into());
            }
        }

        let bounds = [
            ("erddap.search_timeout_seconds", self.erddap.search_timeout_seconds as usize),
            ("erddap.fetch_timeout_seconds", self.erddap.fetch_timeout_seconds as usize),
            ("erddap.items_per_page", self.erddap.items_per_page as usize),
            ("erddap.max_datasets", self.erddap.max_datasets),
            ("erddap.max_fetch_attempts", self.erddap.max_fetch_attempts),
            ("erddap.max_rows", self.erddap.max_rows),
            ("session.max_entries", self.session.max_entries),
        ];
        for (name, value) in bounds {
            if value == 0 {
                return Err(OceanError::Config(format!("{} must be greater than 0", name)).into());
            }
        }

        if self.erddap.default_window_days <= 0 {
            return Err(OceanError::Config(
                "erddap.default_window_days must be greater than 0".to_string(),
            )
            .into());
        }

        Ok(())
    }
}

fn parse_env<T: FromStr>(name: &str) -> Option<T> {
    let raw = std::env::var(name).ok()?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!("Invalid {}: {}", name, raw);
            None
        }
    }
}
