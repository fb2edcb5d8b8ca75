//! Ocean NLI - natural-language access to ERDDAP oceanographic data
//!
//! Questions are parsed into a structured query, matched against the
//! catalogs of a federation of ERDDAP servers, and answered from the first
//! dataset that returns rows. When no data can be found the answer comes
//! from the generation service's general knowledge instead.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `query`: structured query types, canned intents, and the parser
//! - `erddap`: catalog search and griddap retrieval
//! - `providers`: text-generation provider abstraction (Gemini)
//! - `prompts`: prompt builders and static answer templates
//! - `respond`: answer formatting with template fallback
//! - `pipeline`: end-to-end orchestration
//! - `session`: in-memory per-session history
//! - `server`: HTTP API
//! - `commands`: CLI command handlers
//! - `config`: configuration management and validation
//! - `error`: error types and result aliases
//! - `cli`: command-line interface definition
//!
//! # Example
//!
//! ```no_run
//! use ocean_nli::cli::{Cli, Commands};
//! use ocean_nli::{Config, Pipeline};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let cli = Cli {
//!         config: None,
//!         verbose: false,
//!         command: Commands::Servers,
//!     };
//!     let config = Config::load("config/config.yaml", &cli)?;
//!     config.validate()?;
//!
//!     let pipeline = Pipeline::new(&config)?;
//!     let response = pipeline.handle("sea surface temperature near Hawaii", "demo").await;
//!     println!("{}", response.answer);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod erddap;
pub mod error;
pub mod pipeline;
pub mod prompts;
pub mod providers;
pub mod query;
pub mod respond;
pub mod server;
pub mod session;

// Re-export commonly used types
pub use config::Config;
pub use error::{OceanError, Result};
pub use pipeline::{ChatResponse, Pipeline};
pub use query::StructuredQuery;
pub use session::{DataSource, SessionStore};

#[cfg(test)]
pub mod test_utils;
