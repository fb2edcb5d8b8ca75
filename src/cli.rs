//! Command-line interface definition for Ocean NLI
//!
//! This module defines the CLI structure using clap's derive API,
//! providing commands to serve the HTTP API, run a single query,
//! and inspect the configured ERDDAP federation.

use clap::{Parser, Subcommand};

/// Ocean NLI - natural-language access to oceanographic data
///
/// Answers questions from live ERDDAP data when it can be found and
/// falls back to generated expert explanations when it cannot.
#[derive(Parser, Debug, Clone)]
#[command(name = "ocean-nli")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/config.yaml")]
    pub config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for Ocean NLI
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run the HTTP API
    Serve {
        /// Address to bind (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Answer a single question and exit
    Ask {
        /// The question to answer
        query: String,

        /// Print the full response as JSON
        #[arg(long)]
        json: bool,
    },

    /// Search the ERDDAP catalogs for datasets matching a variable
    Search {
        /// Variable to search for (e.g. salinity)
        variable: String,

        /// Optional location, echoed in the output
        #[arg(short, long)]
        location: Option<String>,
    },

    /// List the configured ERDDAP servers
    Servers,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Whether the selected command needs the generation service
    pub fn needs_generation(&self) -> bool {
        matches!(self.command, Commands::Serve { .. } | Commands::Ask { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_serve() {
        let cli = Cli::try_parse_from(["ocean-nli", "serve", "--port", "9000"]).unwrap();
        assert_eq!(cli.config, Some("config/config.yaml".to_string()));
        match cli.command {
            Commands::Serve { host, port } => {
                assert!(host.is_none());
                assert_eq!(port, Some(9000));
            }
            _ => panic!("Expected Serve command"),
        }
    }

    #[test]
    fn test_cli_parse_ask_json() {
        let cli = Cli::try_parse_from([
            "ocean-nli",
            "--verbose",
            "ask",
            "salinity near Mumbai",
            "--json",
        ])
        .unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Ask { query, json } => {
                assert_eq!(query, "salinity near Mumbai");
                assert!(json);
            }
            _ => panic!("Expected Ask command"),
        }
    }

    #[test]
    fn test_cli_parse_search_with_location() {
        let cli = Cli::try_parse_from([
            "ocean-nli",
            "-c",
            "custom.yaml",
            "search",
            "sst",
            "--location",
            "Arabian Sea",
        ])
        .unwrap();
        assert_eq!(cli.config, Some("custom.yaml".to_string()));
        match cli.command {
            Commands::Search { variable, location } => {
                assert_eq!(variable, "sst");
                assert_eq!(location.as_deref(), Some("Arabian Sea"));
            }
            _ => panic!("Expected Search command"),
        }
    }

    #[test]
    fn test_needs_generation() {
        let serve = Cli::try_parse_from(["ocean-nli", "serve"]).unwrap();
        let servers = Cli::try_parse_from(["ocean-nli", "servers"]).unwrap();
        assert!(serve.needs_generation());
        assert!(!servers.needs_generation());
    }

    #[test]
    fn test_cli_requires_command() {
        assert!(Cli::try_parse_from(["ocean-nli"]).is_err());
    }
}
