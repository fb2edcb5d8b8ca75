//! Ocean NLI - natural-language interface to ERDDAP data
//!
#![doc = "Main entry point for the Ocean NLI service and CLI."]

use anyhow::Result;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use ocean_nli::cli::{Cli, Commands};
use ocean_nli::commands;
use ocean_nli::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Secrets usually live in a local .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse_args();

    init_tracing(cli.verbose);

    let config_path = cli.config.as_deref().unwrap_or("config/config.yaml");
    let config = Config::load(config_path, &cli)?;

    if cli.needs_generation() {
        config.validate()?;
    } else {
        config.validate_erddap()?;
    }

    match cli.command {
        Commands::Serve { .. } => {
            tracing::info!("Starting HTTP API");
            commands::run_serve(config).await?;
            Ok(())
        }
        Commands::Ask { query, json } => {
            tracing::debug!("Answering single query");
            commands::run_ask(config, &query, json).await?;
            Ok(())
        }
        Commands::Search { variable, location } => {
            commands::run_search(config, &variable, location.as_deref()).await?;
            Ok(())
        }
        Commands::Servers => {
            commands::run_servers(&config)?;
            Ok(())
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "ocean_nli=debug,tower_http=debug"
    } else {
        "ocean_nli=info,tower_http=info"
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
