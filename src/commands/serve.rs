use crate::config::Config;
use crate::error::Result;
use crate::pipeline::Pipeline;
use crate::server::{self, AppState};

/// Start the HTTP API and block until it stops
pub async fn run_serve(config: Config) -> Result<()> {
    let pipeline = Pipeline::new(&config)?;
    let addr = config.server.bind_addr();

    tracing::info!(
        "Starting Ocean NLI with {} ERDDAP servers and model {}",
        config.erddap.servers.len(),
        config.generation.model
    );

    server::serve(AppState::new(pipeline), &addr).await
}
