//! HTTP API
//!
//! JSON endpoints over the pipeline, session store and catalog search.
//! Every route allows any origin and is traced.

mod error;
mod handlers;
mod state;
pub mod types;

pub use error::ApiError;
pub use state::AppState;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::error::{OceanError, Result};

/// Build the application router
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::root))
        .route("/chat", post(handlers::chat))
        .route(
            "/session/:session_id",
            get(handlers::get_session).delete(handlers::clear_session),
        )
        .route("/erddap/servers", get(handlers::list_servers))
        .route("/erddap/search/:variable", get(handlers::search_datasets))
        .route("/health", get(handlers::health))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind `addr` and serve until the process is stopped
///
/// # Errors
///
/// Returns error if the address cannot be bound or the server fails
pub async fn serve(state: AppState, addr: &str) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| OceanError::Config(format!("binding to {}: {}", addr, e)))?;
    tracing::info!("Listening on http://{}", addr);

    axum::serve(listener, create_router(state)).await?;
    Ok(())
}
