use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::Utc;
use serde_json::{json, Value};

use super::error::ApiError;
use super::state::AppState;
use super::types::{
    ChatRequest, HealthComponents, HealthResponse, MessageResponse, SearchParams, SearchResponse,
    ServersResponse,
};
use crate::pipeline::ChatResponse;
use crate::session::SessionHistory;

pub async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ApiError> {
    let Json(req) = payload?;

    let query = req.query.trim();
    if query.is_empty() {
        return Err(ApiError::empty_query());
    }

    let session_id = req
        .session_id
        .filter(|id| !id.trim().is_empty())
        .unwrap_or_else(|| format!("session-{}", Utc::now().timestamp()));

    Ok(Json(state.pipeline.handle(query, &session_id).await))
}

pub async fn get_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Json<SessionHistory> {
    Json(state.pipeline.sessions().history(&session_id).await)
}

pub async fn clear_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Json<MessageResponse> {
    let message = if state.pipeline.sessions().clear(&session_id).await {
        tracing::info!("Cleared session {}", session_id);
        format!("Session {} cleared", session_id)
    } else {
        "Session not found".to_string()
    };
    Json(MessageResponse { message })
}

pub async fn list_servers(State(state): State<AppState>) -> Json<ServersResponse> {
    Json(ServersResponse {
        servers: state.pipeline.catalog().servers().to_vec(),
    })
}

pub async fn search_datasets(
    State(state): State<AppState>,
    Path(variable): Path<String>,
    Query(params): Query<SearchParams>,
) -> Json<SearchResponse> {
    let datasets = state
        .pipeline
        .catalog()
        .search(&variable, params.location.as_deref())
        .await;

    Json(SearchResponse {
        variable,
        location: params.location,
        datasets,
    })
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let stats = state.pipeline.sessions().stats().await;

    Json(HealthResponse {
        status: "ok".to_string(),
        service: "ocean-nli".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now(),
        active_sessions: stats.active_sessions,
        total_queries: stats.total_queries,
        erddap_servers: state.pipeline.catalog().servers().len(),
        components: HealthComponents {
            erddap: "enabled".to_string(),
            gemini: "enabled".to_string(),
            fallback_strategy: "erddap_first_then_gemini".to_string(),
        },
    })
}

pub async fn root() -> Json<Value> {
    Json(json!({
        "message": "Ocean NLI - ERDDAP data with generated answers",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Answers oceanographic questions from ERDDAP data, falling back to generated expert knowledge",
        "strategy": "Try ERDDAP first for real data, then answer from general knowledge",
        "endpoints": {
            "chat": "POST /chat - Main query endpoint",
            "session_history": "GET /session/{session_id} - Get session history",
            "clear_session": "DELETE /session/{session_id} - Clear session",
            "search_datasets": "GET /erddap/search/{variable} - Search ERDDAP datasets",
            "list_servers": "GET /erddap/servers - List ERDDAP servers",
            "health": "GET /health - Health check"
        }
    }))
}
