use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::erddap::DatasetCandidate;

/// Body of `POST /chat`
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub session_id: Option<String>,
}

/// Query string of `GET /erddap/search/:variable`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchParams {
    pub location: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub variable: String,
    pub location: Option<String>,
    pub datasets: Vec<DatasetCandidate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServersResponse {
    pub servers: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub timestamp: DateTime<Utc>,
    pub active_sessions: usize,
    pub total_queries: usize,
    pub erddap_servers: usize,
    pub components: HealthComponents,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthComponents {
    pub erddap: String,
    pub gemini: String,
    pub fallback_strategy: String,
}
