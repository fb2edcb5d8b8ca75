use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::erddap::FetchedData;
use crate::query::StructuredQuery;

/// Where an answer came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    /// Narrated from rows fetched from an ERDDAP server
    Erddap,
    /// General knowledge, no data retrieved
    Gemini,
    /// The pipeline failed
    Error,
}

impl std::fmt::Display for DataSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tag = match self {
            Self::Erddap => "erddap",
            Self::Gemini => "gemini",
            Self::Error => "error",
        };
        f.write_str(tag)
    }
}

/// One question and its answer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionEntry {
    pub timestamp: DateTime<Utc>,
    pub query: String,
    pub structured_query: StructuredQuery,
    pub data_source: DataSource,
    /// Present only when `data_source` is `erddap`
    pub erddap_data: Option<FetchedData>,
    pub answer: String,
}

/// A session's full history with per-source totals
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionHistory {
    pub session_id: String,
    pub history: Vec<SessionEntry>,
    pub total_queries: usize,
    pub erddap_queries: usize,
    pub gemini_queries: usize,
}

/// Aggregate counters across every session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    pub active_sessions: usize,
    pub total_queries: usize,
}
