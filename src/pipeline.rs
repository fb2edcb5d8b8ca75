//! Query orchestration
//!
//! One question flows through parse, catalog search, up to
//! `max_fetch_attempts` data fetches, and answer formatting. The answer is
//! narrated from data when some candidate returned rows and from general
//! knowledge otherwise. Errors escaping any stage become an `ok: false`
//! response; every exchange, failed or not, is appended to the session.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::erddap::{self, CatalogSearch, DataFetcher, FetchedData};
use crate::error::Result;
use crate::prompts::templates::APOLOGY;
use crate::providers::{create_provider, Provider};
use crate::query::{QueryParser, StructuredQuery};
use crate::respond::ResponseFormatter;
use crate::session::{DataSource, SessionEntry, SessionStore};

/// Result of one question
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub ok: bool,
    pub structured_query: StructuredQuery,
    pub data_source: DataSource,
    pub erddap_data: Option<FetchedData>,
    pub answer: String,
    pub session_id: String,
}

struct Outcome {
    structured_query: StructuredQuery,
    data_source: DataSource,
    erddap_data: Option<FetchedData>,
    answer: String,
}

/// The end-to-end question answering pipeline
#[derive(Clone)]
pub struct Pipeline {
    parser: QueryParser,
    catalog: CatalogSearch,
    fetcher: DataFetcher,
    formatter: ResponseFormatter,
    sessions: SessionStore,
    max_fetch_attempts: usize,
}

impl Pipeline {
    /// Build a pipeline using the configured generation service
    ///
    /// # Errors
    ///
    /// Returns error if the provider or HTTP client cannot be created
    pub fn new(config: &Config) -> Result<Self> {
        let provider = create_provider(&config.generation)?;
        Self::with_provider(config, provider)
    }

    /// Build a pipeline around an existing provider
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created
    pub fn with_provider(config: &Config, provider: Arc<dyn Provider>) -> Result<Self> {
        let client = erddap::build_client()?;
        let stage_timeout = Duration::from_secs(config.generation.timeout_seconds);

        Ok(Self {
            parser: QueryParser::new(provider.clone()),
            catalog: CatalogSearch::new(client.clone(), &config.erddap),
            fetcher: DataFetcher::new(client, &config.erddap),
            formatter: ResponseFormatter::new(provider, stage_timeout),
            sessions: SessionStore::new(config.session.max_entries),
            max_fetch_attempts: config.erddap.max_fetch_attempts,
        })
    }

    /// Session history shared with the HTTP layer
    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// Catalog search shared with the HTTP layer
    pub fn catalog(&self) -> &CatalogSearch {
        &self.catalog
    }

    /// Answer `query` and record the exchange under `session_id`
    pub async fn handle(&self, query: &str, session_id: &str) -> ChatResponse {
        tracing::info!("Processing query for session {}: {}", session_id, query);

        let (ok, outcome) = match self.run(query).await {
            Ok(outcome) => (true, outcome),
            Err(e) => {
                tracing::error!("Query processing failed: {:#}", e);
                let outcome = Outcome {
                    structured_query: StructuredQuery::failed(e.to_string(), query),
                    data_source: DataSource::Error,
                    erddap_data: None,
                    answer: APOLOGY.to_string(),
                };
                (false, outcome)
            }
        };

        self.sessions
            .append(
                session_id,
                SessionEntry {
                    timestamp: Utc::now(),
                    query: query.to_string(),
                    structured_query: outcome.structured_query.clone(),
                    data_source: outcome.data_source,
                    erddap_data: outcome.erddap_data.clone(),
                    answer: outcome.answer.clone(),
                },
            )
            .await;

        tracing::info!("Answered from {}", outcome.data_source);

        ChatResponse {
            ok,
            structured_query: outcome.structured_query,
            data_source: outcome.data_source,
            erddap_data: outcome.erddap_data,
            answer: outcome.answer,
            session_id: session_id.to_string(),
        }
    }

    async fn run(&self, query: &str) -> Result<Outcome> {
        let structured = self.parser.parse(query).await?;
        tracing::debug!("Structured query: {:?}", structured);

        let data = match structured.primary_variable() {
            Some(variable) => self.find_data(variable, &structured).await,
            None => {
                tracing::info!("No variable identified, answering from general knowledge");
                None
            }
        };

        let outcome = match data {
            Some(data) => Outcome {
                answer: self.formatter.answer_with_data(query, &data).await,
                structured_query: structured,
                data_source: DataSource::Erddap,
                erddap_data: Some(data),
            },
            None => Outcome {
                answer: self.formatter.answer_without_data(query, &structured).await,
                structured_query: structured,
                data_source: DataSource::Gemini,
                erddap_data: None,
            },
        };

        Ok(outcome)
    }

    async fn find_data(&self, variable: &str, query: &StructuredQuery) -> Option<FetchedData> {
        let candidates = self
            .catalog
            .search(variable, query.location.as_deref())
            .await;
        tracing::info!("Found {} candidate datasets for {}", candidates.len(), variable);

        for candidate in candidates.iter().take(self.max_fetch_attempts) {
            match self.fetcher.fetch(candidate, query).await {
                Some(data) if data.has_rows() => {
                    tracing::info!(
                        "Retrieved {} rows from {} on {}",
                        data.total_rows,
                        data.dataset_id,
                        data.server
                    );
                    return Some(data);
                }
                Some(_) => tracing::debug!("{} returned no rows", candidate.dataset_id),
                None => {}
            }
        }

        None
    }
}
