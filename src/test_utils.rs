//! Test utilities for Ocean NLI
//!
//! A scripted generation provider, configuration pointing at local mocks,
//! and ERDDAP JSON fixtures.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::config::Config;
use crate::erddap::{FetchedData, SpatialBounds, TimeRange};
use crate::error::{OceanError, Result};
use crate::providers::Provider;

/// Provider that replays canned replies in order
///
/// Once the script is exhausted every call fails.
pub struct ScriptedProvider {
    replies: Mutex<VecDeque<Result<String>>>,
    calls: Mutex<Vec<(String, u32)>>,
    delay: Option<Duration>,
}

impl ScriptedProvider {
    pub fn new(replies: Vec<Result<String>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            calls: Mutex::new(Vec::new()),
            delay: None,
        }
    }

    /// A provider whose every call fails
    pub fn failing() -> Self {
        Self::new(Vec::new())
    }

    /// Sleep before answering each call
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.calls.lock().unwrap().iter().map(|(p, _)| p.clone()).collect()
    }

    pub fn max_tokens(&self) -> Vec<u32> {
        self.calls.lock().unwrap().iter().map(|(_, t)| *t).collect()
    }
}

#[async_trait]
impl Provider for ScriptedProvider {
    async fn generate(&self, prompt: &str, max_tokens: u32) -> Result<String> {
        self.calls
            .lock()
            .unwrap()
            .push((prompt.to_string(), max_tokens));

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let next = self.replies.lock().unwrap().pop_front();
        next.unwrap_or_else(|| Err(OceanError::Generation("script exhausted".to_string()).into()))
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

/// Valid configuration with a single ERDDAP server
pub fn test_config(server: &str) -> Config {
    let mut config = Config::default();
    config.generation.api_key = "test-key".to_string();
    config.generation.timeout_seconds = 5;
    config.erddap.servers = vec![server.to_string()];
    config.erddap.search_timeout_seconds = 2;
    config.erddap.fetch_timeout_seconds = 2;
    config
}

/// Fetched SST data with `rows` daily rows starting 2024-01-01
pub fn sample_fetched_data(rows: usize) -> FetchedData {
    let data_rows = (0..rows)
        .map(|i| {
            vec![
                json!(format!("2024-01-{:02}T00:00:00Z", i + 1)),
                json!(20.0),
                json!(60.0),
                json!(27.0 + i as f64 / 10.0),
            ]
        })
        .collect();

    FetchedData {
        dataset_id: "erdTestSst".to_string(),
        dataset_title: "Test SST Analysis".to_string(),
        server: "http://localhost/erddap/".to_string(),
        variable: "analysed_sst".to_string(),
        columns: vec![
            "time".to_string(),
            "latitude".to_string(),
            "longitude".to_string(),
            "analysed_sst".to_string(),
        ],
        data_rows,
        total_rows: rows,
        query_url: "http://localhost/erddap/griddap/erdTestSst.json".to_string(),
        time_range: TimeRange {
            start: "2024-01-01T00:00:00Z".to_string(),
            end: "2024-01-31T23:59:59Z".to_string(),
        },
        spatial_bounds: SpatialBounds::Area(Config::default().erddap.default_bbox),
    }
}

/// Catalog search response listing `(dataset_id, title)` pairs
pub fn search_fixture(datasets: &[(&str, &str)]) -> Value {
    let rows: Vec<Value> = datasets
        .iter()
        .map(|(id, title)| json!(["", "", "", title, "summary", id]))
        .collect();

    json!({
        "table": {
            "columnNames": ["griddap", "subset", "tabledap", "Title", "Summary", "Dataset ID"],
            "columnTypes": ["String", "String", "String", "String", "String", "String"],
            "rows": rows
        }
    })
}

/// Dataset info response advertising `variables`
pub fn info_fixture(variables: &[&str]) -> Value {
    let mut rows = vec![json!(["attribute", "NC_GLOBAL", "title", "String", "Test"])];
    rows.push(json!(["dimension", "time", "", "double", ""]));
    for variable in variables {
        rows.push(json!(["variable", variable, "", "float", ""]));
    }

    json!({
        "table": {
            "columnNames": ["Row Type", "Variable Name", "Attribute Name", "Data Type", "Value"],
            "rows": rows
        }
    })
}

/// Griddap response with `rows` rows of `variable`
pub fn griddap_fixture(variable: &str, rows: usize) -> Value {
    let rows: Vec<Value> = (0..rows)
        .map(|i| json!([format!("2024-01-{:02}T00:00:00Z", i % 28 + 1), 21.0, 65.0, 35.0 + i as f64 / 100.0]))
        .collect();

    json!({
        "table": {
            "columnNames": ["time", "latitude", "longitude", variable],
            "rows": rows
        }
    })
}
