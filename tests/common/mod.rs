#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;

use serde_json::{json, Value};
use tempfile::TempDir;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use ocean_nli::config::Config;

/// Marker phrases identifying which prompt a Gemini request carries
pub const PARSE_PROMPT: &str = "Parse this oceanographic query";
pub const DATA_PROMPT: &str = "analyzing real oceanographic data";
pub const FALLBACK_PROMPT: &str = "unable to find suitable datasets";

const GEMINI_PATH: &str = "/v1beta/models/gemini-1.5-flash:generateContent";

/// Configuration pointing at local mock servers
pub fn mock_config(erddap_servers: Vec<String>, gemini: &MockServer) -> Config {
    let mut config = Config::default();
    config.generation.api_key = "test-key".to_string();
    config.generation.api_base = gemini.uri();
    config.generation.timeout_seconds = 5;
    config.erddap.servers = erddap_servers;
    config.erddap.search_timeout_seconds = 2;
    config.erddap.fetch_timeout_seconds = 2;
    config
}

/// Base URL of an ERDDAP installation on a mock server
pub fn erddap_base(server: &MockServer) -> String {
    format!("{}/erddap/", server.uri())
}

pub fn gemini_reply(text: &str) -> Value {
    json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": text}]},
            "finishReason": "STOP"
        }]
    })
}

/// Answer Gemini requests whose prompt contains `marker`
pub async fn mount_gemini(server: &MockServer, marker: &str, response: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path(GEMINI_PATH))
        .and(body_string_contains(marker))
        .respond_with(response)
        .mount(server)
        .await;
}

/// Like [`mount_gemini`] but verified to be hit exactly `times` times
pub async fn mount_gemini_expect(
    server: &MockServer,
    marker: &str,
    response: ResponseTemplate,
    times: u64,
) {
    Mock::given(method("POST"))
        .and(path(GEMINI_PATH))
        .and(body_string_contains(marker))
        .respond_with(response)
        .expect(times)
        .mount(server)
        .await;
}

pub fn search_fixture(datasets: &[(&str, &str)]) -> Value {
    let rows: Vec<Value> = datasets
        .iter()
        .map(|(id, title)| json!(["", "", "", title, "summary", id]))
        .collect();

    json!({
        "table": {
            "columnNames": ["griddap", "subset", "tabledap", "Title", "Summary", "Dataset ID"],
            "rows": rows
        }
    })
}

pub fn info_fixture(variables: &[&str]) -> Value {
    let rows: Vec<Value> = variables
        .iter()
        .map(|v| json!(["variable", v, "", "float", ""]))
        .collect();

    json!({
        "table": {
            "columnNames": ["Row Type", "Variable Name", "Attribute Name", "Data Type", "Value"],
            "rows": rows
        }
    })
}

pub fn griddap_fixture(variable: &str, rows: usize) -> Value {
    let rows: Vec<Value> = (0..rows)
        .map(|i| json!(["2023-03-15T00:00:00Z", 0.5, -140.0 + i as f64, 35.0]))
        .collect();

    json!({
        "table": {
            "columnNames": ["time", "latitude", "longitude", variable],
            "rows": rows
        }
    })
}

pub fn temp_config_file(contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("failed to create tempdir");
    let config_path = temp_dir.path().join("config.yaml");
    fs::write(&config_path, contents).expect("failed to write config file");
    (temp_dir, config_path)
}
