//! Integration tests for the HTTP API
//!
//! Drives the axum router with `tower::ServiceExt::oneshot` against a
//! pipeline wired to wiremock servers.

mod common;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::*;
use ocean_nli::config::Config;
use ocean_nli::server::{create_router, AppState};
use ocean_nli::Pipeline;

/// Gemini mock that parses nothing and answers every fallback prompt
async fn general_knowledge_gemini() -> MockServer {
    let gemini = MockServer::start().await;
    mount_gemini(
        &gemini,
        PARSE_PROMPT,
        ResponseTemplate::new(200).set_body_json(gemini_reply("{\"variable\": null}")),
    )
    .await;
    mount_gemini(
        &gemini,
        FALLBACK_PROMPT,
        ResponseTemplate::new(200).set_body_json(gemini_reply("The ocean is vast.")),
    )
    .await;
    gemini
}

fn router(config: &Config) -> Router {
    create_router(AppState::new(Pipeline::new(config).unwrap()))
}

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn chat(query: &str, session_id: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/chat")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({"query": query, "session_id": session_id}).to_string(),
        ))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn test_chat_then_history_then_clear() {
    let gemini = general_knowledge_gemini().await;
    let app = router(&mock_config(
        vec!["http://127.0.0.1:1/erddap/".to_string()],
        &gemini,
    ));

    let (status, body) = send(&app, chat("why is the sea salty", "abc")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], true);
    assert_eq!(body["session_id"], "abc");
    assert_eq!(body["data_source"], "gemini");
    assert_eq!(body["answer"], "The ocean is vast.");
    assert_eq!(body["structured_query"]["variable"], Value::Null);

    let (_, history) = send(&app, get("/session/abc")).await;
    assert_eq!(history["session_id"], "abc");
    assert_eq!(history["total_queries"], 1);
    assert_eq!(history["gemini_queries"], 1);
    assert_eq!(history["erddap_queries"], 0);
    assert_eq!(history["history"][0]["query"], "why is the sea salty");
    assert_eq!(history["history"][0]["data_source"], "gemini");

    let (_, health) = send(&app, get("/health")).await;
    assert_eq!(health["active_sessions"], 1);
    assert_eq!(health["total_queries"], 1);

    let (status, cleared) = send(&app, delete("/session/abc")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cleared["message"], "Session abc cleared");

    let (status, again) = send(&app, delete("/session/abc")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(again["message"], "Session not found");

    let (_, history) = send(&app, get("/session/abc")).await;
    assert_eq!(history["history"], json!([]));
    assert_eq!(history["total_queries"], 0);
}

#[tokio::test]
async fn test_session_history_is_capped() {
    let gemini = general_knowledge_gemini().await;
    let mut config = mock_config(vec!["http://127.0.0.1:1/erddap/".to_string()], &gemini);
    config.session.max_entries = 3;
    let app = router(&config);

    for i in 0..5 {
        let (status, _) = send(&app, chat(&format!("question {}", i), "capped")).await;
        assert_eq!(status, StatusCode::OK);
    }

    let (_, history) = send(&app, get("/session/capped")).await;
    assert_eq!(history["total_queries"], 3);
    assert_eq!(history["history"][0]["query"], "question 2");
    assert_eq!(history["history"][2]["query"], "question 4");
}

#[tokio::test]
async fn test_chat_query_is_trimmed() {
    let gemini = general_knowledge_gemini().await;
    let app = router(&mock_config(
        vec!["http://127.0.0.1:1/erddap/".to_string()],
        &gemini,
    ));

    let (status, _) = send(&app, chat("  why is the sea salty \n", "trim")).await;
    assert_eq!(status, StatusCode::OK);

    let (_, history) = send(&app, get("/session/trim")).await;
    assert_eq!(history["history"][0]["query"], "why is the sea salty");

    let requests = gemini.received_requests().await.unwrap();
    let parse_body = String::from_utf8_lossy(&requests[0].body).to_string();
    assert!(parse_body.contains("\\\"why is the sea salty\\\""));
}

#[tokio::test]
async fn test_empty_query_rejected_without_calling_gemini() {
    let gemini = MockServer::start().await;
    mount_gemini_expect(&gemini, PARSE_PROMPT, ResponseTemplate::new(500), 0).await;
    let app = router(&mock_config(
        vec!["http://127.0.0.1:1/erddap/".to_string()],
        &gemini,
    ));

    let (status, body) = send(&app, chat("", "s")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"detail": "Query cannot be empty"}));

    let (_, history) = send(&app, get("/session/s")).await;
    assert_eq!(history["total_queries"], 0);
}

#[tokio::test]
async fn test_search_endpoint_echoes_location() {
    let erddap = MockServer::start().await;
    Mock::given(path("/erddap/search/index.json"))
        .and(query_param("searchFor", "chl OR chlor OR chlorophyll"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_fixture(&[(
            "erdMH1chla8day",
            "Chlorophyll-a, Aqua MODIS",
        )])))
        .mount(&erddap)
        .await;
    let gemini = MockServer::start().await;
    let app = router(&mock_config(vec![erddap_base(&erddap)], &gemini));

    let (status, body) = send(
        &app,
        get("/erddap/search/chlorophyll?location=Bay%20of%20Bengal"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["variable"], "chlorophyll");
    assert_eq!(body["location"], "Bay of Bengal");
    assert_eq!(body["datasets"][0]["dataset_id"], "erdMH1chla8day");
    assert_eq!(body["datasets"][0]["server"], erddap_base(&erddap));

    let (_, body) = send(&app, get("/erddap/search/chlorophyll")).await;
    assert_eq!(body["location"], Value::Null);
}

#[tokio::test]
async fn test_servers_endpoint_lists_configuration() {
    let gemini = MockServer::start().await;
    let servers = vec![
        "http://a.example/erddap/".to_string(),
        "http://b.example/erddap/".to_string(),
    ];
    let app = router(&mock_config(servers.clone(), &gemini));

    let (_, body) = send(&app, get("/erddap/servers")).await;
    assert_eq!(body["servers"], json!(servers));
}
