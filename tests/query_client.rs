//! LogClient against a mock log server.
//!
//! Verifies the request each filter state produces and how error bodies
//! turn into user-facing messages.

use cmdlv::model::{FilterKey, FilterParams, FinalStatus, LogId};
use cmdlv::source::{FetchError, LogClient};
use cmdlv::state::FilterState;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> LogClient {
    LogClient::new(&server.uri(), Duration::from_secs(5)).unwrap()
}

fn summary_json(id: &str) -> serde_json::Value {
    json!({
        "id": id,
        "user_query": "find big files",
        "final_status": "accepted",
        "model": "sonnet",
        "timestamp": "2024-01-15T14:30:45Z",
        "iteration_count": 1,
        "command_preview": "du -sh *"
    })
}

fn list_json(ids: &[&str], total: u64) -> serde_json::Value {
    json!({
        "logs": ids.iter().map(|id| summary_json(id)).collect::<Vec<_>>(),
        "total": total,
        "limit": 20,
        "offset": 0
    })
}

#[tokio::test]
async fn default_filters_request_newest_first() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/logs"))
        .and(query_param("sort", "timestamp"))
        .and(query_param("order", "desc"))
        .and(query_param_is_missing("status"))
        .and(query_param_is_missing("offset"))
        .respond_with(ResponseTemplate::new(200).set_body_json(list_json(&["a", "b"], 2)))
        .expect(1)
        .mount(&server)
        .await;

    let page = client(&server)
        .fetch_logs(&FilterParams::default())
        .await
        .unwrap();

    assert_eq!(page.total, 2);
    assert_eq!(page.logs.len(), 2);
    assert_eq!(page.logs[0].final_status, FinalStatus::Accepted);
    assert_eq!(page.logs[0].tmux_session, None);
}

#[tokio::test]
async fn empty_search_is_omitted_from_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/logs"))
        .and(query_param("status", "rejected"))
        .and(query_param_is_missing("search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(list_json(&[], 0)))
        .expect(1)
        .mount(&server)
        .await;

    let mut filters = FilterState::default();
    filters.set_filter(FilterKey::Status, Some("rejected"));
    filters.set_filter(FilterKey::Search, Some(""));

    let page = client(&server).fetch_logs(filters.params()).await.unwrap();
    assert!(page.logs.is_empty());
    assert_eq!(page.page_range(), None);
}

#[tokio::test]
async fn date_only_bounds_are_widened_to_whole_days() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/logs"))
        .and(query_param("from", "2024-01-01T00:00:00Z"))
        .and(query_param("to", "2024-01-31T23:59:59Z"))
        .respond_with(ResponseTemplate::new(200).set_body_json(list_json(&["a"], 1)))
        .expect(1)
        .mount(&server)
        .await;

    let mut filters = FilterState::default();
    filters.set_filter(FilterKey::From, Some("2024-01-01"));
    filters.set_filter(FilterKey::To, Some("2024-01-31"));

    let page = client(&server).fetch_logs(filters.params()).await.unwrap();
    assert_eq!(page.logs[0].id.as_str(), "a");
}

#[tokio::test]
async fn second_page_sends_offset() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/logs"))
        .and(query_param("offset", "20"))
        .and(query_param("limit", "20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(list_json(&["u"], 21)))
        .expect(1)
        .mount(&server)
        .await;

    let mut filters = FilterState::default();
    filters.set_filter(FilterKey::Limit, Some("20"));
    assert!(filters.next_page(21, 20));

    client(&server).fetch_logs(filters.params()).await.unwrap();
}

#[tokio::test]
async fn list_error_uses_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/logs"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"error": "invalid sort field"})),
        )
        .mount(&server)
        .await;

    let err = client(&server)
        .fetch_logs(&FilterParams::default())
        .await
        .unwrap_err();

    assert_eq!(
        err,
        FetchError::Request {
            status: 400,
            message: "invalid sort field".to_string()
        }
    );
    assert_eq!(err.to_string(), "invalid sort field");
}

#[tokio::test]
async fn list_error_without_json_body_uses_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/logs"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&server)
        .await;

    let err = client(&server)
        .fetch_logs(&FilterParams::default())
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Failed to fetch logs");
}

#[tokio::test]
async fn missing_log_reports_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/logs/nope"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"error": "log not found"})))
        .mount(&server)
        .await;

    let err = client(&server)
        .fetch_log_by_id(&LogId::new("nope").unwrap())
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "log not found");
    assert!(matches!(err, FetchError::Request { status: 404, .. }));
}

#[tokio::test]
async fn detail_error_without_message_uses_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/logs/x"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"error": ""})))
        .mount(&server)
        .await;

    let err = client(&server)
        .fetch_log_by_id(&LogId::new("x").unwrap())
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Failed to fetch log");
}

#[tokio::test]
async fn detail_is_parsed() {
    let server = MockServer::start().await;
    let body = json!({
        "id": "2024-01-15T14-30-45Z",
        "user_query": "find big files",
        "context_sources": {"claude_md_content": "", "terminal_context": "$ ls"},
        "iterations": [{
            "feedback": "",
            "model_input": {"system_prompt": "sys", "user_prompt": "usr"},
            "model_output": {"raw_response": "{}", "command": "du -sh *", "explanation": "sizes"},
            "timestamp": "2024-01-15T14:30:46Z"
        }],
        "metadata": {
            "timestamp": "2024-01-15T14:30:45Z",
            "model": "haiku",
            "final_status": "quit",
            "iteration_count": 1,
            "tmux_info": {"in_tmux": false}
        }
    });
    Mock::given(method("GET"))
        .and(path("/api/v1/logs/2024-01-15T14-30-45Z"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(&server)
        .await;

    let log = client(&server)
        .fetch_log_by_id(&LogId::new("2024-01-15T14-30-45Z").unwrap())
        .await
        .unwrap();
    assert_eq!(log.metadata.final_status, FinalStatus::Quit);
    assert_eq!(log.last_iteration().unwrap().model_output.command, "du -sh *");
    assert!(!log.metadata.tmux_info.in_tmux);
}

#[tokio::test]
async fn malformed_success_body_is_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/logs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"rows": []})))
        .mount(&server)
        .await;

    let err = client(&server)
        .fetch_logs(&FilterParams::default())
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::InvalidResponse { .. }));
}

#[tokio::test]
async fn unreachable_server_is_network_error() {
    // Nothing listens on the discard port
    let client = LogClient::new("http://127.0.0.1:9", Duration::from_millis(500)).unwrap();
    let err = client
        .fetch_logs(&FilterParams::default())
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::Network { .. }));
}
