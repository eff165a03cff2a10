//! Out-of-order responses through the real Fetcher.
//!
//! A slow response for superseded filters must never replace the page for
//! the filters the user is looking at now.

use cmdlv::model::{FilterKey, LogId};
use cmdlv::source::{FetchOutcome, Fetcher, LogClient};
use cmdlv::state::AppState;
use serde_json::json;
use std::time::Duration;
use tokio::runtime::Handle;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn page_for(query: &str) -> serde_json::Value {
    json!({
        "logs": [{
            "id": format!("log-{query}"),
            "user_query": format!("query {query}"),
            "final_status": "accepted",
            "model": "sonnet",
            "timestamp": "2024-01-15T14:30:45Z",
            "iteration_count": 1,
            "command_preview": "ls"
        }],
        "total": 1,
        "limit": 20,
        "offset": 0
    })
}

/// Issue whatever requests the state needs, like the event loop does.
fn sync(state: &mut AppState, fetcher: &mut Fetcher) {
    if let Some(params) = state.list_request_needed() {
        let request = fetcher.fetch_logs(params.clone());
        state.begin_list(params, request);
    }
    if let Some(id) = state.detail_request_needed() {
        let request = fetcher.fetch_log(id.clone());
        state.begin_detail(id, request);
    }
}

/// Poll until `count` outcomes have arrived.
async fn collect(fetcher: &Fetcher, count: usize) -> Vec<FetchOutcome> {
    let mut outcomes = Vec::new();
    for _ in 0..200 {
        outcomes.extend(fetcher.poll());
        if outcomes.len() >= count {
            break;
        }
        tokio::time::sleep(Duration::from_millis(25)).await;
    }
    assert_eq!(outcomes.len(), count, "outcomes did not arrive in time");
    outcomes
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn slow_superseded_list_response_is_discarded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/logs"))
        .and(query_param("search", "a"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(page_for("a"))
                .set_delay(Duration::from_millis(400)),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/logs"))
        .and(query_param("search", "b"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_for("b")))
        .mount(&server)
        .await;

    let client = LogClient::new(&server.uri(), Duration::from_secs(5)).unwrap();
    let mut fetcher = Fetcher::new(client, Handle::current());
    let mut state = AppState::default();

    state.filters.set_filter(FilterKey::Search, Some("a"));
    sync(&mut state, &mut fetcher);
    state.filters.set_filter(FilterKey::Search, Some("b"));
    sync(&mut state, &mut fetcher);

    let mut outcomes = collect(&fetcher, 2).await;
    // Fast response first, then the slow one
    outcomes.sort_by_key(FetchOutcome::request);
    outcomes.reverse();

    let applied: Vec<bool> = outcomes
        .into_iter()
        .map(|outcome| state.apply_outcome(outcome))
        .collect();
    assert_eq!(applied, vec![true, false]);

    assert!(!state.list.is_loading());
    assert_eq!(state.rows().len(), 1);
    assert_eq!(state.rows()[0].user_query, "query b");
    assert_eq!(
        state.list.requested_for().and_then(|p| p.search.as_deref()),
        Some("b")
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn leaving_detail_before_response_keeps_listing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/logs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_for("x")))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/logs/slow"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(json!({"error": "log not found"}))
                .set_delay(Duration::from_millis(200)),
        )
        .mount(&server)
        .await;

    let client = LogClient::new(&server.uri(), Duration::from_secs(5)).unwrap();
    let mut fetcher = Fetcher::new(client, Handle::current());
    let mut state = AppState::default().viewing(LogId::new("slow").unwrap());

    sync(&mut state, &mut fetcher);
    state.back();

    for outcome in collect(&fetcher, 2).await {
        state.apply_outcome(outcome);
    }

    assert_eq!(state.viewed_log(), None);
    assert_eq!(state.rows()[0].user_query, "query x");
    assert_eq!(state.detail.error(), Some("log not found"));
}
