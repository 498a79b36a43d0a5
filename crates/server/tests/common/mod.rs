//! Common test utilities: an in-process router fixture plus a fake Jackett
//! server bound to an ephemeral port, so client retry behavior and full
//! sync/search cycles run against real sockets without external
//! infrastructure.

// Each test binary compiles this module separately and uses a different
// subset of it.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, Request, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use jackbridge_core::{load_config_from_str, Config, InMemoryRegistry, JackettPlugin};
use jackbridge_server::api::create_router;
use jackbridge_server::state::AppState;

pub struct TestFixture {
    pub router: Router,
    pub plugin: Arc<JackettPlugin>,
    pub registry: Arc<InMemoryRegistry>,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestFixture {
    /// Fixture pointed at a fake Jackett instance. Retries are configured
    /// with no delay so retry-exhaustion tests stay fast.
    pub fn with_jackett(jackett: &FakeJackett, whitelist: &[&str]) -> Self {
        let indexers = whitelist
            .iter()
            .map(|w| format!("\"{}\"", w))
            .collect::<Vec<_>>()
            .join(", ");
        Self::from_toml(&format!(
            r#"
[jackett]
enabled = true
host = "{}"
api_key = "test-key"
indexers = [{}]
retry_delay_secs = 0
"#,
            jackett.base_url, indexers
        ))
    }

    /// Fixture with no usable Jackett connection.
    pub fn unconfigured() -> Self {
        Self::from_toml(
            r#"
[jackett]
host = ""
api_key = ""
"#,
        )
    }

    pub fn from_toml(toml: &str) -> Self {
        let config: Config = load_config_from_str(toml).expect("invalid test config");

        let registry = Arc::new(InMemoryRegistry::new());
        let plugin = Arc::new(
            JackettPlugin::new(config.jackett.clone(), registry.clone())
                .expect("failed to build plugin"),
        );

        let state = Arc::new(AppState::new(config, plugin.clone(), registry.clone()));

        TestFixture {
            router: create_router(state),
            plugin,
            registry,
        }
    }

    pub async fn get(&self, path: &str) -> TestResponse {
        let request = Request::builder()
            .uri(path)
            .body(Body::empty())
            .expect("request");
        self.send(request).await
    }

    pub async fn post_json(&self, path: &str, body: Value) -> TestResponse {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request");
        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("request failed");

        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("body")
            .to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::String(
                String::from_utf8_lossy(&bytes).into_owned(),
            ))
        };

        TestResponse { status, body }
    }
}

/// How the fake Jackett answers `GET /api/v2.0/indexers`.
pub enum ListBehavior {
    /// Always return this indexer list.
    Json(Value),
    /// Always return this HTTP status.
    Status(u16),
    /// Fail with 500 this many times, then return the list.
    FailuresThenJson { failures: usize, body: Value },
}

struct FakeJackettState {
    list_hits: AtomicUsize,
    dashboard_hits: AtomicUsize,
    list_behavior: Mutex<ListBehavior>,
    /// indexer id -> feed XML or an HTTP error status
    feeds: Mutex<HashMap<String, Result<String, u16>>>,
    feed_hits: Mutex<HashMap<String, usize>>,
}

/// A minimal Jackett lookalike serving the three endpoints the bridge
/// touches: dashboard login, indexer listing and torznab queries.
pub struct FakeJackett {
    pub base_url: String,
    state: Arc<FakeJackettState>,
}

impl FakeJackett {
    pub async fn spawn(indexers: Value) -> Self {
        Self::spawn_with(ListBehavior::Json(indexers)).await
    }

    pub async fn spawn_with(behavior: ListBehavior) -> Self {
        let state = Arc::new(FakeJackettState {
            list_hits: AtomicUsize::new(0),
            dashboard_hits: AtomicUsize::new(0),
            list_behavior: Mutex::new(behavior),
            feeds: Mutex::new(HashMap::new()),
            feed_hits: Mutex::new(HashMap::new()),
        });

        let router = Router::new()
            .route("/UI/Dashboard", post(dashboard_handler))
            .route("/api/v2.0/indexers", get(list_handler))
            .route(
                "/api/v2.0/indexers/{id}/results/torznab/api",
                get(feed_handler),
            )
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind fake jackett");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            axum::serve(listener, router).await.ok();
        });

        FakeJackett {
            base_url: format!("http://{}", addr),
            state,
        }
    }

    pub fn set_list(&self, indexers: Value) {
        *self.state.list_behavior.lock().unwrap() = ListBehavior::Json(indexers);
    }

    pub fn set_list_behavior(&self, behavior: ListBehavior) {
        *self.state.list_behavior.lock().unwrap() = behavior;
    }

    pub fn set_feed(&self, indexer: &str, xml: &str) {
        self.state
            .feeds
            .lock()
            .unwrap()
            .insert(indexer.to_string(), Ok(xml.to_string()));
    }

    pub fn set_feed_error(&self, indexer: &str, status: u16) {
        self.state
            .feeds
            .lock()
            .unwrap()
            .insert(indexer.to_string(), Err(status));
    }

    /// Requests seen by the indexer listing endpoint.
    pub fn list_hits(&self) -> usize {
        self.state.list_hits.load(Ordering::SeqCst)
    }

    /// Requests seen by the dashboard login endpoint.
    pub fn dashboard_hits(&self) -> usize {
        self.state.dashboard_hits.load(Ordering::SeqCst)
    }

    /// Requests seen by one indexer's torznab endpoint.
    pub fn feed_hits(&self, indexer: &str) -> usize {
        self.state
            .feed_hits
            .lock()
            .unwrap()
            .get(indexer)
            .copied()
            .unwrap_or(0)
    }
}

async fn dashboard_handler(State(state): State<Arc<FakeJackettState>>) -> StatusCode {
    state.dashboard_hits.fetch_add(1, Ordering::SeqCst);
    StatusCode::OK
}

async fn list_handler(
    State(state): State<Arc<FakeJackettState>>,
    headers: HeaderMap,
) -> Response {
    state.list_hits.fetch_add(1, Ordering::SeqCst);

    // Real Jackett rejects API requests without the key header.
    if headers.get("X-Api-Key").is_none() {
        return StatusCode::UNAUTHORIZED.into_response();
    }

    let mut behavior = state.list_behavior.lock().unwrap();
    match &mut *behavior {
        ListBehavior::Json(body) => Json(body.clone()).into_response(),
        ListBehavior::Status(status) => StatusCode::from_u16(*status)
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            .into_response(),
        ListBehavior::FailuresThenJson { failures, body } => {
            if *failures > 0 {
                *failures -= 1;
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            } else {
                Json(body.clone()).into_response()
            }
        }
    }
}

async fn feed_handler(
    State(state): State<Arc<FakeJackettState>>,
    Path(id): Path<String>,
) -> Response {
    *state.feed_hits.lock().unwrap().entry(id.clone()).or_insert(0) += 1;

    match state.feeds.lock().unwrap().get(&id) {
        Some(Ok(xml)) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/rss+xml; charset=utf-8")],
            xml.clone(),
        )
            .into_response(),
        Some(Err(status)) => StatusCode::from_u16(*status)
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            .into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

/// A torznab feed with `n` generated items.
pub fn feed_xml(indexer: &str, n: usize) -> String {
    let items: String = (0..n)
        .map(|i| {
            format!(
                r#"<item>
      <title>{indexer} result {i}</title>
      <guid>https://example.org/{indexer}/details/{i}</guid>
      <link>https://example.org/{indexer}/dl/{i}.torrent</link>
      <size>{}</size>
      <pubDate>Sat, 15 Jun 2024 10:30:00 +0000</pubDate>
      <torznab:attr name="seeders" value="{}" />
      <torznab:attr name="peers" value="{}" />
    </item>"#,
                1024 * (i + 1),
                10 * (i + 1),
                2 * (i + 1),
            )
        })
        .collect();

    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0" xmlns:torznab="http://torznab.com/schemas/2015/feed">
  <channel>
    <title>{indexer}</title>
    {items}
  </channel>
</rss>"#
    )
}
