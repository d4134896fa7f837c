#![allow(dead_code)]

//! In-process stand-in for the manifest server

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use manifest_client::console::Console;
use manifest_client::ManifestClient;
use serde_json::{json, Value};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub body: Value,
}

#[derive(Debug, Clone)]
pub struct MockBehavior {
    pub healthy: bool,
    /// Formats whose converter answers 500
    pub failing_formats: HashSet<String>,
    /// Formats whose converter answers 200 with an empty body
    pub empty_formats: HashSet<String>,
    pub validation: Value,
    pub url_manifest: Value,
}

impl Default for MockBehavior {
    fn default() -> Self {
        Self {
            healthy: true,
            failing_formats: HashSet::new(),
            empty_formats: HashSet::new(),
            validation: json!({"valid": true, "errors": []}),
            url_manifest: json!({
                "metadata": {"title": "Example Domain"},
                "styles": {},
                "structure": {"div": {"text": "This domain is for use in illustrative examples."}}
            }),
        }
    }
}

impl MockBehavior {
    pub fn failing(mut self, format: &str) -> Self {
        self.failing_formats.insert(format.to_string());
        self
    }

    pub fn empty(mut self, format: &str) -> Self {
        self.empty_formats.insert(format.to_string());
        self
    }
}

struct MockState {
    behavior: MockBehavior,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl MockState {
    fn record(&self, method: &str, path: String, body: Value) {
        self.requests.lock().unwrap().push(RecordedRequest {
            method: method.to_string(),
            path,
            body,
        });
    }
}

pub struct MockServer {
    pub base_url: String,
    state: Arc<MockState>,
}

impl MockServer {
    pub fn start() -> Self {
        Self::with_behavior(MockBehavior::default())
    }

    pub fn with_behavior(behavior: MockBehavior) -> Self {
        let state = Arc::new(MockState {
            behavior,
            requests: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .route("/health", get(health))
            .route("/api/validate", post(validate))
            .route("/api/convert/:target", post(convert))
            .with_state(state.clone());

        let (tx, rx) = std::sync::mpsc::channel();
        std::thread::spawn(move || {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .expect("mock server runtime");
            runtime.block_on(async move {
                let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
                    .await
                    .expect("bind mock server");
                tx.send(listener.local_addr().expect("mock server address"))
                    .expect("report mock server address");
                axum::serve(listener, app).await.expect("serve mock server");
            });
        });

        let addr = rx.recv().expect("mock server failed to start");
        Self {
            base_url: format!("http://{}", addr),
            state,
        }
    }

    /// Quiet client pointed at this server
    pub fn client(&self) -> ManifestClient {
        ManifestClient::new(&self.base_url)
            .unwrap()
            .with_console(Console::silent())
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }

    pub fn requests_to(&self, path: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.path == path)
            .collect()
    }
}

/// Base URL on which nothing is listening
pub fn unreachable_base_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}", port)
}

pub fn unreachable_client() -> ManifestClient {
    ManifestClient::new(&unreachable_base_url())
        .unwrap()
        .with_console(Console::silent())
}

async fn health(State(state): State<Arc<MockState>>) -> StatusCode {
    state.record("GET", "/health".to_string(), Value::Null);
    if state.behavior.healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

async fn validate(State(state): State<Arc<MockState>>, Json(body): Json<Value>) -> Json<Value> {
    state.record("POST", "/api/validate".to_string(), body);
    Json(state.behavior.validation.clone())
}

async fn convert(
    State(state): State<Arc<MockState>>,
    Path(target): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    let title = body["manifest"]["metadata"]["title"]
        .as_str()
        .unwrap_or("untitled")
        .to_string();
    state.record("POST", format!("/api/convert/{}", target), body);

    if target == "url-to-manifest" {
        return Json(state.behavior.url_manifest.clone()).into_response();
    }

    let Some(format) = target.strip_prefix("manifest-to-") else {
        return StatusCode::NOT_FOUND.into_response();
    };

    if state.behavior.failing_formats.contains(format) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("{} converter crashed", format),
        )
            .into_response();
    }
    if state.behavior.empty_formats.contains(format) {
        return (StatusCode::OK, String::new()).into_response();
    }

    (StatusCode::OK, format!("<!-- {} -->\n{}", format, title)).into_response()
}
