//! Mock AWS endpoint

use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Router;
use bytes::Bytes;
use chrono::Utc;
use dashmap::DashMap;
use http::header::AUTHORIZATION;
use http::{HeaderMap, Method, StatusCode, Uri};
use nimbus_auth::{parse_authorization_header, verify_signature, ReceivedRequest};
use nimbus_core::{ClientConfig, Credentials};
use parking_lot::Mutex;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::exchange::{MockResponse, RecordedRequest};

pub const TEST_ACCESS_KEY: &str = "AKIDNIMBUSTEST";
pub const TEST_SECRET_KEY: &str = "nimbus-test-secret";

#[derive(Default)]
struct MockState {
    responses: DashMap<String, VecDeque<MockResponse>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

/// An AWS endpoint on an ephemeral local port
///
/// Responses are queued per operation and played back in order. Every
/// request is recorded along with the result of checking its signature
/// against [`TEST_SECRET_KEY`].
pub struct MockServer {
    addr: SocketAddr,
    state: Arc<MockState>,
    task: JoinHandle<()>,
}

impl MockServer {
    pub async fn start() -> Result<Self, TestError> {
        let state = Arc::new(MockState::default());
        let app = Router::new().fallback(handle).with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let task = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                warn!(error = %e, "Mock endpoint stopped");
            }
        });

        info!(%addr, "Mock AWS endpoint listening");
        Ok(Self { addr, state, task })
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Client configuration pointing at this endpoint with the test credentials
    pub fn config(&self) -> ClientConfig {
        ClientConfig::default()
            .with_endpoint(self.url())
            .with_credentials(Credentials::new(TEST_ACCESS_KEY, TEST_SECRET_KEY, None))
    }

    /// Queue a response for the next call of `operation`
    pub fn enqueue(&self, operation: &str, response: MockResponse) {
        self.state
            .responses
            .entry(operation.to_string())
            .or_default()
            .push_back(response);
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().clone()
    }

    pub fn request_count(&self) -> usize {
        self.state.requests.lock().len()
    }

    /// Poll until at least `count` requests arrived; false on timeout
    pub async fn wait_for_requests(&self, count: usize, timeout: Duration) -> bool {
        let deadline = tokio::time::Instant::now() + timeout;
        while tokio::time::Instant::now() < deadline {
            if self.request_count() >= count {
                return true;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        self.request_count() >= count
    }
}

impl Drop for MockServer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn handle(
    State(state): State<Arc<MockState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let operation = operation_name(&headers, &body);
    let header_pairs: Vec<(String, String)> = headers
        .iter()
        .filter_map(|(k, v)| v.to_str().ok().map(|v| (k.as_str().to_string(), v.to_string())))
        .collect();

    let signature = check_signature(&method, &uri, &header_pairs, &body);
    if let Err(reason) = &signature {
        warn!(operation = %operation, reason = %reason, "Request signature rejected");
    }

    state.requests.lock().push(RecordedRequest {
        operation: operation.clone(),
        method: method.to_string(),
        path: uri.path().to_string(),
        headers: header_pairs,
        body,
        signature,
    });

    let queued = state
        .responses
        .get_mut(&operation)
        .and_then(|mut queue| queue.pop_front());

    match queued {
        Some(response) => {
            debug!(operation = %operation, status = response.status.as_u16(), "Mock response");
            response.into_response()
        }
        None => {
            warn!(operation = %operation, "No mock response queued");
            MockResponse::query_error(
                StatusCode::BAD_REQUEST,
                "MockNotConfigured",
                &format!("No response queued for {operation}"),
            )
            .into_response()
        }
    }
}

/// `DynamoDB_20120810.ListTables` -> `ListTables`, else the `Action` form parameter
fn operation_name(headers: &HeaderMap, body: &[u8]) -> String {
    if let Some(target) = headers.get("x-amz-target").and_then(|v| v.to_str().ok()) {
        return target
            .split_once('.')
            .map_or(target, |(_, op)| op)
            .to_string();
    }

    form_urlencoded::parse(body)
        .find(|(k, _)| k == "Action")
        .map(|(_, v)| v.into_owned())
        .unwrap_or_default()
}

fn check_signature(
    method: &Method,
    uri: &Uri,
    headers: &[(String, String)],
    body: &[u8],
) -> Result<(), String> {
    let authorization = headers
        .iter()
        .find(|(k, _)| k == AUTHORIZATION.as_str())
        .map(|(_, v)| v.as_str())
        .ok_or_else(|| "missing Authorization header".to_string())?;

    let auth = parse_authorization_header(authorization).map_err(|e| e.to_string())?;
    if auth.access_key != TEST_ACCESS_KEY {
        return Err(format!("unknown access key {}", auth.access_key));
    }

    let query: Vec<(String, String)> = uri
        .query()
        .map(|q| form_urlencoded::parse(q.as_bytes()).into_owned().collect())
        .unwrap_or_default();

    let request = ReceivedRequest {
        method: method.as_str(),
        path: uri.path(),
        query: &query,
        headers,
        payload: body,
    };
    verify_signature(&request, &auth, TEST_SECRET_KEY, &Utc::now()).map_err(|e| e.to_string())
}

/// Errors starting the mock endpoint
#[derive(Debug, Error)]
pub enum TestError {
    #[error("Failed to bind mock endpoint: {0}")]
    Io(#[from] std::io::Error),
}
