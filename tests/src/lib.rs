//! Local stand-ins for Azure AI Search and Azure OpenAI.
//!
//! [`MockServer`] binds `127.0.0.1:0`, answers every request with one canned
//! status and JSON body, and records what it received so tests can assert on
//! the exact wire format.

use application::{AnswerService, Retriever};
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::IntoResponse;
use axum::{Json, Router};
use domain::chat::GenerationParams;
use domain::models::SearchOptions;
use domain::prompt::PromptProfile;
use infrastructure::azure_openai::AzureOpenAiClient;
use infrastructure::azure_search::AzureSearchClient;
use infrastructure::config::{
    AzureOpenAiConfig, AzureSearchConfig, DEFAULT_OPENAI_API_VERSION, DEFAULT_SEARCH_API_VERSION,
};
use serde_json::Value;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

pub const SEARCH_KEY: &str = "search-test-key";
pub const OPENAI_KEY: &str = "openai-test-key";
pub const INDEX_NAME: &str = "hr-docs";
pub const DEPLOYMENT: &str = "gpt-4o";

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub headers: HeaderMap,
    /// `Value::Null` when the body was not JSON.
    pub body: Value,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

#[derive(Clone)]
struct MockState {
    status: StatusCode,
    body: Value,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

pub struct MockServer {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    handle: JoinHandle<()>,
}

impl MockServer {
    pub async fn start(status: u16, body: Value) -> Self {
        let requests: Arc<Mutex<Vec<RecordedRequest>>> = Arc::default();
        let state = MockState {
            status: StatusCode::from_u16(status).expect("valid status code"),
            body,
            requests: Arc::clone(&requests),
        };
        let app = Router::new().fallback(record).with_state(state);

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock server");
        let addr = listener.local_addr().expect("mock server address");
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("mock server");
        });

        Self {
            addr,
            requests,
            handle,
        }
    }

    /// Search response carrying one hit per entry of `contents`.
    pub async fn search_hits(contents: &[&str]) -> Self {
        let value: Vec<Value> = contents
            .iter()
            .enumerate()
            .map(|(i, c)| serde_json::json!({ "@search.score": 1.0 / (i as f64 + 1.0), "content": c }))
            .collect();
        Self::start(200, serde_json::json!({ "value": value })).await
    }

    /// Chat completion response whose first choice says `content`.
    pub async fn completion(content: &str) -> Self {
        Self::start(
            200,
            serde_json::json!({
                "id": "chatcmpl-test",
                "object": "chat.completion",
                "choices": [{
                    "index": 0,
                    "finish_reason": "stop",
                    "message": { "role": "assistant", "content": content }
                }]
            }),
        )
        .await
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn hits(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

impl Drop for MockServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn record(
    State(state): State<MockState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    let body = serde_json::from_slice(&body).unwrap_or(Value::Null);
    state.requests.lock().unwrap().push(RecordedRequest {
        method,
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        headers,
        body,
    });
    (state.status, Json(state.body.clone()))
}

/// An address nothing is listening on.
pub fn unreachable_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind scratch socket");
    let addr = listener.local_addr().expect("scratch address");
    drop(listener);
    format!("http://{}", addr)
}

/// Serves one request with `status` and a body that stops short of its
/// declared `content-length`, so reading it fails mid-stream.
pub async fn truncated_response(status: u16) -> String {
    let reason = StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or("Unknown");
    let head = format!(
        "HTTP/1.1 {} {}\r\ncontent-type: application/json\r\ncontent-length: 1024\r\n\r\n{{\"error\":",
        status, reason
    );
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind truncating server");
    let addr = listener.local_addr().expect("truncating server address");
    tokio::spawn(async move {
        if let Ok((mut socket, _)) = listener.accept().await {
            drain_request(&mut socket).await;
            let _ = socket.write_all(head.as_bytes()).await;
            let _ = socket.shutdown().await;
        }
    });
    format!("http://{}", addr)
}

/// Reads one request's head and body so the client is done writing.
async fn drain_request(socket: &mut TcpStream) {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => return,
            Ok(n) => buf.extend_from_slice(&chunk[..n]),
        }
        let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") else {
            continue;
        };
        let head = String::from_utf8_lossy(&buf[..end]).to_ascii_lowercase();
        let length = head
            .lines()
            .find_map(|line| line.strip_prefix("content-length:"))
            .and_then(|v| v.trim().parse::<usize>().ok())
            .unwrap_or(0);
        if buf.len() >= end + 4 + length {
            return;
        }
    }
}

/// HTTP client that ignores proxy variables so loopback traffic stays local.
pub fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .no_proxy()
        .build()
        .expect("test http client")
}

pub fn search_config(endpoint: &str) -> AzureSearchConfig {
    AzureSearchConfig {
        endpoint: endpoint.to_string(),
        index_name: INDEX_NAME.to_string(),
        api_key: SEARCH_KEY.to_string(),
        api_version: DEFAULT_SEARCH_API_VERSION.to_string(),
    }
}

pub fn openai_config(endpoint: &str) -> AzureOpenAiConfig {
    AzureOpenAiConfig {
        // deployed endpoints carry a trailing slash
        endpoint: format!("{}/", endpoint),
        deployment: DEPLOYMENT.to_string(),
        api_key: OPENAI_KEY.to_string(),
        api_version: DEFAULT_OPENAI_API_VERSION.to_string(),
    }
}

/// Production pipeline pointed at the given endpoints.
pub fn pipeline(search_url: &str, openai_url: &str) -> AnswerService {
    let client = http_client();
    AnswerService::new(
        Retriever::new(
            AzureSearchClient::new(&search_config(search_url), client.clone()),
            SearchOptions::default(),
        ),
        AzureOpenAiClient::new(&openai_config(openai_url), client),
        PromptProfile::default(),
        GenerationParams::default(),
    )
}
