use anyhow::Context;
use domain::error::BackendError;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use shared::types::Result;
use std::time::Duration;
use tracing::debug;

/// One client per process; clones share the connection pool.
pub fn build_client(timeout: Option<Duration>) -> Result<Client> {
    let mut builder = Client::builder();
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder.build().context("Failed to build HTTP client")
}

/// Joins a base endpoint and a path with exactly one `/` between them.
pub(crate) fn join_url(endpoint: &str, path: &str) -> String {
    format!(
        "{}/{}",
        endpoint.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

pub(crate) fn status_error(status: StatusCode) -> BackendError {
    BackendError::Status {
        code: status.as_u16(),
        reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
    }
}

pub(crate) fn transport_error(err: reqwest::Error) -> BackendError {
    BackendError::Transport(err.to_string())
}

/// Rejects non-2xx responses, then decodes the body as `T`.
///
/// A rejected response is reported by its status alone; its body is read
/// only for the debug log.
pub(crate) async fn read_json<T: DeserializeOwned>(response: Response) -> std::result::Result<T, BackendError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        debug!(status = status.as_u16(), body = %shared::utils::preview(&body, 200), "remote service rejected request");
        return Err(status_error(status));
    }
    let text = response.text().await.map_err(transport_error)?;
    serde_json::from_str(&text).map_err(|e| BackendError::Malformed(e.to_string()))
}
