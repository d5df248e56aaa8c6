use thiserror::Error;

/// Failure talking to a remote search or completion service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("{code} - {reason}")]
    Status { code: u16, reason: String },

    #[error("malformed response: {0}")]
    Malformed(String),
}

impl BackendError {
    /// Short text suitable for showing in place of an answer.
    pub fn status_line(&self) -> String {
        match self {
            Self::Status { code, reason } => format!("{} - {}", code, reason),
            Self::Transport(_) => "Network Error".to_string(),
            Self::Malformed(_) => "Malformed Response".to_string(),
        }
    }
}
