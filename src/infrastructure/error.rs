use crate::domain::envelope::EnvelopeError;
use reqwest::StatusCode;

/// Failures talking to the market data backend.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("backend returned status {status} for {path}: {body}")]
    Status {
        path: String,
        status: StatusCode,
        body: String,
    },

    #[error("invalid JSON from {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Envelope(#[from] EnvelopeError),
}

impl BackendError {
    /// Text suitable for the inline error notice of a panel.
    pub fn user_message(&self) -> String {
        match self {
            BackendError::Transport(e) if e.is_timeout() => "请求超时".to_string(),
            BackendError::Transport(_) => "无法连接数据服务".to_string(),
            BackendError::Status { status, .. } => format!("服务返回错误 ({})", status.as_u16()),
            BackendError::Json { .. } => "数据格式错误".to_string(),
            BackendError::Envelope(EnvelopeError::Rejected(message)) => message.clone(),
            BackendError::Envelope(EnvelopeError::MissingData) => "暂无数据".to_string(),
        }
    }
}

/// Message shown to the user for a failed backend call; falls back to the
/// error's own text for failures that did not come from the backend client.
pub fn failure_message(error: &anyhow::Error) -> String {
    error
        .downcast_ref::<BackendError>()
        .map(BackendError::user_message)
        .unwrap_or_else(|| error.to_string())
}
