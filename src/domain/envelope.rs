// Backend response envelope: { success, data, message? }
use serde::Deserialize;

const DEFAULT_FAILURE_MESSAGE: &str = "请求失败";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EnvelopeError {
    #[error("backend rejected request: {0}")]
    Rejected(String),
    #[error("backend response carried no data")]
    MissingData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
}

impl<T> ApiEnvelope<T> {
    /// Unwrap the payload, turning `success: false` into an error that
    /// carries the backend's message.
    pub fn into_result(self) -> Result<T, EnvelopeError> {
        if !self.success {
            let message = self
                .message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_FAILURE_MESSAGE.to_string());
            return Err(EnvelopeError::Rejected(message));
        }
        self.data.ok_or(EnvelopeError::MissingData)
    }

    /// For mutations where the payload is irrelevant.
    pub fn into_ack(self) -> Result<Option<String>, EnvelopeError> {
        let message = self.message.filter(|m| !m.trim().is_empty());
        if self.success {
            Ok(message)
        } else {
            Err(EnvelopeError::Rejected(
                message.unwrap_or_else(|| DEFAULT_FAILURE_MESSAGE.to_string()),
            ))
        }
    }
}
