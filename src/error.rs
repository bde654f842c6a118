use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    /// Non-2xx answer; `message` is the service's detail or `HTTP <status>`.
    #[error("{message}")]
    Rejected { status: u16, message: String },

    #[error("{0}")]
    Network(#[from] reqwest::Error),

    #[error("invalid response: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<serde_json::Value>,
}

/// Human-readable message for a failed response body.
pub fn rejection_message(status: u16, body: &[u8]) -> String {
    let detail = serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.detail)
        .and_then(|d| match d {
            serde_json::Value::Null => None,
            serde_json::Value::String(s) if s.is_empty() => None,
            serde_json::Value::String(s) => Some(s),
            other => Some(other.to_string()),
        });
    detail.unwrap_or_else(|| format!("HTTP {}", status))
}

impl ApiError {
    pub fn rejected(status: u16, body: &[u8]) -> Self {
        ApiError::Rejected { status, message: rejection_message(status, body) }
    }
}
