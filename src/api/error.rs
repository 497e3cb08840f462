use thiserror::Error;

/// Errors returned by the MaxBreak REST API client.
///
/// - `RequestFailed`: transport errors (wraps `reqwest::Error`)
/// - `InvalidRequest`: HTTP 400
/// - `NotFound`: HTTP 404
/// - `ServerError`: HTTP 5xx
/// - `Api`: any other non-2xx status code
/// - `Decode`: the body did not match the expected model
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Server error {status}: {message}")]
    ServerError { status: u16, message: String },

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ApiError>;

impl ApiError {
    /// Map a non-2xx status and its (possibly empty) JSON body to an error
    pub fn from_status(status: u16, body: &serde_json::Value) -> Self {
        let msg = body
            .get("error")
            .or_else(|| body.get("message"))
            .or_else(|| body.get("detail"))
            .and_then(|v| v.as_str())
            .unwrap_or("")
            .to_string();

        let or_default = |default: &str| {
            if msg.is_empty() {
                default.to_string()
            } else {
                msg.clone()
            }
        };

        match status {
            400 => ApiError::InvalidRequest {
                message: or_default("Bad request"),
            },
            404 => ApiError::NotFound {
                message: or_default("Not found"),
            },
            500..=599 => ApiError::ServerError {
                status,
                message: or_default("Internal server error"),
            },
            _ => ApiError::Api {
                status,
                message: or_default(&format!("HTTP {}", status)),
            },
        }
    }

    /// Whether retrying the same request could plausibly succeed
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            ApiError::RequestFailed(_) | ApiError::ServerError { .. }
        )
    }
}
