use serde::Deserialize;
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum ResolveError {
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("HTTP request error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("malformed payload: {0}")]
    Data(#[from] serde_json::Error),

    #[error("backend rejected request: {0}")]
    Backend(String),
}

impl ResolveError {
    /// Transport-class failures (network errors, reqwest-level timeouts) as
    /// opposed to data-class failures (malformed or missing records). Both
    /// fall through to the next source; the split only matters for logging.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

/// Wire envelope shared by every backend action: a status discriminant plus
/// an optional human-readable message.
#[derive(Debug, Deserialize)]
pub struct BackendAck {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
}

impl BackendAck {
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }
}
