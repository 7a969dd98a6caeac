use reqwest::StatusCode;
use shared::error::ApiError;
use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} answered {status}{}", .error.as_ref().map(|e| format!(": {}", e.message)).unwrap_or_default())]
    Status {
        url: String,
        status: StatusCode,
        error: Option<ApiError>,
    },
    #[error("invalid url {0}")]
    InvalidUrl(String),
}

impl ClientError {
    pub(crate) fn transport(url: &Url, source: reqwest::Error) -> Self {
        Self::Transport {
            url: url.to_string(),
            source,
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
