use reqwest::StatusCode;
use std::time::Duration;
use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Failure of a CMS fetch. Any of these aborts the whole aggregation.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Failed to fetch from: {url}")]
    Transport {
        url: String,
        #[source]
        source: BoxError,
    },
    #[error("CMS rejected request to {url} with status {status}")]
    Rejected { url: String, status: StatusCode },
    #[error("CMS failed request to {url} with status {status}")]
    Upstream { url: String, status: StatusCode },
    #[error("Unexpected response shape from {url}: {reason}")]
    BadResponseShape { url: String, reason: String },
    #[error("Pagination did not terminate within {max_pages} pages")]
    PaginationLimit { max_pages: usize },
    #[error("Fetch did not complete within {deadline:?}")]
    DeadlineExceeded { deadline: Duration },
    #[error("Invalid CMS configuration: {0}")]
    InvalidConfig(String),
}

impl FetchError {
    pub fn transport<E>(url: &str, source: E) -> Self
    where
        E: Into<BoxError>,
    {
        Self::Transport {
            url: url.to_string(),
            source: source.into(),
        }
    }

    /// Classify a non-success status: 4xx is the caller's fault, the rest is upstream's.
    pub fn from_status(url: &str, status: StatusCode) -> Self {
        let url = url.to_string();
        if status.is_client_error() {
            Self::Rejected { url, status }
        } else {
            Self::Upstream { url, status }
        }
    }

    pub fn bad_shape(url: &str, reason: impl Into<String>) -> Self {
        Self::BadResponseShape {
            url: url.to_string(),
            reason: reason.into(),
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Rejected { status, .. } | Self::Upstream { status, .. } => Some(*status),
            _ => None,
        }
    }
}
