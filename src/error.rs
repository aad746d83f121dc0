#[derive(Debug, thiserror::Error)]
pub enum SpoilerError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unexpected HTTP status {status} from {url}")]
    Status { status: u16, url: String },

    #[error("Scryfall API error {status} ({code}): {details}")]
    Api {
        status: u16,
        code: String,
        details: String,
    },

    #[error("Rate limited by upstream (retry after {retry_after_secs:?}s)")]
    RateLimited { retry_after_secs: Option<u64> },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl SpoilerError {
    /// True when the upstream reported that the requested object or search
    /// has no results. A bare 404 without Scryfall's error object is not
    /// counted: it points at a wrong endpoint, not a missing object.
    pub fn is_not_found(&self) -> bool {
        match self {
            SpoilerError::NotFound(_) => true,
            SpoilerError::Api { status, code, .. } => *status == 404 || code == "not_found",
            _ => false,
        }
    }

    /// True when a search ran upstream and matched nothing.
    pub fn is_empty_search(&self) -> bool {
        matches!(self, SpoilerError::Api { code, .. } if code == "not_found")
    }

    /// True when the upstream asked the caller to slow down (HTTP 429).
    pub fn is_rate_limited(&self) -> bool {
        match self {
            SpoilerError::RateLimited { .. } => true,
            SpoilerError::Api { status, .. } | SpoilerError::Status { status, .. } => {
                *status == 429
            }
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, SpoilerError>;
