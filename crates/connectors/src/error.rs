use thiserror::Error;

/// Errors raised while fetching a single identifier from the remote resource.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport-level failure: connect, timeout, reset, TLS.
    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    /// The remote answered with a status that carries no usable payload.
    #[error("Unexpected HTTP status {status} from {url}")]
    Status { status: u16, url: String },

    /// The body could not be decoded as JSON.
    #[error("Failed to decode response body: {0}")]
    Decode(String),

    /// The body decoded but matches neither the found nor the not-found shape.
    #[error("Unrecognized response shape: {0}")]
    UnexpectedShape(String),

    #[error("Invalid resource URL '{0}'")]
    InvalidUrl(String),
}

impl FetchError {
    /// Whether repeating the same request could plausibly succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            FetchError::Http(err) => {
                err.is_timeout() || err.is_connect() || err.is_request() || err.is_body()
            }
            FetchError::Status { status, .. } => *status == 429 || *status >= 500,
            FetchError::Decode(_) | FetchError::UnexpectedShape(_) | FetchError::InvalidUrl(_) => {
                false
            }
        }
    }
}
