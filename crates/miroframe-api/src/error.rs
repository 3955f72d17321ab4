const BODY_SNIPPET_CHARS: usize = 512;

/// Errors that can occur while fetching items from the API.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The configured API base URL cannot be used to build request URLs.
    #[error("invalid API base URL {url}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    ClientSetup(#[source] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("GET {url} returned HTTP {status}: {body}")]
    Http {
        status: u16,
        url: String,
        body: String,
    },

    /// The response body is not the expected page shape.
    #[error("malformed response from {url}: {source}")]
    MalformedResponse {
        url: String,
        source: serde_json::Error,
    },

    /// The request could not be sent or its body could not be read.
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        source: reqwest::Error,
    },
}

impl FetchError {
    pub(crate) fn http(status: u16, url: impl Into<String>, body: &str) -> Self {
        Self::Http {
            status,
            url: url.into(),
            body: body.trim().chars().take(BODY_SNIPPET_CHARS).collect(),
        }
    }

    /// HTTP status carried by the error, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True when the underlying request hit the client timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Transport { source, .. } if source.is_timeout())
    }
}

pub type Result<T> = std::result::Result<T, FetchError>;
