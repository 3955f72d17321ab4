use std::time::Duration;

use reqwest::header::{ACCEPT, AUTHORIZATION};

use crate::error::{FetchError, Result};

/// A single GET against the API.
///
/// `query` is empty when `url` is a server-issued cursor link; those already
/// carry every parameter the server needs.
#[derive(Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub url: String,
    pub query: Vec<(String, String)>,
    pub bearer_token: String,
}

impl std::fmt::Debug for PageRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageRequest")
            .field("url", &self.url)
            .field("query", &self.query)
            .field("bearer_token", &"<redacted>")
            .finish()
    }
}

/// Status and body of a completed response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The only network capability the fetcher needs.
///
/// Implementations return `Ok` for any response the server produced,
/// whatever its status; status handling belongs to the caller.
pub trait Transport {
    fn get(&self, request: &PageRequest) -> Result<RawResponse>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn get(&self, request: &PageRequest) -> Result<RawResponse> {
        (**self).get(request)
    }
}

/// Blocking reqwest transport.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    /// Build a transport. `None` keeps reqwest's default request timeout.
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::blocking::Client::builder()
            .user_agent(concat!("miroframe/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(FetchError::ClientSetup)?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn get(&self, request: &PageRequest) -> Result<RawResponse> {
        let mut builder = self
            .client
            .get(&request.url)
            .header(AUTHORIZATION, format!("Bearer {}", request.bearer_token))
            .header(ACCEPT, "application/json");
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }

        let to_transport_error = |source: reqwest::Error| FetchError::Transport {
            url: request.url.clone(),
            source,
        };
        let response = builder.send().map_err(to_transport_error)?;
        let status = response.status().as_u16();
        let body = response.text().map_err(to_transport_error)?;
        tracing::trace!(url = %request.url, status, bytes = body.len(), "response received");

        Ok(RawResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_redacts_token() {
        let request = PageRequest {
            url: "https://api.example/items".to_string(),
            query: Vec::new(),
            bearer_token: "secret-token".to_string(),
        };
        let rendered = format!("{request:?}");
        assert!(!rendered.contains("secret-token"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn success_range_is_2xx_only() {
        let response = |status| RawResponse {
            status,
            body: String::new(),
        };
        assert!(response(200).is_success());
        assert!(response(204).is_success());
        assert!(!response(301).is_success());
        assert!(!response(401).is_success());
        assert!(!response(500).is_success());
    }

    #[test]
    fn builds_with_and_without_timeout() {
        assert!(HttpTransport::new(None).is_ok());
        assert!(HttpTransport::new(Some(Duration::from_secs(5))).is_ok());
    }
}
