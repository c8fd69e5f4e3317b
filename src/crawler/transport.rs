//! HTTP transport for the crawl engine
//!
//! The engine talks to the network through the [`Transport`] trait so that
//! tests can script responses without a server. The production
//! implementation is [`HttpTransport`], a thin wrapper over a reqwest client
//! configured to never follow redirects: 3xx responses come back to the
//! engine with their `Location` header intact.

use reqwest::{redirect::Policy, Client};
use std::time::Duration;
use thiserror::Error;

/// A successfully transported HTTP response
#[derive(Debug, Clone)]
pub struct TransportResponse {
    /// HTTP status code
    pub status_code: u16,

    /// Reason phrase for the status code
    pub reason_phrase: String,

    /// Content-Type header value, empty when absent
    pub content_type: String,

    /// Location header value, when present
    pub location: Option<String>,

    /// Response body
    pub body: String,
}

/// A fetch attempt that did not yield a usable response
///
/// `code` is the HTTP status for 4xx/5xx responses and 0 for network-level
/// failures (DNS, connect, timeout, body read).
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct TransportError {
    pub code: u16,
    pub message: String,
}

/// HTTP transport contract
///
/// Implementations must not follow redirects; a 3xx status and its
/// `Location` header are surfaced to the caller. Whether non-2xx statuses
/// are a success or a failure is the implementation's call;
/// [`HttpTransport`] treats 4xx/5xx as failures and everything else as
/// success.
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn get(&self, url: &str) -> Result<TransportResponse, TransportError>;
}

/// Builds the reqwest client used by [`HttpTransport`]
///
/// # Arguments
///
/// * `user_agent` - Full User-Agent header value
/// * `timeout` - Overall request timeout
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(user_agent: &str, timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent)
        .timeout(timeout)
        .connect_timeout(Duration::from_secs(10))
        .redirect(Policy::none()) // Handle redirects manually
        .gzip(true)
        .brotli(true)
        .build()
}

/// Default User-Agent when no configuration is supplied
pub(crate) fn default_user_agent() -> String {
    format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}

/// reqwest-backed [`Transport`]
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Creates a transport with the given User-Agent and request timeout
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(user_agent, timeout)?,
        })
    }

    /// Creates a transport with the crate's default User-Agent and a 30s
    /// timeout
    pub fn with_defaults() -> Result<Self, reqwest::Error> {
        Self::new(&default_user_agent(), Duration::from_secs(30))
    }
}

impl Transport for HttpTransport {
    async fn get(&self, url: &str) -> Result<TransportResponse, TransportError> {
        let response = self.client.get(url).send().await.map_err(classify_error)?;

        let status = response.status();
        let reason = status.canonical_reason().unwrap_or("").to_string();

        if status.is_client_error() || status.is_server_error() {
            return Err(TransportError {
                code: status.as_u16(),
                message: format!("HTTP {} {}", status.as_u16(), reason),
            });
        }

        let content_type = header_value(&response, "content-type").unwrap_or_default();
        let location = header_value(&response, "location");

        let body = response.text().await.map_err(|e| TransportError {
            code: 0,
            message: format!("Failed to read body: {}", e),
        })?;

        Ok(TransportResponse {
            status_code: status.as_u16(),
            reason_phrase: reason,
            content_type,
            location,
            body,
        })
    }
}

fn header_value(response: &reqwest::Response, name: &str) -> Option<String> {
    response
        .headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

/// Maps a reqwest error to a transport failure
fn classify_error(error: reqwest::Error) -> TransportError {
    let code = error
        .status()
        .map(|s| s.as_u16())
        .unwrap_or_default();

    let message = if error.is_timeout() {
        "Request timeout".to_string()
    } else if error.is_connect() {
        format!("Connection failed: {}", error)
    } else {
        error.to_string()
    };

    TransportError { code, message }
}
