//! HTTP transport shared by the catalog services
//!
//! The services only ever need "GET this URL and give me the body", so that is
//! all the transport trait exposes. The production implementation wraps a
//! blocking reqwest client with a per-request timeout.

use crate::metadata_retrieval::FetchError;
use reqwest::Url;
use std::time::Duration;
use tracing::debug;

/// Default base URL of the TVMaze API
pub const TVMAZE_BASE_URL: &str = "https://api.tvmaze.com/";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL all endpoint paths are joined onto (default: TVMaze)
    pub base_url: String,
    /// Timeout applied to every request (default: 10 seconds)
    pub timeout: Duration,
    /// User-Agent header sent with every request
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: TVMAZE_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: USER_AGENT.to_string(),
        }
    }
}

/// Minimal HTTP abstraction used by the catalog services.
///
/// Implementors fetch the body of a GET request. Any failure to obtain a
/// successful response must be reported as a `FetchError`; interpreting the
/// body is left to the caller.
pub trait HttpTransport {
    /// Performs a GET request and returns the response body as text.
    fn get_text(&self, url: &Url) -> Result<String, FetchError>;
}

impl<T: HttpTransport + ?Sized> HttpTransport for &T {
    fn get_text(&self, url: &Url) -> Result<String, FetchError> {
        (**self).get_text(url)
    }
}

/// `HttpTransport` backed by a blocking reqwest client.
pub struct ReqwestTransport {
    client: reqwest::blocking::Client,
    timeout: Duration,
}

impl ReqwestTransport {
    /// Builds the underlying client from the given configuration.
    pub fn new(config: &ClientConfig) -> Result<Self, FetchError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| FetchError::Network {
                url: config.base_url.clone(),
                reason: format!("failed to build HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            timeout: config.timeout,
        })
    }

    fn network_error(&self, url: &Url, error: reqwest::Error) -> FetchError {
        let reason = if error.is_timeout() {
            format!("timed out after {}s", self.timeout.as_secs())
        } else {
            error.to_string()
        };

        FetchError::Network {
            url: url.to_string(),
            reason,
        }
    }
}

impl HttpTransport for ReqwestTransport {
    fn get_text(&self, url: &Url) -> Result<String, FetchError> {
        debug!(%url, "sending GET request");

        let response = self
            .client
            .get(url.clone())
            .send()
            .map_err(|e| self.network_error(url, e))?;

        let status = response.status();
        debug!(%url, status = status.as_u16(), "received response");

        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().map_err(|e| self.network_error(url, e))
    }
}
