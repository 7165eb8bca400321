// Shared transport configuration for building reqwest::Client instances.
//
// Every request carries a JSON content type, so it is installed once as a
// default header instead of per call. Authorization is never a default
// header: the token is supplied per request.

use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};

use crate::error::Error;

const USER_AGENT: &str = concat!("hrdash/", env!("CARGO_PKG_VERSION"));

/// Shared transport configuration for building HTTP clients.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: USER_AGENT.into(),
        }
    }
}

impl TransportConfig {
    /// Override the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build a `reqwest::Client` from this config.
    pub fn build_client(&self) -> Result<reqwest::Client, Error> {
        self.build_client_with_headers(HeaderMap::new())
    }

    /// Build a `reqwest::Client` with additional default headers.
    ///
    /// `Content-Type` and `Accept` are always `application/json`.
    pub fn build_client_with_headers(&self, mut headers: HeaderMap) -> Result<reqwest::Client, Error> {
        let json = HeaderValue::from_static("application/json");
        headers.insert(CONTENT_TYPE, json.clone());
        headers.insert(ACCEPT, json);

        reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(self.user_agent.as_str())
            .default_headers(headers)
            .build()
            .map_err(|e| Error::Client(format!("failed to build HTTP client: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_timeout_is_thirty_seconds() {
        assert_eq!(TransportConfig::default().timeout, Duration::from_secs(30));
    }

    #[test]
    fn builds_client() {
        let cfg = TransportConfig::default().with_timeout(Duration::from_secs(5));
        assert_eq!(cfg.timeout, Duration::from_secs(5));
        assert!(cfg.build_client().is_ok());
    }
}
