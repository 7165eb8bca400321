// HR admin API HTTP client
//
// Wraps `reqwest::Client` with base-URL joining, bearer authorization and
// error-body parsing. Endpoint groups (resources, auth) are implemented as
// inherent methods in their own modules; this one only knows transport.

use reqwest::{Method, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, trace};
use url::Url;

use crate::auth::BearerToken;
use crate::error::Error;
use crate::transport::TransportConfig;

/// Base URL used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Error body shape: `{"message": "..."}` or `{"error": "..."}`.
#[derive(serde::Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
}

/// Raw HTTP client for the HR admin REST API.
///
/// Holds no session state. Authorized calls take the bearer token as an
/// argument, so whoever owns the session decides which token each request
/// carries.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    /// Create a client for `base_url` using the given transport settings.
    pub fn new(base_url: &str, transport: &TransportConfig) -> Result<Self, Error> {
        let base_url = Url::parse(base_url)?;
        let http = transport.build_client()?;
        Ok(Self { http, base_url })
    }

    /// Create a client around an already-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    /// The API base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Append path segments to the base URL, percent-encoding each one.
    pub(crate) fn endpoint<I>(&self, segments: I) -> Result<Url, Error>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| Error::Client(format!("base URL cannot hold a path: {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    // ── Request helpers ──────────────────────────────────────────────

    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        url: Url,
        token: &BearerToken,
        query: &[(&str, String)],
    ) -> Result<T, Error> {
        debug!("GET {url} {query:?}");
        let builder = self.http.get(url).query(query);
        Self::send(token.authorize(builder)).await
    }

    /// POST with a JSON body. Login is the only unauthenticated call.
    pub(crate) async fn post<T: DeserializeOwned>(
        &self,
        url: Url,
        token: Option<&BearerToken>,
        body: &(impl Serialize + Sync + ?Sized),
    ) -> Result<T, Error> {
        debug!("POST {url}");
        let builder = self.http.post(url).json(body);
        let builder = match token {
            Some(token) => token.authorize(builder),
            None => builder,
        };
        Self::send(builder).await
    }

    pub(crate) async fn put<T: DeserializeOwned>(
        &self,
        url: Url,
        token: &BearerToken,
        body: &(impl Serialize + Sync + ?Sized),
    ) -> Result<T, Error> {
        self.with_body(Method::PUT, url, token, body).await
    }

    pub(crate) async fn patch<T: DeserializeOwned>(
        &self,
        url: Url,
        token: &BearerToken,
        body: &(impl Serialize + Sync + ?Sized),
    ) -> Result<T, Error> {
        self.with_body(Method::PATCH, url, token, body).await
    }

    pub(crate) async fn delete_json<T: DeserializeOwned>(
        &self,
        url: Url,
        token: &BearerToken,
    ) -> Result<T, Error> {
        debug!("DELETE {url}");
        let builder = self.http.delete(url);
        Self::send(token.authorize(builder)).await
    }

    async fn with_body<T: DeserializeOwned>(
        &self,
        method: Method,
        url: Url,
        token: &BearerToken,
        body: &(impl Serialize + Sync + ?Sized),
    ) -> Result<T, Error> {
        debug!("{method} {url}");
        let builder = self.http.request(method, url).json(body);
        Self::send(token.authorize(builder)).await
    }

    async fn send<T: DeserializeOwned>(builder: RequestBuilder) -> Result<T, Error> {
        let resp = builder.send().await.map_err(Error::Transport)?;
        Self::handle_response(resp).await
    }

    /// Turn a response into `T` on 2xx, or into a typed error otherwise.
    ///
    /// An empty 2xx body parses as JSON `null`; a non-JSON body is tried as
    /// a JSON string.
    async fn handle_response<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
        let status = resp.status();
        let body = resp.text().await.map_err(Error::Transport)?;
        trace!(%status, body_len = body.len(), "response received");

        if !status.is_success() {
            return Err(Self::parse_error(status, body));
        }

        let text = if body.trim().is_empty() { "null" } else { body.as_str() };
        serde_json::from_str(text)
            .or_else(|e| {
                // Acknowledgments are sometimes plain text.
                serde_json::from_value(Value::String(body.clone())).map_err(|_| e)
            })
            .map_err(|e| {
                let preview: String = body.chars().take(200).collect();
                Error::Deserialization {
                    message: format!("{e} (body preview: {preview:?})"),
                    body: body.clone(),
                }
            })
    }

    fn parse_error(status: StatusCode, body: String) -> Error {
        let message = server_message(&body);
        if status == StatusCode::UNAUTHORIZED {
            return Error::Unauthorized { message, body };
        }
        Error::Api {
            status: status.as_u16(),
            message,
            body,
        }
    }
}

/// Pull a human-readable message out of a JSON error body.
///
/// Accepts `{"message": ".."}`, `{"error": ".."}` or a bare JSON string.
fn server_message(body: &str) -> Option<String> {
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        return parsed
            .message
            .or(parsed.error)
            .filter(|m| !m.trim().is_empty());
    }
    serde_json::from_str::<String>(body)
        .ok()
        .filter(|m| !m.trim().is_empty())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn client(base: &str) -> ApiClient {
        ApiClient::with_client(reqwest::Client::new(), Url::parse(base).unwrap())
    }

    #[test]
    fn endpoint_joins_segments() {
        let api = client("http://localhost:8080");
        let url = api.endpoint(["departments", "search"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/departments/search");
    }

    #[test]
    fn endpoint_keeps_base_path_prefix() {
        let api = client("http://hr.example.com/api/");
        let url = api.endpoint(["employees"]).unwrap();
        assert_eq!(url.as_str(), "http://hr.example.com/api/employees");
    }

    #[test]
    fn endpoint_percent_encodes_segments() {
        let api = client("http://localhost:8080");
        let url = api.endpoint(["dependents", "123", "Ann Lee/Jr"]).unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8080/dependents/123/Ann%20Lee%2FJr"
        );
    }

    #[test]
    fn server_message_shapes() {
        assert_eq!(
            server_message(r#"{"message":"Department not found"}"#).as_deref(),
            Some("Department not found")
        );
        assert_eq!(
            server_message(r#"{"error":"Bad credentials"}"#).as_deref(),
            Some("Bad credentials")
        );
        assert_eq!(server_message(r#""plain""#).as_deref(), Some("plain"));
        assert_eq!(server_message(r#"{"message":""}"#), None);
        assert_eq!(server_message("<html>oops</html>"), None);
        assert_eq!(server_message(""), None);
    }

    #[test]
    fn parse_error_maps_401() {
        let err = ApiClient::parse_error(StatusCode::UNAUTHORIZED, r#"{"message":"expired"}"#.into());
        assert!(err.is_unauthorized());
        assert_eq!(err.server_message(), Some("expired"));

        let err = ApiClient::parse_error(StatusCode::NOT_FOUND, String::new());
        assert!(err.is_not_found());
        assert!(err.server_message().is_none());
    }
}
