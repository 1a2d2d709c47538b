//! reqwest implementation of [`Backend`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client, Method};
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::Config;

use super::{ApiError, Backend};

// ============================================================================
// Constants
// ============================================================================

/// HTTP request timeout in seconds when no config is supplied.
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Maximum number of retries for rate-limited (429) requests.
const MAX_RATE_LIMIT_RETRIES: u32 = 3;

/// Initial backoff delay in milliseconds for rate limiting.
const INITIAL_BACKOFF_MS: u64 = 1000;

/// Name of the session cookie holding the bearer token.
const TOKEN_COOKIE: &str = "token";

/// REST client for the clinic backend.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct RestBackend {
    client: Client,
    base_url: String,
    token: Option<String>,
    initial_backoff: Duration,
}

impl RestBackend {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        Self::with_timeout(base_url, Duration::from_secs(REQUEST_TIMEOUT_SECS))
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self::from_reqwest(base_url, client))
    }

    /// Client for the base URL and timeout in `config`.
    pub fn from_config(config: &Config) -> Result<Self, ApiError> {
        Self::with_timeout(&config.api_base_url, config.request_timeout())
    }

    /// Wrap an existing reqwest client.
    pub fn from_reqwest(base_url: &str, client: Client) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
            initial_backoff: Duration::from_millis(INITIAL_BACKOFF_MS),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Set the bearer token for authenticated requests
    pub fn set_token(&mut self, token: String) {
        self.token = Some(token);
    }

    /// Create a new RestBackend with the given token, sharing the connection pool.
    pub fn with_token(&self, token: String) -> Self {
        Self {
            client: self.client.clone(),
            base_url: self.base_url.clone(),
            token: Some(token),
            initial_backoff: self.initial_backoff,
        }
    }

    /// Use the `token` cookie from a `Cookie` header, if present.
    pub fn with_cookies(&self, cookie_header: &str) -> Self {
        match token_from_cookies(cookie_header) {
            Some(token) => self.with_token(token),
            None => self.clone(),
        }
    }

    /// First delay before retrying a rate-limited request. Doubles per retry.
    pub fn with_initial_backoff(mut self, backoff: Duration) -> Self {
        self.initial_backoff = backoff;
        self
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    fn auth_headers(&self) -> Result<header::HeaderMap, ApiError> {
        let mut headers = header::HeaderMap::new();
        if let Some(ref token) = self.token {
            let value = header::HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|_| ApiError::InvalidRequest("token is not a valid header value".to_string()))?;
            headers.insert(header::AUTHORIZATION, value);
        }
        Ok(headers)
    }

    /// Returns Ok(Some(response)) for success, Ok(None) for rate limit
    /// (should retry), or Err for other errors.
    async fn check_response_for_retry(response: reqwest::Response) -> Result<Option<reqwest::Response>, ApiError> {
        if response.status().is_success() {
            Ok(Some(response))
        } else if response.status().as_u16() == 429 {
            Ok(None)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body))
        }
    }

    /// Parse a success body. Empty bodies (204, bare 200) become `Null`.
    async fn read_json(response: reqwest::Response) -> Result<Value, ApiError> {
        let text = response.text().await?;
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&text)?)
    }

    async fn send(&self, method: Method, path: &str, body: Option<&Value>) -> Result<Value, ApiError> {
        let url = self.url(path);
        let mut retries = 0;
        let mut backoff = self.initial_backoff;

        loop {
            debug!(method = %method, url = %url, "Sending request");
            let mut request = self
                .client
                .request(method.clone(), &url)
                .headers(self.auth_headers()?);
            if let Some(body) = body {
                request = request.json(body);
            }
            let response = request.send().await?;

            match Self::check_response_for_retry(response).await? {
                Some(response) => return Self::read_json(response).await,
                None => {
                    retries += 1;
                    if retries > MAX_RATE_LIMIT_RETRIES {
                        return Err(ApiError::RateLimited);
                    }
                    warn!(url = %url, retry = retries, backoff_ms = backoff.as_millis() as u64, "Rate limited, backing off");
                    tokio::time::sleep(backoff).await;
                    backoff *= 2;
                }
            }
        }
    }
}

#[async_trait]
impl Backend for RestBackend {
    async fn get(&self, path: &str) -> Result<Value, ApiError> {
        self.send(Method::GET, path, None).await
    }

    async fn post(&self, path: &str, body: &Value) -> Result<Value, ApiError> {
        self.send(Method::POST, path, Some(body)).await
    }

    async fn put(&self, path: &str, body: &Value) -> Result<Value, ApiError> {
        self.send(Method::PUT, path, Some(body)).await
    }

    async fn patch(&self, path: &str, body: Option<&Value>) -> Result<Value, ApiError> {
        self.send(Method::PATCH, path, body).await
    }

    async fn delete(&self, path: &str) -> Result<Value, ApiError> {
        self.send(Method::DELETE, path, None).await
    }
}

/// Extract the session token from a `Cookie` header value.
pub fn token_from_cookies(cookie_header: &str) -> Option<String> {
    cookie_header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == TOKEN_COOKIE)
        .map(|(_, value)| value.to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_from_cookies() {
        assert_eq!(
            token_from_cookies("theme=dark; token=abc.def; lang=pt").as_deref(),
            Some("abc.def")
        );
        assert_eq!(token_from_cookies("token=abc"), Some("abc".to_string()));
        assert_eq!(token_from_cookies("mytoken=abc; other=1"), None);
        assert_eq!(token_from_cookies("token="), None);
        assert_eq!(token_from_cookies(""), None);
    }

    #[test]
    fn test_url_joining() {
        let backend = RestBackend::from_reqwest("http://localhost:8080/", Client::new());
        assert_eq!(backend.url("/api/pacientes"), "http://localhost:8080/api/pacientes");
        assert_eq!(backend.url("api/dentistas"), "http://localhost:8080/api/dentistas");
    }

    #[test]
    fn test_with_cookies_sets_token() {
        let backend = RestBackend::from_reqwest("http://localhost", Client::new());
        let authed = backend.with_cookies("token=xyz");
        let headers = authed.auth_headers().unwrap();
        assert_eq!(headers.get(header::AUTHORIZATION).unwrap(), "Bearer xyz");
        assert!(backend.auth_headers().unwrap().is_empty());
    }
}
