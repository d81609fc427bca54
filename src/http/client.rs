use std::time::Duration;

use reqwest::blocking::Client;
use serde_json::Value;

use super::query::flatten;
use crate::core::settings::{API_TOKEN, BASE_URL};
use crate::core::{Gateway, Method, Params, Result, SevdeskError, Settings, classify_error};

/// Production API root.
pub const DEFAULT_BASE_URL: &str = "https://my.sevdesk.de/api/v1";

const TIMEOUT: Duration = Duration::from_secs(30);

/// Blocking [`Gateway`] over HTTPS.
///
/// The API token travels as the `token` query parameter on every request.
/// GET and DELETE parameters are sent in the query string, all other
/// methods send them as a form body.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: Client,
    base_url: String,
    token: String,
}

impl HttpGateway {
    pub fn new(token: impl Into<String>) -> Result<Self> {
        Self::with_base_url(DEFAULT_BASE_URL, token)
    }

    pub fn with_base_url(base_url: &str, token: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(TIMEOUT)
            .build()
            .map_err(|e| SevdeskError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.into(),
        })
    }

    /// Uses `api_token` (required) and `base_url` (optional) from `settings`.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let token = settings.required(API_TOKEN)?;
        let base_url = settings.get(BASE_URL).filter(|url| !url.is_empty());
        Self::with_base_url(base_url.unwrap_or(DEFAULT_BASE_URL), token)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL of an API path.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl Gateway for HttpGateway {
    fn call(&self, method: Method, path: &str, params: Params) -> Result<Value> {
        let url = self.url(path);
        let pairs = flatten(&params);
        let token = [("token", self.token.as_str())];
        tracing::debug!(%method, %url, params = pairs.len(), "sevdesk request");

        let request = match method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
            Method::Put => self.client.put(&url),
            Method::Patch => self.client.patch(&url),
            Method::Delete => self.client.delete(&url),
        }
        .query(&token);
        let request = if method.uses_query() {
            request.query(&pairs)
        } else {
            request.form(&pairs)
        };

        let response = request
            .send()
            .map_err(|e| SevdeskError::Transport(e.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .map_err(|e| SevdeskError::Transport(e.to_string()))?;

        if !status.is_success() {
            let err = classify_error(status.as_u16(), &body);
            tracing::warn!(%method, %url, status = status.as_u16(), error = %err, "sevdesk request failed");
            return Err(err);
        }
        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&body).map_err(|e| SevdeskError::UnexpectedResponse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_base_url_is_https() {
        assert!(DEFAULT_BASE_URL.starts_with("https://"));
    }

    #[test]
    fn url_joins_without_double_slashes() {
        let gateway = HttpGateway::with_base_url("http://localhost:8080/api/v1/", "t").unwrap();
        assert_eq!(gateway.base_url(), "http://localhost:8080/api/v1");
        assert_eq!(gateway.url("/Contact/5"), "http://localhost:8080/api/v1/Contact/5");
        assert_eq!(gateway.url("Invoice"), "http://localhost:8080/api/v1/Invoice");
    }

    #[test]
    fn settings_require_token() {
        let err = HttpGateway::from_settings(&Settings::default()).unwrap_err();
        assert!(matches!(err, SevdeskError::ConfigurationMissing(API_TOKEN)));
    }

    #[test]
    fn settings_base_url_overrides_default() {
        let settings = Settings::new("t").base_url("http://sandbox.local/api/v1");
        let gateway = HttpGateway::from_settings(&settings).unwrap();
        assert_eq!(gateway.base_url(), "http://sandbox.local/api/v1");

        let gateway = HttpGateway::from_settings(&Settings::new("t")).unwrap();
        assert_eq!(gateway.base_url(), DEFAULT_BASE_URL);
    }
}
