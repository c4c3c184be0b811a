use log::debug;
use reqwest::Client;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderName, HeaderValue};
use serde_json::Value;
use std::time::Duration;

use super::source::DocumentSource;
use crate::config::CmsSettings;
use crate::errors::FetchError;
use crate::rate_limiter::RateLimiter;

const BYPASS_HEADER: &str = "x-ratelimit-bypass";

/// HTTP client for the CMS REST API with built-in rate limiting and auth headers
pub struct CmsClient {
    client: Client,
    rate_limiter: RateLimiter,
    api_root: String,
}

impl CmsClient {
    pub fn new(settings: &CmsSettings) -> Result<Self, FetchError> {
        let client = Self::build_client(settings)?;
        let rate_limiter = RateLimiter::new(settings.rate_limit_ms);

        Ok(Self {
            client,
            rate_limiter,
            api_root: settings.api_root(),
        })
    }

    pub async fn get(&self, url: &str) -> Result<reqwest::Response, FetchError> {
        self.rate_limiter.wait().await;
        self.send_get_request(url).await
    }

    fn build_client(settings: &CmsSettings) -> Result<Client, FetchError> {
        Client::builder()
            .user_agent(settings.user_agent.as_str())
            .timeout(Duration::from_secs(settings.timeout_secs))
            .default_headers(Self::build_headers(settings)?)
            .build()
            .map_err(|e| FetchError::InvalidConfig(format!("Failed to build HTTP client: {e}")))
    }

    fn build_headers(settings: &CmsSettings) -> Result<HeaderMap, FetchError> {
        let mut headers = HeaderMap::new();

        if let Some(key) = &settings.bypass_key {
            headers.insert(HeaderName::from_static(BYPASS_HEADER), sensitive_value(key)?);
        }
        if let Some(key) = &settings.api_key {
            headers.insert(AUTHORIZATION, sensitive_value(&format!("users API-Key {key}"))?);
        }

        Ok(headers)
    }

    async fn send_get_request(&self, url: &str) -> Result<reqwest::Response, FetchError> {
        debug!("GET {}", url);
        self.client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::transport(url, e))
    }

    fn check_response_status(url: &str, response: &reqwest::Response) -> Result<(), FetchError> {
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::from_status(url, status));
        }
        Ok(())
    }
}

impl DocumentSource for CmsClient {
    fn api_root(&self) -> &str {
        &self.api_root
    }

    async fn get_json(&self, url: &str) -> Result<Value, FetchError> {
        let response = self.get(url).await?;
        Self::check_response_status(url, &response)?;

        let text = response
            .text()
            .await
            .map_err(|e| FetchError::transport(url, e))?;

        serde_json::from_str(&text)
            .map_err(|e| FetchError::bad_shape(url, format!("body is not valid JSON: {e}")))
    }
}

fn sensitive_value(raw: &str) -> Result<HeaderValue, FetchError> {
    let mut value = HeaderValue::from_str(raw)
        .map_err(|_| FetchError::InvalidConfig("header value contains invalid characters".into()))?;
    value.set_sensitive(true);
    Ok(value)
}
