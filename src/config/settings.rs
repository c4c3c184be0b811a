use anyhow::{Context, Result};

use crate::pagination::PaginationConfig;

const BASE_URL_VARS: [&str; 2] = ["CMS_URL", "NEXT_PUBLIC_CMS_URL"];
const API_KEY_VAR: &str = "PAYLOAD_API_KEY";
const BYPASS_KEY_VAR: &str = "PAYLOAD_BYPASS_RATE_LIMIT_KEY";

/// Connection settings for the CMS REST API
#[derive(Debug, Clone)]
pub struct CmsSettings {
    pub base_url: String,
    pub api_key: Option<String>,
    pub bypass_key: Option<String>,
    pub user_agent: String,
    pub timeout_secs: u64,
    pub rate_limit_ms: u64,
}

impl Default for CmsSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            api_key: None,
            bypass_key: None,
            user_agent: "HoloEnFans/1.0".to_string(),
            timeout_secs: 30,
            rate_limit_ms: 0, // bypass key holders are not throttled
        }
    }
}

impl CmsSettings {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn with_bypass_key(mut self, key: impl Into<String>) -> Self {
        self.bypass_key = Some(key.into());
        self
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn with_rate_limit_ms(mut self, ms: u64) -> Self {
        self.rate_limit_ms = ms;
        self
    }

    /// Read settings from the process environment. Only the binary calls this.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = BASE_URL_VARS
            .iter()
            .find_map(|name| non_empty(lookup(name)))
            .with_context(|| format!("CMS base URL not set (tried {})", BASE_URL_VARS.join(", ")))?;

        Ok(Self {
            base_url,
            api_key: non_empty(lookup(API_KEY_VAR)),
            bypass_key: non_empty(lookup(BYPASS_KEY_VAR)),
            ..Self::default()
        })
    }

    /// Base URL of the REST API, without a trailing slash
    pub fn api_root(&self) -> String {
        format!("{}/api", self.base_url.trim_end_matches('/'))
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub cms: CmsSettings,
    pub pagination: PaginationConfig,
}

impl AppConfig {
    pub fn new(cms: CmsSettings, pagination: PaginationConfig) -> Self {
        Self { cms, pagination }
    }
}
