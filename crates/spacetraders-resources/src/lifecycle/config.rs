use resource_framework::FetchPolicy;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "https://api.spacetraders.io/v2";

/// Largest page size the remote accepts; bigger requests are refused on every
/// collection endpoint.
pub const MAX_PAGE_LIMIT: u32 = FetchPolicy::DEFAULT_PAGE_LIMIT;

pub const ENV_TOKEN: &str = "SPACETRADERS_TOKEN";
pub const ENV_BASE_URL: &str = "SPACETRADERS_BASE_URL";
pub const ENV_PAGE_LIMIT: &str = "SPACETRADERS_PAGE_LIMIT";
pub const ENV_TIMEOUT_SECS: &str = "SPACETRADERS_TIMEOUT_SECS";
pub const ENV_MAX_PAGES: &str = "SPACETRADERS_MAX_PAGES";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{name} must be an integer between 1 and {max}, got {value:?}")]
    InvalidNumber {
        name: &'static str,
        value: String,
        max: u32,
    },

    #[error("invalid base URL {url:?}: {message}")]
    InvalidBaseUrl { url: String, message: String },

    #[error("could not build HTTP client: {0}")]
    HttpClient(String),
}

/// Settings for talking to the remote API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub base_url: String,
    /// Bearer token; the public endpoints (systems, waypoints) work without one.
    pub token: Option<String>,
    pub page_limit: u32,
    pub call_timeout: Duration,
    pub max_pages: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            token: None,
            page_limit: FetchPolicy::DEFAULT_PAGE_LIMIT,
            call_timeout: FetchPolicy::DEFAULT_CALL_TIMEOUT,
            max_pages: FetchPolicy::DEFAULT_MAX_PAGES,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds a config from any variable source. Unset or blank variables keep
    /// their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let mut config = Config::default();

        if let Some(url) = get(ENV_BASE_URL) {
            config.base_url = url;
        }
        config.token = get(ENV_TOKEN);
        if let Some(value) = get(ENV_PAGE_LIMIT) {
            config.page_limit = bounded(ENV_PAGE_LIMIT, &value, MAX_PAGE_LIMIT)?;
        }
        if let Some(value) = get(ENV_TIMEOUT_SECS) {
            config.call_timeout = Duration::from_secs(bounded(ENV_TIMEOUT_SECS, &value, u32::MAX)?.into());
        }
        if let Some(value) = get(ENV_MAX_PAGES) {
            config.max_pages = bounded(ENV_MAX_PAGES, &value, u32::MAX)?;
        }
        Ok(config)
    }

    /// Checks values set after loading, e.g. by command-line overrides.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_limit == 0 || self.page_limit > MAX_PAGE_LIMIT {
            return Err(ConfigError::InvalidNumber {
                name: ENV_PAGE_LIMIT,
                value: self.page_limit.to_string(),
                max: MAX_PAGE_LIMIT,
            });
        }
        Ok(())
    }

    pub fn fetch_policy(&self) -> FetchPolicy {
        FetchPolicy {
            page_limit: self.page_limit,
            call_timeout: self.call_timeout,
            max_pages: self.max_pages,
        }
    }
}

fn bounded(name: &'static str, value: &str, max: u32) -> Result<u32, ConfigError> {
    match value.parse::<u32>() {
        Ok(n) if (1..=max).contains(&n) => Ok(n),
        _ => Err(ConfigError::InvalidNumber {
            name,
            value: value.to_string(),
            max,
        }),
    }
}
