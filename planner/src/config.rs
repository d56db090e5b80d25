use std::{env, time::Duration};

use crate::error::ConfigError;

pub const ROUTING_BASE_URL: &str = "ROUTING_BASE_URL";
pub const GEOCODER_BASE_URL: &str = "GEOCODER_BASE_URL";
pub const GEOCODER_USER_AGENT: &str = "GEOCODER_USER_AGENT";
pub const HTTP_TIMEOUT_SECS: &str = "PLANNER_HTTP_TIMEOUT_SECS";
pub const FRONTEND_ORIGIN: &str = "FRONTEND_ORIGIN";

const DEFAULT_GEOCODER_BASE_URL: &str = "https://nominatim.openstreetmap.org";
const DEFAULT_USER_AGENT: &str = concat!("planner/", env!("CARGO_PKG_VERSION"));
const DEFAULT_FRONTEND_ORIGIN: &str = "http://localhost:3000";

/// Startup configuration. Only the routing service URL is mandatory.
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    pub routing_base_url: String,
    pub geocoder_base_url: String,
    pub user_agent: String,
    /// `None` keeps requests unbounded.
    pub http_timeout: Option<Duration>,
    pub frontend_origin: String,
}

impl PlannerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`PlannerConfig::from_env`] but reads through `lookup`, which keeps tests
    /// away from process-global state.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let routing_base_url = non_empty(ROUTING_BASE_URL)
            .map(|url| trim_base_url(&url))
            .ok_or(ConfigError::Missing(ROUTING_BASE_URL))?;
        validate_url(ROUTING_BASE_URL, &routing_base_url)?;

        let geocoder_base_url = non_empty(GEOCODER_BASE_URL)
            .map(|url| trim_base_url(&url))
            .unwrap_or_else(|| DEFAULT_GEOCODER_BASE_URL.to_string());
        validate_url(GEOCODER_BASE_URL, &geocoder_base_url)?;

        let http_timeout = match non_empty(HTTP_TIMEOUT_SECS) {
            None => None,
            Some(raw) => {
                let secs: u64 = raw.trim().parse().map_err(|_| ConfigError::Invalid {
                    name: HTTP_TIMEOUT_SECS,
                    reason: format!("expected whole seconds, got {raw:?}"),
                })?;
                Some(Duration::from_secs(secs))
            }
        };

        Ok(Self {
            routing_base_url,
            geocoder_base_url,
            user_agent: non_empty(GEOCODER_USER_AGENT)
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
            http_timeout,
            frontend_origin: non_empty(FRONTEND_ORIGIN)
                .unwrap_or_else(|| DEFAULT_FRONTEND_ORIGIN.to_string()),
        })
    }
}

fn trim_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

fn validate_url(name: &'static str, url: &str) -> Result<(), ConfigError> {
    reqwest::Url::parse(url)
        .map(|_| ())
        .map_err(|err| ConfigError::Invalid {
            name,
            reason: err.to_string(),
        })
}
