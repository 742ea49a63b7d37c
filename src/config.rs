use std::time::Duration;

use crate::constants::{
    CACHE_TTL, GEOCODING_API_BASE, GEOLOCATION_TIMEOUT, OPEN_METEO_API_BASE, SUGGESTION_DEBOUNCE,
    USER_AGENT,
};

/// Runtime settings for the dashboard. Defaults come from `constants`.
#[derive(Debug, Clone)]
pub struct Config {
    pub forecast_base_url: String,
    pub geocoding_base_url: String,
    pub user_agent: String,
    pub cache_ttl: Duration,
    pub suggestion_debounce: Duration,
    pub geolocation_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            forecast_base_url: OPEN_METEO_API_BASE.to_string(),
            geocoding_base_url: GEOCODING_API_BASE.to_string(),
            user_agent: USER_AGENT.to_string(),
            cache_ttl: CACHE_TTL,
            suggestion_debounce: SUGGESTION_DEBOUNCE,
            geolocation_timeout: GEOLOCATION_TIMEOUT,
        }
    }
}

impl Config {
    /// Points both upstream services at a single base URL (mock servers).
    pub fn with_base_url(mut self, base: &str) -> Self {
        let base = base.trim_end_matches('/');
        self.forecast_base_url = base.to_string();
        self.geocoding_base_url = base.to_string();
        self
    }
}
