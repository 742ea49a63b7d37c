use std::sync::Arc;

use crate::cache::{CacheEntry, CacheKey, Clock, ForecastCache};
use crate::client::ForecastSource;
use crate::error::FetchError;
use crate::models::{Location, Unit};

/// Cache-then-fetch access to forecasts
pub struct ForecastStore {
    source: Arc<dyn ForecastSource>,
    cache: ForecastCache,
    clock: Arc<dyn Clock>,
}

impl ForecastStore {
    pub fn new(source: Arc<dyn ForecastSource>, cache: ForecastCache, clock: Arc<dyn Clock>) -> Self {
        Self { source, cache, clock }
    }

    /// Serves a fresh cached entry, otherwise fetches and caches.
    /// A failed fetch leaves the cache untouched.
    pub async fn get_forecast(&mut self, location: &Location, unit: Unit) -> Result<CacheEntry, FetchError> {
        let key = CacheKey::new(location, unit);

        if let Some(entry) = self.cache.fresh(&key, self.clock.now_millis()) {
            tracing::debug!("Forecast cache hit for {}", key);
            return Ok(entry.clone());
        }

        tracing::debug!("Forecast cache miss for {}", key);
        let payload = self.source.fetch_forecast(location, unit).await.map_err(|e| {
            tracing::warn!("Weather fetch error for {}: {}", key, e);
            e
        })?;

        Ok(self.cache.store(key, payload, self.clock.now_millis()))
    }

    pub fn cache(&self) -> &ForecastCache {
        &self.cache
    }
}
