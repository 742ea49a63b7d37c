//! In-memory forecast cache keyed by (location, unit).

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::models::{ForecastPayload, Location, Unit};

/// Wall clock in epoch milliseconds
pub trait Clock: Send + Sync {
    fn now_millis(&self) -> i64;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// Same coordinates and unit always produce the same key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey {
    latitude_bits: u64,
    longitude_bits: u64,
    unit: Unit,
}

impl CacheKey {
    pub fn new(location: &Location, unit: Unit) -> Self {
        Self {
            latitude_bits: coordinate_bits(location.latitude),
            longitude_bits: coordinate_bits(location.longitude),
            unit,
        }
    }
}

// -0.0 and 0.0 name the same place
fn coordinate_bits(value: f64) -> u64 {
    if value == 0.0 { 0.0f64.to_bits() } else { value.to_bits() }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{}",
            f64::from_bits(self.latitude_bits),
            f64::from_bits(self.longitude_bits),
            self.unit.api_name()
        )
    }
}

#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub payload: Arc<ForecastPayload>,
    pub fetched_at_millis: i64,
}

impl CacheEntry {
    pub fn fetched_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.fetched_at_millis)
    }
}

/// Stale entries stay in the map until overwritten; they are never served.
#[derive(Debug)]
pub struct ForecastCache {
    entries: HashMap<CacheKey, CacheEntry>,
    ttl_millis: i64,
}

impl ForecastCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            ttl_millis: i64::try_from(ttl.as_millis()).unwrap_or(i64::MAX),
        }
    }

    /// Returns the entry for `key` if it is younger than the TTL at `now_millis`.
    pub fn fresh(&self, key: &CacheKey, now_millis: i64) -> Option<&CacheEntry> {
        self.entries
            .get(key)
            .filter(|entry| now_millis.saturating_sub(entry.fetched_at_millis) < self.ttl_millis)
    }

    pub fn store(&mut self, key: CacheKey, payload: ForecastPayload, now_millis: i64) -> CacheEntry {
        let entry = CacheEntry {
            payload: Arc::new(payload),
            fetched_at_millis: now_millis,
        };
        self.entries.insert(key, entry.clone());
        entry
    }

    /// Raw lookup, stale or not
    pub fn get(&self, key: &CacheKey) -> Option<&CacheEntry> {
        self.entries.get(key)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DailySeries, HourlySeries};

    fn payload() -> ForecastPayload {
        ForecastPayload {
            latitude: 51.5,
            longitude: -0.12,
            timezone: "Europe/London".to_string(),
            hourly: HourlySeries {
                time: vec![],
                temperature: vec![],
                humidity: vec![],
                weather_code: vec![],
                wind_speed: vec![],
                wind_direction: vec![],
                uv_index: vec![],
                precipitation_probability: vec![],
            },
            daily: DailySeries {
                time: vec![],
                weather_code: vec![],
                temperature_max: vec![],
                temperature_min: vec![],
                precipitation_probability: vec![],
                uv_index: vec![],
            },
        }
    }

    fn london() -> Location {
        Location::new(51.5074, -0.1278, "London, UK")
    }

    #[test]
    fn test_key_collides_for_same_location_and_unit() {
        let a = CacheKey::new(&london(), Unit::Celsius);
        let b = CacheKey::new(&Location::new(51.5074, -0.1278, "elsewhere"), Unit::Celsius);
        assert_eq!(a, b);
        assert_ne!(a, CacheKey::new(&london(), Unit::Fahrenheit));
        assert_eq!(a.to_string(), "51.5074,-0.1278,celsius");
    }

    #[test]
    fn test_key_ignores_sign_of_zero() {
        let positive = CacheKey::new(&Location::new(0.0, 10.0, "a"), Unit::Celsius);
        let negative = CacheKey::new(&Location::new(-0.0, 10.0, "b"), Unit::Celsius);
        assert_eq!(positive, negative);
        assert_eq!(negative.to_string(), "0,10,celsius");
    }

    #[test]
    fn test_entry_fresh_until_ttl() {
        let mut cache = ForecastCache::new(Duration::from_secs(300));
        let key = CacheKey::new(&london(), Unit::Celsius);
        cache.store(key, payload(), 1_000);

        assert!(cache.fresh(&key, 1_000).is_some());
        assert!(cache.fresh(&key, 1_000 + 299_999).is_some());
        assert!(cache.fresh(&key, 1_000 + 300_000).is_none());
        // Stale entries are kept, only hidden
        assert!(cache.get(&key).is_some());
    }

    #[test]
    fn test_store_overwrites_timestamp() {
        let mut cache = ForecastCache::new(Duration::from_secs(300));
        let key = CacheKey::new(&london(), Unit::Celsius);
        cache.store(key, payload(), 0);
        cache.store(key, payload(), 400_000);

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(&key).map(|e| e.fetched_at_millis), Some(400_000));
    }

    #[test]
    fn test_clear_empties_cache() {
        let mut cache = ForecastCache::new(Duration::from_secs(300));
        cache.store(CacheKey::new(&london(), Unit::Celsius), payload(), 0);
        cache.clear();
        assert!(cache.is_empty());
    }
}
