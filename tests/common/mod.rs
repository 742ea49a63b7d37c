//! In-process fakes for the dashboard's collaborators.

#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use weather_dashboard::cache::{Clock, ForecastCache};
use weather_dashboard::client::{ForecastSource, Geocoder};
use weather_dashboard::forecast::ForecastStore;
use weather_dashboard::location::{LocationResolver, NoPosition, PositionProvider};
use weather_dashboard::models::{DailySeries, GeocodingResult, HourlySeries};
use weather_dashboard::{FetchError, ForecastPayload, Location, Session, Unit};

pub const TTL: Duration = Duration::from_secs(300);

/// Clock advanced by hand
#[derive(Debug, Default)]
pub struct ManualClock(AtomicI64);

impl ManualClock {
    pub fn at(millis: i64) -> Self {
        Self(AtomicI64::new(millis))
    }

    pub fn advance(&self, by: Duration) {
        self.0.fetch_add(by.as_millis() as i64, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> i64 {
        self.0.load(Ordering::SeqCst)
    }
}

/// Records every fetch and answers with a canned payload
#[derive(Debug, Default)]
pub struct CountingSource {
    calls: Mutex<Vec<(f64, f64, Unit)>>,
    failing: AtomicBool,
}

impl CountingSource {
    pub fn calls(&self) -> Vec<(f64, f64, Unit)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

#[async_trait]
impl ForecastSource for CountingSource {
    async fn fetch_forecast(&self, location: &Location, unit: Unit) -> Result<ForecastPayload, FetchError> {
        self.calls
            .lock()
            .unwrap()
            .push((location.latitude, location.longitude, unit));

        if self.failing.load(Ordering::SeqCst) {
            return Err(FetchError::Status(reqwest::StatusCode::SERVICE_UNAVAILABLE));
        }

        let base = match unit {
            Unit::Celsius => 12.6,
            Unit::Fahrenheit => 54.7,
        };
        Ok(sample_payload(base))
    }
}

/// Geocoder answering from fixed result lists
#[derive(Debug, Default)]
pub struct ScriptedGeocoder {
    pub search_results: Vec<GeocodingResult>,
    pub reverse_results: Vec<GeocodingResult>,
    pub fail_search: bool,
    pub fail_reverse: bool,
    pub searches: Mutex<Vec<(String, usize)>>,
}

impl ScriptedGeocoder {
    pub fn searches(&self) -> Vec<(String, usize)> {
        self.searches.lock().unwrap().clone()
    }
}

#[async_trait]
impl Geocoder for ScriptedGeocoder {
    async fn search(&self, name: &str, count: usize) -> Result<Vec<GeocodingResult>, FetchError> {
        self.searches.lock().unwrap().push((name.to_string(), count));
        if self.fail_search {
            return Err(FetchError::Status(reqwest::StatusCode::INTERNAL_SERVER_ERROR));
        }
        Ok(self.search_results.iter().take(count).cloned().collect())
    }

    async fn reverse(&self, _latitude: f64, _longitude: f64) -> Result<Vec<GeocodingResult>, FetchError> {
        if self.fail_reverse {
            return Err(FetchError::Malformed("bad body".into()));
        }
        Ok(self.reverse_results.clone())
    }
}

pub fn place(name: &str, admin1: Option<&str>, country: Option<&str>, lat: f64, lon: f64) -> GeocodingResult {
    GeocodingResult {
        name: name.to_string(),
        admin1: admin1.map(str::to_string),
        country: country.map(str::to_string),
        latitude: lat,
        longitude: lon,
    }
}

/// 48 hours and 7 days starting 2026-10-17, first hour at `first_temperature`
pub fn sample_payload(first_temperature: f64) -> ForecastPayload {
    let hours = 48;
    let days = 7;
    ForecastPayload {
        latitude: 48.86,
        longitude: 2.35,
        timezone: "Europe/Paris".to_string(),
        hourly: HourlySeries {
            time: (0..hours)
                .map(|h| format!("2026-10-{:02}T{:02}:00", 17 + h / 24, h % 24))
                .collect(),
            temperature: (0..hours).map(|h| first_temperature + h as f64).collect(),
            humidity: vec![72.0; hours],
            weather_code: vec![3; hours],
            wind_speed: vec![11.2; hours],
            wind_direction: vec![Some(270.0); hours],
            uv_index: vec![Some(2.0); hours],
            precipitation_probability: vec![Some(10.0); hours],
        },
        daily: DailySeries {
            time: (0..days).map(|d| format!("2026-10-{:02}", 17 + d)).collect(),
            weather_code: vec![61; days],
            temperature_max: vec![first_temperature + 4.0; days],
            temperature_min: vec![first_temperature - 4.0; days],
            precipitation_probability: vec![Some(0.0); days],
            uv_index: vec![Some(2.0); days],
        },
    }
}

pub struct Harness {
    pub source: Arc<CountingSource>,
    pub geocoder: Arc<ScriptedGeocoder>,
    pub clock: Arc<ManualClock>,
}

impl Harness {
    pub fn new(geocoder: ScriptedGeocoder) -> Self {
        Self {
            source: Arc::new(CountingSource::default()),
            geocoder: Arc::new(geocoder),
            clock: Arc::new(ManualClock::at(1_760_000_000_000)),
        }
    }

    pub fn resolver(&self) -> LocationResolver {
        LocationResolver::new(self.geocoder.clone(), Duration::from_secs(10))
    }

    pub fn store(&self) -> ForecastStore {
        ForecastStore::new(self.source.clone(), ForecastCache::new(TTL), self.clock.clone())
    }

    pub fn session(&self) -> Session {
        self.session_with(Arc::new(NoPosition))
    }

    pub fn session_with(&self, position: Arc<dyn PositionProvider>) -> Session {
        Session::new(self.resolver(), self.store(), position)
    }
}
