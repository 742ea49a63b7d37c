use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::sync::Arc;

use crate::config::Config;
use crate::constants::{DAILY_FIELDS, FORECAST_DAYS, HOURLY_FIELDS};
use crate::error::FetchError;
use crate::models::{ForecastPayload, GeocodingResponse, GeocodingResult, Location, Unit};

/// Source of forecast payloads, one request per (location, unit)
#[async_trait]
pub trait ForecastSource: Send + Sync {
    async fn fetch_forecast(
        &self,
        location: &Location,
        unit: Unit,
    ) -> Result<ForecastPayload, FetchError>;
}

/// Forward and reverse place lookup
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn search(&self, name: &str, count: usize) -> Result<Vec<GeocodingResult>, FetchError>;

    async fn reverse(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<Vec<GeocodingResult>, FetchError>;
}

/// HTTP client for the Open-Meteo forecast and geocoding APIs
#[derive(Debug, Clone)]
pub struct OpenMeteoClient {
    client: Arc<Client>,
    forecast_base: String,
    geocoding_base: String,
}

impl OpenMeteoClient {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder().user_agent(config.user_agent.as_str()).build()?;

        Ok(Self {
            client: Arc::new(client),
            forecast_base: config.forecast_base_url.clone(),
            geocoding_base: config.geocoding_base_url.clone(),
        })
    }

    /// Makes an HTTP GET request and deserializes the JSON response
    async fn make_request<T: for<'de> Deserialize<'de>>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T, FetchError> {
        let response = self.client.get(url).query(query).send().await?;

        if !response.status().is_success() {
            return Err(FetchError::Status(response.status()));
        }

        response.json::<T>().await.map_err(|e| {
            if e.is_decode() {
                FetchError::Malformed(e.to_string())
            } else {
                FetchError::Network(e)
            }
        })
    }
}

#[async_trait]
impl ForecastSource for OpenMeteoClient {
    async fn fetch_forecast(
        &self,
        location: &Location,
        unit: Unit,
    ) -> Result<ForecastPayload, FetchError> {
        tracing::info!(
            "Fetching forecast for {}, {} in {}",
            location.latitude,
            location.longitude,
            unit.api_name()
        );

        let url = format!("{}/forecast", self.forecast_base);
        let query = [
            ("latitude", location.latitude.to_string()),
            ("longitude", location.longitude.to_string()),
            ("hourly", HOURLY_FIELDS.to_string()),
            ("daily", DAILY_FIELDS.to_string()),
            ("timezone", "auto".to_string()),
            ("temperature_unit", unit.api_name().to_string()),
            ("wind_speed_unit", "kmh".to_string()),
            ("forecast_days", FORECAST_DAYS.to_string()),
        ];

        let payload = self.make_request::<ForecastPayload>(&url, &query).await?;
        payload.validate()?;
        Ok(payload)
    }
}

#[async_trait]
impl Geocoder for OpenMeteoClient {
    async fn search(&self, name: &str, count: usize) -> Result<Vec<GeocodingResult>, FetchError> {
        tracing::debug!("Geocoding search for '{}' (count {})", name, count);

        let url = format!("{}/search", self.geocoding_base);
        let query = [
            ("name", name.to_string()),
            ("count", count.to_string()),
            ("language", "en".to_string()),
            ("format", "json".to_string()),
        ];

        let response = self.make_request::<GeocodingResponse>(&url, &query).await?;
        Ok(response.results)
    }

    async fn reverse(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<Vec<GeocodingResult>, FetchError> {
        tracing::debug!("Reverse lookup for {}, {}", latitude, longitude);

        let url = format!("{}/search", self.geocoding_base);
        let query = [
            ("latitude", latitude.to_string()),
            ("longitude", longitude.to_string()),
            ("count", "1".to_string()),
        ];

        let response = self.make_request::<GeocodingResponse>(&url, &query).await?;
        Ok(response.results)
    }
}
