//! Location acquisition: device position, text search, and suggestions.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use crate::client::Geocoder;
use crate::debounce::{Debouncer, Ticket};
use crate::constants::{
    DEFAULT_LATITUDE, DEFAULT_LOCATION_NAME, DEFAULT_LOCATION_NOTICE, DEFAULT_LONGITUDE, SUGGESTION_COUNT,
    SUGGESTION_MIN_CHARS,
};
use crate::error::LocationError;
use crate::models::{Coordinates, Location};

#[derive(Debug, Clone, Copy)]
pub struct PositionOptions {
    pub timeout: Duration,
    pub high_accuracy: bool,
}

/// Platform position capability
#[async_trait]
pub trait PositionProvider: Send + Sync {
    async fn current_position(&self, options: PositionOptions) -> Result<Coordinates, LocationError>;
}

/// No position capability at all
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPosition;

#[async_trait]
impl PositionProvider for NoPosition {
    async fn current_position(&self, _options: PositionOptions) -> Result<Coordinates, LocationError> {
        Err(LocationError::CapabilityUnavailable)
    }
}

/// A position fix handed in by the client
#[derive(Debug, Clone, Copy)]
pub struct ReportedPosition(pub Coordinates);

#[async_trait]
impl PositionProvider for ReportedPosition {
    async fn current_position(&self, _options: PositionOptions) -> Result<Coordinates, LocationError> {
        Ok(self.0)
    }
}

/// Outcome of a device lookup. `warning` is set when the default location was used.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceResolution {
    pub location: Location,
    pub warning: Option<String>,
}

pub fn default_location() -> Location {
    Location::new(DEFAULT_LATITUDE, DEFAULT_LONGITUDE, DEFAULT_LOCATION_NAME)
}

#[derive(Clone)]
pub struct LocationResolver {
    geocoder: Arc<dyn Geocoder>,
    geolocation_timeout: Duration,
}

impl LocationResolver {
    pub fn new(geocoder: Arc<dyn Geocoder>, geolocation_timeout: Duration) -> Self {
        Self {
            geocoder,
            geolocation_timeout,
        }
    }

    /// Asks the device for its position, falling back to the default location
    /// on any failure. Never fails.
    pub async fn resolve_by_device(&self, provider: &dyn PositionProvider) -> DeviceResolution {
        let options = PositionOptions {
            timeout: self.geolocation_timeout,
            high_accuracy: true,
        };

        let position = match tokio::time::timeout(options.timeout, provider.current_position(options)).await {
            Ok(result) => result,
            Err(_) => Err(LocationError::Timeout),
        };

        match position {
            Ok(coords) => {
                tracing::info!("Got device position: {}, {}", coords.latitude, coords.longitude);
                let name = self.reverse_name(coords.latitude, coords.longitude).await;
                DeviceResolution {
                    location: Location::new(coords.latitude, coords.longitude, name),
                    warning: None,
                }
            }
            Err(e) => {
                tracing::warn!("Geolocation error: {}", e);
                DeviceResolution {
                    location: default_location(),
                    warning: Some(DEFAULT_LOCATION_NOTICE.to_string()),
                }
            }
        }
    }

    /// Best-effort place name for coordinates; "lat, lon" when nothing is found.
    pub async fn reverse_name(&self, latitude: f64, longitude: f64) -> String {
        match self.geocoder.reverse(latitude, longitude).await {
            Ok(results) => match results.into_iter().next() {
                Some(top) => top.display_name(),
                None => Location::coordinate_label(latitude, longitude),
            },
            Err(e) => {
                tracing::warn!("Reverse geocoding error: {}", e);
                Location::coordinate_label(latitude, longitude)
            }
        }
    }

    /// Resolves free text to the top geocoding match.
    pub async fn resolve_by_query(&self, text: &str) -> Result<Location, LocationError> {
        let query = text.trim();
        if query.is_empty() {
            return Err(LocationError::EmptyQuery);
        }

        tracing::info!("Handling search for: {}", query);

        let results = self
            .geocoder
            .search(query, 1)
            .await
            .map_err(LocationError::Search)?;

        results
            .into_iter()
            .next()
            .map(|top| top.into_location())
            .ok_or_else(|| LocationError::NotFound(query.to_string()))
    }

    /// Up to five candidates in service order. Queries under two characters
    /// return nothing without a lookup.
    pub async fn suggest(&self, text: &str) -> Result<Vec<Location>, LocationError> {
        let query = text.trim();
        if query.chars().count() < SUGGESTION_MIN_CHARS {
            return Ok(Vec::new());
        }

        let results = self
            .geocoder
            .search(query, SUGGESTION_COUNT)
            .await
            .map_err(LocationError::Search)?;

        Ok(results.into_iter().map(|r| r.into_location()).collect())
    }

    /// `suggest` behind the debouncer. `None` when a newer query superseded
    /// this one. Lookup failures are logged and give an empty list.
    pub async fn suggest_debounced(&self, debouncer: &Debouncer, text: &str) -> Option<(Ticket, Vec<Location>)> {
        if text.trim().chars().count() < SUGGESTION_MIN_CHARS {
            return Some((debouncer.cancel(), Vec::new()));
        }

        let (ticket, result) = debouncer.run(move || self.suggest(text)).await?;
        let suggestions = result.unwrap_or_else(|e| {
            tracing::warn!("Search error: {}", e);
            Vec::new()
        });
        Some((ticket, suggestions))
    }
}
