//! Dashboard session: the current unit, location and suggestions, plus the
//! forecast store. All user actions go through here and return plain data.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;

use crate::error::DashboardError;
use crate::forecast::ForecastStore;
use crate::location::{default_location, LocationResolver, PositionProvider};
use crate::models::{Location, Unit};
use crate::view::{self, ForecastView};

/// Everything a view layer needs to draw the dashboard
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub location: Location,
    pub unit: Unit,
    pub toggle_label: &'static str,
    pub fetched_at: Option<DateTime<Utc>>,
    pub notice: Option<String>,
    pub view: ForecastView,
}

pub struct Session {
    resolver: LocationResolver,
    forecasts: ForecastStore,
    position: Arc<dyn PositionProvider>,
    unit: Unit,
    location: Option<Location>,
    suggestions: Vec<Location>,
}

impl Session {
    /// `position` is the device capability used by `locate_device` and by
    /// `retry` when no location has been resolved yet.
    pub fn new(
        resolver: LocationResolver,
        forecasts: ForecastStore,
        position: Arc<dyn PositionProvider>,
    ) -> Self {
        Self {
            resolver,
            forecasts,
            position,
            unit: Unit::default(),
            location: None,
            suggestions: Vec::new(),
        }
    }

    pub fn unit(&self) -> Unit {
        self.unit
    }

    pub fn location(&self) -> Option<&Location> {
        self.location.as_ref()
    }

    pub fn suggestions(&self) -> &[Location] {
        &self.suggestions
    }

    pub fn resolver(&self) -> &LocationResolver {
        &self.resolver
    }

    /// Device location, falling back to the default with a notice.
    pub async fn locate(&mut self, provider: &dyn PositionProvider) -> Result<Dashboard, DashboardError> {
        let resolution = self.resolver.resolve_by_device(provider).await;
        self.location = Some(resolution.location);

        match (self.dashboard().await, resolution.warning) {
            (Ok(dashboard), notice) => Ok(Dashboard { notice, ..dashboard }),
            (Err(DashboardError::Forecast(source)), Some(notice)) => {
                Err(DashboardError::FallbackForecast { notice, source })
            }
            (Err(e), _) => Err(e),
        }
    }

    /// Device location through the session's own position capability.
    pub async fn locate_device(&mut self) -> Result<Dashboard, DashboardError> {
        let position = Arc::clone(&self.position);
        self.locate(position.as_ref()).await
    }

    /// Location permission declined.
    pub async fn use_default_location(&mut self) -> Result<Dashboard, DashboardError> {
        self.location = Some(default_location());
        self.dashboard().await
    }

    pub async fn search(&mut self, text: &str) -> Result<Dashboard, DashboardError> {
        self.suggestions.clear();
        let location = self.resolver.resolve_by_query(text).await?;
        self.location = Some(location);
        self.dashboard().await
    }

    pub fn set_suggestions(&mut self, suggestions: Vec<Location>) {
        self.suggestions = suggestions;
    }

    /// Picks a suggestion by its 1-based position.
    pub async fn select_suggestion(&mut self, index: usize) -> Result<Dashboard, DashboardError> {
        let location = index
            .checked_sub(1)
            .and_then(|i| self.suggestions.get(i))
            .cloned()
            .ok_or(DashboardError::UnknownSuggestion(index))?;

        tracing::info!("Selected location: {}", location.display_name);
        self.suggestions.clear();
        self.location = Some(location);
        self.dashboard().await
    }

    /// Flips the unit. Refetches only when a location is set.
    pub async fn toggle_unit(&mut self) -> Result<Option<Dashboard>, DashboardError> {
        self.unit = self.unit.toggled();
        tracing::info!("Temperature unit set to {}", self.unit.api_name());

        if self.location.is_none() {
            return Ok(None);
        }
        self.dashboard().await.map(Some)
    }

    /// Repeats the fetch for the last location, or asks for the device
    /// location when there is none.
    pub async fn retry(&mut self) -> Result<Dashboard, DashboardError> {
        if self.location.is_some() {
            return self.dashboard().await;
        }
        self.locate_device().await
    }

    /// Projects the forecast for the current location and unit.
    pub async fn dashboard(&mut self) -> Result<Dashboard, DashboardError> {
        let location = self.location.clone().ok_or(DashboardError::NoLocation)?;
        let entry = self.forecasts.get_forecast(&location, self.unit).await?;

        Ok(Dashboard {
            view: view::project(&entry.payload, self.unit),
            fetched_at: entry.fetched_at(),
            toggle_label: self.unit.symbol(),
            unit: self.unit,
            location,
            notice: None,
        })
    }
}
