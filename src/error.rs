use reqwest::StatusCode;

/// Failures talking to an upstream HTTP service
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Request failed with status: {0}")]
    Status(StatusCode),
    #[error("Malformed response: {0}")]
    Malformed(String),
}

impl FetchError {
    pub fn user_message(&self) -> &'static str {
        "Unable to fetch weather data. Please try again."
    }
}

/// Location acquisition errors
#[derive(Debug, thiserror::Error)]
pub enum LocationError {
    #[error("Geolocation is not supported")]
    CapabilityUnavailable,
    #[error("Location permission denied")]
    PermissionDenied,
    #[error("Location request timed out")]
    Timeout,
    #[error("Search query is empty")]
    EmptyQuery,
    #[error("Location not found: {0}")]
    NotFound(String),
    #[error("Location search failed: {0}")]
    Search(#[source] FetchError),
}

impl LocationError {
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::CapabilityUnavailable => "Geolocation is not supported.",
            Self::PermissionDenied | Self::Timeout => "Unable to get your location.",
            Self::EmptyQuery => "Enter a location to search.",
            Self::NotFound(_) => "Location not found. Please try a different search term.",
            Self::Search(_) => "Error searching for location. Please try again.",
        }
    }
}

/// Errors surfaced by session operations
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    #[error(transparent)]
    Location(#[from] LocationError),
    #[error(transparent)]
    Forecast(#[from] FetchError),
    /// Fetch failure for the fallback location; keeps the fallback notice
    #[error("{notice} {source}")]
    FallbackForecast {
        notice: String,
        #[source]
        source: FetchError,
    },
    #[error("No location selected")]
    NoLocation,
    #[error("No suggestion at position {0}")]
    UnknownSuggestion(usize),
}

impl DashboardError {
    /// Message suitable for showing to the user in place of the dashboard
    pub fn user_message(&self) -> String {
        match self {
            Self::Location(e) => e.user_message().to_string(),
            Self::Forecast(e) => e.user_message().to_string(),
            Self::FallbackForecast { notice, source } => {
                format!("{} {}", notice, source.user_message())
            }
            Self::NoLocation => "No location selected yet.".to_string(),
            Self::UnknownSuggestion(index) => {
                format!("No suggestion numbered {}. Search again.", index)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forecast_failures_share_one_message() {
        let status = DashboardError::from(FetchError::Status(StatusCode::BAD_GATEWAY));
        let malformed = DashboardError::from(FetchError::Malformed("hourly".into()));
        assert_eq!(status.user_message(), malformed.user_message());
        assert!(status.user_message().contains("Unable to fetch weather data"));
    }

    #[test]
    fn test_search_messages_distinguish_not_found() {
        let not_found = DashboardError::from(LocationError::NotFound("Atlantis".into()));
        let failed = DashboardError::from(LocationError::Search(FetchError::Status(
            StatusCode::INTERNAL_SERVER_ERROR,
        )));
        assert!(not_found.user_message().contains("not found"));
        assert!(failed.user_message().contains("Error searching"));
    }

    #[test]
    fn test_fallback_forecast_message_keeps_notice() {
        let err = DashboardError::FallbackForecast {
            notice: "Unable to get your location. Showing weather for London.".into(),
            source: FetchError::Status(StatusCode::SERVICE_UNAVAILABLE),
        };
        assert_eq!(
            err.user_message(),
            "Unable to get your location. Showing weather for London. \
             Unable to fetch weather data. Please try again."
        );
    }

    #[test]
    fn test_error_display_keeps_detail() {
        let err = LocationError::NotFound("Atlantis".into());
        assert_eq!(err.to_string(), "Location not found: Atlantis");
    }
}
