use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::FetchError;

// ============================================================================
// Session Models
// ============================================================================

/// Temperature unit selected on the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    #[default]
    Celsius,
    Fahrenheit,
}

impl Unit {
    pub fn toggled(self) -> Self {
        match self {
            Self::Celsius => Self::Fahrenheit,
            Self::Fahrenheit => Self::Celsius,
        }
    }

    /// Suffix for temperatures, also used as the toggle label
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Celsius => "\u{00b0}C",
            Self::Fahrenheit => "\u{00b0}F",
        }
    }

    /// Value of the `temperature_unit` query parameter
    pub fn api_name(self) -> &'static str {
        match self {
            Self::Celsius => "celsius",
            Self::Fahrenheit => "fahrenheit",
        }
    }
}

/// Raw device position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Resolved location. Replaced wholesale, never edited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    pub display_name: String,
}

impl Location {
    pub fn new(latitude: f64, longitude: f64, display_name: impl Into<String>) -> Self {
        Self {
            latitude,
            longitude,
            display_name: display_name.into(),
        }
    }

    /// Name used when no place name is known: "51.50, -0.12"
    pub fn coordinate_label(latitude: f64, longitude: f64) -> String {
        format!("{:.2}, {:.2}", latitude, longitude)
    }
}

// ============================================================================
// Open-Meteo Forecast Models
// ============================================================================

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ForecastPayload {
    #[serde(default)]
    pub latitude: f64,
    #[serde(default)]
    pub longitude: f64,
    #[serde(default)]
    pub timezone: String,
    pub hourly: HourlySeries,
    pub daily: DailySeries,
}

/// Parallel arrays, index `i` of every field refers to `time[i]`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HourlySeries {
    pub time: Vec<String>,
    #[serde(rename = "temperature_2m")]
    pub temperature: Vec<f64>,
    #[serde(rename = "relative_humidity_2m")]
    pub humidity: Vec<f64>,
    pub weather_code: Vec<i32>,
    #[serde(rename = "wind_speed_10m")]
    pub wind_speed: Vec<f64>,
    #[serde(rename = "wind_direction_10m")]
    pub wind_direction: Vec<Option<f64>>,
    pub uv_index: Vec<Option<f64>>,
    pub precipitation_probability: Vec<Option<f64>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DailySeries {
    pub time: Vec<String>,
    pub weather_code: Vec<i32>,
    #[serde(rename = "temperature_2m_max")]
    pub temperature_max: Vec<f64>,
    #[serde(rename = "temperature_2m_min")]
    pub temperature_min: Vec<f64>,
    #[serde(rename = "precipitation_probability_max")]
    pub precipitation_probability: Vec<Option<f64>>,
    #[serde(rename = "uv_index_max")]
    pub uv_index: Vec<Option<f64>>,
}

impl ForecastPayload {
    /// Checks that each cadence's arrays line up with its `time` axis.
    pub fn validate(&self) -> Result<(), FetchError> {
        let h = &self.hourly;
        check_aligned(
            "hourly",
            h.time.len(),
            &[
                ("temperature_2m", h.temperature.len()),
                ("relative_humidity_2m", h.humidity.len()),
                ("weather_code", h.weather_code.len()),
                ("wind_speed_10m", h.wind_speed.len()),
                ("wind_direction_10m", h.wind_direction.len()),
                ("uv_index", h.uv_index.len()),
                ("precipitation_probability", h.precipitation_probability.len()),
            ],
        )?;

        let d = &self.daily;
        check_aligned(
            "daily",
            d.time.len(),
            &[
                ("weather_code", d.weather_code.len()),
                ("temperature_2m_max", d.temperature_max.len()),
                ("temperature_2m_min", d.temperature_min.len()),
                ("precipitation_probability_max", d.precipitation_probability.len()),
                ("uv_index_max", d.uv_index.len()),
            ],
        )
    }
}

fn check_aligned(cadence: &str, expected: usize, fields: &[(&str, usize)]) -> Result<(), FetchError> {
    for (name, len) in fields {
        if *len != expected {
            return Err(FetchError::Malformed(format!(
                "{}.{} has {} entries, expected {}",
                cadence, name, len, expected
            )));
        }
    }
    Ok(())
}

// ============================================================================
// Open-Meteo Geocoding Models
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct GeocodingResponse {
    // Omitted entirely when nothing matches
    #[serde(default)]
    pub results: Vec<GeocodingResult>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeocodingResult {
    pub name: String,
    pub admin1: Option<String>,
    pub country: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
}

impl GeocodingResult {
    /// "name, admin1, country" with empty parts left out
    pub fn display_name(&self) -> String {
        [Some(&self.name), self.admin1.as_ref(), self.country.as_ref()]
            .into_iter()
            .flatten()
            .filter(|part| !part.is_empty())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn into_location(self) -> Location {
        let name = self.display_name();
        Location::new(self.latitude, self.longitude, name)
    }
}

// ============================================================================
// MCP Tool Request Models
// ============================================================================

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct AllowLocationRequest {
    /// Device latitude, if the client has a position fix
    pub latitude: Option<f64>,
    /// Device longitude, if the client has a position fix
    pub longitude: Option<f64>,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct SearchLocationRequest {
    pub query: String,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct SelectSuggestionRequest {
    /// 1-based position in the last suggestion list
    pub index: usize,
}
