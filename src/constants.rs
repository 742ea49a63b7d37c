use std::time::Duration;

/// User agent string for HTTP requests
pub const USER_AGENT: &str = "weather-dashboard/0.1.0";

/// Open-Meteo forecast API base URL
pub const OPEN_METEO_API_BASE: &str = "https://api.open-meteo.com/v1";

/// Open-Meteo geocoding API base URL
pub const GEOCODING_API_BASE: &str = "https://geocoding-api.open-meteo.com/v1";

/// Cached forecasts older than this are never served
pub const CACHE_TTL: Duration = Duration::from_secs(5 * 60);

/// Idle time before a suggestion lookup is issued
pub const SUGGESTION_DEBOUNCE: Duration = Duration::from_millis(300);

/// Bounded wait for a device position
pub const GEOLOCATION_TIMEOUT: Duration = Duration::from_secs(10);

pub const SUGGESTION_COUNT: usize = 5;
pub const SUGGESTION_MIN_CHARS: usize = 2;
pub const HOURLY_STRIP_LEN: usize = 24;
pub const FORECAST_DAYS: u8 = 7;

pub const HOURLY_FIELDS: &str = "temperature_2m,relative_humidity_2m,weather_code,wind_speed_10m,wind_direction_10m,uv_index,precipitation_probability";
pub const DAILY_FIELDS: &str =
    "weather_code,temperature_2m_max,temperature_2m_min,precipitation_probability_max,uv_index_max";

/// Fallback when no device position is available
pub const DEFAULT_LATITUDE: f64 = 51.5074;
pub const DEFAULT_LONGITUDE: f64 = -0.1278;
pub const DEFAULT_LOCATION_NAME: &str = "London, UK";
pub const DEFAULT_LOCATION_NOTICE: &str = "Unable to get your location. Showing weather for London.";

// Upstream offers none of these; shown as fixed values.
pub const PLACEHOLDER_PRESSURE: &str = "1013 hPa";
pub const PLACEHOLDER_VISIBILITY: &str = "10 km";
pub const PLACEHOLDER_AQI: &str = "Good";
pub const PLACEHOLDER_AQI_DESCRIPTION: &str = "Air quality is satisfactory";
