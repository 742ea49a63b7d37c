//! WMO weather interpretation codes as reported by Open-Meteo.
//! See: https://open-meteo.com/en/docs#weathervariables

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WeatherCodeEntry {
    pub icon: &'static str,
    pub description: &'static str,
}

pub const UNKNOWN: WeatherCodeEntry = entry("\u{2753}", "Unknown");

const fn entry(icon: &'static str, description: &'static str) -> WeatherCodeEntry {
    WeatherCodeEntry { icon, description }
}

/// Looks up a weather code. Codes outside the table map to [`UNKNOWN`].
pub fn lookup(code: i32) -> WeatherCodeEntry {
    match code {
        0 => entry("☀️", "Clear sky"),
        1 => entry("🌤️", "Mainly clear"),
        2 => entry("⛅", "Partly cloudy"),
        3 => entry("☁️", "Overcast"),
        45 => entry("🌫️", "Fog"),
        48 => entry("🌫️", "Depositing rime fog"),
        51 => entry("🌦️", "Light drizzle"),
        53 => entry("🌧️", "Moderate drizzle"),
        55 => entry("🌧️", "Dense drizzle"),
        61 => entry("🌧️", "Slight rain"),
        63 => entry("🌧️", "Moderate rain"),
        65 => entry("🌧️", "Heavy rain"),
        71 => entry("🌨️", "Slight snow"),
        73 => entry("🌨️", "Moderate snow"),
        75 => entry("❄️", "Heavy snow"),
        77 => entry("🌨️", "Snow grains"),
        80 => entry("🌦️", "Slight rain showers"),
        81 => entry("🌧️", "Moderate rain showers"),
        82 => entry("⛈️", "Violent rain showers"),
        85 => entry("🌨️", "Slight snow showers"),
        86 => entry("❄️", "Heavy snow showers"),
        95 => entry("⛈️", "Thunderstorm"),
        96 => entry("⛈️", "Thunderstorm with hail"),
        99 => entry("⛈️", "Heavy thunderstorm with hail"),
        _ => UNKNOWN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_codes() {
        assert_eq!(lookup(0).description, "Clear sky");
        assert_eq!(lookup(48).description, "Depositing rime fog");
        assert_eq!(lookup(99).description, "Heavy thunderstorm with hail");
        assert_eq!(lookup(75).icon, "❄️");
    }

    #[test]
    fn test_unknown_codes_fall_back() {
        for code in [-1, 4, 50, 100, i32::MIN, i32::MAX] {
            assert_eq!(lookup(code), UNKNOWN);
        }
        assert_eq!(UNKNOWN.icon, "❓");
    }
}
