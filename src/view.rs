//! Projects a forecast payload into display panels.
//!
//! Index 0 of the hourly series is always taken as the current conditions.

use chrono::{NaiveDate, NaiveDateTime, Timelike};
use serde::Serialize;

use crate::constants::{
    HOURLY_STRIP_LEN, PLACEHOLDER_AQI, PLACEHOLDER_AQI_DESCRIPTION, PLACEHOLDER_PRESSURE,
    PLACEHOLDER_VISIBILITY,
};
use crate::models::{DailySeries, ForecastPayload, HourlySeries, Unit};
use crate::weather_codes::{self, UNKNOWN};

const COMPASS_POINTS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentConditions {
    pub temperature: String,
    pub icon: &'static str,
    pub condition: &'static str,
    pub feels_like: String,
    pub humidity: String,
    pub wind: String,
    pub uv_index: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlySlot {
    pub label: String,
    pub icon: &'static str,
    pub temperature: String,
    pub precipitation: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailySlot {
    pub day: String,
    pub date: String,
    pub icon: &'static str,
    pub condition: &'static str,
    pub high: String,
    pub low: String,
    pub precipitation: Option<String>,
}

/// Pressure, visibility and air quality are not in the upstream data and
/// always carry the placeholder values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailMetrics {
    pub humidity: String,
    pub wind: String,
    pub wind_direction: &'static str,
    pub uv_index: String,
    pub uv_category: &'static str,
    pub pressure: &'static str,
    pub visibility: &'static str,
    pub air_quality: &'static str,
    pub air_quality_description: &'static str,
    pub placeholders: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastView {
    pub current: Option<CurrentConditions>,
    pub hourly: Vec<HourlySlot>,
    pub daily: Vec<DailySlot>,
    pub details: Option<DetailMetrics>,
}

pub fn project(payload: &ForecastPayload, unit: Unit) -> ForecastView {
    ForecastView {
        current: current_conditions(&payload.hourly, unit),
        hourly: hourly_strip(&payload.hourly, unit),
        daily: daily_strip(&payload.daily, unit),
        details: detail_metrics(&payload.hourly),
    }
}

/// Nearest integer, halves toward positive infinity
pub fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

pub fn format_temperature(value: f64, unit: Unit) -> String {
    format!("{}{}", round_half_up(value), unit.symbol())
}

/// 16-point compass label; "N/A" when the direction is unknown.
pub fn wind_direction(degrees: Option<f64>) -> &'static str {
    match degrees {
        Some(d) if d.is_finite() => {
            let index = round_half_up(d / 22.5).rem_euclid(16) as usize;
            COMPASS_POINTS[index]
        }
        _ => "N/A",
    }
}

pub fn uv_category(uv_index: f64) -> &'static str {
    if uv_index <= 2.0 {
        "Low"
    } else if uv_index <= 5.0 {
        "Moderate"
    } else if uv_index <= 7.0 {
        "High"
    } else if uv_index <= 10.0 {
        "Very High"
    } else {
        "Extreme"
    }
}

pub fn current_conditions(hourly: &HourlySeries, unit: Unit) -> Option<CurrentConditions> {
    let temperature = format_temperature(*hourly.temperature.first()?, unit);
    let weather = hourly
        .weather_code
        .first()
        .map_or(UNKNOWN, |code| weather_codes::lookup(*code));
    let uv = hourly.uv_index.first().copied().flatten();

    Some(CurrentConditions {
        feels_like: temperature.clone(),
        temperature,
        icon: weather.icon,
        condition: weather.description,
        humidity: percent(hourly.humidity.first().copied()),
        wind: wind_speed(hourly.wind_speed.first().copied()),
        uv_index: match uv {
            Some(v) if v != 0.0 => v.to_string(),
            _ => "0".to_string(),
        },
    })
}

pub fn hourly_strip(hourly: &HourlySeries, unit: Unit) -> Vec<HourlySlot> {
    let len = hourly.time.len().min(HOURLY_STRIP_LEN);

    (0..len)
        .filter_map(|i| {
            let temperature = *hourly.temperature.get(i)?;
            let weather = hourly
                .weather_code
                .get(i)
                .map_or(UNKNOWN, |code| weather_codes::lookup(*code));
            let precipitation = hourly.precipitation_probability.get(i).copied().flatten();

            Some(HourlySlot {
                label: if i == 0 {
                    "Now".to_string()
                } else {
                    hour_label(&hourly.time[i])
                },
                icon: weather.icon,
                temperature: format_temperature(temperature, unit),
                precipitation: precipitation_badge(precipitation).map(|p| format!("{}%", p)),
            })
        })
        .collect()
}

pub fn daily_strip(daily: &DailySeries, unit: Unit) -> Vec<DailySlot> {
    (0..daily.time.len())
        .filter_map(|i| {
            let high = *daily.temperature_max.get(i)?;
            let low = *daily.temperature_min.get(i)?;
            let weather = daily
                .weather_code
                .get(i)
                .map_or(UNKNOWN, |code| weather_codes::lookup(*code));
            let precipitation = daily.precipitation_probability.get(i).copied().flatten();
            let date = NaiveDate::parse_from_str(&daily.time[i], "%Y-%m-%d").ok();

            let day = match (i, date) {
                (0, _) => "Today".to_string(),
                (_, Some(d)) => d.format("%A").to_string(),
                (_, None) => daily.time[i].clone(),
            };

            Some(DailySlot {
                day,
                date: date.map_or_else(|| daily.time[i].clone(), |d| d.format("%b %-d").to_string()),
                icon: weather.icon,
                condition: weather.description,
                high: format_temperature(high, unit),
                low: format_temperature(low, unit),
                precipitation: precipitation_badge(precipitation)
                    .map(|p| format!("\u{1f327}\u{fe0f} {}% chance", p)),
            })
        })
        .collect()
}

pub fn detail_metrics(hourly: &HourlySeries) -> Option<DetailMetrics> {
    if hourly.time.is_empty() {
        return None;
    }

    let uv = hourly.uv_index.first().copied().flatten().unwrap_or(0.0);

    Some(DetailMetrics {
        humidity: percent(hourly.humidity.first().copied()),
        wind: wind_speed(hourly.wind_speed.first().copied()),
        wind_direction: wind_direction(hourly.wind_direction.first().copied().flatten()),
        uv_index: round_half_up(uv).to_string(),
        uv_category: uv_category(uv),
        pressure: PLACEHOLDER_PRESSURE,
        visibility: PLACEHOLDER_VISIBILITY,
        air_quality: PLACEHOLDER_AQI,
        air_quality_description: PLACEHOLDER_AQI_DESCRIPTION,
        placeholders: true,
    })
}

/// "14:00" from "2026-10-17T14:00"; raw text if it does not parse.
fn hour_label(time: &str) -> String {
    match NaiveDateTime::parse_from_str(time, "%Y-%m-%dT%H:%M") {
        Ok(t) => format!("{}:00", t.hour()),
        Err(_) => time.to_string(),
    }
}

/// Rounded probability, only when above zero
fn precipitation_badge(probability: Option<f64>) -> Option<i64> {
    probability.filter(|p| *p > 0.0).map(round_half_up)
}

fn percent(value: Option<f64>) -> String {
    value.map_or_else(|| "N/A".to_string(), |v| format!("{}%", v))
}

fn wind_speed(value: Option<f64>) -> String {
    value.map_or_else(|| "N/A".to_string(), |v| format!("{} km/h", round_half_up(v)))
}
