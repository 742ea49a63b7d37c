use crate::models::Location;
use crate::session::Dashboard;

/// Formats the dashboard into a human-readable string
pub fn format_dashboard(dashboard: &Dashboard) -> String {
    let mut output = String::new();

    if let Some(notice) = &dashboard.notice {
        output.push_str(&format!("Notice: {}\n\n", notice));
    }

    output.push_str(&format!(
        "Weather for {}\nUnit: {}\n",
        dashboard.location.display_name, dashboard.toggle_label
    ));
    if let Some(fetched_at) = dashboard.fetched_at {
        output.push_str(&format!("Last updated: {}\n", fetched_at.format("%H:%M UTC")));
    }
    output.push('\n');

    let view = &dashboard.view;
    if let Some(current) = &view.current {
        output.push_str(&format!(
            "Now: {} {} {}\n  Feels like: {}\n  Humidity: {}\n  Wind: {}\n  UV index: {}\n\n",
            current.icon,
            current.temperature,
            current.condition,
            current.feels_like,
            current.humidity,
            current.wind,
            current.uv_index
        ));
    }

    if !view.hourly.is_empty() {
        output.push_str("Hourly:\n");
        for slot in &view.hourly {
            output.push_str(&format!("  {:>5}  {} {}", slot.label, slot.icon, slot.temperature));
            if let Some(precipitation) = &slot.precipitation {
                output.push_str(&format!("  {}", precipitation));
            }
            output.push('\n');
        }
        output.push('\n');
    }

    if !view.daily.is_empty() {
        output.push_str("Daily:\n");
        for slot in &view.daily {
            output.push_str(&format!(
                "  {} ({}): {} {}  {} / {}",
                slot.day, slot.date, slot.icon, slot.condition, slot.high, slot.low
            ));
            if let Some(precipitation) = &slot.precipitation {
                output.push_str(&format!("  {}", precipitation));
            }
            output.push('\n');
        }
        output.push('\n');
    }

    if let Some(details) = &view.details {
        output.push_str(&format!(
            "Details:\n  Humidity: {}\n  Wind: {} {}\n  UV index: {} ({})\n  Pressure: {}\n  Visibility: {}\n  Air quality: {} ({})\n",
            details.humidity,
            details.wind,
            details.wind_direction,
            details.uv_index,
            details.uv_category,
            details.pressure,
            details.visibility,
            details.air_quality,
            details.air_quality_description
        ));
        if details.placeholders {
            output.push_str("  (pressure, visibility and air quality are placeholder values)\n");
        }
    }

    output
}

/// Formats the suggestion list, numbered from 1
pub fn format_suggestions(suggestions: &[Location]) -> String {
    if suggestions.is_empty() {
        return "No suggestions.".to_string();
    }

    let mut output = String::from("Suggestions:\n");
    for (i, location) in suggestions.iter().enumerate() {
        output.push_str(&format!(
            "  {}. {} ({:.4}, {:.4})\n",
            i + 1,
            location.display_name,
            location.latitude,
            location.longitude
        ));
    }
    output
}
