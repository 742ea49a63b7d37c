//! Weather dashboard core
//!
//! Resolves a location, serves Open-Meteo forecasts through a short-lived
//! cache keyed by location and unit, and projects them into display panels.

pub mod cache;
pub mod client;
pub mod config;
pub mod constants;
pub mod debounce;
pub mod error;
pub mod forecast;
pub mod formatters;
pub mod location;
pub mod models;
pub mod service;
pub mod session;
pub mod view;
pub mod weather_codes;

pub use config::Config;
pub use error::{DashboardError, FetchError, LocationError};
pub use models::{ForecastPayload, Location, Unit};
pub use service::WeatherDashboard;
pub use session::{Dashboard, Session};
