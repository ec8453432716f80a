//! Core library for the `weather` CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeather client behind the [`WeatherProvider`] abstraction
//! - Location query composition and the country directory
//! - Forecast pagination, unit conversion and text formatting
//! - [`WeatherApp`], the controller owning a session's state
//!
//! It is used by `weather-cli`, but can also be reused by other front ends.

pub mod app;
pub mod config;
pub mod error;
pub mod format;
pub mod location;
pub mod model;
pub mod paginator;
pub mod provider;
pub mod units;

pub use app::{AppState, View, WeatherApp};
pub use config::Config;
pub use error::{UNKNOWN_PROVIDER_ERROR, WeatherError};
pub use location::{CountryDirectory, compose_query};
pub use model::{CurrentWeather, ForecastEntry, LocationQuery};
pub use paginator::{ForecastPaginator, PAGE_SIZE, Paginator};
pub use provider::{WeatherProvider, openweather::OpenWeatherProvider, provider_from_config};
pub use units::{DisplayUnit, to_display_temperature};
