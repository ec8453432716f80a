use chrono::{DateTime, Local};

/// Display format for every timestamp the app shows.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// City / state / country as entered by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocationQuery {
    pub city: String,
    pub state: Option<String>,
    pub country: String,
}

impl LocationQuery {
    pub fn new(city: impl Into<String>, state: Option<String>, country: impl Into<String>) -> Self {
        Self {
            city: city.into(),
            state,
            country: country.into(),
        }
    }

    /// The `q` parameter for the weather API, see [`crate::location::compose_query`].
    pub fn compose(&self) -> Result<String, crate::WeatherError> {
        crate::location::compose_query(
            &self.city,
            self.state.as_deref().unwrap_or_default(),
            &self.country,
        )
    }
}

/// Current conditions, in the provider's imperial units.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentWeather {
    /// Degrees Fahrenheit.
    pub temperature: f64,
    pub humidity: u8,
    /// Title-cased, e.g. "Light Rain".
    pub description: String,
    /// Miles per hour.
    pub wind_speed: f64,
    /// Hectopascal.
    pub pressure: u32,
    pub cloudiness: u8,
    pub sunrise: DateTime<Local>,
    pub sunset: DateTime<Local>,
    pub city: String,
    pub country_code: String,
}

/// One three-hour step of the five day forecast.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastEntry {
    pub timestamp: DateTime<Local>,
    /// Degrees Fahrenheit.
    pub temperature: f64,
    pub description: String,
}

pub fn format_timestamp(ts: &DateTime<Local>) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}
