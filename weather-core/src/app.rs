//! Session controller: owns everything the display shows and turns user
//! actions into rendered text.

use tracing::debug;

use crate::{
    CurrentWeather, DisplayUnit, LocationQuery, WeatherError, WeatherProvider,
    format::{format_current, format_forecast_page, format_page_footer},
    paginator::ForecastPaginator,
};

/// Which result the display area is currently showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Empty,
    Current,
    Forecast,
}

/// The single mutable state of a session. Each successful fetch replaces its
/// part wholesale; failed fetches leave it untouched.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub current: Option<CurrentWeather>,
    pub forecast: ForecastPaginator,
    pub unit: DisplayUnit,
    pub view: View,
}

#[derive(Debug)]
pub struct WeatherApp<P> {
    provider: P,
    state: AppState,
}

impl<P: WeatherProvider> WeatherApp<P> {
    pub fn new(provider: P, unit: DisplayUnit) -> Self {
        Self {
            provider,
            state: AppState {
                unit,
                ..AppState::default()
            },
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn unit(&self) -> DisplayUnit {
        self.state.unit
    }

    /// Fetch current conditions and show them.
    pub async fn show_current(&mut self, location: &LocationQuery) -> Result<String, WeatherError> {
        let query = location.compose()?;
        let weather = self.provider.fetch_current(&query).await?;

        debug!(%query, city = %weather.city, "Fetched current weather");
        self.state.current = Some(weather);
        self.state.view = View::Current;

        Ok(self.render().unwrap_or_default())
    }

    /// Fetch the forecast, reset to its first page and show it.
    pub async fn show_forecast(&mut self, location: &LocationQuery) -> Result<String, WeatherError> {
        let query = location.compose()?;
        let entries = self.provider.fetch_forecast(&query).await?;

        debug!(%query, entries = entries.len(), "Fetched forecast");
        self.state.forecast = ForecastPaginator::new(entries);
        self.state.view = View::Forecast;

        Ok(self.render().unwrap_or_default())
    }

    /// `None` when no forecast has been fetched yet.
    pub fn next_page(&mut self) -> Option<String> {
        self.turn_page(ForecastPaginator::next_page)
    }

    /// `None` when no forecast has been fetched yet.
    pub fn previous_page(&mut self) -> Option<String> {
        self.turn_page(ForecastPaginator::previous_page)
    }

    /// Show a zero-based forecast page, clamped to the last one.
    /// `None` when no forecast has been fetched yet.
    pub fn go_to_page(&mut self, page: usize) -> Option<String> {
        if self.state.forecast.is_empty() {
            return None;
        }

        self.state.forecast.go_to(page);
        self.state.view = View::Forecast;
        self.render()
    }

    fn turn_page(&mut self, turn: fn(&mut ForecastPaginator) -> bool) -> Option<String> {
        if self.state.forecast.is_empty() {
            return None;
        }

        turn(&mut self.state.forecast);
        self.state.view = View::Forecast;
        self.render()
    }

    /// Flip the unit system and re-render what is on screen. No request is
    /// made; stored data is already in provider units.
    pub fn toggle_unit(&mut self) -> Option<String> {
        self.set_unit(self.state.unit.toggled())
    }

    pub fn set_unit(&mut self, unit: DisplayUnit) -> Option<String> {
        self.state.unit = unit;
        self.render()
    }

    /// Render the active view, if any.
    pub fn render(&self) -> Option<String> {
        let unit = self.state.unit;

        match self.state.view {
            View::Empty => None,
            View::Current => self.state.current.as_ref().map(|w| format_current(w, unit)),
            View::Forecast => {
                let forecast = &self.state.forecast;
                Some(format!(
                    "{}\n\n{}",
                    format_forecast_page(forecast.current_slice(), unit),
                    format_page_footer(forecast.page(), forecast.page_count()),
                ))
            }
        }
    }
}
