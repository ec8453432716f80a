//! Interactive session: pick a location, then fetch, page and switch units.
//!
//! The last successfully rendered text stays on screen until a later action
//! succeeds; failures are reported below it.

use std::fmt;

use inquire::{InquireError, Select, Text};
use weather_core::{
    CountryDirectory, LocationQuery, WeatherApp, WeatherError, WeatherProvider,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    GetWeather,
    HourlyForecast,
    PreviousPage,
    NextPage,
    SwitchUnits,
    ChangeLocation,
    Quit,
}

impl Action {
    const ALL: [Action; 7] = [
        Action::GetWeather,
        Action::HourlyForecast,
        Action::PreviousPage,
        Action::NextPage,
        Action::SwitchUnits,
        Action::ChangeLocation,
        Action::Quit,
    ];
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Action::GetWeather => "Get Weather",
            Action::HourlyForecast => "Hourly Forecast",
            Action::PreviousPage => "Previous Page",
            Action::NextPage => "Next Page",
            Action::SwitchUnits => "Switch Units",
            Action::ChangeLocation => "Change Location",
            Action::Quit => "Quit",
        })
    }
}

pub async fn run<P: WeatherProvider>(
    mut app: WeatherApp<P>,
    countries: Option<CountryDirectory>,
) -> anyhow::Result<()> {
    let mut location = match prompt_location(countries.as_ref()) {
        Ok(location) => location,
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => return Ok(()),
        Err(e) => return Err(e.into()),
    };

    loop {
        let action = match Select::new(
            &format!("[{}] Action:", app.unit()),
            Action::ALL.to_vec(),
        )
        .prompt()
        {
            Ok(action) => action,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(e) => return Err(e.into()),
        };

        let outcome = match action {
            Action::GetWeather => app.show_current(&location).await.map(Some),
            Action::HourlyForecast => app.show_forecast(&location).await.map(Some),
            Action::PreviousPage => Ok(app.previous_page()),
            Action::NextPage => Ok(app.next_page()),
            Action::SwitchUnits => Ok(app.toggle_unit()),
            Action::ChangeLocation => {
                match prompt_location(countries.as_ref()) {
                    Ok(next) => location = next,
                    Err(InquireError::OperationCanceled) => {}
                    Err(InquireError::OperationInterrupted) => break,
                    Err(e) => return Err(e.into()),
                }
                continue;
            }
            Action::Quit => break,
        };

        match outcome {
            Ok(Some(text)) => println!("\n{text}\n"),
            Ok(None) => println!("Nothing to show yet. Fetch the weather or the forecast first."),
            Err(e) => report(&e),
        }
    }

    Ok(())
}

fn prompt_location(countries: Option<&CountryDirectory>) -> Result<LocationQuery, InquireError> {
    let city = Text::new("City:").prompt()?;
    let state = Text::new("State/province (optional):").prompt()?;

    let country = match countries.filter(|c| !c.is_empty()) {
        Some(directory) => Select::new("Country:", directory.names().to_vec()).prompt()?,
        None => Text::new("Country:").prompt()?,
    };

    let state = (!state.trim().is_empty()).then_some(state);
    Ok(LocationQuery::new(city, state, country))
}

fn report(err: &WeatherError) {
    match err {
        WeatherError::Validation(msg) => println!("Warning: {msg}"),
        WeatherError::Configuration(msg) => println!("Error: {msg}"),
        other => println!("Error: Failed to fetch weather data. Error: {other}"),
    }
}
