use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode, Select};
use tracing::warn;
use weather_core::{
    Config, CountryDirectory, DisplayUnit, LocationQuery, WeatherApp, provider_from_config,
};

use crate::interactive;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Weather CLI backed by OpenWeather")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key and the default unit system.
    Configure,

    /// Show current conditions for a location.
    Current {
        #[command(flatten)]
        location: LocationArgs,

        /// "imperial" or "metric"; defaults to the configured unit.
        #[arg(long)]
        units: Option<DisplayUnit>,
    },

    /// Show one page of the 3-hourly forecast.
    Forecast {
        #[command(flatten)]
        location: LocationArgs,

        #[arg(long)]
        units: Option<DisplayUnit>,

        /// 1-based page; clamped to the last page.
        #[arg(long, default_value_t = 1)]
        page: usize,
    },

    /// List the countries known to the country directory.
    Countries,

    /// Start an interactive session with paging and unit switching.
    Interactive,
}

#[derive(Debug, Args)]
pub struct LocationArgs {
    /// City name.
    pub city: String,

    /// Optional state or province.
    #[arg(long)]
    pub state: Option<String>,

    /// Country name or code.
    #[arg(long, default_value = "")]
    pub country: String,
}

impl From<LocationArgs> for LocationQuery {
    fn from(args: LocationArgs) -> Self {
        LocationQuery::new(args.city, args.state, args.country)
    }
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let config = Config::load()?;

        match self.command {
            Command::Configure => configure(config)?,
            Command::Current { location, units } => {
                let mut app = WeatherApp::new(
                    provider_from_config(&config)?,
                    units.unwrap_or(config.units),
                );
                let text = app
                    .show_current(&location.into())
                    .await
                    .context("Failed to fetch weather data")?;
                println!("{text}");
            }
            Command::Forecast { location, units, page } => {
                let mut app = WeatherApp::new(
                    provider_from_config(&config)?,
                    units.unwrap_or(config.units),
                );
                let text = app
                    .show_forecast(&location.into())
                    .await
                    .context("Failed to fetch weather data")?;
                let text = app.go_to_page(page.saturating_sub(1)).unwrap_or(text);
                println!("{text}");
            }
            Command::Countries => {
                let directory = load_countries(&config).await?;
                for name in directory.names() {
                    println!("{name}");
                }
            }
            Command::Interactive => {
                let provider = provider_from_config(&config)?;
                let countries = match load_countries(&config).await {
                    Ok(directory) => Some(directory),
                    Err(e) => {
                        warn!("{e:#}; falling back to free-text country entry");
                        None
                    }
                };
                interactive::run(WeatherApp::new(provider, config.units), countries).await?;
            }
        }

        Ok(())
    }
}

async fn load_countries(config: &Config) -> anyhow::Result<CountryDirectory> {
    Ok(CountryDirectory::load(config).await?)
}

fn configure(mut config: Config) -> anyhow::Result<()> {
    let api_key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()?;
    config.set_api_key(api_key);

    let start = DisplayUnit::all()
        .iter()
        .position(|u| *u == config.units)
        .unwrap_or(0);
    config.units = Select::new("Default units:", DisplayUnit::all().to_vec())
        .with_starting_cursor(start)
        .prompt()?;

    config.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());

    Ok(())
}
