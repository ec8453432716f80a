use async_trait::async_trait;
use chrono::{DateTime, Local};
use reqwest::Client;
use serde::{Deserialize, de::DeserializeOwned};
use std::time::Duration;
use tracing::{debug, instrument};

use crate::{
    WeatherError,
    model::{CurrentWeather, ForecastEntry},
};

use super::WeatherProvider;

/// OpenWeather 2.5 client. Always requests imperial units; conversion is a
/// presentation concern.
#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String, base_url: &str, timeout: Duration) -> Result<Self, WeatherError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| WeatherError::Network(e.to_string()))?;

        Ok(Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn get<T: DeserializeOwned>(&self, endpoint: &str, query: &str) -> Result<T, WeatherError> {
        let url = format!("{}/{endpoint}", self.base_url);

        let res = self
            .http
            .get(&url)
            .query(&[
                ("q", query),
                ("units", "imperial"),
                ("appid", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;
        debug!(%status, bytes = body.len(), "OpenWeather responded");

        if !status.is_success() {
            return Err(WeatherError::from_provider_body(status.as_u16(), &body));
        }

        serde_json::from_str(&body).map_err(|e| WeatherError::Parse(e.to_string()))
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    humidity: u8,
    pressure: u32,
}

#[derive(Debug, Deserialize)]
struct OwForecastMain {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwClouds {
    all: u8,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    country: String,
    sunrise: i64,
    sunset: i64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
    clouds: OwClouds,
    sys: OwSys,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt: i64,
    main: OwForecastMain,
    weather: Vec<OwWeather>,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    list: Vec<OwForecastEntry>,
}

impl TryFrom<OwCurrentResponse> for CurrentWeather {
    type Error = WeatherError;

    fn try_from(parsed: OwCurrentResponse) -> Result<Self, Self::Error> {
        Ok(CurrentWeather {
            temperature: parsed.main.temp,
            humidity: parsed.main.humidity,
            description: first_description(&parsed.weather)?,
            wind_speed: parsed.wind.speed,
            pressure: parsed.main.pressure,
            cloudiness: parsed.clouds.all,
            sunrise: unix_to_local(parsed.sys.sunrise)?,
            sunset: unix_to_local(parsed.sys.sunset)?,
            city: parsed.name,
            country_code: parsed.sys.country,
        })
    }
}

impl TryFrom<OwForecastEntry> for ForecastEntry {
    type Error = WeatherError;

    fn try_from(entry: OwForecastEntry) -> Result<Self, Self::Error> {
        Ok(ForecastEntry {
            timestamp: unix_to_local(entry.dt)?,
            temperature: entry.main.temp,
            description: first_description(&entry.weather)?,
        })
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn fetch_current(&self, query: &str) -> Result<CurrentWeather, WeatherError> {
        let parsed: OwCurrentResponse = self.get("weather", query).await?;
        parsed.try_into()
    }

    async fn fetch_forecast(&self, query: &str) -> Result<Vec<ForecastEntry>, WeatherError> {
        let parsed: OwForecastResponse = self.get("forecast", query).await?;
        debug!(entries = parsed.list.len(), "Parsed OpenWeather forecast");

        parsed.list.into_iter().map(ForecastEntry::try_from).collect()
    }
}

fn first_description(weather: &[OwWeather]) -> Result<String, WeatherError> {
    weather
        .first()
        .map(|w| title_case(&w.description))
        .ok_or_else(|| WeatherError::Parse("response contained no weather conditions".into()))
}

fn unix_to_local(ts: i64) -> Result<DateTime<Local>, WeatherError> {
    DateTime::from_timestamp(ts, 0)
        .map(|utc| utc.with_timezone(&Local))
        .ok_or_else(|| WeatherError::Parse(format!("timestamp {ts} out of range")))
}

/// Capitalise the first letter of each whitespace-separated word and
/// lowercase the rest: "light rain" -> "Light Rain".
pub fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
