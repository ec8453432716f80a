//! Location query composition and the optional country directory.

use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::{Config, WeatherError};

pub const DEFAULT_COUNTRIES_URL: &str = "https://restcountries.com/v3.1/all?fields=name";

/// Build the weather API `q` parameter from its parts.
///
/// All parts are trimmed. The city is required; an empty state or country is
/// left out rather than producing an empty segment.
pub fn compose_query(city: &str, state: &str, country: &str) -> Result<String, WeatherError> {
    let city = city.trim();
    if city.is_empty() {
        return Err(WeatherError::validation("Please enter a city name."));
    }

    let segments: Vec<&str> = [city, state.trim(), country.trim()]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect();

    Ok(segments.join(","))
}

/// Country display names from the reference API, sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CountryDirectory {
    names: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RcCountry {
    name: RcName,
}

/// v2 of the API returns `name` as a string, v3 as an object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RcName {
    Plain(String),
    Structured { common: String },
}

impl RcName {
    fn into_display(self) -> String {
        match self {
            RcName::Plain(name) => name,
            RcName::Structured { common } => common,
        }
    }
}

impl CountryDirectory {
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut names: Vec<String> = names
            .into_iter()
            .map(Into::into)
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .collect();
        names.sort();
        names.dedup();

        Self { names }
    }

    /// Fetch the list from the configured reference API.
    pub async fn load(config: &Config) -> Result<Self, WeatherError> {
        let http = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| WeatherError::DirectoryUnavailable(e.to_string()))?;

        Self::fetch(&http, &config.countries_url).await
    }

    /// Fetch the full list once. Any failure maps to
    /// [`WeatherError::DirectoryUnavailable`].
    #[instrument(skip(http))]
    pub async fn fetch(http: &Client, url: &str) -> Result<Self, WeatherError> {
        let res = http
            .get(url)
            .send()
            .await
            .map_err(|e| WeatherError::DirectoryUnavailable(e.without_url().to_string()))?;

        let status = res.status();
        if !status.is_success() {
            return Err(WeatherError::DirectoryUnavailable(format!(
                "country service responded with status {status}"
            )));
        }

        let body = res
            .text()
            .await
            .map_err(|e| WeatherError::DirectoryUnavailable(e.without_url().to_string()))?;
        let directory = Self::parse(&body)?;

        debug!(count = directory.len(), "Loaded country directory");
        Ok(directory)
    }

    fn parse(body: &str) -> Result<Self, WeatherError> {
        let countries: Vec<RcCountry> = serde_json::from_str(body)
            .map_err(|e| WeatherError::DirectoryUnavailable(format!("invalid country list: {e}")))?;

        Ok(Self::from_names(
            countries.into_iter().map(|c| c.name.into_display()),
        ))
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        let name = name.trim();
        self.names.iter().any(|n| n.eq_ignore_ascii_case(name))
    }
}
