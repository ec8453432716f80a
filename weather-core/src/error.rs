use thiserror::Error;

/// Fallback shown when the provider rejects a request without a `message`.
pub const UNKNOWN_PROVIDER_ERROR: &str = "Unknown error";

/// Errors surfaced by the weather core.
///
/// Every variant is terminal to the action that produced it; callers keep
/// whatever they displayed before.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// Required user input is missing, e.g. an empty city.
    #[error("{0}")]
    Validation(String),

    /// The credential (or another setting) is missing or unusable.
    #[error("{0}")]
    Configuration(String),

    /// The provider answered with a non-success status.
    #[error("{message}")]
    Provider { status: u16, message: String },

    /// Transport-level failure: DNS, refused connection, timeout.
    #[error("Network error: {0}")]
    Network(String),

    /// The provider answered 200 but the body did not have the expected shape.
    #[error("Failed to parse weather data: {0}")]
    Parse(String),

    /// The country list could not be loaded.
    #[error("Country list unavailable: {0}")]
    DirectoryUnavailable(String),
}

impl WeatherError {
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation(message.into())
    }

    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration(message.into())
    }

    /// Build a provider error from a raw error body, pulling out its `message`.
    pub fn from_provider_body(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_owned))
            .unwrap_or_else(|| UNKNOWN_PROVIDER_ERROR.to_string());

        Self::Provider { status, message }
    }
}

/// The request URL carries the API key, so it never reaches the message.
impl From<reqwest::Error> for WeatherError {
    fn from(err: reqwest::Error) -> Self {
        let err = err.without_url();
        if err.is_decode() {
            Self::Parse(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_body_message_is_used_verbatim() {
        let err = WeatherError::from_provider_body(404, r#"{"cod":"404","message":"city not found"}"#);
        assert_eq!(err.to_string(), "city not found");
        assert!(matches!(err, WeatherError::Provider { status: 404, .. }));
    }

    #[test]
    fn provider_body_without_message_falls_back() {
        let err = WeatherError::from_provider_body(500, r#"{"cod":500}"#);
        assert_eq!(err.to_string(), UNKNOWN_PROVIDER_ERROR);
    }

    #[test]
    fn non_json_provider_body_falls_back() {
        let err = WeatherError::from_provider_body(502, "<html>Bad Gateway</html>");
        assert_eq!(err.to_string(), UNKNOWN_PROVIDER_ERROR);
    }

    #[test]
    fn non_string_message_falls_back() {
        let err = WeatherError::from_provider_body(400, r#"{"message": 42}"#);
        assert_eq!(err.to_string(), UNKNOWN_PROVIDER_ERROR);
    }
}
