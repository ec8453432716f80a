use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::WeatherError;

const METERS_PER_SECOND_PER_MPH: f64 = 0.44704;

/// Unit system used when rendering. Stored data is always imperial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayUnit {
    #[default]
    Imperial,
    Metric,
}

impl DisplayUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayUnit::Imperial => "imperial",
            DisplayUnit::Metric => "metric",
        }
    }

    pub const fn all() -> &'static [DisplayUnit] {
        &[DisplayUnit::Imperial, DisplayUnit::Metric]
    }

    pub fn toggled(self) -> Self {
        match self {
            DisplayUnit::Imperial => DisplayUnit::Metric,
            DisplayUnit::Metric => DisplayUnit::Imperial,
        }
    }

    pub fn temperature_suffix(&self) -> &'static str {
        match self {
            DisplayUnit::Imperial => "°F",
            DisplayUnit::Metric => "°C",
        }
    }

    pub fn speed_suffix(&self) -> &'static str {
        match self {
            DisplayUnit::Imperial => "mph",
            DisplayUnit::Metric => "m/s",
        }
    }
}

impl fmt::Display for DisplayUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DisplayUnit {
    type Err = WeatherError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "imperial" => Ok(DisplayUnit::Imperial),
            "metric" => Ok(DisplayUnit::Metric),
            _ => Err(WeatherError::validation(format!(
                "Unknown unit system '{value}'. Supported: imperial, metric."
            ))),
        }
    }
}

pub fn to_display_temperature(fahrenheit: f64, unit: DisplayUnit) -> f64 {
    match unit {
        DisplayUnit::Imperial => fahrenheit,
        DisplayUnit::Metric => (fahrenheit - 32.0) * 5.0 / 9.0,
    }
}

pub fn to_display_wind_speed(mph: f64, unit: DisplayUnit) -> f64 {
    match unit {
        DisplayUnit::Imperial => mph,
        DisplayUnit::Metric => mph * METERS_PER_SECOND_PER_MPH,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn freezing_and_boiling_points_convert_to_celsius() {
        assert!(approx(to_display_temperature(32.0, DisplayUnit::Metric), 0.0));
        assert!(approx(to_display_temperature(212.0, DisplayUnit::Metric), 100.0));
        assert!(approx(to_display_temperature(-40.0, DisplayUnit::Metric), -40.0));
    }

    #[test]
    fn imperial_is_identity() {
        for x in [-459.67, -1.5, 0.0, 12.34, 98.6, 1.0e6] {
            assert_eq!(to_display_temperature(x, DisplayUnit::Imperial), x);
            assert_eq!(to_display_wind_speed(x, DisplayUnit::Imperial), x);
        }
    }

    #[test]
    fn wind_speed_converts_to_meters_per_second() {
        assert!(approx(to_display_wind_speed(10.0, DisplayUnit::Metric), 4.4704));
    }

    #[test]
    fn toggling_twice_returns_to_start() {
        for unit in DisplayUnit::all() {
            assert_ne!(unit.toggled(), *unit);
            assert_eq!(unit.toggled().toggled(), *unit);
        }
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("Metric".parse::<DisplayUnit>().unwrap(), DisplayUnit::Metric);
        assert_eq!(" imperial ".parse::<DisplayUnit>().unwrap(), DisplayUnit::Imperial);

        let err = "kelvin".parse::<DisplayUnit>().unwrap_err();
        assert!(err.to_string().contains("Unknown unit system"));
    }

    #[test]
    fn suffixes_follow_unit_system() {
        assert_eq!(DisplayUnit::Imperial.temperature_suffix(), "°F");
        assert_eq!(DisplayUnit::Metric.temperature_suffix(), "°C");
        assert_eq!(DisplayUnit::Imperial.speed_suffix(), "mph");
        assert_eq!(DisplayUnit::Metric.speed_suffix(), "m/s");
    }
}
