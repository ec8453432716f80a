//! Text rendering of fetched data. Conversion happens here only; the stored
//! records stay in provider units.

use std::fmt::Write;

use crate::{
    model::{CurrentWeather, ForecastEntry, format_timestamp},
    units::{DisplayUnit, to_display_temperature, to_display_wind_speed},
};

pub const FORECAST_HEADER: &str = "Hourly Weather for the Next 12 Hours:";

pub fn format_current(weather: &CurrentWeather, unit: DisplayUnit) -> String {
    let temperature = to_display_temperature(weather.temperature, unit);
    let wind_speed = to_display_wind_speed(weather.wind_speed, unit);

    let mut out = String::new();
    let _ = writeln!(out, "Weather in {}, {}:", weather.city, weather.country_code);
    let _ = writeln!(out, "Temperature: {temperature:.2}{}", unit.temperature_suffix());
    let _ = writeln!(out, "Humidity: {}%", weather.humidity);
    let _ = writeln!(out, "Description: {}", weather.description);
    let _ = writeln!(out, "Wind Speed: {wind_speed:.2} {}", unit.speed_suffix());
    let _ = writeln!(out, "Pressure: {} hPa", weather.pressure);
    let _ = writeln!(out, "Cloudiness: {}%", weather.cloudiness);
    let _ = writeln!(out, "Sunrise: {}", format_timestamp(&weather.sunrise));
    let _ = write!(out, "Sunset: {}", format_timestamp(&weather.sunset));
    out
}

/// One page of forecast entries under the fixed header.
pub fn format_forecast_page(entries: &[ForecastEntry], unit: DisplayUnit) -> String {
    let mut out = String::from(FORECAST_HEADER);
    for entry in entries {
        let temperature = to_display_temperature(entry.temperature, unit);
        let _ = write!(
            out,
            "\n{}: {temperature:.2}{}, {}",
            format_timestamp(&entry.timestamp),
            unit.temperature_suffix(),
            entry.description,
        );
    }
    out
}

/// Zero-based `page` in, one-based label out.
pub fn format_page_footer(page: usize, page_count: usize) -> String {
    format!("Page {} of {}", page + 1, page_count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone};

    fn local(ts: i64) -> chrono::DateTime<Local> {
        Local.timestamp_opt(ts, 0).single().unwrap()
    }

    fn sample() -> CurrentWeather {
        CurrentWeather {
            temperature: 50.0,
            humidity: 81,
            description: "Light Rain".into(),
            wind_speed: 10.0,
            pressure: 1012,
            cloudiness: 75,
            sunrise: local(1_700_000_000),
            sunset: local(1_700_036_000),
            city: "Paris".into(),
            country_code: "FR".into(),
        }
    }

    #[test]
    fn current_block_imperial() {
        let text = format_current(&sample(), DisplayUnit::Imperial);
        let lines: Vec<&str> = text.lines().collect();
        let sunrise = format!("Sunrise: {}", format_timestamp(&local(1_700_000_000)));
        let sunset = format!("Sunset: {}", format_timestamp(&local(1_700_036_000)));

        assert_eq!(
            lines,
            [
                "Weather in Paris, FR:",
                "Temperature: 50.00°F",
                "Humidity: 81%",
                "Description: Light Rain",
                "Wind Speed: 10.00 mph",
                "Pressure: 1012 hPa",
                "Cloudiness: 75%",
                sunrise.as_str(),
                sunset.as_str(),
            ]
        );
    }

    #[test]
    fn current_block_metric_converts_temperature_and_wind_only() {
        let imperial = format_current(&sample(), DisplayUnit::Imperial);
        let metric = format_current(&sample(), DisplayUnit::Metric);

        assert!(metric.contains("Temperature: 10.00°C"));
        assert!(metric.contains("Wind Speed: 4.47 m/s"));

        let changed: Vec<usize> = imperial
            .lines()
            .zip(metric.lines())
            .enumerate()
            .filter(|(_, (a, b))| a != b)
            .map(|(i, _)| i)
            .collect();
        assert_eq!(changed, [1, 4]);
    }

    #[test]
    fn pressure_stays_hpa_in_metric() {
        let metric = format_current(&sample(), DisplayUnit::Metric);
        assert!(metric.contains("Pressure: 1012 hPa"));
    }

    #[test]
    fn forecast_page_lists_entries_under_header() {
        let entries = vec![
            ForecastEntry {
                timestamp: local(1_700_000_000),
                temperature: 41.0,
                description: "Clear Sky".into(),
            },
            ForecastEntry {
                timestamp: local(1_700_010_800),
                temperature: 39.2,
                description: "Few Clouds".into(),
            },
        ];

        let text = format_forecast_page(&entries, DisplayUnit::Imperial);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], FORECAST_HEADER);
        assert_eq!(
            lines[1],
            format!("{}: 41.00°F, Clear Sky", format_timestamp(&local(1_700_000_000)))
        );
        assert!(lines[2].ends_with(": 39.20°F, Few Clouds"));
    }

    #[test]
    fn forecast_page_honours_metric() {
        let entries = vec![ForecastEntry {
            timestamp: local(1_700_000_000),
            temperature: 212.0,
            description: "Hot".into(),
        }];

        let text = format_forecast_page(&entries, DisplayUnit::Metric);
        assert!(text.ends_with(": 100.00°C, Hot"));
    }

    #[test]
    fn empty_page_is_just_the_header() {
        assert_eq!(format_forecast_page(&[], DisplayUnit::Imperial), FORECAST_HEADER);
    }

    #[test]
    fn footer_is_one_based() {
        assert_eq!(format_page_footer(0, 8), "Page 1 of 8");
        assert_eq!(format_page_footer(7, 8), "Page 8 of 8");
    }
}
