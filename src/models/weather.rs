//! Weather prediction model

use serde::{Deserialize, Serialize};

/// Day a prediction applies to
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ForecastDay {
    Today,
    Tomorrow,
}

impl ForecastDay {
    /// Label used by the weather service for this day
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            ForecastDay::Today => "today",
            ForecastDay::Tomorrow => "tomorrow",
        }
    }
}

/// Minimum and maximum temperature for one day
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct TemperatureRange {
    pub min: f64,
    pub max: f64,
}

/// Predictions for today and tomorrow after shape validation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeatherPrediction {
    pub today: TemperatureRange,
    pub tomorrow: TemperatureRange,
}

/// One entry of the `weatherPredictions` output array
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct WeatherEntry {
    pub when: ForecastDay,
    pub min: f64,
    pub max: f64,
}

impl WeatherPrediction {
    /// Entries in the fixed `[today, tomorrow]` order
    #[must_use]
    pub fn entries(&self) -> [WeatherEntry; 2] {
        [
            WeatherEntry {
                when: ForecastDay::Today,
                min: self.today.min,
                max: self.today.max,
            },
            WeatherEntry {
                when: ForecastDay::Tomorrow,
                min: self.tomorrow.min,
                max: self.tomorrow.max,
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entries_are_ordered_today_first() {
        let prediction = WeatherPrediction {
            today: TemperatureRange { min: 1.0, max: 5.0 },
            tomorrow: TemperatureRange { min: 2.0, max: 7.5 },
        };

        let entries = prediction.entries();
        assert_eq!(entries[0].when, ForecastDay::Today);
        assert_eq!(entries[0].max, 5.0);
        assert_eq!(entries[1].when, ForecastDay::Tomorrow);
        assert_eq!(entries[1].min, 2.0);
    }

    #[test]
    fn test_forecast_day_serializes_lowercase() {
        let json = serde_json::to_string(&ForecastDay::Tomorrow).unwrap();
        assert_eq!(json, "\"tomorrow\"");
        assert_eq!(ForecastDay::Today.label(), "today");
    }
}
