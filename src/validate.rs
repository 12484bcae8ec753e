//! Shape validation for upstream payloads and recipe content
//!
//! Upstream services are untrusted: their JSON is checked field by field and
//! coerced into the gateway's own types. Any deviation is reported as
//! [`GatewayError::Shape`], which the handlers turn into a 500, as opposed to
//! a not-found which becomes a 404.

use serde_json::Value;

use crate::models::{CityInfo, Coordinates, ForecastDay, TemperatureRange, WeatherPrediction};
use crate::{GatewayError, Result};

/// Minimum recipe length in characters
pub const MIN_CONTENT_CHARS: usize = 10;
/// Maximum recipe length in characters
pub const MAX_CONTENT_CHARS: usize = 2000;

/// Number or numeric string, as a finite `f64`
fn as_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    number.is_finite().then_some(number)
}

/// Number or numeric string holding a non-negative integral value
fn as_count(value: &Value) -> Option<u64> {
    if let Some(n) = value.as_u64() {
        return Some(n);
    }
    let number = as_number(value)?;
    if number >= 0.0 && number.fract() == 0.0 && number <= u64::MAX as f64 {
        Some(number as u64)
    } else {
        None
    }
}

fn as_label(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn parse_coordinates(value: Option<&Value>) -> Result<Coordinates> {
    let (latitude, longitude) = match value {
        Some(Value::Array(pair)) if pair.len() == 2 => (&pair[0], &pair[1]),
        Some(Value::Object(fields)) => match (fields.get("latitude"), fields.get("longitude")) {
            (Some(latitude), Some(longitude)) => (latitude, longitude),
            _ => {
                return Err(GatewayError::shape(
                    "coordinates object must have latitude and longitude",
                ));
            }
        },
        Some(other) => {
            return Err(GatewayError::shape(format!(
                "coordinates must be two numeric values, got {other}"
            )));
        }
        None => return Err(GatewayError::shape("coordinates are missing")),
    };

    match (as_number(latitude), as_number(longitude)) {
        (Some(latitude), Some(longitude)) => Ok(Coordinates::new(latitude, longitude)),
        _ => Err(GatewayError::shape(format!(
            "coordinates are not numeric: [{latitude}, {longitude}]"
        ))),
    }
}

/// Validate a city insights payload and coerce it into [`CityInfo`].
pub fn validate_city_shape(raw: &Value) -> Result<CityInfo> {
    let fields = raw
        .as_object()
        .ok_or_else(|| GatewayError::shape("city insights payload is not an object"))?;

    let coordinates = parse_coordinates(fields.get("coordinates"))?;

    let population = fields
        .get("population")
        .and_then(as_count)
        .ok_or_else(|| {
            GatewayError::shape(format!(
                "population is not a non-negative integer: {}",
                fields.get("population").unwrap_or(&Value::Null)
            ))
        })?;

    let known_for = match fields.get("knownFor") {
        Some(Value::Array(labels)) => labels
            .iter()
            .map(|label| {
                as_label(label).ok_or_else(|| {
                    GatewayError::shape(format!("knownFor entry is not text: {label}"))
                })
            })
            .collect::<Result<Vec<String>>>()?,
        _ => return Err(GatewayError::shape("knownFor is not a sequence")),
    };

    Ok(CityInfo {
        coordinates,
        population,
        known_for,
    })
}

/// Find the prediction list in any of the accepted weather payload layouts.
fn find_predictions<'a>(raw: &'a Value, city_id: Option<&str>) -> Result<&'a Vec<Value>> {
    match raw {
        Value::Object(fields) => match fields.get("predictions") {
            Some(Value::Array(predictions)) => Ok(predictions),
            _ => Err(GatewayError::shape("weather payload has no predictions list")),
        },
        Value::Array(items) if items.iter().all(|item| item.get("when").is_some()) => Ok(items),
        Value::Array(items) => {
            let matches_city = |item: &&Value| match (city_id, item.get("cityId")) {
                (Some(wanted), Some(id)) => as_label(id).as_deref() == Some(wanted),
                (Some(_), None) => false,
                (None, _) => true,
            };
            let entry = items.iter().find(matches_city).ok_or_else(|| {
                GatewayError::shape(format!(
                    "weather payload has no entry for city {}",
                    city_id.unwrap_or("<any>")
                ))
            })?;
            find_predictions(entry, None)
        }
        other => Err(GatewayError::shape(format!(
            "weather payload is neither an object nor a list: {other}"
        ))),
    }
}

fn parse_range(predictions: &[Value], day: ForecastDay) -> Result<TemperatureRange> {
    let entry = predictions
        .iter()
        .find(|entry| entry.get("when").and_then(Value::as_str) == Some(day.label()))
        .ok_or_else(|| GatewayError::shape(format!("no '{}' weather entry", day.label())))?;

    let min = entry.get("min").and_then(as_number);
    let max = entry.get("max").and_then(as_number);
    match (min, max) {
        (Some(min), Some(max)) => Ok(TemperatureRange { min, max }),
        _ => Err(GatewayError::shape(format!(
            "'{}' weather entry needs numeric min and max: {entry}",
            day.label()
        ))),
    }
}

/// Validate a weather prediction payload and coerce it into a
/// [`WeatherPrediction`]. When `city_id` is given and the payload is keyed by
/// city, the matching entry is used.
pub fn validate_weather_shape(raw: &Value, city_id: Option<&str>) -> Result<WeatherPrediction> {
    let predictions = find_predictions(raw, city_id)?;

    Ok(WeatherPrediction {
        today: parse_range(predictions, ForecastDay::Today)?,
        tomorrow: parse_range(predictions, ForecastDay::Tomorrow)?,
    })
}

/// Check recipe content against the length rules. Length is counted in
/// characters.
pub fn validate_recipe_content(content: Option<&str>) -> Result<&str> {
    let content = match content {
        Some(content) if !content.is_empty() => content,
        _ => return Err(GatewayError::validation("Content is required")),
    };

    let length = content.chars().count();
    if length < MIN_CONTENT_CHARS {
        return Err(GatewayError::validation(format!(
            "Content is too short (minimum {MIN_CONTENT_CHARS} characters)"
        )));
    }
    if length > MAX_CONTENT_CHARS {
        return Err(GatewayError::validation(format!(
            "Content is too long (maximum {MAX_CONTENT_CHARS} characters)"
        )));
    }

    Ok(content)
}
