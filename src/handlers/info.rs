use axum::{
    Json,
    extract::{Path, State},
};
use tracing::{debug, instrument};

use super::AppState;
use crate::GatewayError;
use crate::error::ApiError;
use crate::models::CityInfosResponse;
use crate::validate::{validate_city_shape, validate_weather_shape};

/// `GET /cities/{cityId}/infos`
///
/// Each upstream call is attempted exactly once and the first failure ends the
/// request: a missing city is a 404, anything else upstream is a 500.
#[instrument(skip(state))]
pub async fn get_city_infos(
    State(state): State<AppState>,
    Path(city_id): Path<String>,
) -> Result<Json<CityInfosResponse>, ApiError> {
    let raw_city = state.upstream.fetch_city_info(&city_id).await?;
    let city = validate_city_shape(&raw_city)?;

    let coordinates = city.coordinates;
    let raw_weather = state
        .upstream
        .fetch_weather(coordinates.latitude, coordinates.longitude)
        .await
        .map_err(weather_failure)?;
    let weather = validate_weather_shape(&raw_weather, Some(city_id.as_str()))?;

    let recipes = state.store.get_by_city_id(&city_id);
    debug!(recipes = recipes.len(), "City infos assembled");

    Ok(Json(CityInfosResponse::assemble(city, &weather, &recipes)))
}

// The city was already found, so no weather failure may surface as a 404.
fn weather_failure(error: GatewayError) -> GatewayError {
    match error {
        GatewayError::NotFound { message } => {
            GatewayError::upstream(format!("Weather lookup failed: {message}"))
        }
        other => other,
    }
}
