use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use tracing::{info, instrument, warn};

use super::AppState;
use crate::GatewayError;
use crate::error::ApiError;
use crate::models::{CreateRecipeRequest, RecipeView};
use crate::validate::validate_recipe_content;

/// `POST /cities/{cityId}/recipes`
///
/// Content is checked before the city lookup, so an invalid body never costs
/// an upstream call.
#[instrument(skip(state, payload))]
pub async fn create_recipe(
    State(state): State<AppState>,
    Path(city_id): Path<String>,
    payload: Result<Json<CreateRecipeRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<RecipeView>), ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        warn!("Rejected recipe body: {}", rejection.body_text());
        ApiError::bad_request("Invalid JSON body")
    })?;

    let content = validate_recipe_content(request.content.as_deref())?;
    state.ensure_city_exists(&city_id).await?;

    let recipe = state.store.add(&city_id, content);
    info!(id = recipe.id, "Recipe created");

    Ok((StatusCode::CREATED, Json(RecipeView::from(recipe))))
}

/// `DELETE /cities/{cityId}/recipes/{recipeId}`
///
/// A recipe stored under another city is a 404 and stays in the store.
#[instrument(skip(state))]
pub async fn delete_recipe(
    State(state): State<AppState>,
    Path((city_id, recipe_id)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    state.ensure_city_exists(&city_id).await?;

    let id = parse_recipe_id(&recipe_id)
        .ok_or_else(|| GatewayError::not_found("Recipe not found"))?;
    let recipe = state.store.delete_for_city(id, &city_id)?;
    info!(id = recipe.id, "Recipe deleted");

    Ok(StatusCode::NO_CONTENT)
}

// Plain ascii digits only; `str::parse` would also take a leading `+`.
fn parse_recipe_id(raw: &str) -> Option<u64> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok().filter(|id| *id > 0)
}
