use axum::{extract::State, routing::post, Json, Router};
use tracing::{info, instrument};

use crate::error::ApiError;
use crate::extractors::ApiJson;
use crate::nutrition::NutritionResult;
use crate::state::AppState;

use super::dto::FoodItem;

pub fn routes() -> Router<AppState> {
    Router::new().route("/calories", post(estimate_food))
}

#[instrument(skip(state))]
pub async fn estimate_food(
    State(state): State<AppState>,
    ApiJson(item): ApiJson<FoodItem>,
) -> Result<Json<NutritionResult>, ApiError> {
    let (food, quantity) = item.validate()?;
    let result = state
        .ai
        .estimate(food, quantity)
        .await
        .map_err(ApiError::upstream("Failed to calculate calories"))?;
    info!(food, quantity, calories = result.calories.amount(), "estimated");
    Ok(Json(result))
}
