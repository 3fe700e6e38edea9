use axum::{extract::State, routing::post, Json, Router};
use tracing::{info, instrument};

use crate::calories::dto::filled_items;
use crate::error::ApiError;
use crate::extractors::ApiJson;
use crate::profile::services::current_targets;
use crate::state::AppState;

use super::dto::{SimulateRequest, SimulateResponse};
use super::services::simulate;

pub fn routes() -> Router<AppState> {
    Router::new().route("/simulator", post(run_simulation))
}

#[instrument(skip(state, req))]
pub async fn run_simulation(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<SimulateRequest>,
) -> Result<Json<SimulateResponse>, ApiError> {
    let items = filled_items(&req.items)?;
    let targets = current_targets(state.profile.as_ref()).await?;
    let out = simulate(state.ai.as_ref(), &items, &targets, req.suggest)
        .await
        .map_err(ApiError::upstream("Failed to calculate calories"))?;
    info!(
        items = out.results.len(),
        deficiencies = out.deficiencies.len(),
        suggestions = out.suggestions.len(),
        "simulation done"
    );
    Ok(Json(out))
}
