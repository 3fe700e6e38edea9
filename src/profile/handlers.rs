use axum::{extract::State, routing::get, Json, Router};
use tracing::{info, instrument};

use crate::error::ApiError;
use crate::extractors::ApiJson;
use crate::state::AppState;

use super::dto::{SaveProfileRequest, StoredProfile};
use super::services::save_profile;

pub fn routes() -> Router<AppState> {
    Router::new().route(
        "/profile",
        get(get_profile).post(put_profile).put(put_profile),
    )
}

/// `null` until the first save.
#[instrument(skip(state))]
pub async fn get_profile(
    State(state): State<AppState>,
) -> Result<Json<Option<StoredProfile>>, ApiError> {
    Ok(Json(state.profile.get().await?))
}

#[instrument(skip(state, req))]
pub async fn put_profile(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<SaveProfileRequest>,
) -> Result<Json<StoredProfile>, ApiError> {
    req.validate()?;
    let saved = save_profile(state.profile.as_ref(), req).await?;
    info!(updated_at = %saved.updated_at, "profile saved");
    Ok(Json(saved))
}
