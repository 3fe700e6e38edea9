use axum::{extract::State, routing::post, Json, Router};
use tracing::{info, instrument};

use crate::error::ApiError;
use crate::extractors::ApiJson;
use crate::state::AppState;

use super::dto::{SuggestionsRequest, SuggestionsResponse};

pub fn routes() -> Router<AppState> {
    Router::new().route("/suggestions", post(get_suggestions))
}

#[instrument(skip(state, req))]
pub async fn get_suggestions(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<SuggestionsRequest>,
) -> Result<Json<SuggestionsResponse>, ApiError> {
    if req.deficiencies.is_empty() {
        return Err(ApiError::validation("deficiencies array is required"));
    }
    let suggestions = state
        .ai
        .suggest(&req.deficiencies)
        .await
        .map_err(ApiError::upstream("Failed to get suggestions"))?;
    info!(
        deficiencies = req.deficiencies.len(),
        suggestions = suggestions.len(),
        "suggestions generated"
    );
    Ok(Json(SuggestionsResponse { suggestions }))
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;
    use std::sync::Arc;

    use axum::http::StatusCode;
    use serde_json::json;

    use crate::ai::fake::ScriptedAi;
    use crate::app::build_app;
    use crate::meals::repo::MemoryMealStore;
    use crate::profile::repo::MemoryProfileStore;
    use crate::state::AppState;
    use crate::testing::{call, json_req};

    fn iron() -> serde_json::Value {
        json!({ "nutrient": "Iron", "current": 4.5, "target": 18, "percentage": 25, "unit": "mg" })
    }

    #[tokio::test]
    async fn empty_or_absent_deficiencies_are_rejected() {
        let ai = Arc::new(ScriptedAi::default());
        let state = AppState {
            meals: Arc::new(MemoryMealStore::default()),
            profile: Arc::new(MemoryProfileStore::default()),
            ai: ai.clone(),
        };
        let app = build_app(state);
        for body in [json!({}), json!({ "deficiencies": [] })] {
            let (status, body) = call(app.clone(), json_req("POST", "/api/suggestions", body)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body["error"], "deficiencies array is required");
        }
        assert_eq!(ai.suggest_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn returns_one_entry_per_deficiency() {
        let app = build_app(AppState::fake());
        let (status, body) = call(
            app,
            json_req("POST", "/api/suggestions", json!({ "deficiencies": [iron()] })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["suggestions"][0]["nutrient"], "Iron");
        assert_eq!(body["suggestions"][0]["currentPercentage"], 25.0);
        assert_eq!(body["suggestions"][0]["foods"][0]["portion"], "100g");
    }

    #[tokio::test]
    async fn upstream_failure_is_generic() {
        let app = build_app(AppState::with_ai(ScriptedAi {
            fail_suggestions: true,
            ..Default::default()
        }));
        let (status, body) = call(
            app,
            json_req("POST", "/api/suggestions", json!({ "deficiencies": [iron()] })),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": "Failed to get suggestions" }));
    }
}
