use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::calories::dto::validate_items;
use crate::calories::services::estimate_all;
use crate::error::ApiError;
use crate::extractors::ApiJson;
use crate::profile::services::current_targets;
use crate::state::AppState;

use super::dto::{
    parse_date, CreateMealRequest, DaySummary, DeletedResponse, EstimateMealRequest, Meal,
    MealSummary, MealType, NewMeal, UpdateMealRequest,
};
use super::services::{day_summary, meal_summary};

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/meals", get(list_meals))
        .route("/meals/:id", get(get_meal))
        .route("/meals/:id/summary", get(get_meal_summary))
        .route("/days/:date/summary", get(get_day_summary))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/meals", post(create_meal))
        .route("/meals/estimate", post(estimate_meal))
        .route("/meals/:id", put(update_meal).delete(delete_meal))
}

/// An id that is not a UUID cannot name a stored meal.
fn meal_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::NotFound("Meal"))
}

#[instrument(skip(state))]
pub async fn list_meals(State(state): State<AppState>) -> Result<Json<Vec<Meal>>, ApiError> {
    Ok(Json(state.meals.list().await?))
}

#[instrument(skip(state))]
pub async fn get_meal(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Meal>, ApiError> {
    let id = meal_id(&id)?;
    let meal = state.meals.get(id).await?.ok_or(ApiError::NotFound("Meal"))?;
    Ok(Json(meal))
}

#[instrument(skip(state, req))]
pub async fn create_meal(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<CreateMealRequest>,
) -> Result<(StatusCode, Json<Meal>), ApiError> {
    let meal = state.meals.create(req.validate()?).await?;
    info!(id = %meal.id, meal_type = meal.meal_type.as_str(), foods = meal.foods.len(), "meal created");
    Ok((StatusCode::CREATED, Json(meal)))
}

/// Estimates every item, then saves them as one meal. Nothing is saved
/// unless every estimate succeeds.
#[instrument(skip(state, req))]
pub async fn estimate_meal(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<EstimateMealRequest>,
) -> Result<(StatusCode, Json<Meal>), ApiError> {
    let date = req
        .date
        .as_deref()
        .ok_or_else(|| ApiError::validation("date is required"))
        .and_then(parse_date)?;
    let meal_type: MealType = req
        .meal_type
        .as_deref()
        .ok_or_else(|| ApiError::validation("mealType is required"))?
        .parse()?;
    let items = validate_items(&req.items)?;

    let foods = estimate_all(state.ai.as_ref(), &items)
        .await
        .map_err(ApiError::upstream("Failed to calculate calories"))?;

    let meal = state
        .meals
        .create(NewMeal {
            date,
            meal_type,
            foods,
        })
        .await?;
    info!(id = %meal.id, foods = meal.foods.len(), "estimated meal created");
    Ok((StatusCode::CREATED, Json(meal)))
}

#[instrument(skip(state, req))]
pub async fn update_meal(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<UpdateMealRequest>,
) -> Result<Json<Meal>, ApiError> {
    let id = meal_id(&id)?;
    let update = req.validate()?;
    let meal = state
        .meals
        .update(id, update)
        .await?
        .ok_or(ApiError::NotFound("Meal"))?;
    Ok(Json(meal))
}

#[instrument(skip(state))]
pub async fn delete_meal(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeletedResponse>, ApiError> {
    let id = meal_id(&id)?;
    if !state.meals.delete(id).await? {
        return Err(ApiError::NotFound("Meal"));
    }
    info!(%id, "meal deleted");
    Ok(Json(DeletedResponse {
        message: "Meal deleted",
    }))
}

#[instrument(skip(state))]
pub async fn get_meal_summary(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MealSummary>, ApiError> {
    let id = meal_id(&id)?;
    let meal = state.meals.get(id).await?.ok_or(ApiError::NotFound("Meal"))?;
    let targets = current_targets(state.profile.as_ref()).await?;
    Ok(Json(meal_summary(&meal, &targets)))
}

#[instrument(skip(state))]
pub async fn get_day_summary(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> Result<Json<DaySummary>, ApiError> {
    let date = parse_date(&date)?;
    let meals = state.meals.list_by_date(date).await?;
    let targets = current_targets(state.profile.as_ref()).await?;
    Ok(Json(day_summary(date, meals, &targets)))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::StatusCode;
    use serde_json::json;
    use sqlx::types::Json as SqlJson;
    use time::{macros::date, OffsetDateTime};
    use uuid::Uuid;

    use crate::ai::fake::ScriptedAi;
    use crate::app::build_app;
    use crate::meals::repo::{MealStore, MemoryMealStore};
    use crate::meals::repo_types::MealRow;
    use crate::profile::repo::MemoryProfileStore;
    use crate::state::AppState;
    use crate::testing::{call, delete, get, json_req};

    fn lunch() -> serde_json::Value {
        json!({
            "date": "2024-03-01",
            "mealType": "lunch",
            "foods": [{
                "food": "rice",
                "quantity": "100g",
                "calories": { "value": 130, "dv": 2000, "percent": 7 },
                "macros": {
                    "protein": { "value": "2.7g", "dv": "50g", "percent": 5 },
                    "carbs": { "value": "28g", "dv": "300g", "percent": 9 },
                    "fat": { "value": "0.3g", "dv": "65g", "percent": 0 },
                    "fiber": { "value": "0.4g", "dv": "25g", "percent": 2 }
                }
            }]
        })
    }

    #[tokio::test]
    async fn create_get_update_delete() {
        let app = build_app(AppState::fake());

        let (status, created) = call(app.clone(), json_req("POST", "/api/meals", lunch())).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["mealType"], "lunch");
        assert_eq!(created["foods"][0]["macros"]["protein"]["value"], "2.7g");
        let id = created["id"].as_str().unwrap().to_string();

        let (status, fetched) = call(app.clone(), get(&format!("/api/meals/{id}"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched, created);

        let (status, updated) = call(
            app.clone(),
            json_req("PUT", &format!("/api/meals/{id}"), json!({ "mealType": "dinner" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["mealType"], "dinner");
        assert_eq!(updated["date"], "2024-03-01");

        let (status, body) = call(app.clone(), delete(&format!("/api/meals/{id}"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Meal deleted");

        let (status, body) = call(app, get(&format!("/api/meals/{id}"))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Meal not found");
    }

    #[tokio::test]
    async fn missing_meal_is_not_found() {
        let app = build_app(AppState::fake());
        let id = Uuid::new_v4();
        let (status, _) = call(
            app.clone(),
            json_req("PUT", &format!("/api/meals/{id}"), json!({ "mealType": "lunch" })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _) = call(app.clone(), delete(&format!("/api/meals/{id}"))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _) = call(app, get("/api/meals/not-a-uuid")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn foods_must_be_an_array() {
        let app = build_app(AppState::fake());
        let mut body = lunch();
        body["foods"] = json!("rice");
        let (status, body) = call(app, json_req("POST", "/api/meals", body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "foods must be an array");
    }

    #[tokio::test]
    async fn list_is_newest_date_first() {
        let app = build_app(AppState::fake());
        for date in ["2024-03-01", "2024-03-03", "2024-03-02"] {
            let mut body = lunch();
            body["date"] = json!(date);
            call(app.clone(), json_req("POST", "/api/meals", body)).await;
        }
        let (_, list) = call(app, get("/api/meals")).await;
        let dates: Vec<_> = list
            .as_array()
            .unwrap()
            .iter()
            .map(|m| m["date"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(dates, ["2024-03-03", "2024-03-02", "2024-03-01"]);
    }

    #[tokio::test]
    async fn legacy_snack_reads_back_as_first_snack() {
        let meals = Arc::new(MemoryMealStore::default());
        let id = Uuid::new_v4();
        meals
            .insert_row(MealRow {
                id,
                date: date!(2023 - 11 - 20),
                meal_type: "snack".into(),
                foods: SqlJson(vec![]),
                created_at: OffsetDateTime::UNIX_EPOCH,
            })
            .await;
        let state = AppState {
            meals: meals.clone(),
            profile: Arc::new(MemoryProfileStore::default()),
            ai: Arc::new(ScriptedAi::default()),
        };
        let (status, body) = call(build_app(state), get(&format!("/api/meals/{id}"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["mealType"], "snack1");
        assert_eq!(meals.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn estimate_saves_all_or_nothing() {
        let app = build_app(AppState::fake());

        let (status, body) = call(
            app.clone(),
            json_req(
                "POST",
                "/api/meals/estimate",
                json!({
                    "date": "2024-03-01",
                    "mealType": "breakfast",
                    "items": [{ "food": "egg", "quantity": "2 units" }, { "food": "fail", "quantity": "1" }]
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Failed to calculate calories");
        let (_, list) = call(app.clone(), get("/api/meals")).await;
        assert_eq!(list, json!([]));

        let (status, meal) = call(
            app,
            json_req(
                "POST",
                "/api/meals/estimate",
                json!({
                    "date": "2024-03-01",
                    "mealType": "snack",
                    "items": [{ "food": "egg", "quantity": "2 units" }, { "food": "toast", "quantity": "1 slice" }]
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(meal["mealType"], "snack1");
        assert_eq!(meal["foods"][1]["food"], "toast");
    }

    #[tokio::test]
    async fn estimate_rejects_empty_items() {
        let app = build_app(AppState::fake());
        let (status, _) = call(
            app,
            json_req(
                "POST",
                "/api/meals/estimate",
                json!({ "date": "2024-03-01", "mealType": "lunch", "items": [] }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn day_summary_lists_meals_in_slot_order() {
        let app = build_app(AppState::fake());
        for (slot, food) in [("dinner", "fish"), ("breakfast", "egg")] {
            call(
                app.clone(),
                json_req(
                    "POST",
                    "/api/meals/estimate",
                    json!({ "date": "2024-03-05", "mealType": slot, "items": [{ "food": food, "quantity": "1" }] }),
                ),
            )
            .await;
        }
        let (status, day) = call(app.clone(), get("/api/days/2024-03-05/summary")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(day["meals"][0]["mealType"], "breakfast");
        assert_eq!(day["meals"][1]["mealType"], "dinner");
        assert_eq!(day["calories"], 200.0);
        assert_eq!(day["report"][0]["total"], 200.0);
        assert_eq!(day["deficiencies"].as_array().unwrap().len(), 5);

        let (status, _) = call(app, get("/api/days/05-03-2024/summary")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn meal_summary_includes_macro_approximation() {
        let app = build_app(AppState::fake());
        let (_, created) = call(app.clone(), json_req("POST", "/api/meals", lunch())).await;
        let id = created["id"].as_str().unwrap();
        let (status, summary) = call(app, get(&format!("/api/meals/{id}/summary"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(summary["approximateMacroPercents"]["carbs"], 9);
        let carbs = summary["report"]
            .as_array()
            .unwrap()
            .iter()
            .find(|r| r["key"] == "carbs")
            .unwrap();
        assert_eq!(carbs["total"], 28.0);
        assert_eq!(carbs["target"], 205.0);
        assert_eq!(carbs["percent"], 14);
    }
}
