use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use time::{macros::format_description, Date, OffsetDateTime};
use uuid::Uuid;

use crate::calories::dto::FoodItem;
use crate::error::ApiError;
use crate::nutrition::{NutrientDeficiency, NutrientKey, NutrientProgress, NutritionResult};

time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

/// Meal slots of the day, in eating order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Snack1,
    Lunch,
    Snack2,
    Dinner,
    Supper,
}

/// Values written by the older four-slot schema and what they mean now.
const LEGACY_MEAL_TYPES: &[(&str, MealType)] = &[("snack", MealType::Snack1)];

impl MealType {
    pub fn as_str(self) -> &'static str {
        match self {
            MealType::Breakfast => "breakfast",
            MealType::Snack1 => "snack1",
            MealType::Lunch => "lunch",
            MealType::Snack2 => "snack2",
            MealType::Dinner => "dinner",
            MealType::Supper => "supper",
        }
    }
}

impl FromStr for MealType {
    type Err = ApiError;

    /// Accepts the six current slots plus the legacy names, which are mapped
    /// onto their current slot.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let current = match s {
            "breakfast" => Some(MealType::Breakfast),
            "snack1" => Some(MealType::Snack1),
            "lunch" => Some(MealType::Lunch),
            "snack2" => Some(MealType::Snack2),
            "dinner" => Some(MealType::Dinner),
            "supper" => Some(MealType::Supper),
            _ => None,
        };
        current
            .or_else(|| {
                LEGACY_MEAL_TYPES
                    .iter()
                    .find(|(legacy, _)| *legacy == s)
                    .map(|(_, t)| *t)
            })
            .ok_or_else(|| {
                ApiError::validation(
                    "mealType must be one of breakfast, snack1, lunch, snack2, dinner, supper",
                )
            })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Meal {
    pub id: Uuid,
    #[serde(with = "iso_date")]
    pub date: Date,
    pub meal_type: MealType,
    pub foods: Vec<NutritionResult>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone)]
pub struct NewMeal {
    pub date: Date,
    pub meal_type: MealType,
    pub foods: Vec<NutritionResult>,
}

#[derive(Debug, Clone, Default)]
pub struct MealUpdate {
    pub date: Option<Date>,
    pub meal_type: Option<MealType>,
    pub foods: Option<Vec<NutritionResult>>,
}

pub fn parse_date(s: &str) -> Result<Date, ApiError> {
    Date::parse(s, format_description!("[year]-[month]-[day]"))
        .map_err(|_| ApiError::validation("date must be a calendar date (YYYY-MM-DD)"))
}

fn parse_foods(value: serde_json::Value) -> Result<Vec<NutritionResult>, ApiError> {
    if !value.is_array() {
        return Err(ApiError::validation("foods must be an array"));
    }
    serde_json::from_value(value)
        .map_err(|e| ApiError::validation(format!("foods contains an invalid entry: {e}")))
}

fn required<T>(field: Option<T>, name: &str) -> Result<T, ApiError> {
    field.ok_or_else(|| ApiError::validation(format!("{name} is required")))
}

/// Body of `POST /meals`. Fields are loosely typed so that each problem can
/// be reported by name.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMealRequest {
    pub date: Option<String>,
    pub meal_type: Option<String>,
    pub foods: Option<serde_json::Value>,
}

impl CreateMealRequest {
    pub fn validate(self) -> Result<NewMeal, ApiError> {
        let date = parse_date(&required(self.date, "date")?)?;
        let meal_type = required(self.meal_type, "mealType")?.parse()?;
        let foods = parse_foods(required(self.foods, "foods")?)?;
        Ok(NewMeal {
            date,
            meal_type,
            foods,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMealRequest {
    pub date: Option<String>,
    pub meal_type: Option<String>,
    pub foods: Option<serde_json::Value>,
}

impl UpdateMealRequest {
    pub fn validate(self) -> Result<MealUpdate, ApiError> {
        Ok(MealUpdate {
            date: self.date.as_deref().map(parse_date).transpose()?,
            meal_type: self.meal_type.as_deref().map(str::parse::<MealType>).transpose()?,
            foods: self.foods.map(parse_foods).transpose()?,
        })
    }
}

/// Body of `POST /meals/estimate`: foods to estimate and then save as one meal.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateMealRequest {
    pub date: Option<String>,
    pub meal_type: Option<String>,
    #[serde(default)]
    pub items: Vec<FoodItem>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MealSummary {
    pub id: Uuid,
    pub report: Vec<NutrientProgress>,
    /// Summed per-food percents; a display approximation, see
    /// `nutrition::approximate_percent_sum`.
    pub approximate_macro_percents: BTreeMap<NutrientKey, i64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayMealEntry {
    pub id: Uuid,
    pub meal_type: MealType,
    pub foods: usize,
    pub calories: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySummary {
    #[serde(with = "iso_date")]
    pub date: Date,
    pub calories: f64,
    pub meals: Vec<DayMealEntry>,
    pub report: Vec<NutrientProgress>,
    pub deficiencies: Vec<NutrientDeficiency>,
}

#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    pub message: &'static str,
}
