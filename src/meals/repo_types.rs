use sqlx::{types::Json, FromRow};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use super::dto::{Meal, MealType};
use crate::nutrition::NutritionResult;

/// A `meals` row as stored. `meal_type` may still hold a legacy value.
#[derive(Debug, Clone, FromRow)]
pub struct MealRow {
    pub id: Uuid,
    pub date: Date,
    pub meal_type: String,
    pub foods: Json<Vec<NutritionResult>>,
    pub created_at: OffsetDateTime,
}

impl TryFrom<MealRow> for Meal {
    type Error = anyhow::Error;

    fn try_from(r: MealRow) -> Result<Self, Self::Error> {
        let meal_type = r
            .meal_type
            .parse::<MealType>()
            .map_err(|_| anyhow::anyhow!("meal {} has unknown meal_type {:?}", r.id, r.meal_type))?;
        Ok(Self {
            id: r.id,
            date: r.date,
            meal_type,
            foods: r.foods.0,
            created_at: r.created_at,
        })
    }
}
