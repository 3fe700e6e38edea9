use serde::{Deserialize, Serialize};

use crate::ai::NutrientSuggestion;
use crate::calories::dto::FoodItem;
use crate::nutrition::{NutrientDeficiency, NutrientProgress, NutritionResult};

fn yes() -> bool {
    true
}

#[derive(Debug, Deserialize)]
pub struct SimulateRequest {
    #[serde(default)]
    pub items: Vec<FoodItem>,
    #[serde(default = "yes")]
    pub suggest: bool,
}

#[derive(Debug, Serialize)]
pub struct SimulateResponse {
    pub results: Vec<NutritionResult>,
    pub report: Vec<NutrientProgress>,
    pub deficiencies: Vec<NutrientDeficiency>,
    pub suggestions: Vec<NutrientSuggestion>,
}
