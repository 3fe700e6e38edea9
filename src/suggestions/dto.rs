use serde::{Deserialize, Serialize};

use crate::ai::NutrientSuggestion;
use crate::nutrition::NutrientDeficiency;

#[derive(Debug, Deserialize)]
pub struct SuggestionsRequest {
    #[serde(default)]
    pub deficiencies: Vec<NutrientDeficiency>,
}

#[derive(Debug, Serialize)]
pub struct SuggestionsResponse {
    pub suggestions: Vec<NutrientSuggestion>,
}
