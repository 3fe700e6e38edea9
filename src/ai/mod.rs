//! Nutrition estimates and food suggestions from a chat-completion model.
//!
//! The model output is parsed as JSON and otherwise trusted: no retry, no
//! correction, no range checks.

#[cfg(test)]
pub mod fake;
pub mod openai;
mod prompts;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::nutrition::{NutrientDeficiency, NutritionResult};

pub use openai::OpenAiClient;

#[derive(Debug, Error)]
pub enum AiError {
    #[error("request to completion API failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("completion API returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("completion API returned no content")]
    EmptyResponse,
    #[error("completion content is not the expected JSON: {0}")]
    Malformed(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodSuggestion {
    pub name: String,
    pub portion: String,
    pub contribution: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NutrientSuggestion {
    pub nutrient: String,
    pub current_percentage: f64,
    pub foods: Vec<FoodSuggestion>,
}

#[async_trait]
pub trait NutritionAi: Send + Sync {
    /// Full nutrient profile of `quantity` of `food`.
    async fn estimate(&self, food: &str, quantity: &str) -> Result<NutritionResult, AiError>;

    /// Foods that would close the given gaps, one entry per deficiency.
    async fn suggest(
        &self,
        deficiencies: &[NutrientDeficiency],
    ) -> Result<Vec<NutrientSuggestion>, AiError>;
}
