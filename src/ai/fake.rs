use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use super::{AiError, FoodSuggestion, NutrientSuggestion, NutritionAi};
use crate::nutrition::{value::NutrientValue, NutrientDeficiency, NutritionResult};

/// Deterministic stand-in for the completion API.
///
/// Every food is 100 kcal with 10g protein (20% of a 50g reference) and
/// 2 mg iron, except a food named `"fail"`, which errors.
#[derive(Default)]
pub struct ScriptedAi {
    pub fail_suggestions: bool,
    pub suggest_calls: AtomicUsize,
}

fn nv(value: &str, dv: &str, percent: f64) -> NutrientValue {
    NutrientValue {
        value: value.into(),
        daily_value: dv.into(),
        percent,
    }
}

#[async_trait]
impl NutritionAi for ScriptedAi {
    async fn estimate(&self, food: &str, quantity: &str) -> Result<NutritionResult, AiError> {
        if food == "fail" {
            return Err(AiError::EmptyResponse);
        }
        let mut r = NutritionResult {
            food: food.to_string(),
            quantity: quantity.to_string(),
            ..Default::default()
        };
        r.calories = NutrientValue {
            value: 100.0.into(),
            daily_value: 2000.0.into(),
            percent: 5.0,
        };
        r.macros.protein = nv("10g", "50g", 20.0);
        r.macros.carbs = nv("0g", "300g", 0.0);
        r.macros.fat = nv("0g", "65g", 0.0);
        r.macros.fiber = nv("0g", "25g", 0.0);
        r.micros.insert("iron".into(), nv("2 mg", "18 mg", 11.0));
        Ok(r)
    }

    async fn suggest(
        &self,
        deficiencies: &[NutrientDeficiency],
    ) -> Result<Vec<NutrientSuggestion>, AiError> {
        self.suggest_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_suggestions {
            return Err(AiError::EmptyResponse);
        }
        Ok(deficiencies
            .iter()
            .map(|d| NutrientSuggestion {
                nutrient: d.nutrient.clone(),
                current_percentage: d.percentage as f64,
                foods: vec![FoodSuggestion {
                    name: format!("more {}", d.nutrient.to_lowercase()),
                    portion: "100g".into(),
                    contribution: "provides ~30% of the target".into(),
                }],
            })
            .collect())
    }
}
