use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::keys::{NutrientGroup, NutrientKey};
use super::value::NutrientValue;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Macros {
    pub protein: NutrientValue,
    pub carbs: NutrientValue,
    pub fat: NutrientValue,
    pub fiber: NutrientValue,
}

/// One food's nutrient profile as produced by the estimator.
///
/// Micros are kept as a map: older meals carry a 12-entry set, newer ones
/// the full 24, and a missing micro simply counts as zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NutritionResult {
    pub food: String,
    pub quantity: String,
    pub calories: NutrientValue,
    pub macros: Macros,
    #[serde(default)]
    pub micros: BTreeMap<String, NutrientValue>,
}

impl NutritionResult {
    pub fn nutrient(&self, key: NutrientKey) -> Option<&NutrientValue> {
        match key.group() {
            NutrientGroup::Energy => Some(&self.calories),
            NutrientGroup::Macro => Some(match key {
                NutrientKey::Protein => &self.macros.protein,
                NutrientKey::Carbs => &self.macros.carbs,
                NutrientKey::Fat => &self.macros.fat,
                _ => &self.macros.fiber,
            }),
            NutrientGroup::Micro => self.micros.get(key.as_str()),
        }
    }

    /// Coerced amount of `key` in this food, `0` when absent.
    pub fn amount(&self, key: NutrientKey) -> f64 {
        self.nutrient(key).map(NutrientValue::amount).unwrap_or(0.0)
    }
}
