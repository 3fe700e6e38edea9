use serde::{Deserialize, Serialize};

use super::aggregate::{percent_of, Totals};
use super::keys::NutrientKey;
use super::targets::DailyTargets;
use super::value::round1;

/// Intake below this percent of target counts as a deficiency.
pub const DEFICIENCY_THRESHOLD_PERCENT: i64 = 80;

/// At most this many deficiencies are reported, worst first.
pub const MAX_DEFICIENCIES: usize = 5;

/// Nutrients checked for deficiencies, in tie-break order. Calories, sodium
/// and the minor micros are deliberately absent.
pub const DEFICIENCY_CANDIDATES: [NutrientKey; 16] = [
    NutrientKey::Protein,
    NutrientKey::Carbs,
    NutrientKey::Fat,
    NutrientKey::Fiber,
    NutrientKey::Calcium,
    NutrientKey::Iron,
    NutrientKey::Magnesium,
    NutrientKey::Potassium,
    NutrientKey::Zinc,
    NutrientKey::VitaminA,
    NutrientKey::VitaminC,
    NutrientKey::VitaminD,
    NutrientKey::VitaminE,
    NutrientKey::VitaminK,
    NutrientKey::VitaminB12,
    NutrientKey::Folate,
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutrientDeficiency {
    pub nutrient: String,
    pub current: f64,
    pub target: f64,
    pub percentage: i64,
    pub unit: String,
}

pub fn detect_deficiencies(totals: &Totals, targets: &DailyTargets) -> Vec<NutrientDeficiency> {
    let mut found: Vec<NutrientDeficiency> = DEFICIENCY_CANDIDATES
        .iter()
        .filter_map(|&key| {
            let target = targets.get(key);
            if target == 0.0 {
                return None;
            }
            let current = totals.get(key);
            let percentage = percent_of(current, target);
            (percentage < DEFICIENCY_THRESHOLD_PERCENT).then(|| NutrientDeficiency {
                nutrient: key.label().to_string(),
                current: round1(current),
                target,
                percentage,
                unit: key.unit().to_string(),
            })
        })
        .collect();

    // stable: equal percentages keep candidate order
    found.sort_by_key(|d| d.percentage);
    found.truncate(MAX_DEFICIENCIES);
    found
}
