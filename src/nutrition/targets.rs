use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::keys::NutrientKey;

/// Daily intake target per nutrient. A key that is missing or set to `0`
/// is not tracked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DailyTargets(BTreeMap<NutrientKey, f64>);

impl DailyTargets {
    #[cfg(test)]
    pub fn empty() -> Self {
        Self(BTreeMap::new())
    }

    pub fn get(&self, key: NutrientKey) -> f64 {
        self.0.get(&key).copied().unwrap_or(0.0)
    }

    #[cfg(test)]
    pub fn set(&mut self, key: NutrientKey, target: f64) {
        self.0.insert(key, target);
    }

    /// Replaces the entries present in `other`, leaving the rest untouched.
    pub fn merge(&mut self, other: &DailyTargets) {
        for (key, target) in &other.0 {
            self.0.insert(*key, *target);
        }
    }
}

impl FromIterator<(NutrientKey, f64)> for DailyTargets {
    fn from_iter<I: IntoIterator<Item = (NutrientKey, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Default for DailyTargets {
    /// Targets for the default profile: an active adult woman on 1925 kcal.
    fn default() -> Self {
        use NutrientKey::*;
        [
            (Calories, 1925.0),
            (Protein, 100.0),
            (Carbs, 205.0),
            (Fat, 58.0),
            (Fiber, 25.0),
            (Calcium, 1000.0),
            (Iron, 18.0),
            (Magnesium, 320.0),
            (Potassium, 2600.0),
            (Sodium, 2000.0),
            (Phosphorus, 700.0),
            (VitaminA, 700.0),
            (VitaminC, 75.0),
            (VitaminD, 15.0),
            (VitaminE, 15.0),
            (VitaminK, 90.0),
            (VitaminB1, 1.1),
            (VitaminB2, 1.1),
            (VitaminB3, 14.0),
            (VitaminB5, 5.0),
            (VitaminB6, 1.3),
            (Biotin, 30.0),
            (Folate, 400.0),
            (VitaminB12, 2.4),
            (Zinc, 8.0),
            (Copper, 900.0),
            (Manganese, 1.8),
            (Selenium, 55.0),
            (Iodine, 150.0),
        ]
        .into_iter()
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_covers_every_key() {
        let t = DailyTargets::default();
        for key in NutrientKey::ALL {
            assert!(t.get(key) > 0.0, "{key} has no default target");
        }
    }

    #[test]
    fn merge_replaces_only_given_entries() {
        let mut t = DailyTargets::default();
        let patch: DailyTargets = serde_json::from_str(r#"{"protein": 120, "iron": 0}"#).unwrap();
        t.merge(&patch);
        assert_eq!(t.get(NutrientKey::Protein), 120.0);
        assert_eq!(t.get(NutrientKey::Iron), 0.0);
        assert_eq!(t.get(NutrientKey::Calories), 1925.0);
    }

    #[test]
    fn unknown_key_is_rejected() {
        assert!(serde_json::from_str::<DailyTargets>(r#"{"vitaminQ": 1}"#).is_err());
    }
}
