use std::collections::BTreeMap;

use serde::Serialize;

use super::keys::NutrientKey;
use super::result::NutritionResult;
use super::targets::DailyTargets;
use super::value::round1;

/// Summed intake per nutrient over a set of foods.
///
/// `items` tells an empty set apart from foods that happen to add up to zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Totals {
    pub items: usize,
    pub nutrients: BTreeMap<NutrientKey, f64>,
}

impl Totals {
    pub fn get(&self, key: NutrientKey) -> f64 {
        self.nutrients.get(&key).copied().unwrap_or(0.0)
    }

    pub fn is_empty(&self) -> bool {
        self.items == 0
    }

    /// Adds `other` into `self`, e.g. meal totals into a day.
    pub fn absorb(&mut self, other: &Totals) {
        self.items += other.items;
        for (key, v) in &other.nutrients {
            *self.nutrients.entry(*key).or_insert(0.0) += v;
        }
    }
}

pub fn aggregate<'a, I>(results: I) -> Totals
where
    I: IntoIterator<Item = &'a NutritionResult>,
{
    let mut nutrients: BTreeMap<NutrientKey, f64> =
        NutrientKey::ALL.iter().map(|k| (*k, 0.0)).collect();
    let mut items = 0;
    for r in results {
        items += 1;
        for key in NutrientKey::ALL {
            *nutrients.entry(key).or_insert(0.0) += r.amount(key);
        }
    }
    Totals { items, nutrients }
}

/// Percent of `target` reached by `total`, rounded half-up. Zero when the
/// target is not positive.
///
/// This is the only way percent-of-target is computed; both the reports and
/// the deficiency check go through it.
pub fn percent_of(total: f64, target: f64) -> i64 {
    if !(target > 0.0) || !total.is_finite() {
        return 0;
    }
    (total / target * 100.0 + 0.5).floor() as i64
}

/// Display approximation used by the meal history macro breakdown: the plain
/// sum of each food's stored `percent` for `key`.
///
/// Inexact on purpose. Per-item percents are relative to whatever generic
/// daily value the estimator quoted for that item, so the sum only matches
/// `percent_of(total, target)` when every item used the same reference.
/// Never use it for deficiency decisions.
pub fn approximate_percent_sum<'a, I>(results: I, key: NutrientKey) -> i64
where
    I: IntoIterator<Item = &'a NutritionResult>,
{
    let sum: f64 = results
        .into_iter()
        .filter_map(|r| r.nutrient(key))
        .map(|v| v.percent)
        .filter(|p| p.is_finite())
        .sum();
    (sum + 0.5).floor() as i64
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NutrientProgress {
    pub key: NutrientKey,
    pub label: &'static str,
    pub unit: &'static str,
    pub total: f64,
    pub target: f64,
    pub percent: i64,
}

/// One progress row per tracked nutrient, in catalogue order.
pub fn progress_report(totals: &Totals, targets: &DailyTargets) -> Vec<NutrientProgress> {
    NutrientKey::ALL
        .iter()
        .map(|&key| {
            let total = totals.get(key);
            let target = targets.get(key);
            NutrientProgress {
                key,
                label: key.label(),
                unit: key.unit(),
                total: round1(total),
                target,
                percent: percent_of(total, target),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nutrition::value::{NutrientValue, Quantity};

    fn food(protein: Quantity, protein_pct: f64, kcal: f64) -> NutritionResult {
        let mut r = NutritionResult {
            food: "x".into(),
            quantity: "100g".into(),
            ..Default::default()
        };
        r.calories = NutrientValue {
            value: kcal.into(),
            daily_value: 2000.0.into(),
            percent: 0.0,
        };
        r.macros.protein = NutrientValue {
            value: protein,
            daily_value: "50g".into(),
            percent: protein_pct,
        };
        r
    }

    #[test]
    fn empty_input_is_all_zero_and_flagged_empty() {
        let t = aggregate(std::iter::empty::<&NutritionResult>());
        assert!(t.is_empty());
        for key in NutrientKey::ALL {
            assert_eq!(t.get(key), 0.0);
        }

        let zero_kcal = aggregate(&[food(0.0.into(), 0.0, 0.0)]);
        assert!(!zero_kcal.is_empty());
        assert_eq!(zero_kcal.get(NutrientKey::Calories), 0.0);
    }

    #[test]
    fn sums_mixed_number_and_text_values() {
        let foods = [food("12g".into(), 24.0, 100.0), food(9.0.into(), 18.0, 50.0)];
        let t = aggregate(&foods);
        assert_eq!(t.items, 2);
        assert_eq!(t.get(NutrientKey::Protein), 21.0);
        assert_eq!(t.get(NutrientKey::Calories), 150.0);
    }

    #[test]
    fn percent_of_rounds_half_up() {
        assert_eq!(percent_of(1.0, 3.0), 33);
        assert_eq!(percent_of(2.0, 3.0), 67);
        assert_eq!(percent_of(1.0, 200.0), 1);
        assert_eq!(percent_of(100.0, 100.0), 100);
        assert_eq!(percent_of(2.4, 2.4), 100);
    }

    #[test]
    fn percent_of_zero_target_is_zero() {
        assert_eq!(percent_of(50.0, 0.0), 0);
        assert_eq!(percent_of(0.0, 0.0), 0);
        assert_eq!(percent_of(50.0, -1.0), 0);
    }

    #[test]
    fn approximate_sum_adds_stored_percents() {
        let foods = [food("12g".into(), 24.0, 0.0), food(9.0.into(), 18.4, 0.0)];
        assert_eq!(approximate_percent_sum(&foods, NutrientKey::Protein), 42);
        // against a 100g target the authoritative figure differs
        let t = aggregate(&foods);
        assert_eq!(percent_of(t.get(NutrientKey::Protein), 100.0), 21);
    }

    #[test]
    fn report_has_a_row_per_key() {
        let t = aggregate(&[food("40g".into(), 0.0, 500.0)]);
        let report = progress_report(&t, &DailyTargets::default());
        assert_eq!(report.len(), NutrientKey::ALL.len());
        let protein = report.iter().find(|r| r.key == NutrientKey::Protein).unwrap();
        assert_eq!(protein.total, 40.0);
        assert_eq!(protein.percent, 40);
        assert_eq!(protein.unit, "g");
    }
}
