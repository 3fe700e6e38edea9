use time::Date;

use crate::nutrition::value::round1;
use crate::nutrition::{
    aggregate, approximate_percent_sum, detect_deficiencies, progress_report, DailyTargets,
    NutrientKey, NutritionResult,
};

use super::dto::{DayMealEntry, DaySummary, Meal, MealSummary};

pub fn meal_summary(meal: &Meal, targets: &DailyTargets) -> MealSummary {
    let totals = aggregate(&meal.foods);
    MealSummary {
        id: meal.id,
        report: progress_report(&totals, targets),
        approximate_macro_percents: NutrientKey::MACROS
            .iter()
            .map(|&key| (key, approximate_percent_sum(&meal.foods, key)))
            .collect(),
    }
}

/// Rolls a day's meals up in slot order. Meals sharing a slot keep the
/// order they were given in. A day with no food logged has no
/// deficiencies yet.
pub fn day_summary(date: Date, mut meals: Vec<Meal>, targets: &DailyTargets) -> DaySummary {
    meals.sort_by_key(|m| m.meal_type);

    let mut day = aggregate(std::iter::empty::<&NutritionResult>());
    let mut entries = Vec::with_capacity(meals.len());
    for meal in &meals {
        let totals = aggregate(&meal.foods);
        entries.push(DayMealEntry {
            id: meal.id,
            meal_type: meal.meal_type,
            foods: meal.foods.len(),
            calories: round1(totals.get(NutrientKey::Calories)),
        });
        day.absorb(&totals);
    }

    DaySummary {
        date,
        calories: round1(day.get(NutrientKey::Calories)),
        meals: entries,
        report: progress_report(&day, targets),
        deficiencies: if day.is_empty() {
            Vec::new()
        } else {
            detect_deficiencies(&day, targets)
        },
    }
}
