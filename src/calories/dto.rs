use serde::Deserialize;

use crate::error::ApiError;

/// A food to estimate. Both fields must be present and non-blank.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FoodItem {
    pub food: Option<String>,
    pub quantity: Option<String>,
}

impl FoodItem {
    pub fn validate(&self) -> Result<(&str, &str), ApiError> {
        let food = self.food.as_deref().map(str::trim).unwrap_or_default();
        let quantity = self.quantity.as_deref().map(str::trim).unwrap_or_default();
        if food.is_empty() || quantity.is_empty() {
            return Err(ApiError::validation("food and quantity are required"));
        }
        Ok((food, quantity))
    }
}

/// Checks a list of items up front so no estimate is issued for a batch that
/// would be rejected anyway.
pub fn validate_items(items: &[FoodItem]) -> Result<Vec<(&str, &str)>, ApiError> {
    if items.is_empty() {
        return Err(ApiError::validation("items must contain at least one food"));
    }
    items.iter().map(FoodItem::validate).collect()
}

/// Menu rows as the simulator treats them: rows missing a food or a quantity
/// are skipped, and only a menu with nothing left is rejected.
pub fn filled_items(items: &[FoodItem]) -> Result<Vec<(&str, &str)>, ApiError> {
    let filled: Vec<_> = items.iter().filter_map(|i| i.validate().ok()).collect();
    if filled.is_empty() {
        return Err(ApiError::validation(
            "items must contain at least one food with a quantity",
        ));
    }
    Ok(filled)
}
