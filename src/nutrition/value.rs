use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// An amount as it arrives from the estimator or from stored meals: either a
/// bare number or a unit-suffixed string such as `"12g"` or `"900 mcg"`.
///
/// The wire form is preserved so stored meals read back exactly as they were
/// written. Arithmetic must go through [`Quantity::amount`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Quantity {
    Number(f64),
    Text(String),
}

impl Quantity {
    pub fn amount(&self) -> f64 {
        match self {
            Quantity::Number(n) if n.is_finite() => *n,
            Quantity::Number(_) => 0.0,
            Quantity::Text(s) => leading_number(s),
        }
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Quantity::Number(0.0)
    }
}

impl From<f64> for Quantity {
    fn from(n: f64) -> Self {
        Quantity::Number(n)
    }
}

impl From<&str> for Quantity {
    fn from(s: &str) -> Self {
        Quantity::Text(s.to_string())
    }
}

/// Parses the leading numeric portion of `s`, ignoring whatever unit follows.
/// Anything without a leading number is `0`.
pub fn leading_number(s: &str) -> f64 {
    lazy_static! {
        static ref LEADING_NUMBER_RE: Regex =
            Regex::new(r"^\s*[+-]?(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][+-]?\d+)?").unwrap();
    }
    LEADING_NUMBER_RE
        .find(s)
        .and_then(|m| m.as_str().trim().parse::<f64>().ok())
        .filter(|n| n.is_finite())
        .unwrap_or(0.0)
}

/// Rounds half-up to one decimal place.
pub fn round1(n: f64) -> f64 {
    (n * 10.0 + 0.5).floor() / 10.0
}

/// One nutrient of one food: the amount, the generic daily value the
/// estimator quoted, and the estimator's own percent of that value.
///
/// `percent` is advisory. Totals never reuse it; see
/// [`crate::nutrition::aggregate::approximate_percent_sum`] for the one
/// display that does.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NutrientValue {
    pub value: Quantity,
    #[serde(rename = "dv", alias = "dailyValue", default)]
    pub daily_value: Quantity,
    #[serde(default)]
    pub percent: f64,
}

impl NutrientValue {
    pub fn amount(&self) -> f64 {
        self.value.amount()
    }
}
