//! Nutrient arithmetic: value coercion, totals, percent-of-target and the
//! deficiency check. Everything here is pure and synchronous.

pub mod aggregate;
pub mod deficiency;
pub mod keys;
pub mod result;
pub mod targets;
pub mod value;

pub use aggregate::{aggregate, approximate_percent_sum, progress_report, NutrientProgress};
pub use deficiency::{detect_deficiencies, NutrientDeficiency};
pub use keys::NutrientKey;
pub use result::NutritionResult;
pub use targets::DailyTargets;
