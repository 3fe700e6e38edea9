use futures::future::try_join_all;

use crate::ai::{AiError, NutritionAi};
use crate::nutrition::NutritionResult;

/// Estimates every item concurrently. The first failure fails the whole
/// batch and the other results are discarded.
pub async fn estimate_all(
    ai: &dyn NutritionAi,
    items: &[(&str, &str)],
) -> Result<Vec<NutritionResult>, AiError> {
    try_join_all(
        items
            .iter()
            .map(|(food, quantity)| ai.estimate(food, quantity)),
    )
    .await
}
