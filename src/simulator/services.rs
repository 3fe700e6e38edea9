use tracing::warn;

use crate::ai::{AiError, NutritionAi};
use crate::calories::services::estimate_all;
use crate::nutrition::{aggregate, detect_deficiencies, progress_report, DailyTargets};

use super::dto::SimulateResponse;

/// Evaluates a hypothetical menu against `targets`.
///
/// Estimation is all-or-nothing. A failed suggestion call only empties
/// `suggestions`; the rest of the simulation is still returned.
pub async fn simulate(
    ai: &dyn NutritionAi,
    items: &[(&str, &str)],
    targets: &DailyTargets,
    suggest: bool,
) -> Result<SimulateResponse, AiError> {
    let results = estimate_all(ai, items).await?;
    let totals = aggregate(&results);
    let deficiencies = detect_deficiencies(&totals, targets);

    let suggestions = if suggest && !deficiencies.is_empty() {
        ai.suggest(&deficiencies).await.unwrap_or_else(|e| {
            warn!(error = %e, "suggestions unavailable for simulation");
            Vec::new()
        })
    } else {
        Vec::new()
    };

    Ok(SimulateResponse {
        report: progress_report(&totals, targets),
        results,
        deficiencies,
        suggestions,
    })
}
