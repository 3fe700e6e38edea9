use crate::nutrition::DailyTargets;

use super::dto::{SaveProfileRequest, StoredProfile, UserProfile};
use super::repo::ProfileStore;

/// Merges `req` over the stored profile, or over the default one when
/// nothing was saved yet, and writes the result back.
pub async fn save_profile(
    store: &dyn ProfileStore,
    req: SaveProfileRequest,
) -> anyhow::Result<StoredProfile> {
    let mut profile = store
        .get()
        .await?
        .map(|s| s.profile)
        .unwrap_or_default();
    req.apply_to(&mut profile);
    store.upsert(&profile).await
}

pub async fn current_targets(store: &dyn ProfileStore) -> anyhow::Result<DailyTargets> {
    Ok(store
        .get()
        .await?
        .map(|s| s.profile.daily_targets)
        .unwrap_or_else(|| UserProfile::default().daily_targets))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nutrition::NutrientKey;
    use crate::profile::dto::Sex;
    use crate::profile::repo::MemoryProfileStore;

    #[tokio::test]
    async fn first_partial_save_fills_from_default() {
        let store = MemoryProfileStore::default();
        let req: SaveProfileRequest = serde_json::from_str(r#"{"age": 41}"#).unwrap();
        let saved = save_profile(&store, req).await.unwrap();
        assert_eq!(saved.profile.age, 41);
        assert_eq!(saved.profile.sex, Sex::Female);
        assert_eq!(saved.profile.daily_targets, DailyTargets::default());
    }

    #[tokio::test]
    async fn later_save_keeps_earlier_values() {
        let store = MemoryProfileStore::default();
        let first: SaveProfileRequest =
            serde_json::from_str(r#"{"sex": "male", "dailyTargets": {"iron": 8}}"#).unwrap();
        save_profile(&store, first).await.unwrap();
        let second: SaveProfileRequest = serde_json::from_str(r#"{"weight": 70}"#).unwrap();
        let saved = save_profile(&store, second).await.unwrap();
        assert_eq!(saved.profile.sex, Sex::Male);
        assert_eq!(saved.profile.weight, 70.0);
        assert_eq!(saved.profile.daily_targets.get(NutrientKey::Iron), 8.0);
    }

    #[tokio::test]
    async fn targets_fall_back_to_default() {
        let store = MemoryProfileStore::default();
        let t = current_targets(&store).await.unwrap();
        assert_eq!(t.get(NutrientKey::Calories), 1925.0);
    }
}
