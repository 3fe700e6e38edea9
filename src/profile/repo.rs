use anyhow::Context;
use async_trait::async_trait;
use sqlx::{types::Json, PgPool};

use super::dto::{StoredProfile, UserProfile};
use super::repo_types::ProfileRow;

/// The singleton profile record: read it, or replace it wholesale.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn get(&self) -> anyhow::Result<Option<StoredProfile>>;
    async fn upsert(&self, profile: &UserProfile) -> anyhow::Result<StoredProfile>;
}

/// Backed by `user_profile`, a table constrained to the single row `id = 1`.
pub struct PgProfileStore {
    db: PgPool,
}

impl PgProfileStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProfileStore for PgProfileStore {
    async fn get(&self) -> anyhow::Result<Option<StoredProfile>> {
        let row = sqlx::query_as::<_, ProfileRow>(
            r#"
            SELECT age, sex, weight, height, activity_level, daily_targets, updated_at
            FROM user_profile
            WHERE id = 1
            "#,
        )
        .fetch_optional(&self.db)
        .await
        .context("select user_profile")?;
        row.map(StoredProfile::try_from).transpose()
    }

    async fn upsert(&self, profile: &UserProfile) -> anyhow::Result<StoredProfile> {
        let row = sqlx::query_as::<_, ProfileRow>(
            r#"
            INSERT INTO user_profile (id, age, sex, weight, height, activity_level, daily_targets, updated_at)
            VALUES (1, $1, $2, $3, $4, $5, $6, now())
            ON CONFLICT (id) DO UPDATE SET
                age = EXCLUDED.age,
                sex = EXCLUDED.sex,
                weight = EXCLUDED.weight,
                height = EXCLUDED.height,
                activity_level = EXCLUDED.activity_level,
                daily_targets = EXCLUDED.daily_targets,
                updated_at = EXCLUDED.updated_at
            RETURNING age, sex, weight, height, activity_level, daily_targets, updated_at
            "#,
        )
        .bind(i32::try_from(profile.age).context("age out of range")?)
        .bind(profile.sex.as_str())
        .bind(profile.weight)
        .bind(profile.height)
        .bind(profile.activity_level.as_str())
        .bind(Json(&profile.daily_targets))
        .fetch_one(&self.db)
        .await
        .context("upsert user_profile")?;
        StoredProfile::try_from(row)
    }
}

/// Process-local store for tests.
#[cfg(test)]
#[derive(Default)]
pub struct MemoryProfileStore {
    inner: tokio::sync::RwLock<Option<StoredProfile>>,
}

#[cfg(test)]
#[async_trait]
impl ProfileStore for MemoryProfileStore {
    async fn get(&self) -> anyhow::Result<Option<StoredProfile>> {
        Ok(self.inner.read().await.clone())
    }

    async fn upsert(&self, profile: &UserProfile) -> anyhow::Result<StoredProfile> {
        let stored = StoredProfile {
            profile: profile.clone(),
            updated_at: time::OffsetDateTime::now_utc(),
        };
        *self.inner.write().await = Some(stored.clone());
        Ok(stored)
    }
}
