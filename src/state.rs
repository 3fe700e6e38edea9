use std::sync::Arc;

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;

use crate::ai::{NutritionAi, OpenAiClient};
use crate::config::AppConfig;
use crate::meals::repo::{MealStore, PgMealStore};
use crate::profile::repo::{PgProfileStore, ProfileStore};

#[derive(Clone)]
pub struct AppState {
    pub meals: Arc<dyn MealStore>,
    pub profile: Arc<dyn ProfileStore>,
    pub ai: Arc<dyn NutritionAi>,
}

impl AppState {
    pub async fn init(config: &AppConfig) -> anyhow::Result<Self> {
        let db = PgPoolOptions::new()
            .max_connections(config.db_max_connections)
            .connect(&config.database_url)
            .await
            .context("connect to database")?;

        if let Err(e) = sqlx::migrate!("./migrations").run(&db).await {
            tracing::warn!(error = %e, "migration failed; continuing");
        }

        let ai = OpenAiClient::new(&config.ai).context("build completion client")?;

        Ok(Self {
            meals: Arc::new(PgMealStore::new(db.clone())),
            profile: Arc::new(PgProfileStore::new(db)),
            ai: Arc::new(ai),
        })
    }

    #[cfg(test)]
    pub fn fake() -> Self {
        Self::with_ai(crate::ai::fake::ScriptedAi::default())
    }

    #[cfg(test)]
    pub fn with_ai(ai: crate::ai::fake::ScriptedAi) -> Self {
        use crate::meals::repo::MemoryMealStore;
        use crate::profile::repo::MemoryProfileStore;

        Self {
            meals: Arc::new(MemoryMealStore::default()),
            profile: Arc::new(MemoryProfileStore::default()),
            ai: Arc::new(ai),
        }
    }
}
