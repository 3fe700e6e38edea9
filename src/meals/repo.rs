use anyhow::Context;
use async_trait::async_trait;
use sqlx::{types::Json, PgPool};
use time::Date;
use uuid::Uuid;

use super::dto::{Meal, MealUpdate, NewMeal};
use super::repo_types::MealRow;

/// Meal log storage. Every read passes through `Meal::try_from(MealRow)`,
/// which is where legacy values are normalized.
#[async_trait]
pub trait MealStore: Send + Sync {
    /// All meals, newest date first, then newest first within a date.
    async fn list(&self) -> anyhow::Result<Vec<Meal>>;
    async fn list_by_date(&self, date: Date) -> anyhow::Result<Vec<Meal>>;
    async fn get(&self, id: Uuid) -> anyhow::Result<Option<Meal>>;
    async fn create(&self, meal: NewMeal) -> anyhow::Result<Meal>;
    async fn update(&self, id: Uuid, update: MealUpdate) -> anyhow::Result<Option<Meal>>;
    /// `false` when no meal had that id.
    async fn delete(&self, id: Uuid) -> anyhow::Result<bool>;
}

fn into_meals(rows: Vec<MealRow>) -> anyhow::Result<Vec<Meal>> {
    rows.into_iter().map(Meal::try_from).collect()
}

pub struct PgMealStore {
    db: PgPool,
}

impl PgMealStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl MealStore for PgMealStore {
    async fn list(&self) -> anyhow::Result<Vec<Meal>> {
        let rows = sqlx::query_as::<_, MealRow>(
            r#"
            SELECT id, date, meal_type, foods, created_at
            FROM meals
            ORDER BY date DESC, created_at DESC
            "#,
        )
        .fetch_all(&self.db)
        .await
        .context("select meals")?;
        into_meals(rows)
    }

    async fn list_by_date(&self, date: Date) -> anyhow::Result<Vec<Meal>> {
        let rows = sqlx::query_as::<_, MealRow>(
            r#"
            SELECT id, date, meal_type, foods, created_at
            FROM meals
            WHERE date = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(date)
        .fetch_all(&self.db)
        .await
        .context("select meals by date")?;
        into_meals(rows)
    }

    async fn get(&self, id: Uuid) -> anyhow::Result<Option<Meal>> {
        let row = sqlx::query_as::<_, MealRow>(
            r#"
            SELECT id, date, meal_type, foods, created_at
            FROM meals
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await
        .context("select meal")?;
        row.map(Meal::try_from).transpose()
    }

    async fn create(&self, meal: NewMeal) -> anyhow::Result<Meal> {
        let row = sqlx::query_as::<_, MealRow>(
            r#"
            INSERT INTO meals (id, date, meal_type, foods)
            VALUES ($1, $2, $3, $4)
            RETURNING id, date, meal_type, foods, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(meal.date)
        .bind(meal.meal_type.as_str())
        .bind(Json(&meal.foods))
        .fetch_one(&self.db)
        .await
        .context("insert meal")?;
        Meal::try_from(row)
    }

    async fn update(&self, id: Uuid, update: MealUpdate) -> anyhow::Result<Option<Meal>> {
        let row = sqlx::query_as::<_, MealRow>(
            r#"
            UPDATE meals
            SET date = COALESCE($2, date),
                meal_type = COALESCE($3, meal_type),
                foods = COALESCE($4, foods)
            WHERE id = $1
            RETURNING id, date, meal_type, foods, created_at
            "#,
        )
        .bind(id)
        .bind(update.date)
        .bind(update.meal_type.map(|t| t.as_str()))
        .bind(update.foods.as_ref().map(Json))
        .fetch_optional(&self.db)
        .await
        .context("update meal")?;
        row.map(Meal::try_from).transpose()
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let result = sqlx::query("DELETE FROM meals WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await
            .context("delete meal")?;
        Ok(result.rows_affected() > 0)
    }
}

/// Process-local store for tests. Keeps raw rows so legacy values can be
/// seeded and read back through the same normalization.
#[cfg(test)]
#[derive(Default)]
pub struct MemoryMealStore {
    rows: tokio::sync::RwLock<Vec<MealRow>>,
}

#[cfg(test)]
impl MemoryMealStore {
    pub async fn insert_row(&self, row: MealRow) {
        self.rows.write().await.push(row);
    }

    async fn select(&self, keep: impl Fn(&MealRow) -> bool) -> anyhow::Result<Vec<Meal>> {
        let mut rows: Vec<MealRow> = self
            .rows
            .read()
            .await
            .iter()
            .filter(|r| keep(r))
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));
        into_meals(rows)
    }
}

#[cfg(test)]
#[async_trait]
impl MealStore for MemoryMealStore {
    async fn list(&self) -> anyhow::Result<Vec<Meal>> {
        self.select(|_| true).await
    }

    async fn list_by_date(&self, date: Date) -> anyhow::Result<Vec<Meal>> {
        self.select(|r| r.date == date).await
    }

    async fn get(&self, id: Uuid) -> anyhow::Result<Option<Meal>> {
        Ok(self.select(|r| r.id == id).await?.into_iter().next())
    }

    async fn create(&self, meal: NewMeal) -> anyhow::Result<Meal> {
        let row = MealRow {
            id: Uuid::new_v4(),
            date: meal.date,
            meal_type: meal.meal_type.as_str().to_string(),
            foods: Json(meal.foods),
            created_at: time::OffsetDateTime::now_utc(),
        };
        self.rows.write().await.push(row.clone());
        Meal::try_from(row)
    }

    async fn update(&self, id: Uuid, update: MealUpdate) -> anyhow::Result<Option<Meal>> {
        let mut rows = self.rows.write().await;
        let Some(row) = rows.iter_mut().find(|r| r.id == id) else {
            return Ok(None);
        };
        if let Some(date) = update.date {
            row.date = date;
        }
        if let Some(t) = update.meal_type {
            row.meal_type = t.as_str().to_string();
        }
        if let Some(foods) = update.foods {
            row.foods = Json(foods);
        }
        Meal::try_from(row.clone()).map(Some)
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|r| r.id != id);
        Ok(rows.len() < before)
    }
}
