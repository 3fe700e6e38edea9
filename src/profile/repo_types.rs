use sqlx::{types::Json, FromRow};
use time::OffsetDateTime;

use super::dto::{StoredProfile, UserProfile};
use crate::nutrition::DailyTargets;

#[derive(Debug, FromRow)]
pub struct ProfileRow {
    pub age: i32,
    pub sex: String,
    pub weight: f64,
    pub height: f64,
    pub activity_level: String,
    pub daily_targets: Json<DailyTargets>,
    pub updated_at: OffsetDateTime,
}

impl TryFrom<ProfileRow> for StoredProfile {
    type Error = anyhow::Error;

    fn try_from(r: ProfileRow) -> Result<Self, Self::Error> {
        Ok(Self {
            profile: UserProfile {
                age: u32::try_from(r.age)?,
                sex: r.sex.parse()?,
                weight: r.weight,
                height: r.height,
                activity_level: r.activity_level.parse()?,
                daily_targets: r.daily_targets.0,
            },
            updated_at: r.updated_at,
        })
    }
}
