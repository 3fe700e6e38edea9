use std::str::FromStr;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::error::ApiError;
use crate::nutrition::DailyTargets;

/// Written as the original UI spells it; the English names are accepted too.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sex {
    #[serde(rename = "Feminino", alias = "female")]
    Female,
    #[serde(rename = "Masculino", alias = "male")]
    Male,
}

impl Sex {
    pub fn as_str(self) -> &'static str {
        match self {
            Sex::Female => "Feminino",
            Sex::Male => "Masculino",
        }
    }
}

impl FromStr for Sex {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Feminino" | "female" => Ok(Sex::Female),
            "Masculino" | "male" => Ok(Sex::Male),
            other => anyhow::bail!("unknown sex {other:?}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    Sedentary,
    Light,
    Moderate,
    Active,
    VeryActive,
}

impl ActivityLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "sedentary",
            ActivityLevel::Light => "light",
            ActivityLevel::Moderate => "moderate",
            ActivityLevel::Active => "active",
            ActivityLevel::VeryActive => "very_active",
        }
    }
}

impl FromStr for ActivityLevel {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "sedentary" => ActivityLevel::Sedentary,
            "light" => ActivityLevel::Light,
            "moderate" => ActivityLevel::Moderate,
            "active" => ActivityLevel::Active,
            "very_active" => ActivityLevel::VeryActive,
            other => anyhow::bail!("unknown activity level {other:?}"),
        })
    }
}

/// The one user of the system. Height is in metres, weight in kilograms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub age: u32,
    pub sex: Sex,
    pub weight: f64,
    pub height: f64,
    pub activity_level: ActivityLevel,
    pub daily_targets: DailyTargets,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            age: 35,
            sex: Sex::Female,
            weight: 56.0,
            height: 1.56,
            activity_level: ActivityLevel::Active,
            daily_targets: DailyTargets::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredProfile {
    #[serde(flatten)]
    pub profile: UserProfile,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// Body of a profile save. Every field is optional; absent ones keep their
/// current value and `dailyTargets` merges entry by entry.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveProfileRequest {
    pub age: Option<u32>,
    pub sex: Option<Sex>,
    pub weight: Option<f64>,
    pub height: Option<f64>,
    pub activity_level: Option<ActivityLevel>,
    pub daily_targets: Option<DailyTargets>,
}

/// Oldest age accepted on save.
const MAX_AGE: u32 = 150;

impl SaveProfileRequest {
    /// Rejects values no profile can hold before anything is merged.
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.age.is_some_and(|a| a > MAX_AGE) {
            return Err(ApiError::validation(format!(
                "age must be between 0 and {MAX_AGE}"
            )));
        }
        if self.weight.is_some_and(|w| !(w.is_finite() && w > 0.0)) {
            return Err(ApiError::validation("weight must be a positive number"));
        }
        if self.height.is_some_and(|h| !(h.is_finite() && h > 0.0)) {
            return Err(ApiError::validation("height must be a positive number"));
        }
        Ok(())
    }

    pub fn apply_to(self, profile: &mut UserProfile) {
        if let Some(age) = self.age {
            profile.age = age;
        }
        if let Some(sex) = self.sex {
            profile.sex = sex;
        }
        if let Some(weight) = self.weight {
            profile.weight = weight;
        }
        if let Some(height) = self.height {
            profile.height = height;
        }
        if let Some(level) = self.activity_level {
            profile.activity_level = level;
        }
        if let Some(targets) = self.daily_targets {
            profile.daily_targets.merge(&targets);
        }
    }
}
