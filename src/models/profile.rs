use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::wizard::WorkoutLevel;

/// The single user profile (row id = 1).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
  pub id: i64,
  pub first_name: String,
  pub last_name: String,
  pub username: String,
  pub date_of_birth: Option<NaiveDate>,
  pub height_inches: Option<i64>,
  pub weight_lbs: Option<f64>,
  pub default_level: Option<WorkoutLevel>,
  pub default_equipment: Vec<String>,
  pub avatar_url: Option<String>,
  pub created_at: Option<DateTime<Utc>>,
  pub updated_at: Option<DateTime<Utc>>,
}

/// Raw database row; `default_equipment` is a JSON array column and
/// `default_level` is free text, both decoded into `Profile`.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProfileRow {
  pub id: i64,
  pub first_name: String,
  pub last_name: String,
  pub username: String,
  pub date_of_birth: Option<NaiveDate>,
  pub height_inches: Option<i64>,
  pub weight_lbs: Option<f64>,
  pub default_level: Option<String>,
  pub default_equipment: String,
  pub avatar_url: Option<String>,
  pub created_at: Option<DateTime<Utc>>,
  pub updated_at: Option<DateTime<Utc>>,
}

impl From<ProfileRow> for Profile {
  fn from(row: ProfileRow) -> Self {
    Profile {
      id: row.id,
      first_name: row.first_name,
      last_name: row.last_name,
      username: row.username,
      date_of_birth: row.date_of_birth,
      height_inches: row.height_inches,
      weight_lbs: row.weight_lbs,
      default_level: row.default_level.as_deref().and_then(|s| s.parse().ok()),
      default_equipment: serde_json::from_str(&row.default_equipment).unwrap_or_default(),
      avatar_url: row.avatar_url,
      created_at: row.created_at,
      updated_at: row.updated_at,
    }
  }
}

/// All editable profile fields, committed atomically by a single save.
/// Blank numeric inputs arrive as None and are stored as NULL, never zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileUpdate {
  pub first_name: String,
  pub last_name: String,
  pub date_of_birth: Option<NaiveDate>,
  pub height_inches: Option<i64>,
  pub weight_lbs: Option<f64>,
  pub default_level: Option<WorkoutLevel>,
  pub default_equipment: Vec<String>,
}

/// The saved defaults that pre-populate the guided wizard.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserPreferences {
  pub default_level: Option<WorkoutLevel>,
  pub default_equipment: Vec<String>,
}
