//! Profile commands: view/edit the single user profile and the avatar
//! upload passthrough.

use std::path::Path;
use std::sync::Arc;
use tauri::State;

use crate::db::{AppState, DbPool};
use crate::error::AppError;
use crate::models::{Profile, ProfileRow, ProfileUpdate, UserPreferences};
use crate::storage::{self, StorageConfig};

pub(crate) async fn fetch_profile(pool: &DbPool) -> Result<Profile, AppError> {
  let row: ProfileRow = sqlx::query_as("SELECT * FROM profiles WHERE id = 1")
    .fetch_one(pool)
    .await?;
  Ok(row.into())
}

/// Save all editable fields in one atomic update. None for a numeric field
/// stores NULL, never zero.
pub(crate) async fn save_profile(
  pool: &DbPool,
  update: ProfileUpdate,
) -> Result<Profile, AppError> {
  let equipment_json =
    serde_json::to_string(&update.default_equipment).unwrap_or_else(|_| "[]".to_string());

  sqlx::query(
    r#"
    UPDATE profiles SET
      first_name = ?1,
      last_name = ?2,
      date_of_birth = ?3,
      height_inches = ?4,
      weight_lbs = ?5,
      default_level = ?6,
      default_equipment = ?7,
      updated_at = CURRENT_TIMESTAMP
    WHERE id = 1
    "#,
  )
  .bind(&update.first_name)
  .bind(&update.last_name)
  .bind(update.date_of_birth)
  .bind(update.height_inches)
  .bind(update.weight_lbs)
  .bind(update.default_level.map(|l| l.as_str()))
  .bind(equipment_json)
  .execute(pool)
  .await?;

  fetch_profile(pool).await
}

/// The wizard's preference loader. Failures degrade to empty defaults so the
/// form can proceed; they are logged, never surfaced.
pub(crate) async fn load_preferences(pool: &DbPool) -> UserPreferences {
  match fetch_profile(pool).await {
    Ok(profile) => UserPreferences {
      default_level: profile.default_level,
      default_equipment: profile.default_equipment,
    },
    Err(e) => {
      eprintln!("Failed to load user preferences: {}", e);
      UserPreferences::default()
    }
  }
}

#[tauri::command]
pub async fn get_profile(state: State<'_, Arc<AppState>>) -> Result<Profile, AppError> {
  fetch_profile(&state.db).await
}

#[tauri::command]
pub async fn update_profile(
  state: State<'_, Arc<AppState>>,
  update: ProfileUpdate,
) -> Result<Profile, AppError> {
  save_profile(&state.db, update).await
}

/// Upload an avatar image from a local path, store the returned public URL
/// on the profile, and hand the URL back to the caller.
#[tauri::command]
pub async fn upload_avatar(
  state: State<'_, Arc<AppState>>,
  path: String,
) -> Result<String, AppError> {
  let config = StorageConfig::from_env()?;

  let filename = Path::new(&path)
    .file_name()
    .and_then(|n| n.to_str())
    .ok_or_else(|| AppError::Validation(format!("not a file path: {}", path)))?
    .to_string();
  let bytes = std::fs::read(&path)?;

  let url = storage::upload_avatar(&config, &filename, bytes).await?;

  sqlx::query("UPDATE profiles SET avatar_url = ?1, updated_at = CURRENT_TIMESTAMP WHERE id = 1")
    .bind(&url)
    .execute(&state.db)
    .await?;

  Ok(url)
}
