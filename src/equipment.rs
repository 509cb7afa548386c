//! Equipment catalog
//!
//! Backs the equipment pickers in the wizard and the profile editor. The
//! catalog lives in the `equipment` table (seeded by migration); a failed or
//! empty read degrades to the built-in list rather than blocking the form.

use sqlx::SqlitePool;

pub const DEFAULT_EQUIPMENT: [&str; 8] = [
  "Bodyweight Only",
  "Dumbbells",
  "Barbell",
  "Kettlebell",
  "Resistance Bands",
  "Pull-up Bar",
  "Bench",
  "Cable Machine",
];

fn default_equipment() -> Vec<String> {
  DEFAULT_EQUIPMENT.iter().map(|s| s.to_string()).collect()
}

/// Fetch the available equipment names, in catalog order.
pub async fn load_equipment(pool: &SqlitePool) -> Vec<String> {
  let rows: Result<Vec<(String,)>, _> =
    sqlx::query_as("SELECT name FROM equipment ORDER BY position, name")
      .fetch_all(pool)
      .await;

  match rows {
    Ok(rows) if !rows.is_empty() => rows.into_iter().map(|(name,)| name).collect(),
    Ok(_) => default_equipment(),
    Err(e) => {
      eprintln!("Failed to load equipment catalog: {}", e);
      default_equipment()
    }
  }
}
