//! Dashboard statistics command.

use chrono::{DateTime, NaiveDate, Utc};
use std::sync::Arc;
use tauri::State;

use crate::calendar::week_start_for;
use crate::db::{AppState, DbPool};
use crate::error::AppError;
use crate::stats::{PersonalRecord, WorkoutStats};
use crate::workouts;

/// Assemble the dashboard snapshot: this week's workouts up to `now` plus the
/// all-time personal records.
pub(crate) async fn compute_stats(
  pool: &DbPool,
  now: DateTime<Utc>,
) -> Result<WorkoutStats, AppError> {
  let today: NaiveDate = now.date_naive();
  let week_start = week_start_for(today);
  let from = week_start.and_hms_opt(0, 0, 0).unwrap().and_utc();

  let week = workouts::load_range(pool, from, now).await?;
  let records = load_personal_records(pool).await?;

  Ok(WorkoutStats::compute(&week, records, today))
}

/// Heaviest recorded set per exercise, top 5 by weight.
async fn load_personal_records(pool: &DbPool) -> Result<Vec<PersonalRecord>, AppError> {
  let records: Vec<PersonalRecord> = sqlx::query_as(
    "SELECT e.name AS exercise, MAX(s.weight_lbs) AS weight_lbs, MAX(s.created_at) AS recorded_at
     FROM exercise_sets s
     JOIN workout_exercises we ON we.id = s.workout_exercise_id
     JOIN exercises e ON e.id = we.exercise_id
     WHERE s.weight_lbs IS NOT NULL
     GROUP BY e.name
     ORDER BY weight_lbs DESC
     LIMIT 5",
  )
  .fetch_all(pool)
  .await?;
  Ok(records)
}

#[tauri::command]
pub async fn get_workout_stats(state: State<'_, Arc<AppState>>) -> Result<WorkoutStats, AppError> {
  compute_stats(&state.db, Utc::now()).await
}
