//! Calendar and workout management commands.
//!
//! Thin wrappers over the persistence layer; the frontend passes the Sunday
//! week start it is currently showing.

use chrono::NaiveDate;
use std::sync::Arc;
use tauri::State;

use crate::calendar::{self, CalendarDay};
use crate::db::AppState;
use crate::error::AppError;
use crate::models::WorkoutWithExercises;
use crate::workouts;

#[tauri::command]
pub async fn get_weekly_workouts(
  state: State<'_, Arc<AppState>>,
  week_start: NaiveDate,
) -> Result<Vec<WorkoutWithExercises>, AppError> {
  workouts::load_week(&state.db, week_start).await
}

/// The week as 7 day cells, each carrying its workouts, ready to render.
#[tauri::command]
pub async fn get_week_calendar(
  state: State<'_, Arc<AppState>>,
  week_start: NaiveDate,
) -> Result<Vec<CalendarDay>, AppError> {
  let week = workouts::load_week(&state.db, week_start).await?;
  Ok(calendar::bucket_by_day(&week, week_start))
}

#[tauri::command]
pub async fn delete_workout(
  state: State<'_, Arc<AppState>>,
  workout_id: i64,
) -> Result<(), AppError> {
  workouts::delete_workout(&state.db, workout_id).await
}

#[tauri::command]
pub async fn rename_workout(
  state: State<'_, Arc<AppState>>,
  workout_id: i64,
  name: String,
) -> Result<(), AppError> {
  workouts::rename_workout(&state.db, workout_id, &name).await
}

#[tauri::command]
pub async fn toggle_favorite(
  state: State<'_, Arc<AppState>>,
  workout_id: i64,
) -> Result<bool, AppError> {
  workouts::toggle_favorite(&state.db, workout_id).await
}

#[tauri::command]
pub async fn set_workout_completed(
  state: State<'_, Arc<AppState>>,
  workout_id: i64,
  completed: bool,
) -> Result<(), AppError> {
  workouts::set_completed(&state.db, workout_id, completed).await
}

#[tauri::command]
pub async fn copy_week_to_next(
  state: State<'_, Arc<AppState>>,
  week_start: NaiveDate,
) -> Result<u32, AppError> {
  workouts::copy_week_to_next(&state.db, week_start).await
}

#[tauri::command]
pub async fn get_favorite_workouts(
  state: State<'_, Arc<AppState>>,
) -> Result<Vec<WorkoutWithExercises>, AppError> {
  workouts::load_favorites(&state.db).await
}

/// Schedule a copy of a favorited workout on the given calendar day.
#[tauri::command]
pub async fn add_favorite_to_week(
  state: State<'_, Arc<AppState>>,
  workout_id: i64,
  date: NaiveDate,
) -> Result<i64, AppError> {
  workouts::copy_workout_to_date(&state.db, workout_id, date).await
}
