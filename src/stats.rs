//! Dashboard statistics
//!
//! Derived from the current week's workouts on every load; nothing here is
//! persisted. The streak is the count of consecutive calendar days with at
//! least one completed workout, scanning backward from today and stopping at
//! the first miss, capped at 7.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::models::WorkoutWithExercises;

pub const STREAK_CAP_DAYS: i64 = 7;
const TOP_N: usize = 5;

/// The snapshot rendered by the dashboard cards.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkoutStats {
  pub total_workouts: i64,
  pub completed_workouts: i64,
  pub total_exercises: i64,
  pub streak_days: i64,
  pub completion_rate_pct: i64,
  pub personal_records: Vec<PersonalRecord>,
  pub recent_workouts: Vec<RecentWorkout>,
}

/// Heaviest recorded set for an exercise, across all history.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct PersonalRecord {
  pub exercise: String,
  pub weight_lbs: f64,
  pub recorded_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecentWorkout {
  pub id: i64,
  pub name: String,
  pub completed: bool,
  pub scheduled_date: DateTime<Utc>,
}

/// Consecutive completed days ending today, scanning back up to 7 days.
/// A day counts only if some workout matches it by date-only equality AND is
/// completed; the scan breaks at the first miss, today included.
pub fn calculate_streak(workouts: &[WorkoutWithExercises], today: NaiveDate) -> i64 {
  let mut streak = 0;
  for i in 0..STREAK_CAP_DAYS {
    let day = today - Duration::days(i);
    let has_completed = workouts
      .iter()
      .any(|w| w.workout.completed && w.workout.scheduled_date.date_naive() == day);
    if has_completed {
      streak += 1;
    } else {
      break;
    }
  }
  streak
}

/// Rounded-to-nearest integer percent; 0 when there are no workouts.
pub fn completion_rate_pct(completed: i64, total: i64) -> i64 {
  if total == 0 {
    return 0;
  }
  ((completed as f64 / total as f64) * 100.0).round() as i64
}

impl WorkoutStats {
  /// Assemble the snapshot from the week's workouts (newest first) and the
  /// all-time personal records.
  pub fn compute(
    week_workouts: &[WorkoutWithExercises],
    personal_records: Vec<PersonalRecord>,
    today: NaiveDate,
  ) -> Self {
    let total_workouts = week_workouts.len() as i64;
    let completed_workouts = week_workouts
      .iter()
      .filter(|w| w.workout.completed)
      .count() as i64;
    let total_exercises = week_workouts
      .iter()
      .map(|w| w.exercises.len() as i64)
      .sum();

    let recent_workouts = week_workouts
      .iter()
      .take(TOP_N)
      .map(|w| RecentWorkout {
        id: w.workout.id,
        name: w.workout.display_name().to_string(),
        completed: w.workout.completed,
        scheduled_date: w.workout.scheduled_date,
      })
      .collect();

    Self {
      total_workouts,
      completed_workouts,
      total_exercises,
      streak_days: calculate_streak(week_workouts, today),
      completion_rate_pct: completion_rate_pct(completed_workouts, total_workouts),
      personal_records,
      recent_workouts,
    }
  }
}
