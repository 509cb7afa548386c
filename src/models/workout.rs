use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A workout scheduled on a calendar date.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Workout {
  pub id: i64,
  pub name: String,
  pub custom_name: Option<String>,
  pub scheduled_date: DateTime<Utc>,
  pub completed: bool,
  pub is_favorite: bool,
  pub created_at: Option<DateTime<Utc>>,
}

impl Workout {
  /// User-facing name: the custom rename wins over the generated name.
  pub fn display_name(&self) -> &str {
    self.custom_name.as_deref().unwrap_or(&self.name)
  }
}

/// An exercise assignment within a workout, with its recorded sets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutExercise {
  pub id: i64,
  pub workout_id: i64,
  pub exercise_id: i64,
  pub exercise_name: String,
  pub position: i64,
  pub sets: Vec<ExerciseSet>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ExerciseSet {
  pub id: i64,
  pub workout_exercise_id: i64,
  pub set_number: i64,
  pub reps: Option<i64>,
  pub weight_lbs: Option<f64>,
  pub created_at: Option<DateTime<Utc>>,
}

/// A workout with its nested exercises, as the calendar and stats views
/// consume it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutWithExercises {
  #[serde(flatten)]
  pub workout: Workout,
  pub exercises: Vec<WorkoutExercise>,
}

/// An entry from the exercise library.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Exercise {
  pub id: i64,
  pub name: String,
  pub muscle_group: String,
  pub equipment: String,
}
