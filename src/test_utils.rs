//! Test utilities and helpers
//!
//! Database setup/teardown and seed factories shared by the module tests.

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::SqlitePool;

/// Create an in-memory SQLite database for testing
/// Runs all migrations and returns a ready-to-use pool
///
/// Uses max_connections(1) to prevent multiple pool connections from creating
/// isolated in-memory databases, which would cause intermittent test failures
pub async fn setup_test_db() -> SqlitePool {
  let pool = sqlx::sqlite::SqlitePoolOptions::new()
    .max_connections(1)
    .connect("sqlite::memory:")
    .await
    .expect("Failed to create in-memory database");

  sqlx::migrate!("./migrations")
    .run(&pool)
    .await
    .expect("Failed to run migrations");

  pool
}

pub async fn teardown_test_db(pool: SqlitePool) {
  pool.close().await;
}

/// Insert a scheduled workout, returning its id.
pub async fn seed_workout(
  pool: &SqlitePool,
  name: &str,
  scheduled_date: DateTime<Utc>,
  completed: bool,
) -> i64 {
  let result = sqlx::query(
    "INSERT INTO user_workouts (name, scheduled_date, completed) VALUES (?1, ?2, ?3)",
  )
  .bind(name)
  .bind(scheduled_date)
  .bind(completed)
  .execute(pool)
  .await
  .expect("Failed to insert test workout");

  result.last_insert_rowid()
}

/// Attach an exercise (by library name) to a workout with one recorded set.
pub async fn seed_workout_exercise(
  pool: &SqlitePool,
  workout_id: i64,
  exercise_name: &str,
  weight_lbs: Option<f64>,
) -> i64 {
  let (exercise_id,): (i64,) = sqlx::query_as("SELECT id FROM exercises WHERE name = ?1")
    .bind(exercise_name)
    .fetch_one(pool)
    .await
    .expect("Unknown exercise in seed");

  let result = sqlx::query(
    "INSERT INTO workout_exercises (workout_id, exercise_id, position) VALUES (?1, ?2, 0)",
  )
  .bind(workout_id)
  .bind(exercise_id)
  .execute(pool)
  .await
  .expect("Failed to insert workout exercise");

  let workout_exercise_id = result.last_insert_rowid();

  sqlx::query(
    "INSERT INTO exercise_sets (workout_exercise_id, set_number, reps, weight_lbs)
     VALUES (?1, 1, 10, ?2)",
  )
  .bind(workout_exercise_id)
  .bind(weight_lbs)
  .execute(pool)
  .await
  .expect("Failed to insert exercise set");

  workout_exercise_id
}

/// Store wizard defaults on the singleton profile row.
pub async fn seed_profile_defaults(pool: &SqlitePool, level: &str, equipment: &[&str]) {
  let equipment_json = serde_json::to_string(equipment).unwrap();
  sqlx::query(
    "UPDATE profiles SET default_level = ?1, default_equipment = ?2 WHERE id = 1",
  )
  .bind(level)
  .bind(equipment_json)
  .execute(pool)
  .await
  .expect("Failed to seed profile defaults");
}

/// A DateTime at 08:30 UTC on the given calendar day.
pub fn at_morning(date: NaiveDate) -> DateTime<Utc> {
  date.and_hms_opt(8, 30, 0).unwrap().and_utc()
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::NaiveDate;

  #[tokio::test]
  async fn test_setup_db_creates_schema() {
    let pool = setup_test_db().await;

    let tables: Vec<(String,)> = sqlx::query_as(
      "SELECT name FROM sqlite_master WHERE type='table' AND name IN
         ('profiles', 'user_workouts', 'workout_exercises', 'exercise_sets', 'exercises', 'equipment')",
    )
    .fetch_all(&pool)
    .await
    .expect("Failed to query tables");

    assert_eq!(tables.len(), 6, "Expected 6 tables, got {}", tables.len());

    teardown_test_db(pool).await;
  }

  #[tokio::test]
  async fn test_seed_workout_with_exercise() {
    let pool = setup_test_db().await;

    let date = NaiveDate::from_ymd_opt(2024, 3, 14).unwrap();
    let workout_id = seed_workout(&pool, "Push Day", at_morning(date), false).await;
    seed_workout_exercise(&pool, workout_id, "Bench Press", Some(185.0)).await;

    let count: i64 = sqlx::query_scalar(
      "SELECT COUNT(*) FROM workout_exercises WHERE workout_id = ?1",
    )
    .bind(workout_id)
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(count, 1);

    teardown_test_db(pool).await;
  }
}
