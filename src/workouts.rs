//! Scheduled workout persistence
//!
//! All reads return workouts with their nested exercises and sets, the shape
//! the calendar and stats views consume. Mutations report row counts so a
//! missing id surfaces as NotFound instead of silently succeeding.

use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::db::DbPool;
use crate::error::AppError;
use crate::models::{Exercise, ExerciseSet, Workout, WorkoutExercise, WorkoutWithExercises};
use crate::wizard::PlanRequest;

/// Hour of day newly planned workouts are scheduled at.
const PLAN_HOUR: u32 = 9;

// ---------------------------------------------------------------------------
/// Reads
// ---------------------------------------------------------------------------

/// Fetch workouts with `scheduled_date` in `[from, to)`, newest first,
/// with exercises and sets attached.
pub async fn load_range(
  pool: &DbPool,
  from: DateTime<Utc>,
  to: DateTime<Utc>,
) -> Result<Vec<WorkoutWithExercises>, AppError> {
  let workouts: Vec<Workout> = sqlx::query_as(
    "SELECT * FROM user_workouts
     WHERE scheduled_date >= ?1 AND scheduled_date < ?2
     ORDER BY scheduled_date DESC",
  )
  .bind(from)
  .bind(to)
  .fetch_all(pool)
  .await?;

  let mut result = Vec::with_capacity(workouts.len());
  for workout in workouts {
    result.push(attach_exercises(pool, workout).await?);
  }
  Ok(result)
}

/// Fetch the week of workouts beginning at `week_start` (7 calendar days).
pub async fn load_week(
  pool: &DbPool,
  week_start: NaiveDate,
) -> Result<Vec<WorkoutWithExercises>, AppError> {
  let from = week_start.and_hms_opt(0, 0, 0).unwrap().and_utc();
  let to = from + Duration::days(7);
  load_range(pool, from, to).await
}

/// Fetch all favorited workouts, newest first.
pub async fn load_favorites(pool: &DbPool) -> Result<Vec<WorkoutWithExercises>, AppError> {
  let workouts: Vec<Workout> = sqlx::query_as(
    "SELECT * FROM user_workouts WHERE is_favorite = 1 ORDER BY scheduled_date DESC",
  )
  .fetch_all(pool)
  .await?;

  let mut result = Vec::with_capacity(workouts.len());
  for workout in workouts {
    result.push(attach_exercises(pool, workout).await?);
  }
  Ok(result)
}

async fn attach_exercises(
  pool: &DbPool,
  workout: Workout,
) -> Result<WorkoutWithExercises, AppError> {
  let rows: Vec<(i64, i64, i64, String, i64)> = sqlx::query_as(
    "SELECT we.id, we.workout_id, we.exercise_id, e.name, we.position
     FROM workout_exercises we
     JOIN exercises e ON e.id = we.exercise_id
     WHERE we.workout_id = ?1
     ORDER BY we.position",
  )
  .bind(workout.id)
  .fetch_all(pool)
  .await?;

  let mut exercises = Vec::with_capacity(rows.len());
  for (id, workout_id, exercise_id, exercise_name, position) in rows {
    let sets: Vec<ExerciseSet> = sqlx::query_as(
      "SELECT * FROM exercise_sets WHERE workout_exercise_id = ?1 ORDER BY set_number",
    )
    .bind(id)
    .fetch_all(pool)
    .await?;

    exercises.push(WorkoutExercise {
      id,
      workout_id,
      exercise_id,
      exercise_name,
      position,
      sets,
    });
  }

  Ok(WorkoutWithExercises { workout, exercises })
}

// ---------------------------------------------------------------------------
/// Mutations
// ---------------------------------------------------------------------------

pub async fn delete_workout(pool: &DbPool, workout_id: i64) -> Result<(), AppError> {
  let result = sqlx::query("DELETE FROM user_workouts WHERE id = ?1")
    .bind(workout_id)
    .execute(pool)
    .await?;

  if result.rows_affected() == 0 {
    return Err(AppError::NotFound(format!("workout {}", workout_id)));
  }
  Ok(())
}

/// Set a workout's custom display name. The generated name is kept; the
/// custom name merely shadows it.
pub async fn rename_workout(pool: &DbPool, workout_id: i64, name: &str) -> Result<(), AppError> {
  let trimmed = name.trim();
  if trimmed.is_empty() {
    return Err(AppError::Validation("workout name cannot be empty".into()));
  }

  let result = sqlx::query("UPDATE user_workouts SET custom_name = ?1 WHERE id = ?2")
    .bind(trimmed)
    .bind(workout_id)
    .execute(pool)
    .await?;

  if result.rows_affected() == 0 {
    return Err(AppError::NotFound(format!("workout {}", workout_id)));
  }
  Ok(())
}

/// Flip the favorite flag, returning the new value.
pub async fn toggle_favorite(pool: &DbPool, workout_id: i64) -> Result<bool, AppError> {
  let result = sqlx::query("UPDATE user_workouts SET is_favorite = NOT is_favorite WHERE id = ?1")
    .bind(workout_id)
    .execute(pool)
    .await?;

  if result.rows_affected() == 0 {
    return Err(AppError::NotFound(format!("workout {}", workout_id)));
  }

  let (is_favorite,): (bool,) =
    sqlx::query_as("SELECT is_favorite FROM user_workouts WHERE id = ?1")
      .bind(workout_id)
      .fetch_one(pool)
      .await?;
  Ok(is_favorite)
}

pub async fn set_completed(
  pool: &DbPool,
  workout_id: i64,
  completed: bool,
) -> Result<(), AppError> {
  let result = sqlx::query("UPDATE user_workouts SET completed = ?1 WHERE id = ?2")
    .bind(completed)
    .bind(workout_id)
    .execute(pool)
    .await?;

  if result.rows_affected() == 0 {
    return Err(AppError::NotFound(format!("workout {}", workout_id)));
  }
  Ok(())
}

/// Duplicate one workout (exercises and planned sets included) onto a new
/// date, with completion reset. Returns the new workout id.
pub async fn copy_workout_to_date(
  pool: &DbPool,
  workout_id: i64,
  date: NaiveDate,
) -> Result<i64, AppError> {
  let source: Option<Workout> = sqlx::query_as("SELECT * FROM user_workouts WHERE id = ?1")
    .bind(workout_id)
    .fetch_optional(pool)
    .await?;
  let source = source.ok_or_else(|| AppError::NotFound(format!("workout {}", workout_id)))?;

  let scheduled = date.and_hms_opt(PLAN_HOUR, 0, 0).unwrap().and_utc();
  let result = sqlx::query(
    "INSERT INTO user_workouts (name, custom_name, scheduled_date, completed, is_favorite)
     VALUES (?1, ?2, ?3, 0, 0)",
  )
  .bind(&source.name)
  .bind(&source.custom_name)
  .bind(scheduled)
  .execute(pool)
  .await?;
  let new_id = result.last_insert_rowid();

  let exercises: Vec<(i64, i64, i64)> = sqlx::query_as(
    "SELECT id, exercise_id, position FROM workout_exercises WHERE workout_id = ?1",
  )
  .bind(workout_id)
  .fetch_all(pool)
  .await?;

  for (old_we_id, exercise_id, position) in exercises {
    let we = sqlx::query(
      "INSERT INTO workout_exercises (workout_id, exercise_id, position) VALUES (?1, ?2, ?3)",
    )
    .bind(new_id)
    .bind(exercise_id)
    .bind(position)
    .execute(pool)
    .await?;
    let new_we_id = we.last_insert_rowid();

    sqlx::query(
      "INSERT INTO exercise_sets (workout_exercise_id, set_number, reps, weight_lbs)
       SELECT ?1, set_number, reps, weight_lbs FROM exercise_sets
       WHERE workout_exercise_id = ?2",
    )
    .bind(new_we_id)
    .bind(old_we_id)
    .execute(pool)
    .await?;
  }

  Ok(new_id)
}

/// Duplicate the week's workouts one week later. Returns how many workouts
/// were copied.
pub async fn copy_week_to_next(pool: &DbPool, week_start: NaiveDate) -> Result<u32, AppError> {
  let from = week_start.and_hms_opt(0, 0, 0).unwrap().and_utc();
  let to = from + Duration::days(7);

  let rows: Vec<(i64, DateTime<Utc>)> = sqlx::query_as(
    "SELECT id, scheduled_date FROM user_workouts
     WHERE scheduled_date >= ?1 AND scheduled_date < ?2",
  )
  .bind(from)
  .bind(to)
  .fetch_all(pool)
  .await?;

  let mut copied = 0;
  for (id, scheduled_date) in rows {
    let target = scheduled_date.date_naive() + Duration::days(7);
    copy_workout_to_date(pool, id, target).await?;
    copied += 1;
  }
  Ok(copied)
}

// ---------------------------------------------------------------------------
/// Plan materialization (wizard submission)
// ---------------------------------------------------------------------------

/// Create the scheduled workouts for a submitted plan, one per day starting
/// at `start_date`. Exercises are drawn from the library filtered by the
/// plan's muscle-group focus and selected equipment. Returns the new ids.
pub async fn create_plan(
  pool: &DbPool,
  plan: &PlanRequest,
  start_date: NaiveDate,
) -> Result<Vec<i64>, AppError> {
  let mut created = Vec::new();

  for (offset, workout_type) in plan.schedule.day_types().into_iter().enumerate() {
    let date = start_date + Duration::days(offset as i64);
    let scheduled = date.and_hms_opt(PLAN_HOUR, 0, 0).unwrap().and_utc();

    let result = sqlx::query(
      "INSERT INTO user_workouts (name, scheduled_date, completed, is_favorite)
       VALUES (?1, ?2, 0, 0)",
    )
    .bind(workout_type.display_name())
    .bind(scheduled)
    .execute(pool)
    .await?;
    let workout_id = result.last_insert_rowid();

    let candidates: Vec<Exercise> = sqlx::query_as(
      "SELECT * FROM exercises WHERE muscle_group = ?1 ORDER BY id",
    )
    .bind(workout_type.as_str())
    .fetch_all(pool)
    .await?;

    let picked: Vec<&Exercise> = candidates
      .iter()
      .filter(|e| plan.equipment.iter().any(|eq| eq == &e.equipment))
      .take(plan.level.exercises_per_workout())
      .collect();

    for (position, exercise) in picked.iter().enumerate() {
      let we = sqlx::query(
        "INSERT INTO workout_exercises (workout_id, exercise_id, position) VALUES (?1, ?2, ?3)",
      )
      .bind(workout_id)
      .bind(exercise.id)
      .bind(position as i64)
      .execute(pool)
      .await?;
      let we_id = we.last_insert_rowid();

      for set_number in 1..=plan.level.sets_per_exercise() {
        sqlx::query(
          "INSERT INTO exercise_sets (workout_exercise_id, set_number, reps, weight_lbs)
           VALUES (?1, ?2, ?3, NULL)",
        )
        .bind(we_id)
        .bind(set_number)
        .bind(plan.level.target_reps())
        .execute(pool)
        .await?;
      }
    }

    created.push(workout_id);
  }

  Ok(created)
}

// ---------------------------------------------------------------------------
/// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
  use super::*;
  use crate::test_utils::{at_morning, seed_workout, seed_workout_exercise, setup_test_db};
  use crate::wizard::{Schedule, WorkoutLevel, WorkoutType};

  fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
  }

  #[tokio::test]
  async fn test_load_week_includes_only_that_week() {
    let pool = setup_test_db().await;
    let week_start = day(2024, 3, 10);

    seed_workout(&pool, "In Week", at_morning(day(2024, 3, 14)), false).await;
    // 23:00 on the last day of the week still belongs to the week.
    let late = day(2024, 3, 16).and_hms_opt(23, 0, 0).unwrap().and_utc();
    seed_workout(&pool, "Late Saturday", late, false).await;
    seed_workout(&pool, "Next Week", at_morning(day(2024, 3, 17)), false).await;

    let week = load_week(&pool, week_start).await.unwrap();
    assert_eq!(week.len(), 2);
    assert!(week.iter().all(|w| w.workout.name != "Next Week"));

    pool.close().await;
  }

  #[tokio::test]
  async fn test_load_week_attaches_exercises_and_sets() {
    let pool = setup_test_db().await;
    let id = seed_workout(&pool, "Push Day", at_morning(day(2024, 3, 12)), false).await;
    seed_workout_exercise(&pool, id, "Bench Press", Some(185.0)).await;

    let week = load_week(&pool, day(2024, 3, 10)).await.unwrap();
    assert_eq!(week.len(), 1);
    assert_eq!(week[0].exercises.len(), 1);
    assert_eq!(week[0].exercises[0].exercise_name, "Bench Press");
    assert_eq!(week[0].exercises[0].sets.len(), 1);
    assert_eq!(week[0].exercises[0].sets[0].weight_lbs, Some(185.0));

    pool.close().await;
  }

  #[tokio::test]
  async fn test_delete_workout() {
    let pool = setup_test_db().await;
    let id = seed_workout(&pool, "Doomed", at_morning(day(2024, 3, 12)), false).await;

    delete_workout(&pool, id).await.unwrap();
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM user_workouts")
      .fetch_one(&pool)
      .await
      .unwrap();
    assert_eq!(count, 0);

    // Deleting again reports NotFound instead of silently succeeding.
    assert!(matches!(
      delete_workout(&pool, id).await,
      Err(AppError::NotFound(_))
    ));

    pool.close().await;
  }

  #[tokio::test]
  async fn test_rename_sets_custom_name_only() {
    let pool = setup_test_db().await;
    let id = seed_workout(&pool, "Push Day", at_morning(day(2024, 3, 12)), false).await;

    rename_workout(&pool, id, "  Chest Day  ").await.unwrap();

    let (name, custom_name): (String, Option<String>) =
      sqlx::query_as("SELECT name, custom_name FROM user_workouts WHERE id = ?1")
        .bind(id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(name, "Push Day");
    assert_eq!(custom_name.as_deref(), Some("Chest Day"));

    assert!(matches!(
      rename_workout(&pool, id, "   ").await,
      Err(AppError::Validation(_))
    ));

    pool.close().await;
  }

  #[tokio::test]
  async fn test_toggle_favorite_flips_and_reports() {
    let pool = setup_test_db().await;
    let id = seed_workout(&pool, "Push Day", at_morning(day(2024, 3, 12)), false).await;

    assert!(toggle_favorite(&pool, id).await.unwrap());
    assert!(!toggle_favorite(&pool, id).await.unwrap());
    assert!(matches!(
      toggle_favorite(&pool, 9999).await,
      Err(AppError::NotFound(_))
    ));

    pool.close().await;
  }

  #[tokio::test]
  async fn test_copy_week_to_next_shifts_dates_and_resets_completion() {
    let pool = setup_test_db().await;
    let week_start = day(2024, 3, 10);

    let id = seed_workout(&pool, "Push Day", at_morning(day(2024, 3, 12)), true).await;
    seed_workout_exercise(&pool, id, "Bench Press", Some(185.0)).await;
    seed_workout(&pool, "Legs Day", at_morning(day(2024, 3, 14)), false).await;

    let copied = copy_week_to_next(&pool, week_start).await.unwrap();
    assert_eq!(copied, 2);

    let next = load_week(&pool, day(2024, 3, 17)).await.unwrap();
    assert_eq!(next.len(), 2);
    assert!(next.iter().all(|w| !w.workout.completed));

    let push = next
      .iter()
      .find(|w| w.workout.name == "Push Day")
      .expect("copied push day");
    assert_eq!(push.workout.scheduled_date.date_naive(), day(2024, 3, 19));
    assert_eq!(push.exercises.len(), 1);
    assert_eq!(push.exercises[0].sets.len(), 1);

    // The source week is untouched.
    let original = load_week(&pool, week_start).await.unwrap();
    assert_eq!(original.len(), 2);

    pool.close().await;
  }

  #[tokio::test]
  async fn test_favorites_and_add_to_week() {
    let pool = setup_test_db().await;
    let id = seed_workout(&pool, "Pull Day", at_morning(day(2024, 3, 5)), true).await;
    toggle_favorite(&pool, id).await.unwrap();

    let favorites = load_favorites(&pool).await.unwrap();
    assert_eq!(favorites.len(), 1);

    let new_id = copy_workout_to_date(&pool, id, day(2024, 3, 12)).await.unwrap();
    assert_ne!(new_id, id);

    let week = load_week(&pool, day(2024, 3, 10)).await.unwrap();
    assert_eq!(week.len(), 1);
    assert!(!week[0].workout.completed);
    // The copy is not itself a favorite.
    assert!(!week[0].workout.is_favorite);

    pool.close().await;
  }

  #[tokio::test]
  async fn test_create_plan_single_day() {
    let pool = setup_test_db().await;
    let plan = PlanRequest {
      schedule: Schedule::SingleDay {
        workout_type: WorkoutType::Push,
      },
      level: WorkoutLevel::Beginner,
      equipment: vec!["Dumbbells".to_string(), "Barbell".to_string()],
    };

    let created = create_plan(&pool, &plan, day(2024, 3, 12)).await.unwrap();
    assert_eq!(created.len(), 1);

    let week = load_week(&pool, day(2024, 3, 10)).await.unwrap();
    assert_eq!(week.len(), 1);
    assert_eq!(week[0].workout.name, "Push Day");
    // Beginner: up to 3 exercises, all matching the selected equipment.
    assert!(week[0].exercises.len() <= 3);
    assert!(!week[0].exercises.is_empty());
    for exercise in &week[0].exercises {
      assert_eq!(exercise.sets.len(), 3);
      assert!(exercise.sets.iter().all(|s| s.reps == Some(12)));
      assert!(exercise.sets.iter().all(|s| s.weight_lbs.is_none()));
    }

    pool.close().await;
  }

  #[tokio::test]
  async fn test_create_plan_multi_day_spreads_across_days() {
    let pool = setup_test_db().await;
    let plan = PlanRequest {
      schedule: Schedule::MultiDay { days_per_week: 3 },
      level: WorkoutLevel::Intermediate,
      equipment: vec!["Bodyweight Only".to_string(), "Barbell".to_string()],
    };

    let created = create_plan(&pool, &plan, day(2024, 3, 10)).await.unwrap();
    assert_eq!(created.len(), 3);

    let week = load_week(&pool, day(2024, 3, 10)).await.unwrap();
    assert_eq!(week.len(), 3);

    let mut dates: Vec<NaiveDate> = week
      .iter()
      .map(|w| w.workout.scheduled_date.date_naive())
      .collect();
    dates.sort();
    assert_eq!(dates, vec![day(2024, 3, 10), day(2024, 3, 11), day(2024, 3, 12)]);

    pool.close().await;
  }

  #[tokio::test]
  async fn test_create_plan_respects_equipment_filter() {
    let pool = setup_test_db().await;
    let plan = PlanRequest {
      schedule: Schedule::SingleDay {
        workout_type: WorkoutType::Legs,
      },
      level: WorkoutLevel::Advanced,
      equipment: vec!["Bodyweight Only".to_string()],
    };

    create_plan(&pool, &plan, day(2024, 3, 12)).await.unwrap();
    let week = load_week(&pool, day(2024, 3, 10)).await.unwrap();

    // Only the bodyweight legs exercise qualifies.
    assert_eq!(week[0].exercises.len(), 1);
    assert_eq!(week[0].exercises[0].exercise_name, "Bodyweight Squat");

    pool.close().await;
  }
}
