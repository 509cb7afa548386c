//! Weekly calendar arithmetic and bucketing.
//!
//! Weeks start on Sunday. All bucketing compares calendar dates only; the
//! time-of-day component of a workout's `scheduled_date` is ignored.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use serde::Serialize;

use crate::models::WorkoutWithExercises;

/// The Sunday-based week start containing `date`.
pub fn week_start_for(date: NaiveDate) -> NaiveDate {
  date - Duration::days(date.weekday().num_days_from_sunday() as i64)
}

/// The 7 calendar days of the week beginning at `start`.
pub fn week_dates(start: NaiveDate) -> [NaiveDate; 7] {
  std::array::from_fn(|i| start + Duration::days(i as i64))
}

/// Inclusive (start, end) range of the week beginning at `start`.
pub fn week_range(start: NaiveDate) -> (NaiveDate, NaiveDate) {
  (start, start + Duration::days(6))
}

pub fn previous_week(start: NaiveDate) -> NaiveDate {
  start - Duration::days(7)
}

pub fn next_week(start: NaiveDate) -> NaiveDate {
  start + Duration::days(7)
}

/// True when `scheduled` falls on calendar day `day`, regardless of
/// time-of-day.
pub fn same_calendar_day(scheduled: DateTime<Utc>, day: NaiveDate) -> bool {
  scheduled.date_naive() == day
}

/// One rendered day cell: the date plus the workouts scheduled on it.
#[derive(Debug, Clone, Serialize)]
pub struct CalendarDay {
  pub date: NaiveDate,
  pub workouts: Vec<WorkoutWithExercises>,
}

/// Group a week's workouts into 7 per-day buckets.
pub fn bucket_by_day(workouts: &[WorkoutWithExercises], start: NaiveDate) -> Vec<CalendarDay> {
  week_dates(start)
    .into_iter()
    .map(|date| CalendarDay {
      date,
      workouts: workouts
        .iter()
        .filter(|w| same_calendar_day(w.workout.scheduled_date, date))
        .cloned()
        .collect(),
    })
    .collect()
}

/// Filter to workouts whose calendar date falls within the week at `start`.
pub fn workouts_in_week(
  workouts: &[WorkoutWithExercises],
  start: NaiveDate,
) -> Vec<WorkoutWithExercises> {
  let (start, end) = week_range(start);
  workouts
    .iter()
    .filter(|w| {
      let date = w.workout.scheduled_date.date_naive();
      date >= start && date <= end
    })
    .cloned()
    .collect()
}
