pub mod profile;
pub mod workout;

pub use profile::{Profile, ProfileRow, ProfileUpdate, UserPreferences};
pub use workout::{Exercise, ExerciseSet, Workout, WorkoutExercise, WorkoutWithExercises};
