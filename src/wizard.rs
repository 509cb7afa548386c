//! Guided workout wizard
//!
//! A four-step linear form: choose a flow (single day vs. multi-day split),
//! choose a workout type or a day count, choose a level, choose equipment,
//! then submit. The step is a tagged union carrying only the fields valid at
//! that step, so illegal states (equipment chosen before a level, a level
//! chosen before a schedule) are unrepresentable.
//!
//! Key behaviors:
//! - Going back discards the progress of the steps being left, it never
//!   merely navigates.
//! - Saved preferences (level, equipment) pre-populate the draft; preference
//!   loads are keyed by a generation counter so a stale load can never
//!   overwrite a newer one.
//! - Submission is gated: equipment must be non-empty.

use serde::{Deserialize, Serialize};

use crate::models::UserPreferences;

/// Day counts offered by the multi-day flow.
pub const MULTI_DAY_OPTIONS: [u8; 3] = [3, 4, 5];

// ---------------------------------------------------------------------------
/// Workout Flow: single focused day or a weekly split
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkoutFlow {
  Single,
  Multi,
}

// ---------------------------------------------------------------------------
/// Workout Type: the muscle-group focus of a single day
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkoutType {
  Push,
  Pull,
  Legs,
  Upper,
  Lower,
}

impl WorkoutType {
  pub fn as_str(&self) -> &'static str {
    match self {
      WorkoutType::Push => "push",
      WorkoutType::Pull => "pull",
      WorkoutType::Legs => "legs",
      WorkoutType::Upper => "upper",
      WorkoutType::Lower => "lower",
    }
  }

  /// Display name used for generated workouts.
  pub fn display_name(&self) -> &'static str {
    match self {
      WorkoutType::Push => "Push Day",
      WorkoutType::Pull => "Pull Day",
      WorkoutType::Legs => "Legs Day",
      WorkoutType::Upper => "Upper Body",
      WorkoutType::Lower => "Lower Body",
    }
  }
}

impl std::str::FromStr for WorkoutType {
  type Err = String;
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "push" => Ok(Self::Push),
      "pull" => Ok(Self::Pull),
      "legs" => Ok(Self::Legs),
      "upper" => Ok(Self::Upper),
      "lower" => Ok(Self::Lower),
      _ => Err(format!("Unknown workout type: {}", s)),
    }
  }
}

// ---------------------------------------------------------------------------
/// Workout Level
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkoutLevel {
  Beginner,
  Intermediate,
  Advanced,
}

impl WorkoutLevel {
  pub fn as_str(&self) -> &'static str {
    match self {
      WorkoutLevel::Beginner => "beginner",
      WorkoutLevel::Intermediate => "intermediate",
      WorkoutLevel::Advanced => "advanced",
    }
  }

  pub fn description(&self) -> &'static str {
    match self {
      WorkoutLevel::Beginner => "New to working out or returning after a break",
      WorkoutLevel::Intermediate => "Consistent training for 6+ months",
      WorkoutLevel::Advanced => "Several years of structured training",
    }
  }

  /// Plan generation parameters per level.
  pub fn exercises_per_workout(&self) -> usize {
    match self {
      WorkoutLevel::Beginner => 3,
      WorkoutLevel::Intermediate => 4,
      WorkoutLevel::Advanced => 5,
    }
  }

  pub fn sets_per_exercise(&self) -> i64 {
    match self {
      WorkoutLevel::Beginner | WorkoutLevel::Intermediate => 3,
      WorkoutLevel::Advanced => 4,
    }
  }

  pub fn target_reps(&self) -> i64 {
    match self {
      WorkoutLevel::Beginner => 12,
      WorkoutLevel::Intermediate => 10,
      WorkoutLevel::Advanced => 8,
    }
  }
}

impl std::fmt::Display for WorkoutLevel {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

impl std::str::FromStr for WorkoutLevel {
  type Err = String;
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "beginner" => Ok(Self::Beginner),
      "intermediate" => Ok(Self::Intermediate),
      "advanced" => Ok(Self::Advanced),
      _ => Err(format!("Unknown workout level: {}", s)),
    }
  }
}

// ---------------------------------------------------------------------------
/// Schedule: what step 1 produced, for either flow
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Schedule {
  SingleDay { workout_type: WorkoutType },
  MultiDay { days_per_week: u8 },
}

impl Schedule {
  pub fn flow(&self) -> WorkoutFlow {
    match self {
      Schedule::SingleDay { .. } => WorkoutFlow::Single,
      Schedule::MultiDay { .. } => WorkoutFlow::Multi,
    }
  }

  /// A single-day schedule is always one day per week.
  pub fn days_per_week(&self) -> u8 {
    match self {
      Schedule::SingleDay { .. } => 1,
      Schedule::MultiDay { days_per_week } => *days_per_week,
    }
  }

  /// The workout type for each day of the plan, in order.
  pub fn day_types(&self) -> Vec<WorkoutType> {
    match self {
      Schedule::SingleDay { workout_type } => vec![*workout_type],
      Schedule::MultiDay { days_per_week: 3 } => {
        vec![WorkoutType::Push, WorkoutType::Pull, WorkoutType::Legs]
      }
      Schedule::MultiDay { days_per_week: 4 } => vec![
        WorkoutType::Upper,
        WorkoutType::Lower,
        WorkoutType::Push,
        WorkoutType::Pull,
      ],
      Schedule::MultiDay { .. } => vec![
        WorkoutType::Push,
        WorkoutType::Pull,
        WorkoutType::Legs,
        WorkoutType::Upper,
        WorkoutType::Lower,
      ],
    }
  }
}

// ---------------------------------------------------------------------------
/// Wizard Step: tagged union, one variant per step
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum WizardStep {
  SelectFlow,
  SelectTypeOrDays {
    flow: WorkoutFlow,
  },
  SelectLevel {
    schedule: Schedule,
  },
  SelectEquipment {
    schedule: Schedule,
    level: WorkoutLevel,
    equipment: Vec<String>,
  },
}

impl WizardStep {
  /// Zero-based position for the progress indicator.
  pub fn index(&self) -> u8 {
    match self {
      WizardStep::SelectFlow => 0,
      WizardStep::SelectTypeOrDays { .. } => 1,
      WizardStep::SelectLevel { .. } => 2,
      WizardStep::SelectEquipment { .. } => 3,
    }
  }

  fn name(&self) -> &'static str {
    match self {
      WizardStep::SelectFlow => "select_flow",
      WizardStep::SelectTypeOrDays { .. } => "select_type_or_days",
      WizardStep::SelectLevel { .. } => "select_level",
      WizardStep::SelectEquipment { .. } => "select_equipment",
    }
  }
}

// ---------------------------------------------------------------------------
/// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum WizardError {
  #[error("{action} is not valid at step {step}")]
  InvalidTransition {
    action: &'static str,
    step: &'static str,
  },

  #[error("Days per week must be 3, 4, or 5 (got {0})")]
  InvalidDays(u8),

  #[error("Select at least one piece of equipment before submitting")]
  EmptyEquipment,
}

impl serde::Serialize for WizardError {
  fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: serde::Serializer,
  {
    serializer.serialize_str(&self.to_string())
  }
}

// ---------------------------------------------------------------------------
/// Plan Request: the structured submission payload
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanRequest {
  pub schedule: Schedule,
  pub level: WorkoutLevel,
  pub equipment: Vec<String>,
}

// ---------------------------------------------------------------------------
/// Wizard Session
// ---------------------------------------------------------------------------

/// One in-progress pass through the guided form. IO-free: preference and
/// catalog loads happen in the command layer and are handed in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WizardSession {
  pub step: WizardStep,
  preferences: UserPreferences,
  generation: u64,
  catalog: Option<Vec<String>>,
}

impl Default for WizardSession {
  fn default() -> Self {
    Self::new()
  }
}

impl WizardSession {
  pub fn new() -> Self {
    Self {
      step: WizardStep::SelectFlow,
      preferences: UserPreferences::default(),
      generation: 0,
      catalog: None,
    }
  }

  // -- preferences ----------------------------------------------------------

  /// Mark the start of a preference load and return the token the eventual
  /// `apply_preferences` call must present. Starting a newer load invalidates
  /// every earlier token, which is what discards stale responses after rapid
  /// back-and-forth navigation.
  pub fn begin_preference_load(&mut self) -> u64 {
    self.generation += 1;
    self.generation
  }

  /// Apply a finished preference load. Returns false (and changes nothing)
  /// when the token is stale.
  pub fn apply_preferences(&mut self, token: u64, prefs: UserPreferences) -> bool {
    if token != self.generation {
      return false;
    }
    self.preferences = prefs;
    true
  }

  pub fn preferences(&self) -> &UserPreferences {
    &self.preferences
  }

  // -- equipment catalog ----------------------------------------------------

  /// The equipment options to render, once loaded. The UI shows a loading
  /// indicator at the level step while this is None.
  pub fn catalog(&self) -> Option<&[String]> {
    self.catalog.as_deref()
  }

  pub fn set_catalog(&mut self, catalog: Vec<String>) {
    self.catalog = Some(catalog);
  }

  // -- transitions ----------------------------------------------------------

  pub fn select_flow(&mut self, flow: WorkoutFlow) -> Result<(), WizardError> {
    match self.step {
      WizardStep::SelectFlow => {
        self.step = WizardStep::SelectTypeOrDays { flow };
        Ok(())
      }
      _ => Err(self.invalid("select_flow")),
    }
  }

  pub fn select_workout_type(&mut self, workout_type: WorkoutType) -> Result<(), WizardError> {
    match self.step {
      WizardStep::SelectTypeOrDays {
        flow: WorkoutFlow::Single,
      } => {
        self.step = WizardStep::SelectLevel {
          schedule: Schedule::SingleDay { workout_type },
        };
        Ok(())
      }
      _ => Err(self.invalid("select_workout_type")),
    }
  }

  pub fn select_days(&mut self, days_per_week: u8) -> Result<(), WizardError> {
    if !MULTI_DAY_OPTIONS.contains(&days_per_week) {
      return Err(WizardError::InvalidDays(days_per_week));
    }
    match self.step {
      WizardStep::SelectTypeOrDays {
        flow: WorkoutFlow::Multi,
      } => {
        self.step = WizardStep::SelectLevel {
          schedule: Schedule::MultiDay { days_per_week },
        };
        Ok(())
      }
      _ => Err(self.invalid("select_days")),
    }
  }

  /// Advancing past the level step seeds the equipment selection from the
  /// user's saved defaults; the user can still toggle freely afterwards.
  pub fn select_level(&mut self, level: WorkoutLevel) -> Result<(), WizardError> {
    match self.step {
      WizardStep::SelectLevel { schedule } => {
        self.step = WizardStep::SelectEquipment {
          schedule,
          level,
          equipment: self.preferences.default_equipment.clone(),
        };
        Ok(())
      }
      _ => Err(self.invalid("select_level")),
    }
  }

  /// Toggle membership of one equipment item. No transition; toggling the
  /// same item twice restores the selection exactly.
  pub fn toggle_equipment(&mut self, name: &str) -> Result<(), WizardError> {
    match &mut self.step {
      WizardStep::SelectEquipment { equipment, .. } => {
        if let Some(pos) = equipment.iter().position(|e| e == name) {
          equipment.remove(pos);
        } else {
          equipment.push(name.to_string());
        }
        Ok(())
      }
      _ => Err(self.invalid("toggle_equipment")),
    }
  }

  /// Step back, discarding the progress of the steps being left. Returns true
  /// if a step change happened (false when already at the first step).
  /// Landing back on the flow step means a fresh preference load should be
  /// started by the caller.
  pub fn back(&mut self) -> bool {
    match &self.step {
      WizardStep::SelectFlow => false,
      WizardStep::SelectTypeOrDays { .. } => {
        self.step = WizardStep::SelectFlow;
        true
      }
      WizardStep::SelectLevel { schedule } => {
        self.step = WizardStep::SelectTypeOrDays {
          flow: schedule.flow(),
        };
        true
      }
      WizardStep::SelectEquipment { schedule, .. } => {
        self.step = WizardStep::SelectLevel {
          schedule: *schedule,
        };
        true
      }
    }
  }

  /// Start over from the first step. Keeps the loaded catalog (it does not go
  /// stale) but drops all draft progress.
  pub fn reset(&mut self) {
    self.step = WizardStep::SelectFlow;
  }

  // -- submission -----------------------------------------------------------

  /// Submission gate: on the equipment step with a non-empty selection.
  /// The tagged union already guarantees level and schedule are set.
  pub fn can_submit(&self) -> bool {
    matches!(
      &self.step,
      WizardStep::SelectEquipment { equipment, .. } if !equipment.is_empty()
    )
  }

  pub fn submit(&self) -> Result<PlanRequest, WizardError> {
    match &self.step {
      WizardStep::SelectEquipment {
        schedule,
        level,
        equipment,
      } => {
        if equipment.is_empty() {
          return Err(WizardError::EmptyEquipment);
        }
        Ok(PlanRequest {
          schedule: *schedule,
          level: *level,
          equipment: equipment.clone(),
        })
      }
      _ => Err(self.invalid("submit")),
    }
  }

  fn invalid(&self, action: &'static str) -> WizardError {
    WizardError::InvalidTransition {
      action,
      step: self.step.name(),
    }
  }
}

// ---------------------------------------------------------------------------
/// Tests
// ---------------------------------------------------------------------------
