//! Wizard commands
//!
//! The command layer around `WizardSession`: it owns the IO (preference
//! loads, the equipment catalog, plan materialization) and returns a snapshot
//! of the session after every action so the frontend never has to track the
//! step machine itself.

use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;
use tauri::State;

use crate::commands::profile::load_preferences;
use crate::db::AppState;
use crate::equipment::load_equipment;
use crate::error::AppError;
use crate::models::UserPreferences;
use crate::wizard::{WizardError, WizardStep, WorkoutFlow, WorkoutLevel, WorkoutType};
use crate::workouts;

/// What the frontend renders after every wizard action.
#[derive(Debug, Clone, Serialize)]
pub struct WizardSnapshot {
  #[serde(flatten)]
  pub step: WizardStep,
  pub step_index: u8,
  pub can_submit: bool,
  pub preferences: UserPreferences,
  /// None until the catalog has loaded; the UI shows a spinner meanwhile.
  pub catalog: Option<Vec<String>>,
}

/// Start (or restart) a wizard pass: clear the draft and kick off a fresh
/// preference load. The generation token makes an overlapping older load
/// harmless.
pub(crate) async fn start_session(state: &AppState) -> WizardSnapshot {
  let token = {
    let mut session = state.wizard.lock().await;
    session.reset();
    session.begin_preference_load()
  };

  let prefs = load_preferences(&state.db).await;

  let mut session = state.wizard.lock().await;
  session.apply_preferences(token, prefs);
  snapshot(&session)
}

/// Load the equipment catalog if the session does not have one yet. Runs when
/// the level step is entered, so the options are ready by the equipment step.
pub(crate) async fn ensure_catalog(state: &AppState) {
  {
    let session = state.wizard.lock().await;
    if session.catalog().is_some() {
      return;
    }
  }

  let catalog = load_equipment(&state.db).await;

  let mut session = state.wizard.lock().await;
  if session.catalog().is_none() {
    session.set_catalog(catalog);
  }
}

/// Materialize the submitted plan starting today, then reset the session for
/// the next pass.
pub(crate) async fn submit_session(state: &AppState) -> Result<Vec<i64>, AppError> {
  let plan = {
    let session = state.wizard.lock().await;
    session.submit()?
  };

  let start_date = Utc::now().date_naive();
  let created = workouts::create_plan(&state.db, &plan, start_date).await?;

  println!(
    "Created {} workout(s) from wizard plan ({} day/week)",
    created.len(),
    plan.schedule.days_per_week()
  );

  let mut session = state.wizard.lock().await;
  session.reset();
  Ok(created)
}

fn snapshot(session: &crate::wizard::WizardSession) -> WizardSnapshot {
  WizardSnapshot {
    step: session.step.clone(),
    step_index: session.step.index(),
    can_submit: session.can_submit(),
    preferences: session.preferences().clone(),
    catalog: session.catalog().map(|c| c.to_vec()),
  }
}

// ---------------------------------------------------------------------------
/// Commands
// ---------------------------------------------------------------------------

#[tauri::command]
pub async fn wizard_get_state(state: State<'_, Arc<AppState>>) -> Result<WizardSnapshot, WizardError> {
  let session = state.wizard.lock().await;
  Ok(snapshot(&session))
}

#[tauri::command]
pub async fn wizard_reset(state: State<'_, Arc<AppState>>) -> Result<WizardSnapshot, WizardError> {
  Ok(start_session(&state).await)
}

#[tauri::command]
pub async fn wizard_select_flow(
  state: State<'_, Arc<AppState>>,
  flow: WorkoutFlow,
) -> Result<WizardSnapshot, WizardError> {
  let mut session = state.wizard.lock().await;
  session.select_flow(flow)?;
  Ok(snapshot(&session))
}

#[tauri::command]
pub async fn wizard_select_workout_type(
  state: State<'_, Arc<AppState>>,
  workout_type: WorkoutType,
) -> Result<WizardSnapshot, WizardError> {
  {
    let mut session = state.wizard.lock().await;
    session.select_workout_type(workout_type)?;
  }
  // Entering the level step; warm the catalog for the step after it.
  ensure_catalog(&state).await;
  let session = state.wizard.lock().await;
  Ok(snapshot(&session))
}

#[tauri::command]
pub async fn wizard_select_days(
  state: State<'_, Arc<AppState>>,
  days_per_week: u8,
) -> Result<WizardSnapshot, WizardError> {
  {
    let mut session = state.wizard.lock().await;
    session.select_days(days_per_week)?;
  }
  ensure_catalog(&state).await;
  let session = state.wizard.lock().await;
  Ok(snapshot(&session))
}

#[tauri::command]
pub async fn wizard_select_level(
  state: State<'_, Arc<AppState>>,
  level: WorkoutLevel,
) -> Result<WizardSnapshot, WizardError> {
  let mut session = state.wizard.lock().await;
  session.select_level(level)?;
  Ok(snapshot(&session))
}

#[tauri::command]
pub async fn wizard_toggle_equipment(
  state: State<'_, Arc<AppState>>,
  name: String,
) -> Result<WizardSnapshot, WizardError> {
  let mut session = state.wizard.lock().await;
  session.toggle_equipment(&name)?;
  Ok(snapshot(&session))
}

/// Step back. Landing on the first step restarts the preference load, the
/// same as a fresh mount.
#[tauri::command]
pub async fn wizard_back(state: State<'_, Arc<AppState>>) -> Result<WizardSnapshot, WizardError> {
  let landed_on_flow = {
    let mut session = state.wizard.lock().await;
    session.back();
    matches!(session.step, WizardStep::SelectFlow)
  };

  if landed_on_flow {
    let token = {
      let mut session = state.wizard.lock().await;
      session.begin_preference_load()
    };
    let prefs = load_preferences(&state.db).await;
    let mut session = state.wizard.lock().await;
    session.apply_preferences(token, prefs);
    return Ok(snapshot(&session));
  }

  let session = state.wizard.lock().await;
  Ok(snapshot(&session))
}

#[tauri::command]
pub async fn wizard_submit(state: State<'_, Arc<AppState>>) -> Result<Vec<i64>, AppError> {
  submit_session(&state).await
}

// ---------------------------------------------------------------------------
/// Tests
// ---------------------------------------------------------------------------
