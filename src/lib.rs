pub mod calendar;
pub mod commands;
pub mod db;
pub mod equipment;
pub mod error;
pub mod models;
pub mod stats;
pub mod storage;
#[cfg(test)]
mod test_utils;
pub mod wizard;
pub mod workouts;

use db::AppState;
use std::sync::Arc;
use tauri::Manager;

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
  // Load environment variables from .env file
  dotenvy::dotenv().ok();

  tauri::Builder::default()
    .plugin(tauri_plugin_opener::init())
    .setup(|app| {
      // Initialize database
      let app_handle = app.handle().clone();
      tauri::async_runtime::block_on(async move {
        match db::initialize_db(&app_handle).await {
          Ok(pool) => {
            let state = Arc::new(AppState::new(pool));
            app_handle.manage(state);
            println!("Database ready");
          }
          Err(e) => {
            eprintln!("Failed to initialize database: {}", e);
          }
        }
      });
      Ok(())
    })
    .invoke_handler(tauri::generate_handler![
      // Wizard commands
      commands::wizard::wizard_get_state,
      commands::wizard::wizard_reset,
      commands::wizard::wizard_select_flow,
      commands::wizard::wizard_select_workout_type,
      commands::wizard::wizard_select_days,
      commands::wizard::wizard_select_level,
      commands::wizard::wizard_toggle_equipment,
      commands::wizard::wizard_back,
      commands::wizard::wizard_submit,
      // Calendar commands
      commands::workout::get_weekly_workouts,
      commands::workout::get_week_calendar,
      commands::workout::delete_workout,
      commands::workout::rename_workout,
      commands::workout::toggle_favorite,
      commands::workout::set_workout_completed,
      commands::workout::copy_week_to_next,
      commands::workout::get_favorite_workouts,
      commands::workout::add_favorite_to_week,
      // Stats commands
      commands::stats::get_workout_stats,
      // Profile commands
      commands::profile::get_profile,
      commands::profile::update_profile,
      commands::profile::upload_avatar,
    ])
    .run(tauri::generate_context!())
    .expect("error while running tauri application")
}
