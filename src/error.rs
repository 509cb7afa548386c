//! Application error type shared by all commands.
//!
//! Mutating commands (rename, delete, profile save, avatar upload) return
//! these errors to the frontend so failures are visible and retryable instead
//! of disappearing into a console log.

use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
  #[error("Database error: {0}")]
  Database(String),

  #[error("Not found: {0}")]
  NotFound(String),

  #[error("Validation error: {0}")]
  Validation(String),

  #[error("Missing configuration: {0}")]
  MissingConfig(String),

  #[error("HTTP request failed: {0}")]
  Request(#[from] reqwest::Error),

  #[error("Storage error: {0}")]
  Storage(String),

  #[error("IO error: {0}")]
  Io(#[from] std::io::Error),
}

impl From<crate::wizard::WizardError> for AppError {
  fn from(e: crate::wizard::WizardError) -> Self {
    AppError::Validation(e.to_string())
  }
}

impl From<sqlx::Error> for AppError {
  fn from(e: sqlx::Error) -> Self {
    match e {
      sqlx::Error::RowNotFound => AppError::NotFound("row not found".into()),
      other => AppError::Database(other.to_string()),
    }
  }
}

impl Serialize for AppError {
  fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: serde::Serializer,
  {
    serializer.serialize_str(&self.to_string())
  }
}
