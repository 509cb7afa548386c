//! Avatar storage client
//!
//! Uploads avatar images to the configured object-storage service and returns
//! the public URL the service hands back. The service endpoint and token come
//! from the environment.

use reqwest::Client;
use serde::Deserialize;
use std::env;
use url::Url;

use crate::error::AppError;

#[derive(Debug, Clone)]
pub struct StorageConfig {
  pub base_url: String,
  pub token: Option<String>,
}

impl StorageConfig {
  pub fn from_env() -> Result<Self, AppError> {
    Ok(Self {
      base_url: env::var("AVATAR_STORAGE_URL")
        .map_err(|_| AppError::MissingConfig("AVATAR_STORAGE_URL".into()))?,
      token: env::var("AVATAR_STORAGE_TOKEN").ok(),
    })
  }
}

/// Response from the storage service after a successful upload.
#[derive(Debug, Deserialize)]
struct UploadResponse {
  url: String,
}

fn content_type_for(filename: &str) -> &'static str {
  match filename.rsplit('.').next() {
    Some("png") => "image/png",
    Some("jpg") | Some("jpeg") => "image/jpeg",
    Some("gif") => "image/gif",
    Some("webp") => "image/webp",
    _ => "application/octet-stream",
  }
}

/// Upload an avatar image and return its public URL.
pub async fn upload_avatar(
  config: &StorageConfig,
  filename: &str,
  bytes: Vec<u8>,
) -> Result<String, AppError> {
  let base = Url::parse(&config.base_url).map_err(|e| AppError::Storage(e.to_string()))?;
  let endpoint = base
    .join(&format!("avatars/{}", filename))
    .map_err(|e| AppError::Storage(e.to_string()))?;

  let client = Client::new();
  let mut request = client
    .post(endpoint)
    .header("Content-Type", content_type_for(filename))
    .body(bytes);

  if let Some(token) = &config.token {
    request = request.bearer_auth(token);
  }

  let response = request.send().await?;

  if !response.status().is_success() {
    let status = response.status();
    let error_text = response.text().await.unwrap_or_default();
    return Err(AppError::Storage(format!(
      "Upload failed ({}): {}",
      status, error_text
    )));
  }

  let upload: UploadResponse = response.json().await?;
  Ok(upload.url)
}

#[cfg(test)]
mod tests {
  use super::*;
  use serial_test::serial;

  #[test]
  fn test_content_type_inference() {
    assert_eq!(content_type_for("me.png"), "image/png");
    assert_eq!(content_type_for("me.jpeg"), "image/jpeg");
    assert_eq!(content_type_for("me"), "application/octet-stream");
  }

  #[test]
  #[serial]
  fn test_config_requires_url() {
    temp_env::with_vars(
      [
        ("AVATAR_STORAGE_URL", None::<&str>),
        ("AVATAR_STORAGE_TOKEN", None::<&str>),
      ],
      || {
        let err = StorageConfig::from_env().unwrap_err();
        assert!(matches!(err, AppError::MissingConfig(_)));
      },
    );
  }

  #[test]
  #[serial]
  fn test_config_token_is_optional() {
    temp_env::with_vars(
      [
        ("AVATAR_STORAGE_URL", Some("https://storage.example.com/")),
        ("AVATAR_STORAGE_TOKEN", None::<&str>),
      ],
      || {
        let config = StorageConfig::from_env().unwrap();
        assert_eq!(config.base_url, "https://storage.example.com/");
        assert!(config.token.is_none());
      },
    );
  }

  #[tokio::test]
  async fn test_upload_returns_public_url() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
      .mock("POST", "/avatars/me.png")
      .match_header("content-type", "image/png")
      .with_status(200)
      .with_body(r#"{"url":"https://cdn.example.com/avatars/me.png"}"#)
      .create_async()
      .await;

    let config = StorageConfig {
      base_url: format!("{}/", server.url()),
      token: None,
    };

    let url = upload_avatar(&config, "me.png", vec![1, 2, 3]).await.unwrap();
    assert_eq!(url, "https://cdn.example.com/avatars/me.png");
    mock.assert_async().await;
  }

  #[tokio::test]
  async fn test_upload_failure_is_reported() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
      .mock("POST", "/avatars/me.png")
      .with_status(500)
      .with_body("disk full")
      .create_async()
      .await;

    let config = StorageConfig {
      base_url: format!("{}/", server.url()),
      token: None,
    };

    let err = upload_avatar(&config, "me.png", vec![1]).await.unwrap_err();
    match err {
      AppError::Storage(msg) => assert!(msg.contains("disk full")),
      other => panic!("unexpected error: {:?}", other),
    }
  }
}
