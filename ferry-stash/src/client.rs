//! # Stash HTTP Client
//!
//! HTTP client for one Stash repository, holding the server location, the
//! repository coordinates and the credentials used for every request.

use anyhow::{Context, Result, anyhow};
use ferry_core::StashSettings;
use ferry_core::url::normalize_base_url;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::consts::{ACCEPT, USER_AGENT};
use crate::models::{StashAuth, StashErrorResponse};

/// Represents a Stash API client bound to a single repository
pub struct StashClient {
  pub(crate) client: Client,
  pub(crate) base_url: String,
  pub(crate) api_version: String,
  pub(crate) project: String,
  pub(crate) repo: String,
  pub(crate) auth: StashAuth,
}

impl StashClient {
  /// Create a new Stash client
  pub fn new(base_url: &str, settings: &StashSettings, auth: StashAuth) -> Self {
    Self {
      client: Client::new(),
      base_url: base_url.trim_end_matches('/').to_string(),
      api_version: settings.api_version.clone(),
      project: settings.project.clone(),
      repo: settings.repo_name.clone(),
      auth,
    }
  }

  /// Base URL of the repository resource
  pub(crate) fn repo_url(&self) -> String {
    format!(
      "{}/rest/api/{}/projects/{}/repos/{}",
      self.base_url, self.api_version, self.project, self.repo
    )
  }

  /// Apply headers and credentials shared by all requests
  pub(crate) fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
    request
      .header("Accept", ACCEPT)
      .header("User-Agent", USER_AGENT)
      .basic_auth(&self.auth.username, Some(&self.auth.password))
  }
}

/// Create a Stash client from credentials
pub fn create_stash_client(
  base_url: &str,
  settings: &StashSettings,
  username: &str,
  password: &str,
) -> Result<StashClient> {
  let base_url = normalize_base_url(base_url).context("Invalid Stash URL")?;
  let auth = StashAuth {
    username: username.to_string(),
    password: password.to_string(),
  };

  Ok(StashClient::new(&base_url, settings, auth))
}

/// Parse a JSON body, surfacing Stash's own error message when the body is an
/// error document instead of the expected resource.
pub(crate) async fn parse_json<T: DeserializeOwned>(response: Response, what: &str) -> Result<T> {
  let body = response.text().await.context("Failed to read response body")?;

  match serde_json::from_str::<T>(&body) {
    Ok(value) => Ok(value),
    Err(e) => {
      if let Some(message) = stash_error_message(&body) {
        return Err(anyhow!("Failed to parse {what}: Stash API error: {message}"));
      }
      Err(anyhow!("Failed to parse {what}: {e}"))
    }
  }
}

/// Map a non-success response to an error
pub(crate) async fn error_for_response(response: Response, not_found: impl FnOnce() -> String) -> anyhow::Error {
  let status = response.status();
  match status {
    StatusCode::NOT_FOUND => anyhow!(not_found()),
    StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
      anyhow!("Authentication failed. Please check your Stash credentials.")
    }
    _ => {
      let body = response.text().await.unwrap_or_default();
      let detail = stash_error_message(&body).unwrap_or(body);
      anyhow!("Unexpected error: HTTP {status} - {detail}")
    }
  }
}

fn stash_error_message(body: &str) -> Option<String> {
  let errors = serde_json::from_str::<StashErrorResponse>(body).ok()?;
  errors.errors.into_iter().next().map(|e| e.message)
}

#[cfg(test)]
mod tests {
  use super::*;

  fn settings() -> StashSettings {
    StashSettings {
      api_version: "1.0".to_string(),
      project: "DF".to_string(),
      repo_name: "dava.framework".to_string(),
    }
  }

  #[test]
  fn test_stash_client_creation() -> Result<()> {
    let client = create_stash_client("stash.example.com/", &settings(), "builder", "secret")?;

    assert_eq!(client.base_url, "https://stash.example.com");
    assert_eq!(client.auth.username, "builder");
    assert_eq!(client.auth.password, "secret");
    assert_eq!(
      client.repo_url(),
      "https://stash.example.com/rest/api/1.0/projects/DF/repos/dava.framework"
    );

    Ok(())
  }

  #[test]
  fn test_stash_client_rejects_empty_url() {
    assert!(create_stash_client("", &settings(), "builder", "secret").is_err());
  }

  #[test]
  fn test_stash_error_message() {
    let body = r#"{"errors":[{"context":null,"message":"Pull request 7 does not exist.","exceptionName":null}]}"#;
    assert_eq!(
      stash_error_message(body).as_deref(),
      Some("Pull request 7 does not exist.")
    );
    assert_eq!(stash_error_message("not json"), None);
    assert_eq!(stash_error_message(r#"{"errors":[]}"#), None);
  }
}
