use ferry_core::BuildState;
use serde::{Deserialize, Serialize};

/// Represents Stash authentication credentials
#[derive(Clone)]
pub struct StashAuth {
  pub username: String,
  pub password: String,
}

/// Represents a Stash pull request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StashPullRequest {
  pub id: u64,
  pub title: Option<String>,
  pub state: Option<String>,
  pub from_ref: StashRef,
  pub to_ref: Option<StashRef>,
}

/// Represents one side of a pull request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StashRef {
  pub id: String,
  pub display_id: Option<String>,
  pub latest_commit: Option<String>,
}

/// Request body of the build-status API
#[derive(Debug, Serialize)]
pub struct BuildStatusPayload<'a> {
  pub state: BuildState,
  pub key: &'a str,
  pub name: &'a str,
  pub url: &'a str,
  pub description: &'a str,
}

/// Error document returned by Stash for failed requests
#[derive(Debug, Deserialize)]
pub(crate) struct StashErrorResponse {
  pub errors: Vec<StashErrorMessage>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct StashErrorMessage {
  pub message: String,
}
