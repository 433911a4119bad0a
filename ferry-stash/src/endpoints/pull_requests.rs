//! # Stash Pull Request Endpoints

use anyhow::{Context, Result};
use reqwest::StatusCode;
use tracing::instrument;

use crate::client::{StashClient, error_for_response, parse_json};
use crate::models::StashPullRequest;

impl StashClient {
  /// Get a pull request of the configured repository
  #[instrument(skip(self), level = "debug")]
  pub async fn get_pull_request(&self, pull_request_id: &str) -> Result<StashPullRequest> {
    let url = format!("{}/pull-requests/{}", self.repo_url(), pull_request_id);

    let response = self
      .authorized(self.client.get(&url))
      .send()
      .await
      .context("Failed to fetch pull request")?;

    match response.status() {
      StatusCode::OK => parse_json(response, "pull request").await,
      _ => Err(error_for_response(response, || format!("Pull request #{pull_request_id} not found")).await),
    }
  }
}
