//! # Stash Build Status Endpoints

use anyhow::{Context, Result};
use ferry_core::BuildState;
use tracing::{debug, instrument};

use crate::client::{StashClient, error_for_response};
use crate::consts::BUILD_STATUS_API_VERSION;
use crate::models::BuildStatusPayload;

impl StashClient {
  /// Attach a build status to a commit
  ///
  /// `key` identifies the status on the commit, so posting again with the
  /// same key replaces the previous state; `name` is what Stash displays.
  #[allow(clippy::too_many_arguments)]
  #[instrument(skip(self, url, description), level = "debug")]
  pub async fn report_build_status(
    &self,
    state: BuildState,
    key: &str,
    name: &str,
    url: &str,
    commit: &str,
    description: &str,
  ) -> Result<()> {
    let endpoint = format!(
      "{}/rest/build-status/{}/commits/{}",
      self.base_url, BUILD_STATUS_API_VERSION, commit
    );
    let payload = BuildStatusPayload {
      state,
      key,
      name,
      url,
      description,
    };

    let response = self
      .authorized(self.client.post(&endpoint))
      .json(&payload)
      .send()
      .await
      .context("Failed to report build status")?;

    if response.status().is_success() {
      debug!("Stash accepted build status with HTTP {}", response.status());
      return Ok(());
    }

    Err(error_for_response(response, || format!("Commit {commit} not found")).await)
  }
}

#[cfg(test)]
mod tests {
  use ferry_core::{BuildState, StashSettings};
  use wiremock::matchers::{basic_auth, body_json, method, path};
  use wiremock::{Mock, MockServer, ResponseTemplate};

  use crate::client::StashClient;
  use crate::models::StashAuth;

  fn client_for(server: &MockServer) -> StashClient {
    let auth = StashAuth {
      username: "builder".to_string(),
      password: "secret".to_string(),
    };
    StashClient::new(&server.uri(), &StashSettings::default(), auth)
  }

  #[tokio::test]
  async fn test_report_build_status() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let client = client_for(&mock_server);

    Mock::given(method("POST"))
      .and(path("/rest/build-status/1.0/commits/deadbeef"))
      .and(basic_auth("builder", "secret"))
      .and(body_json(serde_json::json!({
          "state": "SUCCESSFUL",
          "key": "unit_tests",
          "name": "unit_tests",
          "url": "http://ci/viewLog.html?buildId=100",
          "description": "auto"
      })))
      .respond_with(ResponseTemplate::new(204))
      .expect(1)
      .mount(&mock_server)
      .await;

    client
      .report_build_status(
        BuildState::Successful,
        "unit_tests",
        "unit_tests",
        "http://ci/viewLog.html?buildId=100",
        "deadbeef",
        "auto",
      )
      .await?;

    Ok(())
  }

  #[tokio::test]
  async fn test_report_build_status_server_error() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let client = client_for(&mock_server);

    Mock::given(method("POST"))
      .and(path("/rest/build-status/1.0/commits/deadbeef"))
      .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
          "errors": [{ "message": "The build status url must be a valid URL." }]
      })))
      .mount(&mock_server)
      .await;

    let error = client
      .report_build_status(BuildState::Failed, "k", "n", "not a url", "deadbeef", "auto")
      .await
      .unwrap_err()
      .to_string();

    assert!(error.contains("HTTP 400"));
    assert!(error.contains("must be a valid URL"));

    Ok(())
  }
}
