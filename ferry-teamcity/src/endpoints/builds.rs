//! # TeamCity Build Endpoints
//!
//! Build lookups by id, and the [`BuildServer`] implementation built on them.

use anyhow::{Context, Result, anyhow};
use ferry_core::BuildServer;
use reqwest::StatusCode;
use tracing::instrument;

use crate::client::{TeamCityClient, USER_AGENT};
use crate::models::TeamCityBuild;

impl TeamCityClient {
  /// Get the status of a build by its internal id
  #[instrument(skip(self), level = "debug")]
  pub async fn get_build_status(&self, build_id: &str) -> Result<TeamCityBuild> {
    let url = format!("{}/httpAuth/app/rest/builds/id:{}", self.base_url, build_id);

    let response = self
      .client
      .get(&url)
      .header("Accept", "application/json")
      .header("User-Agent", USER_AGENT)
      .basic_auth(&self.auth.username, Some(&self.auth.password))
      .send()
      .await
      .context("Failed to fetch build status")?;

    match response.status() {
      StatusCode::OK => {
        let build = response
          .json::<TeamCityBuild>()
          .await
          .context("Failed to parse TeamCity build")?;
        Ok(build)
      }
      StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(anyhow!(
        "Authentication failed. Please check your TeamCity credentials."
      )),
      StatusCode::NOT_FOUND => Err(anyhow!("Build {} not found", build_id)),
      _ => Err(anyhow!(
        "Unexpected error: HTTP {} - {}",
        response.status(),
        response.text().await.unwrap_or_default()
      )),
    }
  }
}

impl BuildServer for TeamCityClient {
  async fn build_web_url(&self, build_id: &str) -> Result<String> {
    Ok(self.get_build_status(build_id).await?.web_url)
  }
}

#[cfg(test)]
mod tests {
  use ferry_core::BuildServer;
  use wiremock::matchers::{basic_auth, header, method, path};
  use wiremock::{Mock, MockServer, ResponseTemplate};

  use crate::client::TeamCityClient;
  use crate::models::TeamCityAuth;

  fn client_for(server: &MockServer) -> TeamCityClient {
    let auth = TeamCityAuth {
      username: "builder".to_string(),
      password: "secret".to_string(),
    };
    TeamCityClient::new(&server.uri(), auth)
  }

  #[tokio::test]
  async fn test_get_build_status() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let client = client_for(&mock_server);

    Mock::given(method("GET"))
      .and(path("/httpAuth/app/rest/builds/id:100"))
      .and(header("Accept", "application/json"))
      .and(basic_auth("builder", "secret"))
      .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
          "id": 100,
          "buildTypeId": "DavaFramework_Trunk_Win",
          "number": "512",
          "status": "SUCCESS",
          "state": "running",
          "webUrl": "http://ci/100"
      })))
      .expect(1)
      .mount(&mock_server)
      .await;

    let build = client.get_build_status("100").await?;
    assert_eq!(build.id, 100);
    assert_eq!(build.state.as_deref(), Some("running"));
    assert_eq!(build.web_url, "http://ci/100");

    Ok(())
  }

  #[tokio::test]
  async fn test_build_web_url() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let client = client_for(&mock_server);

    Mock::given(method("GET"))
      .and(path("/httpAuth/app/rest/builds/id:100"))
      .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
          "id": 100,
          "webUrl": "http://ci/100"
      })))
      .mount(&mock_server)
      .await;

    assert_eq!(client.build_web_url("100").await?, "http://ci/100");

    Ok(())
  }

  #[tokio::test]
  async fn test_get_build_status_not_found() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let client = client_for(&mock_server);

    Mock::given(method("GET"))
      .and(path("/httpAuth/app/rest/builds/id:9999"))
      .respond_with(ResponseTemplate::new(404).set_body_string("No build found by locator 'id:9999'."))
      .mount(&mock_server)
      .await;

    let result = client.get_build_status("9999").await;
    assert!(result.unwrap_err().to_string().contains("not found"));

    Ok(())
  }

  #[tokio::test]
  async fn test_get_build_status_forbidden() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let client = client_for(&mock_server);

    Mock::given(method("GET"))
      .and(path("/httpAuth/app/rest/builds/id:100"))
      .respond_with(ResponseTemplate::new(403))
      .mount(&mock_server)
      .await;

    let result = client.get_build_status("100").await;
    assert!(result.unwrap_err().to_string().contains("Authentication failed"));

    Ok(())
  }
}
