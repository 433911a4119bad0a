use serde::Deserialize;

/// Represents TeamCity authentication credentials
#[derive(Clone)]
pub struct TeamCityAuth {
  pub username: String,
  pub password: String,
}

/// Represents a TeamCity build
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamCityBuild {
  pub id: u64,
  pub build_type_id: Option<String>,
  pub number: Option<String>,
  /// `SUCCESS`, `FAILURE` or `UNKNOWN`
  pub status: Option<String>,
  /// `queued`, `running` or `finished`
  pub state: Option<String>,
  pub web_url: String,
}
