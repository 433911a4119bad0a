use anyhow::{Context, Result};
use ferry_core::url::normalize_base_url;
use reqwest::Client;

use crate::models::TeamCityAuth;

/// User-Agent header value for the TeamCity API client
pub(crate) const USER_AGENT: &str = concat!("ferry/", env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Represents a TeamCity API client
pub struct TeamCityClient {
  pub(crate) client: Client,
  pub(crate) base_url: String,
  pub(crate) auth: TeamCityAuth,
}

impl TeamCityClient {
  /// Create a new TeamCity client
  pub fn new(base_url: &str, auth: TeamCityAuth) -> Self {
    let client = Client::new();
    Self {
      client,
      base_url: base_url.trim_end_matches('/').to_string(),
      auth,
    }
  }
}

/// Create a TeamCity client from credentials
pub fn create_teamcity_client(base_url: &str, username: &str, password: &str) -> Result<TeamCityClient> {
  let base_url = normalize_base_url(base_url).context("Invalid TeamCity URL")?;
  let auth = TeamCityAuth {
    username: username.to_string(),
    password: password.to_string(),
  };

  Ok(TeamCityClient::new(&base_url, auth))
}
