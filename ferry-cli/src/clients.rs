//! # Client Creation
//!
//! Builds the Stash and TeamCity clients for a reporting run, together with
//! the runtime that drives them.

use anyhow::{Context, Result};
use ferry_core::StashSettings;
use ferry_stash::{StashClient, create_stash_client};
use ferry_teamcity::{TeamCityClient, create_teamcity_client};
use tokio::runtime::Runtime;

/// Server locations and the shared credentials for a reporting run
#[derive(Debug, Clone)]
pub struct ServerSettings<'a> {
  pub teamcity_url: &'a str,
  pub stash_url: &'a str,
  pub stash: &'a StashSettings,
  pub login: &'a str,
  pub password: &'a str,
}

/// Both collaborators of a status report
pub struct ReportClients {
  pub stash: StashClient,
  pub teamcity: TeamCityClient,
}

/// Creates a tokio runtime and the clients for both servers
///
/// The same login is used for Stash and TeamCity.
pub fn create_report_runtime_and_clients(settings: &ServerSettings<'_>) -> Result<(Runtime, ReportClients)> {
  let rt = Runtime::new().context("Failed to create async runtime")?;

  let stash = create_stash_client(settings.stash_url, settings.stash, settings.login, settings.password)
    .context("Failed to create Stash client")?;
  let teamcity = create_teamcity_client(settings.teamcity_url, settings.login, settings.password)
    .context("Failed to create TeamCity client")?;

  Ok((rt, ReportClients { stash, teamcity }))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_invalid_stash_url_is_rejected() {
    let stash = StashSettings::default();
    let settings = ServerSettings {
      teamcity_url: "https://teamcity.example.com",
      stash_url: "   ",
      stash: &stash,
      login: "agent",
      password: "secret",
    };

    let err = create_report_runtime_and_clients(&settings).err().unwrap();
    assert_eq!(err.to_string(), "Failed to create Stash client");
  }

  #[test]
  fn test_clients_are_created() {
    let stash = StashSettings::default();
    let settings = ServerSettings {
      teamcity_url: "teamcity.example.com",
      stash_url: "https://stash.example.com/",
      stash: &stash,
      login: "agent",
      password: "secret",
    };

    assert!(create_report_runtime_and_clients(&settings).is_ok());
  }
}
