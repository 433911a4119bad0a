//! # Report Status Command
//!
//! Reports a TeamCity build status to Stash. Flag names match the ones the
//! existing TeamCity build configurations already pass.

use anyhow::Result;
use clap::Args;
use ferry_core::consts::DEFAULT_DESCRIPTION;
use ferry_core::{
  BuildState, MessageStatus, ReportOutcome, ReportRequest, ServiceMessage, StashSettings, flush_print,
  report_build_status,
};
use tracing::info;

use super::load_config;
use crate::clients::{ServerSettings, create_report_runtime_and_clients};
use crate::consts::REPORTED_COMMIT_PARAMETER;

/// Arguments for the report-status command
#[derive(Args, Debug, Clone)]
pub struct ReportArgs {
  /// TeamCity server URL
  #[arg(long = "teamcity_url", required = true)]
  pub teamcity_url: String,

  /// Stash server URL
  #[arg(long = "stash_url", required = true)]
  pub stash_url: String,

  /// Stash REST API version [default: 1.0]
  #[arg(long = "stash_api_version")]
  pub stash_api_version: Option<String>,

  /// Stash project key [default: DF]
  #[arg(long = "stash_project")]
  pub stash_project: Option<String>,

  /// Stash repository slug [default: dava.framework]
  #[arg(long = "stesh_repo_name")]
  pub stash_repo_name: Option<String>,

  /// Login for both TeamCity and Stash
  #[arg(long, required = true)]
  pub login: String,

  /// Password for both TeamCity and Stash
  #[arg(long, required = true)]
  pub password: String,

  /// Branch being built; a pull request branch takes precedence over --commit
  #[arg(long = "brunch")]
  pub branch: Option<String>,

  /// Commit being built
  #[arg(long)]
  pub commit: Option<String>,

  /// Build status to report
  #[arg(long, value_enum, required = true)]
  pub status: BuildState,

  /// TeamCity build configuration id, used as the status key and name
  #[arg(long = "configuration_id", required = true)]
  pub configuration_id: String,

  /// Build URL linked from the status
  #[arg(long = "build_url")]
  pub build_url: Option<String>,

  /// Upstream build whose web URL is linked instead of --build_url
  #[arg(long = "root_build_id")]
  pub root_build_id: Option<String>,

  /// Status description
  #[arg(long, default_value = DEFAULT_DESCRIPTION)]
  pub description: String,
}

impl ReportArgs {
  /// Stash location from the flags, falling back to `defaults` per field
  fn stash_settings(&self, defaults: StashSettings) -> StashSettings {
    StashSettings {
      api_version: self.stash_api_version.clone().unwrap_or(defaults.api_version),
      project: self.stash_project.clone().unwrap_or(defaults.project),
      repo_name: self.stash_repo_name.clone().unwrap_or(defaults.repo_name),
    }
  }

  fn report_request(&self) -> ReportRequest {
    ReportRequest {
      branch: self.branch.clone(),
      commit: self.commit.clone(),
      state: self.status,
      key: self.configuration_id.clone(),
      name: self.configuration_id.clone(),
      build_url: self.build_url.clone(),
      root_build_id: self.root_build_id.clone(),
      description: self.description.clone(),
    }
  }
}

/// Handle the report-status command
pub(crate) fn handle_report_command(args: ReportArgs) -> Result<()> {
  let (_, config) = load_config()?;
  let stash = args.stash_settings(config.stash);

  let settings = ServerSettings {
    teamcity_url: &args.teamcity_url,
    stash_url: &args.stash_url,
    stash: &stash,
    login: &args.login,
    password: &args.password,
  };
  let (rt, clients) = create_report_runtime_and_clients(&settings)?;

  let outcome = rt.block_on(report_build_status(
    &clients.stash,
    &clients.teamcity,
    args.report_request(),
  ))?;

  match &outcome {
    ReportOutcome::Reported(report) => {
      info!(commit = %report.commit, state = %report.state, "Build status reported");
      ServiceMessage::message(
        format!("Reported {} for {} on commit {}", report.state, report.key, report.commit),
        MessageStatus::Normal,
      )
      .emit()?;
      ServiceMessage::set_parameter(REPORTED_COMMIT_PARAMETER, report.commit.as_str()).emit()?;
    }
    ReportOutcome::Skipped { .. } => {
      if let Some(message) = outcome.skip_message() {
        flush_print(&message)?;
      }
    }
  }

  Ok(())
}

#[cfg(test)]
mod tests {
  use clap::Parser;

  use super::*;

  #[derive(Parser)]
  struct TestCli {
    #[command(flatten)]
    args: ReportArgs,
  }

  fn parse(extra: &[&str]) -> ReportArgs {
    let mut argv = vec![
      "ferry",
      "--teamcity_url",
      "https://teamcity.example.com",
      "--stash_url",
      "https://stash.example.com",
      "--login",
      "agent",
      "--password",
      "secret",
      "--status",
      "INPROGRESS",
      "--configuration_id",
      "Engine_Win",
    ];
    argv.extend_from_slice(extra);
    TestCli::try_parse_from(argv).unwrap().args
  }

  #[test]
  fn test_defaults() {
    let args = parse(&[]);

    assert_eq!(args.status, BuildState::InProgress);
    assert_eq!(args.description, "auto");
    assert_eq!(args.branch, None);
    assert_eq!(args.stash_settings(StashSettings::default()), StashSettings::default());
  }

  #[test]
  fn test_flags_override_config() {
    let args = parse(&["--stash_project", "ENG", "--stesh_repo_name", "engine"]);
    let from_config = StashSettings {
      api_version: "2.0".to_string(),
      project: "CFG".to_string(),
      repo_name: "cfg".to_string(),
    };

    let settings = args.stash_settings(from_config);

    assert_eq!(settings.api_version, "2.0");
    assert_eq!(settings.project, "ENG");
    assert_eq!(settings.repo_name, "engine");
  }

  #[test]
  fn test_configuration_id_is_key_and_name() {
    let args = parse(&["--brunch", "pull-requests/15/from", "--build_url", "https://ci/1"]);
    let request = args.report_request();

    assert_eq!(request.key, "Engine_Win");
    assert_eq!(request.name, "Engine_Win");
    assert_eq!(request.branch.as_deref(), Some("pull-requests/15/from"));
    assert_eq!(request.build_url.as_deref(), Some("https://ci/1"));
  }

  #[test]
  fn test_status_must_be_known() {
    let result = TestCli::try_parse_from([
      "ferry",
      "--teamcity_url",
      "t",
      "--stash_url",
      "s",
      "--login",
      "l",
      "--password",
      "p",
      "--status",
      "BROKEN",
      "--configuration_id",
      "c",
    ]);
    assert!(result.is_err());
  }

  #[test]
  fn test_required_flags() {
    assert!(TestCli::try_parse_from(["ferry", "--teamcity_url", "t"]).is_err());
  }
}
