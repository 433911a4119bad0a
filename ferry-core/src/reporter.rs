//! # Build Status Reporting
//!
//! Resolves which commit and which build URL a status report refers to and
//! hands the finished report to the source-hosting server.
//!
//! The flow is linear: commit resolution, build URL resolution, reporting.
//! When no commit can be determined the report is skipped; that is an
//! expected outcome for builds that are neither pull requests nor pinned to
//! a commit.

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::branch::resolve_pull_request_number;
use crate::build_state::BuildState;
use crate::consts::MISSING_VALUE;

/// Source-hosting operations needed to report a build status.
#[allow(async_fn_in_trait)]
pub trait SourceHost {
  /// Latest commit on the source side of pull request `number`.
  ///
  /// `Ok(None)` means the pull request exists but carries no commit.
  async fn pull_request_latest_commit(&self, number: &str) -> Result<Option<String>>;

  /// Attach a build status to a commit.
  async fn report_build_status(&self, report: &BuildStatusReport) -> Result<()>;
}

/// Build-server operations needed to report a build status.
#[allow(async_fn_in_trait)]
pub trait BuildServer {
  /// Web URL of build `build_id`.
  async fn build_web_url(&self, build_id: &str) -> Result<String>;
}

/// Everything the caller knows before the report is resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRequest {
  pub branch: Option<String>,
  pub commit: Option<String>,
  pub state: BuildState,
  /// Key identifying the status on the commit.
  pub key: String,
  /// Display name of the status.
  pub name: String,
  pub build_url: Option<String>,
  /// Upstream build whose web URL replaces `build_url`.
  pub root_build_id: Option<String>,
  pub description: String,
}

/// A fully resolved status report, sent once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildStatusReport {
  pub state: BuildState,
  pub key: String,
  pub name: String,
  pub build_url: String,
  pub commit: String,
  pub description: String,
}

/// Result of a reporting run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportOutcome {
  /// The report was delivered to the source-hosting server.
  Reported(BuildStatusReport),
  /// Neither a pull request nor a commit was available, nothing was sent.
  Skipped {
    branch: Option<String>,
    commit: Option<String>,
  },
}

impl ReportOutcome {
  /// Diagnostic line for a skipped report.
  pub fn skip_message(&self) -> Option<String> {
    match self {
      Self::Reported(_) => None,
      Self::Skipped { branch, commit } => Some(format!(
        "Is not a pull requests [{}] or commit [{}]  ",
        branch.as_deref().unwrap_or(MISSING_VALUE),
        commit.as_deref().unwrap_or(MISSING_VALUE)
      )),
    }
  }
}

/// Resolve and deliver a single build status report.
///
/// A commit derived from the branch's pull request takes precedence over
/// `request.commit`, and the web URL of `request.root_build_id` takes
/// precedence over `request.build_url`. Collaborator failures are returned
/// as-is; nothing is retried.
///
/// # Panics
///
/// Panics when a commit was resolved but no build URL is available. A status
/// without a link back to its build is never sent.
#[allow(clippy::panic_in_result_fn)]
pub async fn report_build_status<S, B>(source: &S, build_server: &B, request: ReportRequest) -> Result<ReportOutcome>
where
  S: SourceHost,
  B: BuildServer,
{
  let pull_request = resolve_pull_request_number(request.branch.as_deref());

  let mut commit = None;
  if let Some(number) = &pull_request {
    debug!(pull_request = %number, "Resolving commit from pull request");
    commit = source
      .pull_request_latest_commit(number)
      .await
      .with_context(|| format!("Failed to fetch pull request {number}"))?;
  }

  let Some(commit) = commit.or_else(|| request.commit.clone()) else {
    info!(branch = ?request.branch, "No pull request or commit to report against");
    return Ok(ReportOutcome::Skipped {
      branch: request.branch,
      commit: request.commit,
    });
  };

  let build_url = match request.root_build_id.as_deref() {
    Some(build_id) if !build_id.is_empty() => {
      debug!(root_build_id = %build_id, "Resolving build URL from root build");
      let url = build_server
        .build_web_url(build_id)
        .await
        .with_context(|| format!("Failed to fetch build {build_id}"))?;
      Some(url)
    }
    _ => request.build_url,
  };

  let Some(build_url) = build_url else {
    panic!("build_url == None");
  };

  let report = BuildStatusReport {
    state: request.state,
    key: request.key,
    name: request.name,
    build_url,
    commit,
    description: request.description,
  };

  info!(commit = %report.commit, state = %report.state, "Reporting build status");
  source.report_build_status(&report).await?;

  Ok(ReportOutcome::Reported(report))
}
