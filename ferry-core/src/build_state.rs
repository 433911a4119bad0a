//! Build states understood by the Stash build-status API.

use std::fmt;

use serde::{Deserialize, Serialize};

/// State of a build as reported against a commit.
#[derive(clap::ValueEnum, Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum BuildState {
  /// The build is still running
  #[value(name = "INPROGRESS")]
  InProgress,
  /// The build finished successfully
  #[value(name = "SUCCESSFUL")]
  Successful,
  /// The build failed
  #[value(name = "FAILED")]
  Failed,
}

impl BuildState {
  /// Wire name of the state.
  pub const fn as_str(self) -> &'static str {
    match self {
      Self::InProgress => "INPROGRESS",
      Self::Successful => "SUCCESSFUL",
      Self::Failed => "FAILED",
    }
  }
}

impl fmt::Display for BuildState {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}
