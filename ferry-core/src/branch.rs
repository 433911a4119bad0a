//! # Branch References
//!
//! Pull request number extraction from the branch names the build server
//! passes to a build step, such as `42` or `pull-requests/42/from`.

use std::fmt;

/// A branch name as handed over by the build server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchRef(String);

impl BranchRef {
  pub fn new(name: impl Into<String>) -> Self {
    Self(name.into())
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }

  /// Pull request number encoded in this branch name, if any.
  pub fn pull_request_number(&self) -> Option<String> {
    resolve_pull_request_number(Some(&self.0))
  }
}

impl fmt::Display for BranchRef {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

impl From<&str> for BranchRef {
  fn from(name: &str) -> Self {
    Self::new(name)
  }
}

/// Extract the pull request number from a branch name.
///
/// A name without `/` is a pull request number only when it is made of ASCII
/// digits. For names with at least one `/` the second-to-last segment is
/// returned as-is: those follow the `<prefix>/<number>/<suffix>` convention
/// and are trusted without validation.
pub fn resolve_pull_request_number(branch: Option<&str>) -> Option<String> {
  let branch = branch?;
  let segments: Vec<&str> = branch.split('/').collect();

  match segments.as_slice() {
    [single] => {
      let is_number = !single.is_empty() && single.bytes().all(|b| b.is_ascii_digit());
      is_number.then(|| (*single).to_string())
    }
    [.., number, _] => Some((*number).to_string()),
    [] => None,
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_missing_branch_has_no_pull_request() {
    assert_eq!(resolve_pull_request_number(None), None);
  }

  #[test]
  fn test_bare_number_is_pull_request() {
    assert_eq!(resolve_pull_request_number(Some("42")), Some("42".to_string()));
    assert_eq!(resolve_pull_request_number(Some("007")), Some("007".to_string()));
  }

  #[test]
  fn test_single_segment_without_digits() {
    assert_eq!(resolve_pull_request_number(Some("feature")), None);
    assert_eq!(resolve_pull_request_number(Some("42a")), None);
    assert_eq!(resolve_pull_request_number(Some("-1")), None);
  }

  #[test]
  fn test_empty_branch() {
    assert_eq!(resolve_pull_request_number(Some("")), None);
  }

  #[test]
  fn test_multi_segment_takes_second_to_last() {
    assert_eq!(
      resolve_pull_request_number(Some("refs/pull-requests/7/from")),
      Some("7".to_string())
    );
    assert_eq!(
      resolve_pull_request_number(Some("pull-requests/15/merge")),
      Some("15".to_string())
    );
  }

  #[test]
  fn test_multi_segment_is_not_validated() {
    assert_eq!(resolve_pull_request_number(Some("a/b")), Some("a".to_string()));
    assert_eq!(
      resolve_pull_request_number(Some("feature/login")),
      Some("feature".to_string())
    );
    assert_eq!(resolve_pull_request_number(Some("/")), Some(String::new()));
    assert_eq!(resolve_pull_request_number(Some("x//")), Some(String::new()));
  }

  #[test]
  fn test_branch_ref_delegates() {
    let branch = BranchRef::from("pull-requests/15/from");
    assert_eq!(branch.pull_request_number(), Some("15".to_string()));
    assert_eq!(branch.to_string(), "pull-requests/15/from");

    let branch = BranchRef::new("develop");
    assert_eq!(branch.pull_request_number(), None);
    assert_eq!(branch.as_str(), "develop");
  }
}
