//! One-time source patching
//!
//! Patches are applied at most once per working directory. A marker file in
//! the working directory records that the patch step completed.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{Result, ThirdpartyError};

/// Name of the marker file written after a successful patch
pub const PATCH_MARKER: &str = ".ferry_patched";

/// Whether the patch step already ran for `working_dir`
pub fn is_patched(working_dir: &Path) -> bool {
  working_dir.join(PATCH_MARKER).exists()
}

/// Run `patch` unless it already succeeded for `working_dir`.
///
/// Returns `true` when the patch ran. A failing patch leaves no marker, so
/// the next invocation tries again.
pub fn apply_once<F>(working_dir: &Path, patch: F) -> Result<bool>
where
  F: FnOnce() -> Result<()>,
{
  if is_patched(working_dir) {
    debug!("Sources in {} already patched", working_dir.display());
    return Ok(false);
  }

  patch()?;

  let marker = working_dir.join(PATCH_MARKER);
  fs::write(&marker, env!("CARGO_PKG_VERSION")).map_err(ThirdpartyError::io(&marker))?;
  Ok(true)
}
