//! Copying build results into the project tree

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Result, ThirdpartyError};

/// Copy `from` to `to`, creating parent directories
pub fn copy_file(from: &Path, to: &Path) -> Result<()> {
  if !from.is_file() {
    return Err(ThirdpartyError::MissingArtifact {
      path: from.to_path_buf(),
    });
  }
  if let Some(parent) = to.parent() {
    fs::create_dir_all(parent).map_err(ThirdpartyError::io(parent))?;
  }
  debug!("Copying {} -> {}", from.display(), to.display());
  fs::copy(from, to).map_err(ThirdpartyError::io(to))?;
  Ok(())
}

/// Copy every file in `source_dir` with the given extension into `dest_dir`.
///
/// Only the top level of `source_dir` is considered. Returns the copied
/// destination paths in name order.
pub fn copy_files_with_extension(source_dir: &Path, dest_dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
  let entries = fs::read_dir(source_dir).map_err(ThirdpartyError::io(source_dir))?;

  let mut files = Vec::new();
  for entry in entries {
    let path = entry.map_err(ThirdpartyError::io(source_dir))?.path();
    if path.is_file() && path.extension().is_some_and(|ext| ext == extension) {
      files.push(path);
    }
  }
  files.sort();

  let mut copied = Vec::with_capacity(files.len());
  for file in files {
    if let Some(name) = file.file_name() {
      let destination = dest_dir.join(name);
      copy_file(&file, &destination)?;
      copied.push(destination);
    }
  }
  Ok(copied)
}

#[cfg(test)]
mod tests {
  use ferry_test_utils::BuildDirsGuard;

  use super::*;

  #[test]
  fn test_copy_headers_only() {
    let dirs = BuildDirsGuard::new();
    let src = dirs.working_dir().join("src");
    fs::create_dir_all(&src).unwrap();
    fs::write(src.join("lua.h"), "lua").unwrap();
    fs::write(src.join("lauxlib.h"), "aux").unwrap();
    fs::write(src.join("lapi.c"), "api").unwrap();
    fs::create_dir_all(src.join("nested.h")).unwrap();

    let include = dirs.project_root().join("Libs/lua/include");
    let copied = copy_files_with_extension(&src, &include, "h").unwrap();

    assert_eq!(copied, vec![include.join("lauxlib.h"), include.join("lua.h")]);
    assert_eq!(fs::read_to_string(include.join("lua.h")).unwrap(), "lua");
    assert!(!include.join("lapi.c").exists());
  }

  #[test]
  fn test_copy_missing_file() {
    let dirs = BuildDirsGuard::new();
    let result = copy_file(&dirs.working_dir().join("missing.lib"), &dirs.project_root().join("out.lib"));
    assert!(matches!(result, Err(ThirdpartyError::MissingArtifact { .. })));
  }
}
