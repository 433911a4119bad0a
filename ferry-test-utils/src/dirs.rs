//! Temporary directory layouts for builds and configuration

use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A temporary working directory and project tree for third-party builds
pub struct BuildDirsGuard {
  pub temp_dir: TempDir,
}

impl Default for BuildDirsGuard {
  fn default() -> Self {
    Self::new()
  }
}

impl BuildDirsGuard {
  pub fn new() -> Self {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    std::fs::create_dir_all(temp_dir.path().join("work")).expect("Failed to create working directory");
    std::fs::create_dir_all(temp_dir.path().join("project")).expect("Failed to create project directory");
    Self { temp_dir }
  }

  /// Directory for downloads and intermediate build files
  pub fn working_dir(&self) -> PathBuf {
    self.temp_dir.path().join("work")
  }

  /// Root of the project that receives the built libraries
  pub fn project_root(&self) -> PathBuf {
    self.temp_dir.path().join("project")
  }
}

/// XDG-style config and cache homes for running the ferry binary in tests
///
/// The paths are meant to be passed to a child process through
/// [`ConfigHomeGuard::envs`]; the current process environment is untouched.
pub struct ConfigHomeGuard {
  pub temp_dir: TempDir,
}

impl Default for ConfigHomeGuard {
  fn default() -> Self {
    Self::new()
  }
}

impl ConfigHomeGuard {
  pub fn new() -> Self {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    std::fs::create_dir_all(temp_dir.path().join("config/ferry")).expect("Failed to create config directory");
    std::fs::create_dir_all(temp_dir.path().join("cache")).expect("Failed to create cache directory");
    Self { temp_dir }
  }

  pub fn root(&self) -> &Path {
    self.temp_dir.path()
  }

  /// Path of `ferry.toml` as the binary resolves it on Linux
  pub fn config_file(&self) -> PathBuf {
    self.temp_dir.path().join("config/ferry/ferry.toml")
  }

  /// Write the ferry configuration file
  pub fn write_config(&self, content: &str) {
    std::fs::write(self.config_file(), content).expect("Failed to write config file");
  }

  /// Environment variables pointing the platform directories at this guard
  pub fn envs(&self) -> Vec<(&'static str, PathBuf)> {
    vec![
      ("XDG_CONFIG_HOME", self.temp_dir.path().join("config")),
      ("XDG_CACHE_HOME", self.temp_dir.path().join("cache")),
      ("HOME", self.temp_dir.path().to_path_buf()),
    ]
  }
}
