//! # Configuration Management
//!
//! Locates ferry's configuration and cache directories and loads the optional
//! `ferry.toml` that supplies defaults for the Stash location and the
//! third-party build directory.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::consts::{CONFIG_FILE_NAME, DEFAULT_STASH_API_VERSION, DEFAULT_STASH_PROJECT, DEFAULT_STASH_REPO_NAME};

/// Represents the directories ferry reads from and writes to
#[derive(Debug, Clone)]
pub struct ConfigDirs {
  pub config_dir: PathBuf,
  pub cache_dir: PathBuf,
}

impl ConfigDirs {
  /// Create a new ConfigDirs instance from the platform's project directories
  pub fn new() -> Result<Self> {
    let proj_dirs = ProjectDirs::from("engine", "dava", "ferry").context("Failed to determine project directories")?;

    Ok(Self {
      config_dir: proj_dirs.config_dir().to_path_buf(),
      cache_dir: proj_dirs.cache_dir().to_path_buf(),
    })
  }

  /// Create a ConfigDirs instance rooted at explicit directories
  pub fn from_paths(config_dir: impl Into<PathBuf>, cache_dir: impl Into<PathBuf>) -> Self {
    Self {
      config_dir: config_dir.into(),
      cache_dir: cache_dir.into(),
    }
  }

  /// Get the path to the configuration file
  pub fn config_path(&self) -> PathBuf {
    self.config_dir.join(CONFIG_FILE_NAME)
  }

  /// Default working directory for building the third-party library `name`
  pub fn thirdparty_dir(&self, name: &str) -> PathBuf {
    self.cache_dir.join("thirdparty").join(name)
  }

  /// Load the configuration file, falling back to defaults when it is absent
  pub fn load_config(&self) -> Result<FerryConfig> {
    let config_path = self.config_path();

    if config_path.exists() {
      debug!("Loading configuration from {}", config_path.display());
      FerryConfig::load_from(&config_path)
    } else {
      Ok(FerryConfig::default())
    }
  }
}

/// Get the configuration directories
pub fn get_config_dirs() -> Result<ConfigDirs> {
  ConfigDirs::new()
}

/// Contents of `ferry.toml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FerryConfig {
  pub stash: StashSettings,
  pub thirdparty: ThirdpartySettings,
}

impl FerryConfig {
  /// Parse configuration from TOML text
  pub fn from_toml_str(content: &str) -> Result<Self> {
    toml::from_str(content).context("Failed to parse ferry configuration")
  }

  /// Read and parse a configuration file
  pub fn load_from(path: &Path) -> Result<Self> {
    let content =
      fs::read_to_string(path).with_context(|| format!("Failed to read configuration from {}", path.display()))?;

    Self::from_toml_str(&content).with_context(|| format!("Invalid configuration in {}", path.display()))
  }
}

/// Location of the repository on the Stash server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StashSettings {
  pub api_version: String,
  pub project: String,
  pub repo_name: String,
}

impl Default for StashSettings {
  fn default() -> Self {
    Self {
      api_version: DEFAULT_STASH_API_VERSION.to_string(),
      project: DEFAULT_STASH_PROJECT.to_string(),
      repo_name: DEFAULT_STASH_REPO_NAME.to_string(),
    }
  }
}

/// Third-party build settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThirdpartySettings {
  /// Directory used for downloads and intermediate build files
  pub working_dir: Option<PathBuf>,
}
