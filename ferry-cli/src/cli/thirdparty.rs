//! # Third-Party Command
//!
//! Lists and builds the vendored third-party libraries.

use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use ferry_core::output::{format_name, format_path, print_info, print_success, print_warning};
use ferry_core::{ConfigDirs, FerryConfig, ServiceMessage};
use ferry_thirdparty::{
  BuildOutcome, HttpDownloader, PlatformFamily, Registry, SystemRunner, Target, Toolchain, build_target,
  resolve_build_order,
};
use tracing::{debug, info};

use super::load_config;
use crate::consts::{ENV_ANDROID_NDK_HOME, THIRDPARTY_TARGET_PARAMETER};

/// Arguments for the thirdparty command group
#[derive(Args, Debug)]
pub struct ThirdpartyArgs {
  #[command(subcommand)]
  pub command: ThirdpartyCommand,
}

#[derive(Subcommand, Debug)]
pub enum ThirdpartyCommand {
  /// List the targets a library supports on a platform
  Targets {
    /// Library to inspect
    #[arg(long, default_value = "lua")]
    library: String,

    /// Platform name (win32, darwin, ...) [default: this machine]
    #[arg(long)]
    platform: Option<String>,
  },

  /// Build a library for one target
  #[command(long_about = "Build a library for one target and install it into the project.\n\n\
            Sources are downloaded and patched once per working directory. A target the\n\
            library does not support on the platform is skipped without error.")]
  Build {
    /// Library to build
    #[arg(long, default_value = "lua")]
    library: String,

    /// Target to build (win32, win10, macos, ios, android)
    #[arg(long)]
    target: String,

    /// Platform name (win32, darwin, ...) [default: this machine]
    #[arg(long)]
    platform: Option<String>,

    /// Directory for downloads and intermediate files
    #[arg(long = "working-dir")]
    working_dir: Option<PathBuf>,

    /// Root of the project receiving Libs/ [default: current directory]
    #[arg(long = "project-root")]
    project_root: Option<PathBuf>,

    /// Android NDK root [default: $ANDROID_NDK_HOME]
    #[arg(long = "android-ndk")]
    android_ndk: Option<PathBuf>,
  },
}

/// Handle the thirdparty command group
pub(crate) fn handle_thirdparty_command(args: ThirdpartyArgs) -> Result<()> {
  match args.command {
    ThirdpartyCommand::Targets { library, platform } => handle_targets(&library, platform.as_deref()),
    ThirdpartyCommand::Build {
      library,
      target,
      platform,
      working_dir,
      project_root,
      android_ndk,
    } => {
      let project_root = match project_root {
        Some(path) => path,
        None => env::current_dir().context("Failed to determine the current directory")?,
      };
      let android_ndk = android_ndk.or_else(|| env::var_os(ENV_ANDROID_NDK_HOME).map(PathBuf::from));

      handle_build(
        &library,
        &target,
        platform.as_deref(),
        working_dir,
        &project_root,
        android_ndk,
      )
    }
  }
}

fn platform_family(platform: Option<&str>) -> PlatformFamily {
  platform.map_or_else(PlatformFamily::host, PlatformFamily::from_platform)
}

fn handle_targets(library: &str, platform: Option<&str>) -> Result<()> {
  let registry = Registry::with_defaults();
  let recipe = registry.get(library)?;

  for target in recipe.supported_targets(platform_family(platform)) {
    println!("{target}");
  }
  Ok(())
}

/// Working directory for `library`: an explicit path, then the configured
/// root, then the cache directory
fn working_dir_for(
  library: &str,
  explicit: Option<&Path>,
  config: &FerryConfig,
  dirs: Option<&ConfigDirs>,
) -> Result<PathBuf> {
  if let Some(path) = explicit {
    return Ok(path.to_path_buf());
  }
  if let Some(root) = &config.thirdparty.working_dir {
    return Ok(root.join(library));
  }
  dirs
    .map(|dirs| dirs.thirdparty_dir(library))
    .context("No working directory; pass --working-dir or set thirdparty.working_dir in ferry.toml")
}

fn handle_build(
  library: &str,
  target_name: &str,
  platform: Option<&str>,
  working_dir_override: Option<PathBuf>,
  project_root: &Path,
  android_ndk: Option<PathBuf>,
) -> Result<()> {
  let (dirs, config) = load_config()?;
  let registry = Registry::with_defaults();
  let family = platform_family(platform);

  // Dependencies only exist for targets the name resolves to
  let order = match Target::from_name(target_name) {
    Some(target) => resolve_build_order(&registry, library, target)?,
    None => {
      registry.get(library)?;
      vec![library.to_string()]
    }
  };
  debug!("Build order for {library}: {order:?}");

  let downloader = HttpDownloader::new()?;
  let toolchain = Toolchain {
    downloader: &downloader,
    runner: &SystemRunner,
    android_ndk,
  };

  for name in &order {
    let explicit = (name == library).then_some(working_dir_override.as_deref()).flatten();
    let working_dir = working_dir_for(name, explicit, &config, dirs.as_ref())?;
    std::fs::create_dir_all(&working_dir)
      .with_context(|| format!("Failed to create working directory {}", working_dir.display()))?;

    info!("Building {name} in {}", working_dir.display());
    let recipe = registry.get(name)?;
    let outcome = build_target(recipe, family, target_name, &working_dir, project_root, &toolchain)
      .with_context(|| format!("Failed to build {name} for {target_name}"))?;

    match outcome {
      BuildOutcome::Built { target, artifacts } => {
        print_success(&format!(
          "Built {} for {} ({} files)",
          format_name(name),
          format_name(target.name()),
          artifacts.len()
        ));
        for artifact in &artifacts {
          print_info(&format_path(&artifact.display().to_string()));
        }
        ServiceMessage::set_parameter(THIRDPARTY_TARGET_PARAMETER, target.name()).emit()?;
      }
      BuildOutcome::Skipped { target } => {
        print_warning(&format!(
          "{} does not support {} on {family}, nothing built",
          format_name(name),
          format_name(&target)
        ));
      }
    }
  }

  Ok(())
}

#[cfg(test)]
mod tests {
  use ferry_core::ThirdpartySettings;

  use super::*;

  #[test]
  fn test_platform_family() {
    assert_eq!(platform_family(Some("win32")), PlatformFamily::Windows);
    assert_eq!(platform_family(Some("darwin")), PlatformFamily::Darwin);
    assert_eq!(platform_family(None), PlatformFamily::host());
  }

  #[test]
  fn test_working_dir_precedence() {
    let dirs = ConfigDirs::from_paths("/cfg", "/cache");
    let mut config = FerryConfig::default();

    assert_eq!(
      working_dir_for("lua", None, &config, Some(&dirs)).unwrap(),
      PathBuf::from("/cache/thirdparty/lua")
    );

    config.thirdparty = ThirdpartySettings {
      working_dir: Some(PathBuf::from("/builds")),
    };
    assert_eq!(
      working_dir_for("lua", None, &config, Some(&dirs)).unwrap(),
      PathBuf::from("/builds/lua")
    );

    assert_eq!(
      working_dir_for("lua", Some(Path::new("/explicit")), &config, Some(&dirs)).unwrap(),
      PathBuf::from("/explicit")
    );
  }

  #[test]
  fn test_working_dir_needs_some_source() {
    let result = working_dir_for("lua", None, &FerryConfig::default(), None);
    assert!(result.is_err());
  }
}
