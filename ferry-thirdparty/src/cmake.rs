//! # CMake Builds
//!
//! A [`BuildPlan`] is a deterministic list of CMake configure and build
//! steps together with the artifacts each step produces. Plans are turned
//! into [`Invocation`]s and handed to a [`CommandRunner`], which keeps the
//! external toolchain out of the way in tests.

use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{info, instrument};

use crate::error::{Result, ThirdpartyError};
use crate::install::copy_file;

/// Build configuration passed to multi-config generators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Configuration {
  Debug,
  Release,
}

impl Configuration {
  pub const fn as_str(self) -> &'static str {
    match self {
      Self::Debug => "Debug",
      Self::Release => "Release",
    }
  }
}

impl fmt::Display for Configuration {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// A single external command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
  pub program: String,
  pub args: Vec<String>,
}

impl Invocation {
  pub fn new(program: impl Into<String>) -> Self {
    Self {
      program: program.into(),
      args: Vec::new(),
    }
  }

  pub fn arg(mut self, arg: impl Into<String>) -> Self {
    self.args.push(arg.into());
    self
  }

  pub fn args<I, S>(mut self, args: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.args.extend(args.into_iter().map(Into::into));
    self
  }
}

impl fmt::Display for Invocation {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.program)?;
    for arg in &self.args {
      write!(f, " {arg}")?;
    }
    Ok(())
  }
}

/// Runs external commands to completion
pub trait CommandRunner {
  fn run(&self, invocation: &Invocation) -> Result<()>;
}

/// Runs commands as child processes, inheriting stdio
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
  fn run(&self, invocation: &Invocation) -> Result<()> {
    info!("Running {invocation}");
    let status = Command::new(&invocation.program)
      .args(&invocation.args)
      .status()
      .map_err(|source| ThirdpartyError::Spawn {
        program: invocation.program.clone(),
        source,
      })?;

    if status.success() {
      Ok(())
    } else {
      Err(ThirdpartyError::CommandFailed {
        program: invocation.program.clone(),
        args: invocation.args.join(" "),
        status: status.to_string(),
      })
    }
  }
}

/// A library produced by a build and where it ends up in the project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
  /// Relative to the build directory
  pub built: PathBuf,
  /// Relative to the project root
  pub destination: PathBuf,
}

impl Artifact {
  pub fn new(built: impl Into<PathBuf>, destination: impl Into<PathBuf>) -> Self {
    Self {
      built: built.into(),
      destination: destination.into(),
    }
  }
}

/// One CMake build directory: configure once, build each configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CmakeBuild {
  /// Relative to the generated-files directory
  pub build_dir: String,
  pub configure_args: Vec<String>,
  /// Empty for single-config generators
  pub configurations: Vec<Configuration>,
  pub outputs: Vec<Artifact>,
}

impl CmakeBuild {
  pub fn new(build_dir: impl Into<String>) -> Self {
    Self {
      build_dir: build_dir.into(),
      configure_args: Vec::new(),
      configurations: Vec::new(),
      outputs: Vec::new(),
    }
  }

  pub fn configure_arg(mut self, arg: impl Into<String>) -> Self {
    self.configure_args.push(arg.into());
    self
  }

  pub fn configuration(mut self, configuration: Configuration) -> Self {
    self.configurations.push(configuration);
    self
  }

  pub fn output(mut self, built: impl Into<PathBuf>, destination: impl Into<PathBuf>) -> Self {
    self.outputs.push(Artifact::new(built, destination));
    self
  }
}

/// Ordered CMake builds for one target
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildPlan {
  pub builds: Vec<CmakeBuild>,
}

impl BuildPlan {
  pub fn new(builds: Vec<CmakeBuild>) -> Self {
    Self { builds }
  }

  /// The commands this plan runs, in order
  pub fn invocations(&self, source_dir: &Path, gen_dir: &Path) -> Vec<Invocation> {
    let mut invocations = Vec::new();
    for build in &self.builds {
      let build_dir = gen_dir.join(&build.build_dir);
      let build_dir = build_dir.display().to_string();

      invocations.push(
        Invocation::new("cmake")
          .args(build.configure_args.iter().cloned())
          .arg("-S")
          .arg(source_dir.display().to_string())
          .arg("-B")
          .arg(build_dir.clone()),
      );

      if build.configurations.is_empty() {
        invocations.push(Invocation::new("cmake").arg("--build").arg(build_dir.clone()));
      } else {
        for configuration in &build.configurations {
          invocations.push(
            Invocation::new("cmake")
              .arg("--build")
              .arg(build_dir.clone())
              .arg("--config")
              .arg(configuration.as_str()),
          );
        }
      }
    }
    invocations
  }

  /// Run every build and copy its outputs under `project_root`.
  ///
  /// Returns the installed paths in plan order.
  #[instrument(level = "debug", skip(self, runner))]
  pub fn execute(
    &self,
    runner: &dyn CommandRunner,
    source_dir: &Path,
    gen_dir: &Path,
    project_root: &Path,
  ) -> Result<Vec<PathBuf>> {
    for invocation in self.invocations(source_dir, gen_dir) {
      runner.run(&invocation)?;
    }

    let mut installed = Vec::new();
    for build in &self.builds {
      let build_dir = gen_dir.join(&build.build_dir);
      for artifact in &build.outputs {
        let destination = project_root.join(&artifact.destination);
        copy_file(&build_dir.join(&artifact.built), &destination)?;
        installed.push(destination);
      }
    }
    Ok(installed)
  }
}

#[cfg(test)]
mod tests {
  use std::cell::RefCell;
  use std::fs;

  use ferry_test_utils::BuildDirsGuard;

  use super::*;

  #[derive(Default)]
  struct RecordingRunner {
    invocations: RefCell<Vec<Invocation>>,
    creates: Vec<PathBuf>,
  }

  impl CommandRunner for RecordingRunner {
    fn run(&self, invocation: &Invocation) -> Result<()> {
      self.invocations.borrow_mut().push(invocation.clone());
      for path in &self.creates {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "built").unwrap();
      }
      Ok(())
    }
  }

  struct FailingRunner;

  impl CommandRunner for FailingRunner {
    fn run(&self, invocation: &Invocation) -> Result<()> {
      Err(ThirdpartyError::CommandFailed {
        program: invocation.program.clone(),
        args: invocation.args.join(" "),
        status: "exit status: 1".to_string(),
      })
    }
  }

  fn multi_config_plan() -> BuildPlan {
    BuildPlan::new(vec![
      CmakeBuild::new("build_x86")
        .configure_arg("-G")
        .configure_arg("Visual Studio 14 2015")
        .configuration(Configuration::Debug)
        .configuration(Configuration::Release)
        .output("Debug/lua.lib", "Libs/win/lua_wind.lib"),
    ])
  }

  #[test]
  fn test_invocations_multi_config() {
    let invocations = multi_config_plan().invocations(Path::new("/w/src"), Path::new("/w/gen"));
    let lines: Vec<String> = invocations.iter().map(ToString::to_string).collect();

    assert_eq!(
      lines,
      vec![
        "cmake -G Visual Studio 14 2015 -S /w/src -B /w/gen/build_x86",
        "cmake --build /w/gen/build_x86 --config Debug",
        "cmake --build /w/gen/build_x86 --config Release",
      ]
    );
  }

  #[test]
  fn test_invocations_single_config() {
    let plan = BuildPlan::new(vec![CmakeBuild::new("build").configure_arg("-DCMAKE_BUILD_TYPE=Release")]);
    let invocations = plan.invocations(Path::new("/w/src"), Path::new("/w/gen"));

    assert_eq!(invocations.len(), 2);
    assert_eq!(invocations[1], Invocation::new("cmake").args(["--build", "/w/gen/build"]));
  }

  #[test]
  fn test_execute_copies_outputs() {
    let dirs = BuildDirsGuard::new();
    let gen_dir = dirs.working_dir().join("gen");
    let runner = RecordingRunner {
      creates: vec![gen_dir.join("build_x86/Debug/lua.lib")],
      ..Default::default()
    };

    let installed = multi_config_plan()
      .execute(&runner, &dirs.working_dir().join("src"), &gen_dir, &dirs.project_root())
      .unwrap();

    assert_eq!(installed, vec![dirs.project_root().join("Libs/win/lua_wind.lib")]);
    assert_eq!(fs::read_to_string(&installed[0]).unwrap(), "built");
    assert_eq!(runner.invocations.borrow().len(), 3);
  }

  #[test]
  fn test_execute_reports_missing_artifact() {
    let dirs = BuildDirsGuard::new();
    let runner = RecordingRunner::default();

    let result = multi_config_plan().execute(
      &runner,
      &dirs.working_dir().join("src"),
      &dirs.working_dir().join("gen"),
      &dirs.project_root(),
    );

    assert!(matches!(result, Err(ThirdpartyError::MissingArtifact { .. })));
  }

  #[test]
  fn test_execute_stops_on_failed_command() {
    let dirs = BuildDirsGuard::new();

    let result = multi_config_plan().execute(
      &FailingRunner,
      &dirs.working_dir().join("src"),
      &dirs.working_dir().join("gen"),
      &dirs.project_root(),
    );

    let err = result.unwrap_err();
    assert!(err.to_string().starts_with("cmake -G"));
  }
}
