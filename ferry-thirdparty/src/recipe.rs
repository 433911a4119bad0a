//! # Recipes and Dispatch
//!
//! A recipe describes how one third-party library is built. [`build_target`]
//! dispatches a target name to a recipe, and [`resolve_build_order`] walks
//! recipe dependencies so callers can build them first.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use tracing::{info, instrument, warn};

use crate::cmake::CommandRunner;
use crate::download::Downloader;
use crate::error::{Result, ThirdpartyError};
use crate::recipes::lua::LuaRecipe;
use crate::target::{PlatformFamily, Target};

/// External collaborators a recipe needs to produce its libraries
pub struct Toolchain<'a> {
  pub downloader: &'a dyn Downloader,
  pub runner: &'a dyn CommandRunner,
  /// Root of the Android NDK, required for android targets
  pub android_ndk: Option<PathBuf>,
}

/// How to fetch and build one library
pub trait Recipe {
  fn name(&self) -> &'static str;

  fn download_url(&self) -> &'static str;

  /// Targets this library can be built for on `family`
  fn supported_targets(&self, family: PlatformFamily) -> Vec<Target>;

  /// Names of recipes that must be built for `target` before this one
  fn dependencies(&self, _target: Target) -> Vec<String> {
    Vec::new()
  }

  /// Build for `target` and install into `project_root`, returning the
  /// installed files
  fn build(
    &self,
    target: Target,
    working_dir: &Path,
    project_root: &Path,
    toolchain: &Toolchain<'_>,
  ) -> Result<Vec<PathBuf>>;
}

/// Result of dispatching a target name
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildOutcome {
  Built { target: Target, artifacts: Vec<PathBuf> },
  Skipped { target: String },
}

/// Build `target_name` with `recipe` if the recipe supports it on `family`.
///
/// A target outside the supported set is not an error: nothing is
/// downloaded or built and [`BuildOutcome::Skipped`] is returned.
#[instrument(level = "debug", skip(recipe, toolchain), fields(recipe = recipe.name()))]
pub fn build_target(
  recipe: &dyn Recipe,
  family: PlatformFamily,
  target_name: &str,
  working_dir: &Path,
  project_root: &Path,
  toolchain: &Toolchain<'_>,
) -> Result<BuildOutcome> {
  let supported = recipe.supported_targets(family);
  let Some(target) = Target::from_name(target_name).filter(|target| supported.contains(target)) else {
    warn!(
      "{} does not support target {target_name} on {family}, nothing to build",
      recipe.name()
    );
    return Ok(BuildOutcome::Skipped {
      target: target_name.to_string(),
    });
  };

  info!("Building {} for {target}", recipe.name());
  let artifacts = recipe.build(target, working_dir, project_root, toolchain)?;
  Ok(BuildOutcome::Built { target, artifacts })
}

/// Known recipes by name
#[derive(Default)]
pub struct Registry {
  recipes: BTreeMap<String, Box<dyn Recipe>>,
}

impl Registry {
  pub fn new() -> Self {
    Self::default()
  }

  /// Registry with every recipe shipped in this crate
  pub fn with_defaults() -> Self {
    let mut registry = Self::new();
    registry.register(Box::new(LuaRecipe));
    registry
  }

  pub fn register(&mut self, recipe: Box<dyn Recipe>) {
    self.recipes.insert(recipe.name().to_string(), recipe);
  }

  pub fn get(&self, name: &str) -> Result<&dyn Recipe> {
    self
      .recipes
      .get(name)
      .map(|recipe| recipe.as_ref())
      .ok_or_else(|| ThirdpartyError::UnknownRecipe(name.to_string()))
  }
}

/// Recipes to build for `target`, dependencies first and `name` last.
///
/// Each recipe appears once even when several others depend on it.
pub fn resolve_build_order(registry: &Registry, name: &str, target: Target) -> Result<Vec<String>> {
  let mut order = Vec::new();
  let mut done = BTreeSet::new();
  let mut visiting = Vec::new();
  visit(registry, name, target, &mut visiting, &mut done, &mut order)?;
  Ok(order)
}

fn visit(
  registry: &Registry,
  name: &str,
  target: Target,
  visiting: &mut Vec<String>,
  done: &mut BTreeSet<String>,
  order: &mut Vec<String>,
) -> Result<()> {
  if done.contains(name) {
    return Ok(());
  }
  if visiting.iter().any(|pending| pending == name) {
    visiting.push(name.to_string());
    return Err(ThirdpartyError::DependencyCycle(visiting.join(" -> ")));
  }

  let recipe = registry.get(name)?;
  visiting.push(name.to_string());
  for dependency in recipe.dependencies(target) {
    visit(registry, &dependency, target, visiting, done, order)?;
  }
  visiting.pop();

  done.insert(name.to_string());
  order.push(name.to_string());
  Ok(())
}

#[cfg(test)]
mod tests {
  use std::cell::RefCell;

  use ferry_test_utils::BuildDirsGuard;

  use super::*;
  use crate::cmake::{Invocation, SystemRunner};

  struct FakeRecipe {
    name: &'static str,
    deps: Vec<String>,
    built: RefCell<Vec<Target>>,
  }

  impl FakeRecipe {
    fn new(name: &'static str, deps: &[&str]) -> Self {
      Self {
        name,
        deps: deps.iter().map(ToString::to_string).collect(),
        built: RefCell::new(Vec::new()),
      }
    }
  }

  impl Recipe for FakeRecipe {
    fn name(&self) -> &'static str {
      self.name
    }

    fn download_url(&self) -> &'static str {
      "https://example.com/fake.tar.gz"
    }

    fn supported_targets(&self, family: PlatformFamily) -> Vec<Target> {
      match family {
        PlatformFamily::Windows => vec![Target::Win32],
        PlatformFamily::Darwin => vec![Target::MacOS],
      }
    }

    fn dependencies(&self, _target: Target) -> Vec<String> {
      self.deps.clone()
    }

    fn build(
      &self,
      target: Target,
      _working_dir: &Path,
      project_root: &Path,
      _toolchain: &Toolchain<'_>,
    ) -> Result<Vec<PathBuf>> {
      self.built.borrow_mut().push(target);
      Ok(vec![project_root.join("Libs/fake.a")])
    }
  }

  struct NoDownloads;

  impl Downloader for NoDownloads {
    fn fetch(&self, url: &str) -> Result<Vec<u8>> {
      panic!("unexpected download of {url}");
    }
  }

  struct NoCommands;

  impl CommandRunner for NoCommands {
    fn run(&self, invocation: &Invocation) -> Result<()> {
      panic!("unexpected command {invocation}");
    }
  }

  fn toolchain() -> Toolchain<'static> {
    Toolchain {
      downloader: &NoDownloads,
      runner: &NoCommands,
      android_ndk: None,
    }
  }

  #[test]
  fn test_supported_target_is_built() {
    let dirs = BuildDirsGuard::new();
    let recipe = FakeRecipe::new("fake", &[]);

    let outcome = build_target(
      &recipe,
      PlatformFamily::Windows,
      "win32",
      &dirs.working_dir(),
      &dirs.project_root(),
      &toolchain(),
    )
    .unwrap();

    assert_eq!(
      outcome,
      BuildOutcome::Built {
        target: Target::Win32,
        artifacts: vec![dirs.project_root().join("Libs/fake.a")],
      }
    );
    assert_eq!(*recipe.built.borrow(), vec![Target::Win32]);
  }

  #[test]
  fn test_target_from_other_family_is_skipped() {
    let dirs = BuildDirsGuard::new();
    let recipe = FakeRecipe::new("fake", &[]);

    let outcome = build_target(
      &recipe,
      PlatformFamily::Darwin,
      "win32",
      &dirs.working_dir(),
      &dirs.project_root(),
      &toolchain(),
    )
    .unwrap();

    assert_eq!(
      outcome,
      BuildOutcome::Skipped {
        target: "win32".to_string()
      }
    );
    assert!(recipe.built.borrow().is_empty());
  }

  #[test]
  fn test_unknown_target_is_skipped() {
    let dirs = BuildDirsGuard::new();
    let recipe = FakeRecipe::new("fake", &[]);

    let outcome = build_target(
      &recipe,
      PlatformFamily::Windows,
      "playstation",
      &dirs.working_dir(),
      &dirs.project_root(),
      &toolchain(),
    )
    .unwrap();

    assert!(matches!(outcome, BuildOutcome::Skipped { .. }));
    assert!(recipe.built.borrow().is_empty());
  }

  #[test]
  fn test_build_order_dependencies_first() {
    let mut registry = Registry::new();
    registry.register(Box::new(FakeRecipe::new("app", &["zlib", "png"])));
    registry.register(Box::new(FakeRecipe::new("png", &["zlib"])));
    registry.register(Box::new(FakeRecipe::new("zlib", &[])));

    let order = resolve_build_order(&registry, "app", Target::MacOS).unwrap();

    assert_eq!(order, vec!["zlib", "png", "app"]);
  }

  #[test]
  fn test_build_order_without_dependencies() {
    let registry = Registry::with_defaults();
    let order = resolve_build_order(&registry, "lua", Target::Android).unwrap();
    assert_eq!(order, vec!["lua"]);
  }

  #[test]
  fn test_build_order_detects_cycles() {
    let mut registry = Registry::new();
    registry.register(Box::new(FakeRecipe::new("a", &["b"])));
    registry.register(Box::new(FakeRecipe::new("b", &["a"])));

    let err = resolve_build_order(&registry, "a", Target::Win32).unwrap_err();

    assert_eq!(err.to_string(), "dependency cycle through a -> b -> a");
  }

  #[test]
  fn test_build_order_unknown_dependency() {
    let mut registry = Registry::new();
    registry.register(Box::new(FakeRecipe::new("a", &["missing"])));

    let err = resolve_build_order(&registry, "a", Target::Win32).unwrap_err();

    assert!(matches!(err, ThirdpartyError::UnknownRecipe(name) if name == "missing"));
  }

  #[test]
  fn test_registry_defaults() {
    let registry = Registry::with_defaults();
    assert!(registry.get("lua").is_ok());
    assert!(matches!(registry.get("zlib"), Err(ThirdpartyError::UnknownRecipe(_))));
  }

  #[test]
  fn test_system_runner_reports_spawn_failure() {
    let err = SystemRunner
      .run(&Invocation::new("ferry-definitely-not-a-real-program"))
      .unwrap_err();
    assert!(matches!(err, ThirdpartyError::Spawn { .. }));
  }
}
