//! # Third-Party Builds
//!
//! Builds vendored third-party libraries for the engine's target platforms.
//! A [`Recipe`] knows where a library's sources come from, which targets it
//! supports on a platform family and how to turn the sources into the
//! libraries and headers the project expects under `Libs/`.
//!
//! Every step is blocking and runs to completion before the next one starts.
//! Two invocations must not share a working directory.

pub mod cmake;
pub mod download;
pub mod error;
pub mod install;
pub mod patch;
pub mod recipe;
pub mod recipes;
pub mod target;

pub use cmake::{BuildPlan, CmakeBuild, CommandRunner, Configuration, Invocation, SystemRunner};
pub use download::{Downloader, HttpDownloader};
pub use error::{Result, ThirdpartyError};
pub use recipe::{BuildOutcome, Recipe, Registry, Toolchain, build_target, resolve_build_order};
pub use recipes::lua::LuaRecipe;
pub use target::{PlatformFamily, Target};
