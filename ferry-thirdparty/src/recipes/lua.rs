//! # Lua
//!
//! Builds Lua 5.3.3 as a static library with a bundled CMake project and
//! installs it under `Libs/lib_CMake`, headers under `Libs/lua/include`.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::cmake::{BuildPlan, CmakeBuild, Configuration};
use crate::download::download_and_extract;
use crate::error::{Result, ThirdpartyError};
use crate::install::copy_files_with_extension;
use crate::patch::apply_once;
use crate::recipe::{Recipe, Toolchain};
use crate::target::{PlatformFamily, Target};

const DOWNLOAD_URL: &str = "https://www.lua.org/ftp/lua-5.3.3.tar.gz";
const SOURCE_FOLDER: &str = "lua_source";
const GEN_FOLDER: &str = "gen";
const INCLUDE_DIR: &str = "Libs/lua/include";
const LIBS_DIR: &str = "Libs/lib_CMake";

const CMAKE_LISTS: &str = include_str!("lua/CMakeLists.txt");

const VS_GENERATOR: &str = "Visual Studio 14 2015";
const ANDROID_ABIS: [&str; 2] = ["armeabi-v7a", "x86"];

/// Lua 5.3.3
#[derive(Debug, Default, Clone, Copy)]
pub struct LuaRecipe;

impl LuaRecipe {
  /// CMake builds for `target`; android needs the NDK root
  pub fn plan(target: Target, android_ndk: Option<&Path>) -> Result<BuildPlan> {
    let builds = match target {
      Target::Win32 => vec![
        win32_build("build_win32_x86", VS_GENERATOR.to_string(), "x86"),
        win32_build("build_win32_x64", format!("{VS_GENERATOR} Win64"), "x64"),
      ],
      Target::Win10 => ["Win32", "x64", "ARM"].into_iter().map(win10_build).collect(),
      Target::MacOS => vec![
        CmakeBuild::new("build_macos")
          .configure_arg("-G")
          .configure_arg("Xcode")
          .configuration(Configuration::Release)
          .output("Release/liblua.a", format!("{LIBS_DIR}/mac/liblua_macos.a")),
      ],
      Target::Ios => vec![
        CmakeBuild::new("build_ios")
          .configure_arg("-G")
          .configure_arg("Xcode")
          .configure_arg("-DCMAKE_SYSTEM_NAME=iOS")
          .configure_arg("-DCMAKE_OSX_ARCHITECTURES=armv7;arm64")
          .configuration(Configuration::Release)
          .output("Release-iphoneos/liblua.a", format!("{LIBS_DIR}/ios/liblua_ios.a")),
      ],
      Target::Android => {
        let ndk = android_ndk.ok_or(ThirdpartyError::MissingAndroidNdk)?;
        let toolchain_file = ndk.join("build/cmake/android.toolchain.cmake");
        ANDROID_ABIS
          .into_iter()
          .map(|abi| android_build(abi, &toolchain_file))
          .collect()
      }
    };
    Ok(BuildPlan::new(builds))
  }

  fn patch_sources(source_dir: &Path, working_dir: &Path) -> Result<()> {
    apply_once(working_dir, || {
      let path = source_dir.join("CMakeLists.txt");
      debug!("Writing {}", path.display());
      fs::write(&path, CMAKE_LISTS).map_err(ThirdpartyError::io(path))
    })?;
    Ok(())
  }
}

impl Recipe for LuaRecipe {
  fn name(&self) -> &'static str {
    "lua"
  }

  fn download_url(&self) -> &'static str {
    DOWNLOAD_URL
  }

  fn supported_targets(&self, family: PlatformFamily) -> Vec<Target> {
    match family {
      PlatformFamily::Windows => vec![Target::Win32, Target::Win10, Target::Android],
      PlatformFamily::Darwin => vec![Target::MacOS, Target::Ios, Target::Android],
    }
  }

  fn build(
    &self,
    target: Target,
    working_dir: &Path,
    project_root: &Path,
    toolchain: &Toolchain<'_>,
  ) -> Result<Vec<PathBuf>> {
    let plan = Self::plan(target, toolchain.android_ndk.as_deref())?;

    let source_dir = working_dir.join(SOURCE_FOLDER);
    download_and_extract(toolchain.downloader, DOWNLOAD_URL, &source_dir)?;
    Self::patch_sources(&source_dir, working_dir)?;

    let mut installed = plan.execute(
      toolchain.runner,
      &source_dir,
      &working_dir.join(GEN_FOLDER),
      project_root,
    )?;

    let headers = copy_files_with_extension(&source_dir.join("src"), &project_root.join(INCLUDE_DIR), "h")?;
    info!("Installed {} libraries and {} headers", installed.len(), headers.len());
    installed.extend(headers);

    Ok(installed)
  }
}

fn win32_build(build_dir: &str, generator: String, arch: &str) -> CmakeBuild {
  CmakeBuild::new(build_dir)
    .configure_arg("-G")
    .configure_arg(generator)
    .configuration(Configuration::Debug)
    .configuration(Configuration::Release)
    .output("Debug/lua.lib", format!("{LIBS_DIR}/win/{arch}/Debug/lua_wind.lib"))
    .output("Release/lua.lib", format!("{LIBS_DIR}/win/{arch}/Release/lua_win.lib"))
}

fn win10_build(arch: &str) -> CmakeBuild {
  let dir = arch.to_lowercase();
  CmakeBuild::new(format!("build_win10_{dir}"))
    .configure_arg("-G")
    .configure_arg(VS_GENERATOR)
    .configure_arg("-A")
    .configure_arg(arch)
    .configure_arg("-DCMAKE_SYSTEM_NAME=WindowsStore")
    .configure_arg("-DCMAKE_SYSTEM_VERSION=10.0")
    .configuration(Configuration::Debug)
    .configuration(Configuration::Release)
    .output("Debug/lua.lib", format!("{LIBS_DIR}/win10/{dir}/Debug/lua_wind.lib"))
    .output("Release/lua.lib", format!("{LIBS_DIR}/win10/{dir}/Release/lua_win.lib"))
}

fn android_build(abi: &str, toolchain_file: &Path) -> CmakeBuild {
  CmakeBuild::new(format!("build_android_{abi}"))
    .configure_arg("-G")
    .configure_arg("Ninja")
    .configure_arg(format!("-DCMAKE_TOOLCHAIN_FILE={}", toolchain_file.display()))
    .configure_arg(format!("-DANDROID_ABI={abi}"))
    .configure_arg("-DANDROID_NATIVE_API_LEVEL=14")
    .configure_arg("-DCMAKE_BUILD_TYPE=Release")
    .output("liblua.a", format!("{LIBS_DIR}/android/{abi}/liblua.a"))
}
