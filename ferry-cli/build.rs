//! Build script for the ferry binary
//!
//! Embeds version and build metadata for the crash report and `--version`

use std::env;
use std::process::Command;

fn main() {
  embed_build_info();
  set_rerun_conditions();
}

/// Expose the git commit and target triple as compile-time environment
/// variables. Builds outside a git checkout get an empty hash.
fn embed_build_info() {
  let git_hash = Command::new("git")
    .args(["rev-parse", "--short", "HEAD"])
    .output()
    .ok()
    .and_then(|output| String::from_utf8(output.stdout).ok())
    .unwrap_or_default();
  println!("cargo:rustc-env=GIT_HASH={}", git_hash.trim());

  println!("cargo:rustc-env=TARGET={}", env::var("TARGET").unwrap_or_default());
}

fn set_rerun_conditions() {
  println!("cargo:rerun-if-changed=build.rs");
  println!("cargo:rerun-if-changed=../.git/HEAD");
  println!("cargo:rerun-if-env-changed=TARGET");
}
