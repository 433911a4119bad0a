//! # Ferry CLI Entry Point
//!
//! The `ferry` binary runs as a build step on TeamCity agents.

use anyhow::Result;
use clap::Parser;
use ferry_cli::cli::{Cli, handle_cli};
use ferry_cli::consts::SUPPORT_EMAIL;
use ferry_cli::panic_hook::{self, HookConfig};
use ferry_core::ServiceMessage;
use tracing::debug;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

fn main() -> Result<()> {
  panic_hook::install(HookConfig {
    support_email: Some(SUPPORT_EMAIL.to_string()),
    ..Default::default()
  })?;

  let cmd = Cli::parse();

  let level = match cmd.verbose {
    0 => tracing::Level::WARN,
    1 => tracing::Level::INFO,
    2 => tracing::Level::DEBUG,
    _ => tracing::Level::TRACE,
  };

  // Service messages own stdout, so logs go to stderr
  tracing_subscriber::registry()
    .with(fmt::layer().with_writer(std::io::stderr))
    .with(EnvFilter::from_default_env().add_directive(level.into()))
    .init();

  debug!("Tracing initialized with level: {}", level);

  handle_cli(cmd).inspect_err(|err| {
    // The agent shows this in the build log next to the failing step
    let _ = ServiceMessage::error("ferry failed", format!("{err:#}")).emit();
  })
}
