//! # Panic Hook
//!
//! Turns a panic into something a build agent and a person can both act on:
//! a `##teamcity[buildProblem ...]` line on stdout so the build is marked
//! failed with the panic message, a short colored summary on stderr, and a
//! TOML crash report in the temp directory.

use std::env;
use std::fs::File;
use std::io::{self, Write};
use std::panic::{self, PanicHookInfo};
use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use backtrace::Backtrace;
use ferry_core::ServiceMessage;
use owo_colors::OwoColorize;

/// Panic hook settings
#[derive(Debug, Clone)]
pub struct HookConfig {
  pub name: String,
  /// Version string including the git commit
  pub version: String,
  pub support_email: Option<String>,
  /// Where crash reports go; defaults to the system temp directory
  pub report_directory: Option<PathBuf>,
  pub generate_reports: bool,
  /// Longest panic message echoed to the terminal and the build log
  pub max_message_length: usize,
}

impl Default for HookConfig {
  fn default() -> Self {
    Self {
      name: "ferry".to_string(),
      version: format!("{} ({})", env!("CARGO_PKG_VERSION"), env!("GIT_HASH")),
      support_email: None,
      report_directory: None,
      generate_reports: true,
      max_message_length: 500,
    }
  }
}

impl HookConfig {
  pub fn validate(&self) -> Result<()> {
    if let Some(dir) = &self.report_directory
      && !dir.is_dir()
    {
      bail!("Crash report directory not found: {}", dir.display());
    }
    if self.max_message_length == 0 {
      bail!("max_message_length must be greater than 0");
    }
    Ok(())
  }
}

/// Replace the default panic hook
pub fn install(config: HookConfig) -> Result<()> {
  config.validate()?;

  panic::set_hook(Box::new(move |info: &PanicHookInfo| {
    handle_panic(info, &config);
  }));

  Ok(())
}

fn handle_panic(info: &PanicHookInfo, config: &HookConfig) {
  let message = panic_message(info);
  let location = info.location().map(|location| PanicLocation {
    file: location.file().to_string(),
    line: location.line(),
    column: location.column(),
  });

  // Output errors are ignored here: there is nowhere left to report them.
  let _ = ServiceMessage::build_problem(problem_description(message.as_deref(), config.max_message_length)).emit();

  let backtrace = Backtrace::new();
  let report_path = if config.generate_reports {
    let report = CrashReport {
      name: &config.name,
      version: &config.version,
      location: location.as_ref(),
      message: message.as_deref(),
      backtrace: format!("{backtrace:?}"),
      timestamp: chrono::Utc::now().to_rfc3339(),
    };
    save_report(&report, config).ok()
  } else {
    None
  };

  display_summary(message.as_deref(), location.as_ref(), report_path.as_deref(), config);
}

/// Where the panic happened
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanicLocation {
  pub file: String,
  pub line: u32,
  pub column: u32,
}

/// Contents of a crash report file
#[derive(Debug)]
pub struct CrashReport<'a> {
  pub name: &'a str,
  pub version: &'a str,
  pub location: Option<&'a PanicLocation>,
  pub message: Option<&'a str>,
  pub backtrace: String,
  pub timestamp: String,
}

fn panic_message(info: &PanicHookInfo) -> Option<String> {
  info
    .payload()
    .downcast_ref::<&str>()
    .map(|s| s.to_string())
    .or_else(|| info.payload().downcast_ref::<String>().cloned())
}

/// Build problem text for a panic message, cut to `max_len` characters
pub fn problem_description(message: Option<&str>, max_len: usize) -> String {
  let message = message.unwrap_or("ferry panicked");
  match message.char_indices().nth(max_len) {
    Some((cut, _)) => format!("{}... (truncated)", &message[..cut]),
    None => message.to_string(),
  }
}

fn save_report(report: &CrashReport<'_>, config: &HookConfig) -> io::Result<PathBuf> {
  let timestamp = chrono::Utc::now().format("%Y%m%d_%H%M%S");
  let filename = format!("crash_report_{}_{timestamp}.toml", config.name);
  let report_dir = config.report_directory.clone().unwrap_or_else(env::temp_dir);
  let report_path = report_dir.join(filename);

  let mut file = File::create(&report_path)?;
  write_crash_report(&mut file, report)?;
  Ok(report_path)
}

/// Write `report` as TOML
pub fn write_crash_report(out: &mut impl Write, report: &CrashReport<'_>) -> io::Result<()> {
  writeln!(out, "# {} crash report\n", report.name)?;

  writeln!(out, "[application]")?;
  writeln!(out, "name = {}", toml_literal(report.name))?;
  writeln!(out, "version = {}", toml_literal(report.version))?;

  writeln!(out, "\n[system]")?;
  writeln!(out, "operating_system = '{}'", env::consts::OS)?;
  writeln!(out, "architecture = '{}'", env::consts::ARCH)?;
  writeln!(out, "target = '{}'", env!("TARGET"))?;
  writeln!(out, "timestamp = '{}'", report.timestamp)?;

  writeln!(out, "\n[panic]")?;
  if let Some(location) = report.location {
    writeln!(out, "file = {}", toml_literal(&location.file))?;
    writeln!(out, "line = {}", location.line)?;
    writeln!(out, "column = {}", location.column)?;
  }
  if let Some(message) = report.message {
    writeln!(out, "message = '''{}'''", message.replace("'''", "'\"'\"'"))?;
  }

  writeln!(out, "\n[backtrace]")?;
  writeln!(out, "trace = '''")?;
  writeln!(out, "{}", report.backtrace.trim_end())?;
  writeln!(out, "'''")?;
  Ok(())
}

/// Single-line TOML string, literal when possible
fn toml_literal(value: &str) -> String {
  if value.contains('\'') || value.contains('\n') {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n"))
  } else {
    format!("'{value}'")
  }
}

fn display_summary(message: Option<&str>, location: Option<&PanicLocation>, report: Option<&Path>, config: &HookConfig) {
  let use_colors = is_terminal::is_terminal(io::stderr());

  if use_colors {
    eprintln!("{} {}", config.name.bright_blue().bold(), "panicked".red());
  } else {
    eprintln!("{} panicked", config.name);
  }

  if let Some(location) = location {
    let place = format!("{}:{}", location.file, location.line);
    if use_colors {
      eprintln!("  {} {}", "Location:".bright_white(), place.yellow());
    } else {
      eprintln!("  Location: {place}");
    }
  }

  if let Some(message) = message {
    let message = problem_description(Some(message), config.max_message_length);
    if use_colors {
      eprintln!("  {} {}", "Message:".bright_white(), message.italic());
    } else {
      eprintln!("  Message: {message}");
    }
  }

  if let Some(path) = report {
    if use_colors {
      eprintln!("  {} {}", "Crash report:".bright_white(), path.display().yellow());
    } else {
      eprintln!("  Crash report: {}", path.display());
    }
  }

  if let Some(email) = &config.support_email {
    eprintln!("  Send the report to {email} with the build log attached.");
  }
}
