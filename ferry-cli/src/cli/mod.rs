//! # Command Line Interface
//!
//! Defines the CLI structure and dispatches to the command handlers.

mod report;
mod thirdparty;

use anyhow::Result;
use clap::builder::Styles;
use clap::builder::styling::AnsiColor;
use clap::{ArgAction, Parser, Subcommand};
use ferry_core::output::ColorMode;
use ferry_core::{ConfigDirs, FerryConfig, get_config_dirs};
use tracing::debug;

pub use self::report::ReportArgs;
pub use self::thirdparty::{ThirdpartyArgs, ThirdpartyCommand};

/// Top-level CLI command for ferry
#[derive(Parser)]
#[command(name = "ferry")]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
#[command(about = "Build-agent helper for TeamCity, Stash and third-party libraries")]
#[command(
  long_about = "Ferry runs as a TeamCity build step.\n\n\
        It reports build status to Stash pull requests and commits, and builds the\n\
        vendored third-party libraries the engine links against."
)]
#[command(version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GIT_HASH"), ")"))]
#[command(propagate_version = true)]
#[command(subcommand_required(true))]
#[command(disable_help_subcommand = true)]
#[command(max_term_width = 120)]
#[command(styles = Styles::styled()
    .header(AnsiColor::BrightBlue.on_default().bold().underline())
    .usage(AnsiColor::Blue.on_default().bold())
    .literal(AnsiColor::BrightBlue.on_default().bold())
    .placeholder(AnsiColor::BrightWhite.on_default().italic())
    .valid(AnsiColor::Green.on_default())
    .invalid(AnsiColor::BrightRed.on_default().bold())
)]
pub struct Cli {
  /// Sets the level of verbosity (can be used multiple times)
  #[arg(
    short = 'v',
    long = "verbose",
    action = ArgAction::Count,
    global = true,
    long_help = "Sets the level of verbosity for tracing and logging output.\n\n\
             -v: Show info level messages\n\
             -vv: Show debug level messages\n\
             -vvv: Show trace level messages"
  )]
  pub verbose: u8,

  /// Controls when colored output is used
  #[arg(
    long,
    value_enum,
    ignore_case = true,
    global = true,
    default_value_t = ColorMode::Auto,
  )]
  pub colors: ColorMode,

  /// Subcommands
  #[command(subcommand)]
  pub command: Commands,
}

/// Subcommands for ferry
#[derive(Subcommand)]
pub enum Commands {
  /// Report a TeamCity build status to Stash
  #[command(long_about = "Report the status of a TeamCity build to Stash.\n\n\
            The commit is taken from the pull request encoded in --brunch when there is one,\n\
            otherwise from --commit. When --root_build_id is given, the web URL of that\n\
            build is linked instead of --build_url. Without any commit nothing is reported\n\
            and the command still succeeds.")]
  #[command(alias = "report_build_status")]
  ReportStatus(ReportArgs),

  /// Build vendored third-party libraries
  #[command(long_about = "Download, patch and build vendored third-party libraries.\n\n\
            Built libraries are copied into Libs/ under the project root.")]
  #[command(alias = "tp")]
  Thirdparty(ThirdpartyArgs),
}

/// Handle the parsed CLI command
pub fn handle_cli(cli: Cli) -> Result<()> {
  cli.colors.apply();

  match cli.command {
    Commands::ReportStatus(args) => report::handle_report_command(args),
    Commands::Thirdparty(args) => thirdparty::handle_thirdparty_command(args),
  }
}

/// Platform directories and the parsed config file.
///
/// A machine without a home directory still runs with built-in defaults; a
/// config file that exists but does not parse is an error.
pub(crate) fn load_config() -> Result<(Option<ConfigDirs>, FerryConfig)> {
  match get_config_dirs() {
    Ok(dirs) => {
      let config = dirs.load_config()?;
      Ok((Some(dirs), config))
    }
    Err(err) => {
      debug!("No configuration directories: {err:#}");
      Ok((None, FerryConfig::default()))
    }
  }
}
