//! # Ferry Core
//!
//! Shared building blocks for the ferry build-agent tools: pull request
//! resolution from branch names, the build status reporting flow, TeamCity
//! service messages, configuration and console output.

pub mod branch;
pub mod build_state;
pub mod config;
pub mod consts;
pub mod output;
pub mod reporter;
pub mod service_message;
pub mod url;

pub use branch::{BranchRef, resolve_pull_request_number};
pub use build_state::BuildState;
pub use config::{ConfigDirs, FerryConfig, StashSettings, ThirdpartySettings, get_config_dirs};
pub use reporter::{BuildServer, BuildStatusReport, ReportOutcome, ReportRequest, SourceHost, report_build_status};
pub use service_message::{MessageStatus, ServiceMessage, flush_print};
