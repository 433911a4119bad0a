//! # TeamCity Service Messages
//!
//! Formatting of the `##teamcity[...]` lines a build agent picks up from a
//! build step's standard output. Attribute values are escaped with TeamCity's
//! `|` escape rules.

use std::fmt;
use std::io::{self, Write};

/// Severity attached to a `message` service message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageStatus {
  Normal,
  Warning,
  Failure,
  Error,
}

impl MessageStatus {
  pub const fn as_str(self) -> &'static str {
    match self {
      Self::Normal => "NORMAL",
      Self::Warning => "WARNING",
      Self::Failure => "FAILURE",
      Self::Error => "ERROR",
    }
  }
}

/// A single TeamCity service message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceMessage {
  /// Build log message
  Message {
    text: String,
    error_details: String,
    status: MessageStatus,
  },
  /// Set a build parameter for the following steps
  SetParameter { name: String, value: String },
  /// Mark the build as failed with a problem description
  BuildProblem { description: String },
}

impl ServiceMessage {
  pub fn message(text: impl Into<String>, status: MessageStatus) -> Self {
    Self::Message {
      text: text.into(),
      error_details: String::new(),
      status,
    }
  }

  pub fn error(text: impl Into<String>, error_details: impl Into<String>) -> Self {
    Self::Message {
      text: text.into(),
      error_details: error_details.into(),
      status: MessageStatus::Error,
    }
  }

  pub fn set_parameter(name: impl Into<String>, value: impl Into<String>) -> Self {
    Self::SetParameter {
      name: name.into(),
      value: value.into(),
    }
  }

  pub fn build_problem(description: impl Into<String>) -> Self {
    Self::BuildProblem {
      description: description.into(),
    }
  }

  /// Print the message on stdout and flush it.
  pub fn emit(&self) -> io::Result<()> {
    flush_print(&self.to_string())
  }
}

impl fmt::Display for ServiceMessage {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Message {
        text,
        error_details,
        status,
      } => write!(
        f,
        "##teamcity[message text='{}' errorDetails='{}' status='{}']",
        escape_value(text),
        escape_value(error_details),
        status.as_str()
      ),
      Self::SetParameter { name, value } => write!(
        f,
        "##teamcity[setParameter name='{}' value='{}']",
        escape_value(name),
        escape_value(value)
      ),
      Self::BuildProblem { description } => {
        write!(f, "##teamcity[buildProblem description='{}']", escape_value(description))
      }
    }
  }
}

/// Escape a value for use inside a service message attribute.
pub fn escape_value(value: &str) -> String {
  let mut escaped = String::with_capacity(value.len());
  for c in value.chars() {
    match c {
      '|' => escaped.push_str("||"),
      '\'' => escaped.push_str("|'"),
      '\n' => escaped.push_str("|n"),
      '\r' => escaped.push_str("|r"),
      '[' => escaped.push_str("|["),
      ']' => escaped.push_str("|]"),
      other => escaped.push(other),
    }
  }
  escaped
}

/// Write a line to stdout and flush immediately so the agent sees it in
/// order with the output of child processes.
pub fn flush_print(line: &str) -> io::Result<()> {
  let mut stdout = io::stdout().lock();
  writeln!(stdout, "{line}")?;
  stdout.flush()
}
