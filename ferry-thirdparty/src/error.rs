//! Error type for third-party builds

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures while fetching, patching, building or installing a library
#[derive(Debug, Error)]
pub enum ThirdpartyError {
  #[error("failed to download {url}")]
  Download {
    url: String,
    #[source]
    source: reqwest::Error,
  },

  #[error("failed to set up the HTTP client")]
  HttpClient(#[source] reqwest::Error),

  #[error("download of {url} returned HTTP {status}")]
  HttpStatus { url: String, status: u16 },

  #[error("failed to unpack archive into {}", path.display())]
  Extract {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("failed to run {program}")]
  Spawn {
    program: String,
    #[source]
    source: io::Error,
  },

  #[error("{program} {args} exited with {status}")]
  CommandFailed {
    program: String,
    args: String,
    status: String,
  },

  #[error("build did not produce {}", path.display())]
  MissingArtifact { path: PathBuf },

  #[error("I/O error on {}", path.display())]
  Io {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("android builds need an NDK; set ANDROID_NDK_HOME or pass --android-ndk")]
  MissingAndroidNdk,

  #[error("unknown library {0}")]
  UnknownRecipe(String),

  #[error("dependency cycle through {0}")]
  DependencyCycle(String),
}

impl ThirdpartyError {
  pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(io::Error) -> Self {
    let path = path.into();
    move |source| Self::Io { path, source }
  }
}

pub type Result<T> = std::result::Result<T, ThirdpartyError>;
