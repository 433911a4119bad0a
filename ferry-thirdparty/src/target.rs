//! Platform families and build targets

use std::fmt;

/// Host platform family; decides which targets can be built
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlatformFamily {
  Windows,
  Darwin,
}

impl PlatformFamily {
  /// Map a platform name (`win32`, `darwin`, ...) to its family
  pub fn from_platform(platform: &str) -> Self {
    if platform == "win32" { Self::Windows } else { Self::Darwin }
  }

  /// Family of the machine ferry runs on
  pub const fn host() -> Self {
    if cfg!(windows) { Self::Windows } else { Self::Darwin }
  }

  pub const fn as_str(self) -> &'static str {
    match self {
      Self::Windows => "win32",
      Self::Darwin => "darwin",
    }
  }
}

impl fmt::Display for PlatformFamily {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// A build target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Target {
  Win32,
  Win10,
  MacOS,
  Ios,
  Android,
}

impl Target {
  pub const ALL: [Target; 5] = [Self::Win32, Self::Win10, Self::MacOS, Self::Ios, Self::Android];

  pub fn from_name(name: &str) -> Option<Self> {
    Self::ALL.into_iter().find(|target| target.name() == name)
  }

  pub const fn name(self) -> &'static str {
    match self {
      Self::Win32 => "win32",
      Self::Win10 => "win10",
      Self::MacOS => "macos",
      Self::Ios => "ios",
      Self::Android => "android",
    }
  }
}

impl fmt::Display for Target {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}
