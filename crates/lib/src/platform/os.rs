use std::fmt;

use serde::{Deserialize, Serialize};

/// Operating systems with a known native extension suffix set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Os {
  Linux,
  #[serde(rename = "darwin")]
  MacOs,
  Windows,
}

impl Os {
  /// Detect the operating system this binary runs on
  pub fn current() -> Option<Self> {
    match std::env::consts::OS {
      "linux" => Some(Self::Linux),
      "macos" => Some(Self::MacOs),
      "windows" => Some(Self::Windows),
      _ => None,
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Linux => "linux",
      Self::MacOs => "darwin",
      Self::Windows => "windows",
    }
  }

  /// File name suffixes a compiled extension module can carry on this OS.
  ///
  /// Shared objects on Linux, shared objects or dynamic libraries on macOS,
  /// extension modules or DLLs on Windows.
  pub fn extension_suffixes(&self) -> &'static [&'static str] {
    match self {
      Self::Linux => &[".so"],
      Self::MacOs => &[".so", ".dylib"],
      Self::Windows => &[".pyd", ".dll"],
    }
  }
}

impl fmt::Display for Os {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}
