//! Host platform detection and the native extension suffixes it implies.

pub mod arch;
pub mod os;

use std::fmt;

use serde::Serialize;

use arch::Arch;
use os::Os;

/// Platform identifier combining architecture and OS (e.g., "x86_64-linux")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Platform {
  pub arch: Arch,
  pub os: Os,
}

impl Platform {
  pub fn new(arch: Arch, os: Os) -> Self {
    Self { arch, os }
  }

  /// Detect the current platform at runtime
  ///
  /// Returns `None` if the OS or architecture is not supported
  pub fn current() -> Option<Self> {
    Some(Self {
      arch: Arch::current()?,
      os: Os::current()?,
    })
  }

  pub fn triple(&self) -> String {
    format!("{}-{}", self.arch, self.os)
  }
}

impl fmt::Display for Platform {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.triple())
  }
}

/// Extension suffixes for the host OS.
///
/// Falls back to the union of every known suffix when the OS is not recognized,
/// so an unusual host still finds its artifact.
pub fn host_extension_suffixes() -> Vec<String> {
  match Os::current() {
    Some(os) => os.extension_suffixes().iter().map(|s| s.to_string()).collect(),
    None => {
      let mut all: Vec<String> = Vec::new();
      for os in [Os::Linux, Os::MacOs, Os::Windows] {
        for suffix in os.extension_suffixes() {
          if !all.iter().any(|s| s == suffix) {
            all.push(suffix.to_string());
          }
        }
      }
      all
    }
  }
}
