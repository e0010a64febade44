use std::fmt;
use std::path::Path;

use serde::Serialize;

use crate::platform::host_extension_suffixes;

/// What to search for in a build tree: a file name prefix (the module name)
/// and the file name suffixes a compiled module may carry.
///
/// Suffixes are stored with a leading dot and without duplicates, so `"so"` and
/// `".so"` describe the same artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtifactDescriptor {
  prefix: String,
  suffixes: Vec<String>,
}

impl ArtifactDescriptor {
  pub fn new<P, I, S>(prefix: P, suffixes: I) -> Self
  where
    P: Into<String>,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
  {
    let mut normalized: Vec<String> = Vec::new();
    for suffix in suffixes {
      let suffix = suffix.as_ref().trim();
      if suffix.is_empty() || suffix == "." {
        continue;
      }
      let suffix = if suffix.starts_with('.') {
        suffix.to_string()
      } else {
        format!(".{}", suffix)
      };
      if !normalized.contains(&suffix) {
        normalized.push(suffix);
      }
    }

    Self {
      prefix: prefix.into(),
      suffixes: normalized,
    }
  }

  /// Descriptor for `prefix` using the native extension suffixes of the host.
  pub fn for_host(prefix: impl Into<String>) -> Self {
    Self::new(prefix, host_extension_suffixes())
  }

  pub fn prefix(&self) -> &str {
    &self.prefix
  }

  pub fn suffixes(&self) -> &[String] {
    &self.suffixes
  }

  /// Whether a bare file name satisfies both the prefix and one of the suffixes.
  pub fn matches_file_name(&self, name: &str) -> bool {
    name.starts_with(&self.prefix) && self.suffixes.iter().any(|suffix| name.ends_with(suffix.as_str()))
  }

  /// Whether the last component of `path` satisfies the descriptor.
  pub fn matches(&self, path: &Path) -> bool {
    path
      .file_name()
      .map(|name| self.matches_file_name(&name.to_string_lossy()))
      .unwrap_or(false)
  }
}

impl fmt::Display for ArtifactDescriptor {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}*{{{}}}", self.prefix, self.suffixes.join(","))
  }
}
