//! Manifest types and loading.
//!
//! # Example
//!
//! ```toml
//! build_dir = "build"
//! dest_dir = "python/pysvzerod"
//! traversal = "sorted"
//!
//! [[extension]]
//! name = "pysvzerod"
//! source_dir = "."
//! cmake_args = ["-DENABLE_DISTRIBUTION=ON"]
//! ```

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::artifact::{ArtifactDescriptor, LocateOptions, MatchPolicy, Traversal};
use crate::consts::DEFAULT_BUILD_DIR;

/// Shown in parse errors for manifests that did not come from a file.
const INLINE_ORIGIN: &str = "<inline>";

#[derive(Debug, Error)]
pub enum ManifestError {
  #[error("failed to read manifest {}: {source}", .path.display())]
  Read {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("failed to parse manifest {origin}: {source}")]
  Parse {
    origin: String,
    #[source]
    source: toml::de::Error,
  },

  #[error("manifest declares no extensions")]
  NoExtensions,

  #[error("extension name must not be empty")]
  EmptyName,

  #[error("extension {0} is declared more than once")]
  DuplicateExtension(String),

  #[error("jobs must be at least 1")]
  ZeroJobs,

  #[error("no extension named {0} in manifest")]
  UnknownExtension(String),

  #[error("invalid value for {var}: {value:?}")]
  InvalidEnv { var: &'static str, value: String },
}

/// One native extension the project builds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Extension {
  /// Module name; the artifact's file name must start with it.
  pub name: String,

  /// CMake source directory.
  #[serde(default = "default_source_dir")]
  pub source_dir: PathBuf,

  /// Whether the built artifact is copied into the destination directory.
  #[serde(default = "default_true")]
  pub install: bool,

  /// Overrides the host's native extension suffixes.
  #[serde(default)]
  pub suffixes: Option<Vec<String>>,

  /// Overrides the manifest-wide destination directory.
  #[serde(default)]
  pub dest_dir: Option<PathBuf>,

  #[serde(default)]
  pub build_type: Option<String>,

  /// Extra arguments for the configure step, e.g. `-DFOO=ON`.
  #[serde(default)]
  pub cmake_args: Vec<String>,

  /// Build only these targets instead of the default target.
  #[serde(default)]
  pub targets: Vec<String>,
}

impl Extension {
  pub fn descriptor(&self) -> ArtifactDescriptor {
    match &self.suffixes {
      Some(suffixes) => ArtifactDescriptor::new(self.name.clone(), suffixes),
      None => ArtifactDescriptor::for_host(self.name.clone()),
    }
  }
}

/// The parsed contents of `extinstall.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
  /// Directory relative paths are resolved against. Set on load.
  #[serde(skip)]
  pub base_dir: PathBuf,

  /// Root of the build trees; each extension builds into `<build_dir>/<name>`.
  #[serde(default = "default_build_dir")]
  pub build_dir: PathBuf,

  /// Directory the packaging layer imports extensions from.
  #[serde(default = "default_source_dir")]
  pub dest_dir: PathBuf,

  #[serde(default)]
  pub traversal: Traversal,

  #[serde(default)]
  pub policy: MatchPolicy,

  /// Parallel build jobs. Defaults to the number of CPUs.
  #[serde(default)]
  pub jobs: Option<usize>,

  #[serde(default, rename = "extension")]
  pub extensions: Vec<Extension>,
}

impl Manifest {
  /// Read and validate a manifest file.
  pub fn load(path: &Path) -> Result<Self, ManifestError> {
    let content = fs::read_to_string(path).map_err(|source| ManifestError::Read {
      path: path.to_path_buf(),
      source,
    })?;

    let base_dir = path
      .parent()
      .filter(|p| !p.as_os_str().is_empty())
      .map(Path::to_path_buf)
      .unwrap_or_else(|| PathBuf::from("."));

    let manifest = Self::parse_from(&content, base_dir, path.display().to_string())?;

    debug!(path = %path.display(), extensions = manifest.extensions.len(), "manifest loaded");
    Ok(manifest)
  }

  /// Parse manifest text, resolving relative paths against `base_dir`.
  pub fn parse(content: &str, base_dir: impl Into<PathBuf>) -> Result<Self, ManifestError> {
    Self::parse_from(content, base_dir, INLINE_ORIGIN.to_string())
  }

  fn parse_from(content: &str, base_dir: impl Into<PathBuf>, origin: String) -> Result<Self, ManifestError> {
    let mut manifest: Manifest =
      toml::from_str(content).map_err(|source| ManifestError::Parse { origin, source })?;
    manifest.base_dir = base_dir.into();
    manifest.validate()?;
    Ok(manifest)
  }

  fn validate(&self) -> Result<(), ManifestError> {
    if self.extensions.is_empty() {
      return Err(ManifestError::NoExtensions);
    }
    if self.jobs == Some(0) {
      return Err(ManifestError::ZeroJobs);
    }

    let mut seen = HashSet::new();
    for ext in &self.extensions {
      if ext.name.trim().is_empty() {
        return Err(ManifestError::EmptyName);
      }
      if !seen.insert(ext.name.as_str()) {
        return Err(ManifestError::DuplicateExtension(ext.name.clone()));
      }
    }

    Ok(())
  }

  pub fn locate_options(&self) -> LocateOptions {
    LocateOptions {
      traversal: self.traversal,
      policy: self.policy,
    }
  }

  pub fn extension(&self, name: &str) -> Result<&Extension, ManifestError> {
    self
      .extensions
      .iter()
      .find(|ext| ext.name == name)
      .ok_or_else(|| ManifestError::UnknownExtension(name.to_string()))
  }

  /// Resolve `path` against the manifest directory. Absolute paths are kept.
  pub fn resolve(&self, path: &Path) -> PathBuf {
    if path.is_absolute() {
      path.to_path_buf()
    } else {
      self.base_dir.join(path)
    }
  }

  /// Build tree for one extension.
  pub fn build_dir_for(&self, ext: &Extension) -> PathBuf {
    self.resolve(&self.build_dir).join(&ext.name)
  }

  /// Directory the extension's artifact is installed into.
  pub fn dest_dir_for(&self, ext: &Extension) -> PathBuf {
    self.resolve(ext.dest_dir.as_deref().unwrap_or(&self.dest_dir))
  }
}

fn default_build_dir() -> PathBuf {
  PathBuf::from(DEFAULT_BUILD_DIR)
}

fn default_source_dir() -> PathBuf {
  PathBuf::from(".")
}

fn default_true() -> bool {
  true
}
