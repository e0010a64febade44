//! Copying a located artifact into its destination directory.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::util::hash::{ContentHash, hash_file};

#[derive(Debug, Error)]
pub enum InstallError {
  #[error("artifact path has no file name: {0}")]
  NoFileName(PathBuf),

  #[error(transparent)]
  Io(#[from] io::Error),
}

/// A file that has been placed where the packaging layer expects it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstalledArtifact {
  /// The located file the bytes were copied from.
  pub source: PathBuf,
  /// Destination file, `dest_dir/<basename of source>`.
  pub path: PathBuf,
  /// Number of bytes written.
  pub bytes: u64,
  /// SHA-256 of the destination content after the copy.
  pub hash: ContentHash,
}

/// Copy `src` into `dest_dir`, creating the directory (and parents) first.
///
/// An existing file with the same name is overwritten. Permissions and
/// timestamps are not guaranteed to carry over. The copy is not atomic: if the
/// process dies mid-copy the destination may be left truncated.
pub fn install(src: &Path, dest_dir: &Path) -> Result<InstalledArtifact, InstallError> {
  let file_name = src.file_name().ok_or_else(|| InstallError::NoFileName(src.to_path_buf()))?;

  fs::create_dir_all(dest_dir)?;
  let dest = dest_dir.join(file_name);

  // Copying a file onto itself (same path or a hard link) truncates it before
  // reading.
  let bytes = if is_same_file(src, &dest)? {
    debug!(path = %dest.display(), "artifact already in place");
    fs::metadata(&dest)?.len()
  } else {
    fs::copy(src, &dest)?
  };

  let hash = hash_file(&dest)?;
  info!(src = %src.display(), dest = %dest.display(), bytes, "artifact installed");

  Ok(InstalledArtifact {
    source: src.to_path_buf(),
    path: dest,
    bytes,
    hash,
  })
}

fn is_same_file(src: &Path, dest: &Path) -> io::Result<bool> {
  if !dest.exists() {
    return Ok(false);
  }
  same_file::is_same_file(src, dest)
}
