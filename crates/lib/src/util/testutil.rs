//! Test helpers for building fake build trees.

use std::fs;
use std::path::{Path, PathBuf};

/// Write `content` to `root/relative`, creating parent directories.
pub fn write_tree_file(root: &Path, relative: &str, content: &[u8]) -> PathBuf {
  let path = root.join(relative);
  if let Some(parent) = path.parent() {
    fs::create_dir_all(parent).unwrap();
  }
  fs::write(&path, content).unwrap();
  path
}
