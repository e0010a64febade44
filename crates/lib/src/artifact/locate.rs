//! Finding the artifact in a build tree.
//!
//! `candidates()` is a lazy walk that yields matching files as the traversal
//! reaches them; `locate()` takes the first one and stops walking.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};
use walkdir::WalkDir;

use super::ArtifactDescriptor;

/// Order in which a build tree is walked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Traversal {
  /// Directory-entry order as the filesystem returns it. Stable across runs on
  /// an unchanged tree, but not across platforms.
  #[default]
  Filesystem,
  /// Entries sorted by file name at every level.
  Sorted,
}

/// What to do when more than one file in the tree matches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchPolicy {
  /// Take the first match in traversal order and ignore the rest.
  #[default]
  First,
  /// Treat a second match as an error.
  Unique,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LocateOptions {
  pub traversal: Traversal,
  pub policy: MatchPolicy,
}

/// Lazily yield every regular file under `root` matching `descriptor`.
///
/// A missing root yields nothing. Entries that cannot be read are skipped.
pub fn candidates<'a>(
  root: &Path,
  descriptor: &'a ArtifactDescriptor,
  traversal: Traversal,
) -> impl Iterator<Item = PathBuf> + 'a {
  let walker = match traversal {
    Traversal::Filesystem => WalkDir::new(root),
    Traversal::Sorted => WalkDir::new(root).sort_by_file_name(),
  };

  walker
    .into_iter()
    .filter_map(|entry| match entry {
      Ok(entry) => Some(entry),
      Err(err) => {
        debug!(error = %err, "skipping unreadable entry");
        None
      }
    })
    .filter(|entry| entry.file_type().is_file())
    .filter(move |entry| {
      let matched = descriptor.matches(entry.path());
      trace!(path = %entry.path().display(), matched, "visited");
      matched
    })
    .map(|entry| entry.into_path())
}

/// First file under `root` matching `descriptor`, walking in filesystem order.
pub fn locate(root: &Path, descriptor: &ArtifactDescriptor) -> Option<PathBuf> {
  locate_with(root, descriptor, Traversal::default())
}

pub fn locate_with(root: &Path, descriptor: &ArtifactDescriptor, traversal: Traversal) -> Option<PathBuf> {
  let found = candidates(root, descriptor, traversal).next();
  match &found {
    Some(path) => debug!(root = %root.display(), path = %path.display(), "artifact located"),
    None => debug!(root = %root.display(), %descriptor, "no artifact matched"),
  }
  found
}
