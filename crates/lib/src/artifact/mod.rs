//! Describing, locating and installing a compiled extension artifact.
//!
//! The locator is a pure query over a build tree; the installer copies what the
//! locator found into the directory the packaging layer imports from.

mod descriptor;
mod install;
mod locate;

pub use descriptor::ArtifactDescriptor;
pub use install::{InstallError, InstalledArtifact, install};
pub use locate::{LocateOptions, MatchPolicy, Traversal, candidates, locate, locate_with};
