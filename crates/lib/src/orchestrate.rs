//! The build → locate → install pipeline.
//!
//! An [`Orchestrator`] is single-shot: `run` consumes it, so a pipeline can
//! never be re-entered. Stages only move forward:
//!
//! ```text
//! Building -> Locating -> Installing -> Done
//!     \           \            \
//!      +-----------+------------+----> Failed
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::artifact::{self, ArtifactDescriptor, InstallError, InstalledArtifact, LocateOptions, MatchPolicy};
use crate::build::{BuildError, BuildStep};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
  Building,
  Locating,
  Installing,
  Done,
  Failed,
}

impl fmt::Display for Stage {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let s = match self {
      Stage::Building => "building",
      Stage::Locating => "locating",
      Stage::Installing => "installing",
      Stage::Done => "done",
      Stage::Failed => "failed",
    };
    write!(f, "{}", s)
  }
}

/// Every way a run can fail. All of them are fatal.
#[derive(Debug, Error)]
pub enum RunError {
  /// The delegate build step failed; nothing was located or installed.
  #[error(transparent)]
  Build(#[from] BuildError),

  #[error(
    "no artifact matching {descriptor} found under {}; cannot install into {}",
    .root.display(),
    .dest.display()
  )]
  ArtifactNotFound {
    root: PathBuf,
    dest: PathBuf,
    descriptor: String,
  },

  #[error(
    "{} artifacts matching {descriptor} found under {}, expected exactly one:\n  {}",
    .matches.len(),
    .root.display(),
    list_paths(.matches)
  )]
  AmbiguousArtifact {
    root: PathBuf,
    descriptor: String,
    matches: Vec<PathBuf>,
  },

  #[error(transparent)]
  Install(#[from] InstallError),
}

fn list_paths(paths: &[PathBuf]) -> String {
  paths.iter().map(|p| p.display().to_string()).collect::<Vec<_>>().join("\n  ")
}

/// Drives one build → locate → install sequence.
#[derive(Debug)]
pub struct Orchestrator {
  stage: Stage,
  options: LocateOptions,
}

impl Default for Orchestrator {
  fn default() -> Self {
    Self::new(LocateOptions::default())
  }
}

impl Orchestrator {
  pub fn new(options: LocateOptions) -> Self {
    Self {
      stage: Stage::Building,
      options,
    }
  }

  pub fn stage(&self) -> Stage {
    self.stage
  }

  /// Run the build step, then locate the artifact under `root` and install it
  /// into `dest_dir`.
  pub fn run<B>(
    mut self,
    build_step: &B,
    root: &Path,
    descriptor: &ArtifactDescriptor,
    dest_dir: &Path,
  ) -> Result<InstalledArtifact, RunError>
  where
    B: BuildStep + ?Sized,
  {
    let result = self.drive(build_step, root, descriptor, dest_dir);
    match &result {
      Ok(installed) => {
        self.advance(Stage::Done);
        info!(path = %installed.path.display(), hash = %installed.hash, "install complete");
      }
      Err(err) => {
        let failed_in = self.stage;
        self.advance(Stage::Failed);
        error!(stage = %failed_in, error = %err, "run failed");
      }
    }
    result
  }

  fn drive<B>(
    &mut self,
    build_step: &B,
    root: &Path,
    descriptor: &ArtifactDescriptor,
    dest_dir: &Path,
  ) -> Result<InstalledArtifact, RunError>
  where
    B: BuildStep + ?Sized,
  {
    info!(step = %build_step.describe(), "building");
    build_step.run()?;

    self.advance(Stage::Locating);
    let src = self.select(root, descriptor, dest_dir)?;

    self.advance(Stage::Installing);
    Ok(artifact::install(&src, dest_dir)?)
  }

  fn select(&self, root: &Path, descriptor: &ArtifactDescriptor, dest_dir: &Path) -> Result<PathBuf, RunError> {
    let not_found = || RunError::ArtifactNotFound {
      root: root.to_path_buf(),
      dest: dest_dir.to_path_buf(),
      descriptor: descriptor.to_string(),
    };

    match self.options.policy {
      MatchPolicy::First => {
        artifact::locate_with(root, descriptor, self.options.traversal).ok_or_else(not_found)
      }
      MatchPolicy::Unique => {
        let mut matches: Vec<PathBuf> = artifact::candidates(root, descriptor, self.options.traversal).collect();
        match matches.len() {
          0 => Err(not_found()),
          1 => Ok(matches.remove(0)),
          n => {
            warn!(count = n, root = %root.display(), "ambiguous artifact");
            Err(RunError::AmbiguousArtifact {
              root: root.to_path_buf(),
              descriptor: descriptor.to_string(),
              matches,
            })
          }
        }
      }
    }
  }

  fn advance(&mut self, next: Stage) {
    debug_assert!(next > self.stage, "stage {} cannot follow {}", next, self.stage);
    debug!(from = %self.stage, to = %next, "stage transition");
    self.stage = next;
  }
}

/// Run the pipeline with first-match selection in filesystem order.
pub fn run<B>(
  build_step: &B,
  root: &Path,
  descriptor: &ArtifactDescriptor,
  dest_dir: &Path,
) -> Result<InstalledArtifact, RunError>
where
  B: BuildStep + ?Sized,
{
  Orchestrator::default().run(build_step, root, descriptor, dest_dir)
}
