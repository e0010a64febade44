//! Turning declarations into runnable build plans.

use std::path::PathBuf;

use serde::Serialize;
use tracing::info;

use super::types::{Extension, Manifest, ManifestError};
use crate::artifact::{ArtifactDescriptor, InstalledArtifact, LocateOptions};
use crate::build::{BuildStep, CMakeBuild, Prebuilt};
use crate::consts::{DEFAULT_BUILD_TYPE, ENV_BUILD_TYPE, ENV_JOBS};
use crate::orchestrate::{Orchestrator, RunError};

/// Options that apply to every extension in one invocation.
#[derive(Debug, Clone, Default)]
pub struct PlanOptions {
  /// Only plan these extensions; all of them when empty.
  pub only: Vec<String>,
  /// Skip the CMake step and install from an existing tree.
  pub skip_build: bool,
}

/// Everything needed to build and install one extension.
#[derive(Debug, Clone, Serialize)]
pub struct ExtensionPlan {
  pub name: String,
  pub build_dir: PathBuf,
  pub dest_dir: PathBuf,
  pub install: bool,
  pub descriptor: ArtifactDescriptor,
  pub locate: LocateOptions,
  #[serde(skip)]
  pub cmake: CMakeBuild,
  pub skip_build: bool,
}

impl Manifest {
  /// Plan the selected extensions in declaration order.
  ///
  /// `EXTINSTALL_BUILD_TYPE` and `EXTINSTALL_JOBS` take precedence over the
  /// manifest when set.
  pub fn plan(&self, options: &PlanOptions) -> Result<Vec<ExtensionPlan>, ManifestError> {
    for name in &options.only {
      self.extension(name)?;
    }

    let jobs = self.resolved_jobs()?;
    let env_build_type = std::env::var(ENV_BUILD_TYPE).ok().filter(|v| !v.trim().is_empty());

    Ok(
      self
        .extensions
        .iter()
        .filter(|ext| options.only.is_empty() || options.only.contains(&ext.name))
        .map(|ext| self.plan_one(ext, env_build_type.as_deref(), jobs, options.skip_build))
        .collect(),
    )
  }

  fn plan_one(&self, ext: &Extension, env_build_type: Option<&str>, jobs: usize, skip_build: bool) -> ExtensionPlan {
    let build_dir = self.build_dir_for(ext);
    let build_type = env_build_type
      .or(ext.build_type.as_deref())
      .unwrap_or(DEFAULT_BUILD_TYPE);

    let cmake = CMakeBuild::new(self.resolve(&ext.source_dir), &build_dir)
      .with_build_type(build_type)
      .with_args(ext.cmake_args.iter().cloned())
      .with_targets(ext.targets.iter().cloned())
      .with_jobs(Some(jobs));

    ExtensionPlan {
      name: ext.name.clone(),
      dest_dir: self.dest_dir_for(ext),
      build_dir,
      install: ext.install,
      descriptor: ext.descriptor(),
      locate: self.locate_options(),
      cmake,
      skip_build,
    }
  }

  fn resolved_jobs(&self) -> Result<usize, ManifestError> {
    if let Ok(value) = std::env::var(ENV_JOBS) {
      return match value.trim().parse::<usize>() {
        Ok(jobs) if jobs > 0 => Ok(jobs),
        _ => Err(ManifestError::InvalidEnv { var: ENV_JOBS, value }),
      };
    }
    Ok(self.jobs.unwrap_or_else(num_cpus))
  }
}

impl ExtensionPlan {
  fn build_step(&self) -> &dyn BuildStep {
    if self.skip_build {
      return &Prebuilt;
    }
    &self.cmake
  }

  /// Build the extension, then install its artifact unless `install = false`.
  ///
  /// Returns `None` for build-only extensions.
  pub fn execute(&self) -> Result<Option<InstalledArtifact>, RunError> {
    if !self.install {
      info!(extension = %self.name, "building without install");
      self.build_step().run()?;
      return Ok(None);
    }

    info!(extension = %self.name, dest = %self.dest_dir.display(), "building and installing");
    Orchestrator::new(self.locate)
      .run(self.build_step(), &self.build_dir, &self.descriptor, &self.dest_dir)
      .map(Some)
  }
}

fn num_cpus() -> usize {
  std::thread::available_parallelism().map(|p| p.get()).unwrap_or(4)
}
