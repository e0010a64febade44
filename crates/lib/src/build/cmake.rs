//! CMake driver: configure into a build directory, then build it.

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::info;

use super::step::{BuildError, BuildStep, run_command};
use crate::consts::{DEFAULT_BUILD_TYPE, ENV_CMAKE};

/// Configure and build a CMake project out of tree.
///
/// Runs, in order:
///
/// ```text
/// cmake -S <source_dir> -B <build_dir> -DCMAKE_BUILD_TYPE=<type> <args...>
/// cmake --build <build_dir> --config <type> [--parallel <jobs>] [--target <t>...]
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CMakeBuild {
  pub cmake: PathBuf,
  pub source_dir: PathBuf,
  pub build_dir: PathBuf,
  pub build_type: String,
  pub args: Vec<String>,
  pub targets: Vec<String>,
  pub jobs: Option<usize>,
}

impl CMakeBuild {
  /// A Release build of `source_dir` into `build_dir`.
  ///
  /// The cmake executable is taken from `EXTINSTALL_CMAKE` when set, otherwise
  /// `cmake` is looked up on `PATH`.
  pub fn new(source_dir: impl Into<PathBuf>, build_dir: impl Into<PathBuf>) -> Self {
    let cmake = std::env::var_os(ENV_CMAKE)
      .map(PathBuf::from)
      .unwrap_or_else(|| PathBuf::from("cmake"));

    Self {
      cmake,
      source_dir: source_dir.into(),
      build_dir: build_dir.into(),
      build_type: DEFAULT_BUILD_TYPE.to_string(),
      args: Vec::new(),
      targets: Vec::new(),
      jobs: None,
    }
  }

  pub fn with_build_type(mut self, build_type: impl Into<String>) -> Self {
    self.build_type = build_type.into();
    self
  }

  pub fn with_args<I, S>(mut self, args: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.args.extend(args.into_iter().map(Into::into));
    self
  }

  pub fn with_targets<I, S>(mut self, targets: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.targets.extend(targets.into_iter().map(Into::into));
    self
  }

  pub fn with_jobs(mut self, jobs: Option<usize>) -> Self {
    self.jobs = jobs;
    self
  }

  pub fn with_cmake(mut self, cmake: impl AsRef<Path>) -> Self {
    self.cmake = cmake.as_ref().to_path_buf();
    self
  }

  pub fn configure_command(&self) -> Command {
    let mut command = Command::new(&self.cmake);
    command
      .arg("-S")
      .arg(&self.source_dir)
      .arg("-B")
      .arg(&self.build_dir)
      .arg(format!("-DCMAKE_BUILD_TYPE={}", self.build_type))
      .args(&self.args);
    command
  }

  pub fn build_command(&self) -> Command {
    let mut command = Command::new(&self.cmake);
    command
      .arg("--build")
      .arg(&self.build_dir)
      .arg("--config")
      .arg(&self.build_type);
    if let Some(jobs) = self.jobs {
      command.arg("--parallel").arg(jobs.to_string());
    }
    for target in &self.targets {
      command.arg("--target").arg(target);
    }
    command
  }
}

impl BuildStep for CMakeBuild {
  fn describe(&self) -> String {
    format!("cmake {}", self.source_dir.display())
  }

  fn run(&self) -> Result<(), BuildError> {
    info!(
      source = %self.source_dir.display(),
      build = %self.build_dir.display(),
      build_type = %self.build_type,
      "configuring cmake project"
    );
    run_command(self.configure_command())?;
    run_command(self.build_command())
  }
}
