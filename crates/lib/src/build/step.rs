use std::io;
use std::process::Command;

use thiserror::Error;
use tracing::{debug, info};

/// Errors raised by a build step. The orchestrator forwards them untouched.
#[derive(Debug, Error)]
pub enum BuildError {
  /// The build program could not be started at all.
  #[error("failed to spawn {program}: {source}")]
  Spawn {
    program: String,
    #[source]
    source: io::Error,
  },

  /// The build program ran and exited unsuccessfully.
  #[error("command failed with exit code {code:?}: {cmd}")]
  CmdFailed { cmd: String, code: Option<i32> },

  /// Failure reported by a custom build step.
  #[error("{0}")]
  Failed(String),
}

/// Something that produces the build tree.
pub trait BuildStep {
  /// Short label used in logs.
  fn describe(&self) -> String {
    "build".to_string()
  }

  fn run(&self) -> Result<(), BuildError>;
}

impl<F> BuildStep for F
where
  F: Fn() -> Result<(), BuildError>,
{
  fn run(&self) -> Result<(), BuildError> {
    self()
  }
}

/// Build step for trees that were already produced by an external build.
#[derive(Debug, Clone, Copy, Default)]
pub struct Prebuilt;

impl BuildStep for Prebuilt {
  fn describe(&self) -> String {
    "prebuilt".to_string()
  }

  fn run(&self) -> Result<(), BuildError> {
    debug!("skipping build step, using existing tree");
    Ok(())
  }
}

/// Run `command` to completion, inheriting stdio so toolchain output reaches
/// the user.
pub fn run_command(mut command: Command) -> Result<(), BuildError> {
  let cmd = render(&command);
  info!(cmd = %cmd, "running");

  let status = command.status().map_err(|source| BuildError::Spawn {
    program: command.get_program().to_string_lossy().to_string(),
    source,
  })?;

  if !status.success() {
    return Err(BuildError::CmdFailed {
      cmd,
      code: status.code(),
    });
  }

  debug!(cmd = %cmd, "command succeeded");
  Ok(())
}

/// Render a command as a single shell-like line for logs and errors.
pub(crate) fn render(command: &Command) -> String {
  let mut parts = vec![command.get_program().to_string_lossy().to_string()];
  parts.extend(command.get_args().map(|a| a.to_string_lossy().to_string()));
  parts.join(" ")
}
