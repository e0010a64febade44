//! Implementation of the `extinstall install` command.

use std::path::Path;

use anyhow::{Context, Result};

use extinstall_lib::artifact::install;

use crate::output::{Mark, OutputFormat, artifact_fields, status};

pub fn cmd_install(src: &Path, dest_dir: &Path, output: OutputFormat) -> Result<()> {
  let installed = install(src, dest_dir)
    .with_context(|| format!("Failed to install {} into {}", src.display(), dest_dir.display()))?;

  output.emit(&installed, || {
    status(Mark::Done, format_args!("Installed {}", installed.path.display()));
    artifact_fields(&installed);
  })
}
