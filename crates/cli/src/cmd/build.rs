//! Implementation of the `extinstall build` command.
//!
//! Loads the extension manifest and, for each selected extension, runs the
//! CMake build, locates the compiled module and installs it where the package
//! imports it from. The first failure aborts the whole command.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use extinstall_lib::artifact::InstalledArtifact;
use extinstall_lib::consts::MANIFEST_FILENAME;
use extinstall_lib::manifest::{Manifest, PlanOptions};

use crate::output::{Mark, OutputFormat, artifact_fields, elapsed, field, status};

#[derive(Serialize)]
struct ExtensionReport {
  name: String,
  installed: Option<InstalledArtifact>,
}

pub fn cmd_build(manifest_path: &Path, only: Vec<String>, skip_build: bool, output: OutputFormat) -> Result<()> {
  let start = Instant::now();

  let manifest = Manifest::load(&resolve_manifest_path(manifest_path))?;
  let plans = manifest.plan(&PlanOptions { only, skip_build })?;
  info!(count = plans.len(), "extensions planned");

  let mut reports = Vec::with_capacity(plans.len());
  for plan in &plans {
    if !output.is_json() {
      status(Mark::Step, format_args!("Building {}", plan.name));
    }

    let installed = plan
      .execute()
      .with_context(|| format!("Failed to build extension {}", plan.name))?;

    if !output.is_json() {
      match &installed {
        Some(artifact) => {
          status(Mark::Done, format_args!("{} → {}", plan.name, artifact.path.display()));
          artifact_fields(artifact);
        }
        None => status(Mark::Done, format_args!("{} built (not installed)", plan.name)),
      }
    }

    reports.push(ExtensionReport {
      name: plan.name.clone(),
      installed,
    });
  }

  output.emit(&reports, || {
    println!();
    status(Mark::Done, "Build complete!");
    field("Extensions", reports.len());
    field("Duration", elapsed(start.elapsed()));
  })
}

/// A directory argument means `<dir>/extinstall.toml`.
fn resolve_manifest_path(arg: &Path) -> PathBuf {
  if arg.is_dir() {
    arg.join(MANIFEST_FILENAME)
  } else {
    arg.to_path_buf()
  }
}
