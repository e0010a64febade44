//! Implementation of the `extinstall locate` command.
//!
//! Runs only the locator: prints the artifact that `build` would install, or
//! exits non-zero when nothing matches.

use std::path::Path;

use anyhow::{Result, bail};
use serde::Serialize;

use extinstall_lib::artifact::{ArtifactDescriptor, Traversal, candidates, locate_with};

use crate::output::OutputFormat;

#[derive(Serialize)]
struct LocateReport<'a> {
  root: &'a Path,
  descriptor: &'a ArtifactDescriptor,
  found: Option<&'a Path>,
  matches: Vec<String>,
}

pub fn cmd_locate(
  root: &Path,
  name: &str,
  suffixes: &[String],
  sorted: bool,
  all: bool,
  output: OutputFormat,
) -> Result<()> {
  let descriptor = if suffixes.is_empty() {
    ArtifactDescriptor::for_host(name)
  } else {
    ArtifactDescriptor::new(name, suffixes)
  };
  let traversal = if sorted { Traversal::Sorted } else { Traversal::Filesystem };

  let matches: Vec<_> = if all {
    candidates(root, &descriptor, traversal).collect()
  } else {
    locate_with(root, &descriptor, traversal).into_iter().collect()
  };

  let report = LocateReport {
    root,
    descriptor: &descriptor,
    found: matches.first().map(|p| p.as_path()),
    matches: matches.iter().map(|p| p.display().to_string()).collect(),
  };
  output.emit(&report, || {
    for path in &matches {
      println!("{}", path.display());
    }
  })?;

  if matches.is_empty() {
    bail!("no artifact matching {} found under {}", descriptor, root.display());
  }

  Ok(())
}
