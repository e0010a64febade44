//! How commands report to the terminal.
//!
//! Every command produces a serializable report. In JSON mode the report is
//! the whole output; in text mode the command prints status lines and the
//! fields worth a human's attention.

use std::fmt;
use std::time::Duration;

use anyhow::Context;
use clap::ValueEnum;
use owo_colors::{OwoColorize, Stream};
use serde::Serialize;

use extinstall_lib::artifact::InstalledArtifact;

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
  #[default]
  Text,
  Json,
}

impl OutputFormat {
  pub fn is_json(self) -> bool {
    matches!(self, OutputFormat::Json)
  }

  /// Print `report` as JSON, or run `text` to describe it for humans.
  pub fn emit<T: Serialize>(self, report: &T, text: impl FnOnce()) -> anyhow::Result<()> {
    match self {
      OutputFormat::Json => {
        let json = serde_json::to_string_pretty(report).context("Failed to serialize report")?;
        println!("{json}");
      }
      OutputFormat::Text => text(),
    }
    Ok(())
  }
}

/// Leading marker of a status line.
#[derive(Debug, Clone, Copy)]
pub enum Mark {
  Step,
  Done,
}

pub fn status(mark: Mark, message: impl fmt::Display) {
  let glyph = match mark {
    Mark::Step => "•".if_supports_color(Stream::Stdout, |s| s.blue()).to_string(),
    Mark::Done => "✓".if_supports_color(Stream::Stdout, |s| s.green()).to_string(),
  };
  println!("{glyph} {message}");
}

/// An indented `label: value` line under a status line.
pub fn field(label: &str, value: impl fmt::Display) {
  println!("  {}: {value}", label.if_supports_color(Stream::Stdout, |s| s.dimmed()));
}

/// Size, short hash and source of an installed artifact.
pub fn artifact_fields(artifact: &InstalledArtifact) {
  field("Source", artifact.source.display());
  field("Size", Size(artifact.bytes));
  field("SHA-256", short_hash(&artifact.hash.0));
}

/// Leading hex digits of a hash, enough to tell artifacts apart at a glance.
pub fn short_hash(hash: &str) -> &str {
  hash.get(..12).unwrap_or(hash)
}

/// A byte count in binary units, one decimal above 1 KB.
#[derive(Debug, Clone, Copy)]
pub struct Size(pub u64);

impl fmt::Display for Size {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    const UNITS: [&str; 3] = ["KB", "MB", "GB"];

    if self.0 < 1024 {
      return write!(f, "{} B", self.0);
    }
    let mut value = self.0 as f64 / 1024.0;
    let mut unit = 0;
    while value >= 1024.0 && unit + 1 < UNITS.len() {
      value /= 1024.0;
      unit += 1;
    }
    write!(f, "{value:.1} {}", UNITS[unit])
  }
}

/// Wall-clock time to millisecond precision, e.g. `1m 5s` or `1s 500ms`.
pub fn elapsed(duration: Duration) -> String {
  let millis = Duration::from_millis(duration.as_millis() as u64);
  humantime::format_duration(millis).to_string()
}
