mod cmd;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use extinstall_lib::consts::MANIFEST_FILENAME;

use crate::cmd::{cmd_build, cmd_info, cmd_install, cmd_locate};
use crate::output::OutputFormat;

/// extinstall - build native extensions and install them where the package imports them
#[derive(Parser)]
#[command(name = "extinstall")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable debug logging (overridden by RUST_LOG)
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Build every extension in the manifest and install its artifact
  Build {
    /// Manifest file, or a directory containing extinstall.toml
    #[arg(short, long, default_value = MANIFEST_FILENAME)]
    manifest: PathBuf,

    /// Only build the named extension (repeatable)
    #[arg(short, long = "ext", value_name = "NAME")]
    ext: Vec<String>,

    /// Skip the CMake step and install from the existing build tree
    #[arg(long)]
    no_build: bool,

    /// Output format
    #[arg(short = 'o', long, value_enum, default_value = "text")]
    output: OutputFormat,
  },

  /// Find the artifact in a build tree without installing it
  Locate {
    /// Root of the build tree to search
    root: PathBuf,

    /// Module name the artifact's file name starts with
    #[arg(short, long)]
    name: String,

    /// Accepted file suffix (repeatable); defaults to the host's extension suffixes
    #[arg(short, long = "suffix", value_name = "SUFFIX")]
    suffix: Vec<String>,

    /// Walk directories in file-name order instead of filesystem order
    #[arg(long)]
    sorted: bool,

    /// List every match instead of the first one
    #[arg(long)]
    all: bool,

    /// Output format
    #[arg(short = 'o', long, value_enum, default_value = "text")]
    output: OutputFormat,
  },

  /// Copy a built artifact into a destination directory
  Install {
    /// The artifact to copy
    src: PathBuf,

    /// Directory to place it in (created if missing)
    dest_dir: PathBuf,

    /// Output format
    #[arg(short = 'o', long, value_enum, default_value = "text")]
    output: OutputFormat,
  },

  /// Show the host platform and its extension suffixes
  Info,
}

fn main() -> Result<()> {
  let cli = Cli::parse();

  let default_level = if cli.verbose { "debug" } else { "warn" };
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  match cli.command {
    Commands::Build {
      manifest,
      ext,
      no_build,
      output,
    } => cmd_build(&manifest, ext, no_build, output),
    Commands::Locate {
      root,
      name,
      suffix,
      sorted,
      all,
      output,
    } => cmd_locate(&root, &name, &suffix, sorted, all, output),
    Commands::Install { src, dest_dir, output } => cmd_install(&src, &dest_dir, output),
    Commands::Info => {
      cmd_info();
      Ok(())
    }
  }
}
