//! Shared test helpers for CLI integration tests.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::TempDir;

/// Isolated project directory with a build tree and a package directory.
pub struct TestEnv {
  pub temp: TempDir,
}

impl TestEnv {
  pub fn new() -> Self {
    Self {
      temp: TempDir::new().unwrap(),
    }
  }

  pub fn path(&self) -> &Path {
    self.temp.path()
  }

  /// Write a file relative to the project directory, creating parents.
  pub fn write_file(&self, relative_path: &str, content: &[u8]) -> PathBuf {
    let path = self.temp.path().join(relative_path);
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, content).unwrap();
    path
  }

  pub fn write_manifest(&self, content: &str) -> PathBuf {
    self.write_file("extinstall.toml", content.as_bytes())
  }

  /// Command for the extinstall binary, running inside the project directory
  /// with the build environment overrides cleared.
  pub fn cmd(&self) -> Command {
    let mut cmd = cargo_bin_cmd!("extinstall");
    cmd
      .current_dir(self.temp.path())
      .env_remove("EXTINSTALL_BUILD_TYPE")
      .env_remove("EXTINSTALL_JOBS")
      .env_remove("EXTINSTALL_CMAKE")
      .env_remove("RUST_LOG");
    cmd
  }

  /// Install a fake `cmake` that records its arguments and, on `--build`,
  /// drops `file_name` into `<build_dir>/lib/`.
  #[cfg(unix)]
  pub fn fake_cmake(&self, file_name: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let script = format!(
      r#"#!/bin/sh
echo "$@" >> "{log}"
if [ "$1" = "--build" ]; then
  mkdir -p "$2/lib"
  printf 'compiled by fake cmake' > "$2/lib/{file_name}"
fi
exit 0
"#,
      log = self.path().join("cmake.log").display(),
    );
    let path = self.write_file("bin/cmake", script.as_bytes());
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
  }

  /// A fake `cmake` that always fails.
  #[cfg(unix)]
  pub fn failing_cmake(&self) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = self.write_file("bin/cmake", b"#!/bin/sh\necho 'CMake Error: boom' >&2\nexit 2\n");
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
  }

  pub fn read(&self, relative_path: &str) -> Vec<u8> {
    std::fs::read(self.path().join(relative_path)).unwrap()
  }
}
