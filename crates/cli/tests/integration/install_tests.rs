//! Install command integration tests.

use predicates::prelude::*;

use super::common::TestEnv;

#[test]
fn copies_into_missing_directory() {
  let env = TestEnv::new();
  env.write_file("build/lib/mod.so", b"module bytes");

  env
    .cmd()
    .args(["install", "build/lib/mod.so", "pkg/sub"])
    .assert()
    .success()
    .stdout(predicate::str::contains("Installed"));

  assert_eq!(env.read("pkg/sub/mod.so"), b"module bytes");
}

#[test]
fn second_install_overwrites() {
  let env = TestEnv::new();
  env.write_file("build/mod.so", b"v1");
  env.cmd().args(["install", "build/mod.so", "pkg"]).assert().success();

  env.write_file("build/mod.so", b"version two");
  env.cmd().args(["install", "build/mod.so", "pkg"]).assert().success();

  assert_eq!(env.read("pkg/mod.so"), b"version two");
}

#[test]
fn missing_source_fails() {
  let env = TestEnv::new();

  env
    .cmd()
    .args(["install", "build/gone.so", "pkg"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("Failed to install"));
}
