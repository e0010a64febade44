//! Locate command integration tests.

use std::path::Path;

use predicates::prelude::*;

use super::common::TestEnv;

#[test]
fn prints_first_match() {
  let env = TestEnv::new();
  env.write_file("build/lib/mod_x64.so", b"so");
  env.write_file("build/obj/mod.o", b"o");

  env
    .cmd()
    .args(["locate", "build", "--name", "mod", "--suffix", ".so"])
    .assert()
    .success()
    .stdout(predicate::str::contains("mod_x64.so"))
    .stdout(predicate::str::contains("mod.o").not());
}

#[test]
fn no_match_exits_non_zero() {
  let env = TestEnv::new();
  env.write_file("build/obj.o", b"o");

  env
    .cmd()
    .args(["locate", "build", "-n", "mod", "-s", ".so", "-s", ".pyd"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("no artifact matching mod*{.so,.pyd}"));
}

#[test]
fn sorted_all_lists_every_match_in_order() {
  let env = TestEnv::new();
  env.write_file("build/b/mod.so", b"b");
  env.write_file("build/a/mod.so", b"a");

  let output = env
    .cmd()
    .args(["locate", "build", "-n", "mod", "-s", "so", "--sorted", "--all"])
    .output()
    .unwrap();
  assert!(output.status.success());

  let stdout = String::from_utf8(output.stdout).unwrap();
  let lines: Vec<_> = stdout.lines().collect();
  assert_eq!(lines.len(), 2);
  let parent_name = |line: &str| Path::new(line).parent().unwrap().file_name().unwrap().to_owned();
  assert_eq!(parent_name(lines[0]), "a");
  assert_eq!(parent_name(lines[1]), "b");
}

#[test]
fn json_reports_found_path() {
  let env = TestEnv::new();
  env.write_file("build/mod.pyd", b"pyd");

  let output = env
    .cmd()
    .args(["locate", "build", "-n", "mod", "-s", ".pyd", "-o", "json"])
    .output()
    .unwrap();
  assert!(output.status.success());

  let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
  assert!(report["found"].as_str().unwrap().ends_with("mod.pyd"));
  assert_eq!(report["descriptor"]["prefix"], "mod");
}
