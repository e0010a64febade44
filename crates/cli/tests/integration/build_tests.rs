//! Build command integration tests.

use predicates::prelude::*;

use super::common::TestEnv;

const PREBUILT_MANIFEST: &str = r#"
dest_dir = "pkg"

[[extension]]
name = "mod"
suffixes = [".so"]
"#;

#[test]
fn installs_artifact_from_existing_tree() {
  let env = TestEnv::new();
  env.write_manifest(PREBUILT_MANIFEST);
  env.write_file("build/mod/lib/mod_x64.so", b"shared object");

  env
    .cmd()
    .args(["build", "--no-build"])
    .assert()
    .success()
    .stdout(predicate::str::contains("Build complete"));

  assert_eq!(env.read("pkg/mod_x64.so"), b"shared object");
}

#[test]
fn missing_artifact_fails_with_both_paths() {
  let env = TestEnv::new();
  env.write_manifest(PREBUILT_MANIFEST);
  env.write_file("build/mod/obj.o", b"object");

  env
    .cmd()
    .args(["build", "--no-build"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("no artifact matching mod*{.so}"))
    .stderr(predicate::str::contains("build"))
    .stderr(predicate::str::contains("pkg"));

  assert!(!env.path().join("pkg").exists());
}

#[test]
fn json_output_reports_installed_artifact() {
  let env = TestEnv::new();
  env.write_manifest(PREBUILT_MANIFEST);
  env.write_file("build/mod/mod.so", b"x");

  let output = env
    .cmd()
    .args(["build", "--no-build", "-o", "json"])
    .output()
    .unwrap();
  assert!(output.status.success());

  let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
  assert_eq!(report[0]["name"], "mod");
  assert_eq!(report[0]["installed"]["bytes"], 1);
}

#[test]
fn unknown_extension_is_rejected() {
  let env = TestEnv::new();
  env.write_manifest(PREBUILT_MANIFEST);

  env
    .cmd()
    .args(["build", "--no-build", "--ext", "other"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("no extension named other"));
}

#[test]
fn strict_policy_rejects_two_artifacts() {
  let env = TestEnv::new();
  env.write_manifest(
    r#"
dest_dir = "pkg"
policy = "unique"

[[extension]]
name = "mod"
suffixes = [".so"]
"#,
  );
  env.write_file("build/mod/a/mod.so", b"a");
  env.write_file("build/mod/b/mod.so", b"b");

  env
    .cmd()
    .args(["build", "--no-build"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("expected exactly one"));
}

#[cfg(unix)]
#[test]
fn runs_cmake_then_installs() {
  let env = TestEnv::new();
  let cmake = env.fake_cmake("mod.cpython-312-x86_64-linux-gnu.so");
  env.write_manifest(
    r#"
dest_dir = "python/pkg"
jobs = 2

[[extension]]
name = "mod"
suffixes = [".so"]
cmake_args = ["-DBUILD_TESTS=OFF"]
"#,
  );

  env
    .cmd()
    .env("EXTINSTALL_CMAKE", &cmake)
    .env("EXTINSTALL_BUILD_TYPE", "Debug")
    .arg("build")
    .assert()
    .success();

  assert_eq!(
    env.read("python/pkg/mod.cpython-312-x86_64-linux-gnu.so"),
    b"compiled by fake cmake"
  );

  let log = String::from_utf8(env.read("cmake.log")).unwrap();
  let mut lines = log.lines();
  let configure = lines.next().unwrap();
  assert!(configure.starts_with("-S "), "{configure}");
  assert!(configure.contains("-DCMAKE_BUILD_TYPE=Debug -DBUILD_TESTS=OFF"), "{configure}");
  let build = lines.next().unwrap();
  assert!(build.starts_with("--build "), "{build}");
  assert!(build.ends_with("--config Debug --parallel 2"), "{build}");
}

#[cfg(unix)]
#[test]
fn cmake_failure_aborts_before_install() {
  let env = TestEnv::new();
  let cmake = env.failing_cmake();
  env.write_manifest(PREBUILT_MANIFEST);
  env.write_file("build/mod/mod.so", b"stale artifact");

  env
    .cmd()
    .env("EXTINSTALL_CMAKE", &cmake)
    .arg("build")
    .assert()
    .failure()
    .code(1)
    .stderr(predicate::str::contains("command failed with exit code Some(2)"));

  assert!(!env.path().join("pkg").exists());
}

#[cfg(unix)]
#[test]
fn build_only_extension_is_not_installed() {
  let env = TestEnv::new();
  let cmake = env.fake_cmake("tool.so");
  env.write_manifest(
    r#"
dest_dir = "pkg"

[[extension]]
name = "tool"
install = false
suffixes = [".so"]
"#,
  );

  env
    .cmd()
    .env("EXTINSTALL_CMAKE", &cmake)
    .arg("build")
    .assert()
    .success()
    .stdout(predicate::str::contains("not installed"));

  assert!(env.path().join("build/tool/lib/tool.so").exists());
  assert!(!env.path().join("pkg").exists());
}
