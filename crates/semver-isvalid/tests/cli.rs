//! End-to-end CLI integration tests
//!
//! These tests invoke the compiled binary as a subprocess to verify
//! the printed diagnostics and exit codes scripted callers depend on.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Returns a Command configured to run our binary in an empty directory,
/// so no project config file is picked up.
#[allow(deprecated)]
fn cmd(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin(env!("CARGO_PKG_NAME")).unwrap();
    cmd.current_dir(dir.path())
        .env_remove("RUST_LOG")
        .env_remove("SEMVER_ISVALID_LOG_PATH")
        .env_remove("SEMVER_ISVALID_LOG_DIR")
        .args(["--color", "never"]);
    cmd
}

fn check(version: &str) -> assert_cmd::assert::Assert {
    let tmp = TempDir::new().unwrap();
    cmd(&tmp).arg(version).assert()
}

// =============================================================================
// Help & Version
// =============================================================================

#[test]
fn no_arguments_prints_help_and_succeeds() {
    let tmp = TempDir::new().unwrap();
    cmd(&tmp)
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("--with-v"))
        .stdout(predicate::str::contains("EXIT CODES:"));
}

#[test]
fn help_flag_shows_usage() {
    let tmp = TempDir::new().unwrap();
    cmd(&tmp)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("Options:"));
}

#[test]
fn version_flag_shows_version() {
    let tmp = TempDir::new().unwrap();
    cmd(&tmp)
        .arg("-V")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

// =============================================================================
// Valid Versions
// =============================================================================

#[test]
fn valid_version_reports_segments_in_order() {
    check("1.2.3").success().stdout(
        "Found major version of 1\n\
         Found minor version of 2\n\
         Found patch version of 3\n\
         Semantic Version is valid\n",
    );
}

#[test]
fn pre_release_and_metadata_notices() {
    check("1.2.0-x.Y.0+metadata")
        .success()
        .stdout(predicate::str::contains("pre-release identifier of \"x.Y.0\""))
        .stdout(predicate::str::contains("NOTICE: A pre-release version"))
        .stdout(predicate::str::contains("Found build metadata on version of \"metadata\""))
        .stdout(predicate::str::contains("NOTICE: Build metadata MUST be ignored"));
}

#[test]
fn metadata_with_leading_zero_is_valid() {
    check("1.2.3+build.01").success();
}

// =============================================================================
// Exit Codes
// =============================================================================

#[test]
fn two_versions_exit_one() {
    let tmp = TempDir::new().unwrap();
    cmd(&tmp)
        .args(["1.2.3", "1.2.4"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "1 argument required but found 2",
        ));
}

#[test]
fn empty_string_exits_three() {
    check("")
        .code(3)
        .stdout("")
        .stderr(predicate::str::contains(
            "Invalid Semantic Version: Version string empty. For more information see https://semver.org",
        ));
}

#[test]
fn wrong_part_count_exits_four() {
    check("1.2")
        .code(4)
        .stdout("Found 2 number of parts\n")
        .stderr(predicate::str::contains("Version does not have 3 parts"));
}

#[test]
fn non_numeric_patch_exits_five() {
    check("1.2.beta")
        .code(5)
        .stdout("Illegal non-numeric characters found in \"patch\" part\n")
        .stderr(predicate::str::contains("Invalid characters in version"));
}

#[test]
fn leading_zero_patch_exits_six() {
    check("1.2.03")
        .code(6)
        .stdout("Illegal leading 0 found in \"patch\" part\n")
        .stderr(predicate::str::contains("Version segment starts with 0"));
}

#[test]
fn leading_zero_pre_release_exits_six() {
    check("1.2.3-alpha.01").code(6).stdout(predicate::str::contains(
        "Illegal leading 0 found in pre-release numeric part \"01\"",
    ));
}

#[test]
fn empty_segment_exits_two() {
    check("1..3")
        .code(2)
        .stdout(predicate::str::contains("Unable to parse minor part"));
}

#[test]
fn overflowing_segment_exits_two() {
    check("99999999999999999999.0.0")
        .code(2)
        .stderr(predicate::str::contains("exceeds 64-bit range"));
}

// =============================================================================
// --with-v
// =============================================================================

#[test]
fn leading_v_is_invalid_by_default() {
    check("v1.2.3")
        .code(5)
        .stdout(predicate::str::contains("\"major\" part"));
}

#[test]
fn with_v_strips_one_leading_v() {
    let tmp = TempDir::new().unwrap();
    cmd(&tmp)
        .args(["--with-v", "v1.2.3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Found major version of 1"));

    cmd(&tmp).args(["vv1.2.3", "--with-v"]).assert().code(5);
}

// =============================================================================
// JSON Output
// =============================================================================

#[test]
fn json_outputs_report() {
    let tmp = TempDir::new().unwrap();
    let output = cmd(&tmp).args(["--json", "1.2.3-rc.1"]).assert().success();

    let stdout = String::from_utf8_lossy(&output.get_output().stdout);
    let json: serde_json::Value =
        serde_json::from_str(&stdout).expect("--json should output valid JSON");

    assert_eq!(json["version"], "1.2.3-rc.1");
    assert_eq!(json["outcome"], "valid");
    assert_eq!(json["parsed"]["major"], 1);
    assert_eq!(json["parsed"]["pre"], "rc.1");
}

#[test]
fn json_keeps_exit_code() {
    let tmp = TempDir::new().unwrap();
    let output = cmd(&tmp).args(["--json", "1.2.03"]).assert().code(6);

    let stdout = String::from_utf8_lossy(&output.get_output().stdout);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["valid"], false);
    assert_eq!(json["outcome"], "leading-zero-segment");
    assert_eq!(json["diagnostics"][0], "Illegal leading 0 found in \"patch\" part");
}

// =============================================================================
// Global Flags
// =============================================================================

#[test]
fn logging_flags_do_not_touch_stdout() {
    let tmp = TempDir::new().unwrap();
    for flag in ["-q", "-v", "-vv"] {
        cmd(&tmp)
            .args([flag, "1.2.3"])
            .assert()
            .success()
            .stdout(predicate::str::starts_with("Found major version of 1\n"));
    }
}

#[test]
fn invalid_flag_exits_one() {
    let tmp = TempDir::new().unwrap();
    cmd(&tmp)
        .arg("--bogus")
        .assert()
        .code(1)
        .stdout("")
        .stderr(predicate::str::contains("error:"));
}

#[test]
fn dash_prefixed_version_needs_separator() {
    let tmp = TempDir::new().unwrap();
    cmd(&tmp).arg("-1.2.3").assert().code(1);

    cmd(&tmp)
        .args(["--", "-1.2.3"])
        .assert()
        .code(5)
        .stdout(predicate::str::contains("\"major\" part"));
}

#[test]
fn malformed_config_exits_seven() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join(".semver-isvalid.toml"), "with_v = \"yes\"\n").unwrap();

    cmd(&tmp)
        .arg("1.2.3")
        .assert()
        .code(7)
        .stdout("")
        .stderr(predicate::str::contains("failed to load configuration"));
}

#[test]
fn chdir_nonexistent_exits_seven() {
    let tmp = TempDir::new().unwrap();
    cmd(&tmp)
        .args(["-C", "/nonexistent/path/that/does/not/exist", "1.2.3"])
        .assert()
        .code(7)
        .stderr(predicate::str::contains("failed to change directory"));
}
