//! CLI tests for `tspath` commands.
//!
//! Spawns the binary in a scratch directory and checks stdout and exit codes.

use std::process::{Command, Output};

use tspath::exit_codes;
use tspath::io::config::{EquivalenceConfig, TspathConfig, load_config, write_config};
use tspath::test_support::TestDir;

const WORKED_EXAMPLE: &str =
    "[leftonto(<0,0>), (leftonto(coordres) & leftonto(leftonto(coordres)))(<0,0>)]";

fn tspath(dir: &TestDir, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_tspath"))
        .current_dir(dir.path())
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .expect("run tspath")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).trim_end().to_string()
}

#[test]
fn resolve_prints_cadence_path() {
    let dir = TestDir::new();
    let output = tspath(&dir, &["resolve", "leftonto(<0,0>)"]);
    assert_eq!(output.status.code(), Some(exit_codes::OK));
    assert_eq!(stdout(&output), "[(-1,0), (0,0)]");
}

#[test]
fn stitch_prints_roman_names() {
    let dir = TestDir::new();
    let output = tspath(&dir, &["stitch", WORKED_EXAMPLE, "--format", "roman"]);
    assert_eq!(output.status.code(), Some(exit_codes::OK));
    assert_eq!(stdout(&output), "IV I IV bVII- IV I");
}

#[test]
fn stitch_reads_form_files() {
    let dir = TestDir::new();
    dir.write(
        "form.json",
        r#"{"cadences": [{"rightonto": {"point": [0, 0]}}, {"point": [0, 0]}]}"#,
    );
    let output = tspath(&dir, &["stitch", "--file", "form.json", "--format", "json"]);
    assert_eq!(output.status.code(), Some(exit_codes::OK));
    assert_eq!(stdout(&output), "[[1,0],[0,0],[0,0]]");
}

#[test]
fn configured_policy_changes_stitching() {
    let dir = TestDir::new();
    let cfg = TspathConfig {
        equivalence: EquivalenceConfig::PitchClass {
            weights: [7, 4],
            modulus: 12,
            metric: Default::default(),
        },
        ..TspathConfig::default()
    };
    write_config(&dir.path().join("tspath.toml"), &cfg).expect("write config");
    let output = tspath(&dir, &["stitch", "leftonto(<3,0>), <0,0>"]);
    assert_eq!(output.status.code(), Some(exit_codes::OK));
    assert_eq!(stdout(&output), "[(-2,1), (-1,1), (0,0)]");
}

#[test]
fn init_writes_loadable_default_config() {
    let dir = TestDir::new();
    let output = tspath(&dir, &["init"]);
    assert_eq!(output.status.code(), Some(exit_codes::OK));
    let cfg = load_config(&dir.path().join("tspath.toml")).expect("load");
    assert_eq!(cfg, TspathConfig::default());
}

#[test]
fn validate_exit_codes_grade_findings() {
    let dir = TestDir::new();
    dir.write("clean.json", r#"{"cadences": [{"point": [0, 0]}]}"#);
    dir.write("warn.json", r#"{"cadences": [{"leftonto": "coord_res"}]}"#);
    dir.write(
        "broken.json",
        r#"{"cadences": [{"coord": {"parts": [], "resolution": {"point": [0, 0]}}}]}"#,
    );
    dir.write("malformed.json", r#"{"cadences": [{"point": "origin"}]}"#);

    let clean = tspath(&dir, &["validate", "clean.json"]);
    assert_eq!(clean.status.code(), Some(exit_codes::OK));

    let warn = tspath(&dir, &["validate", "warn.json"]);
    assert_eq!(warn.status.code(), Some(exit_codes::WARNINGS));
    assert!(stdout(&warn).contains("warning: root/cadence[0]/leftonto"));

    let broken = tspath(&dir, &["validate", "broken.json"]);
    assert_eq!(broken.status.code(), Some(exit_codes::INVALID));
    assert!(stdout(&broken).contains("error: root/cadence[0]: coordination has no parts"));

    let malformed = tspath(&dir, &["validate", "malformed.json"]);
    assert_eq!(malformed.status.code(), Some(exit_codes::INVALID));
}

#[test]
fn bad_notation_reports_offset() {
    let dir = TestDir::new();
    let output = tspath(&dir, &["resolve", "leftonto(<0,0>"]);
    assert_eq!(output.status.code(), Some(exit_codes::INVALID));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("at offset 14"), "stderr: {stderr}");
}

#[test]
fn stray_placeholder_warns_on_stderr() {
    let dir = TestDir::new();
    let output = tspath(&dir, &["resolve", "rightonto(coordres)"]);
    assert_eq!(output.status.code(), Some(exit_codes::OK));
    assert_eq!(stdout(&output), "[(1,0), (0,0)]");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("coordres outside any coordination"), "stderr: {stderr}");
}

#[test]
fn deep_nesting_fails_cleanly() {
    let dir = TestDir::new();
    let depth = 5_000;
    let notation = format!("{}<0,0>{}", "leftonto(".repeat(depth), ")".repeat(depth));
    let output = tspath(&dir, &["stitch", &notation]);
    assert_eq!(output.status.code(), Some(exit_codes::INVALID));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("nesting too deep"), "stderr: {stderr}");
}

#[test]
fn huge_coordinates_fail_cleanly() {
    let dir = TestDir::new();
    let output = tspath(&dir, &["resolve", "leftonto(<-9223372036854775808,0>)"]);
    assert_eq!(output.status.code(), Some(exit_codes::INVALID));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("integer out of range"), "stderr: {stderr}");

    dir.write("far.json", r#"{"cadences": [{"point": [4611686018427387903, 0]}]}"#);
    let output = tspath(&dir, &["stitch", "--file", "far.json"]);
    assert_eq!(output.status.code(), Some(exit_codes::INVALID));
}
