// End-to-end runs of the `fscan` binary against on-disk fixtures.
use assert_cmd::prelude::*;
use assert_fs::prelude::*;
use predicates::prelude::*;
use serde_json::Value;
use std::process::Command;

mod util;

// Launch fscan inside `dir` so no stray config file is picked up.
fn fscan(dir: &assert_fs::TempDir) -> Command {
    let mut cmd = Command::cargo_bin("fscan").expect("bin");
    cmd.current_dir(dir.path()).arg("--no-color").env_remove("FSCAN_LOG");
    cmd
}

#[test]
fn test_scan_json_reports_each_sequence() {
    let tmp = util::make_shot_fixture();
    let root = util::root_of(&tmp);

    let assert = fscan(&tmp)
        .args(["scan", root.as_str(), "--format", "json"])
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8");
    let v: Value = serde_json::from_str(&stdout).expect("json");
    let seqs = v.as_array().expect("array of sequences");
    assert_eq!(seqs.len(), 2, "unexpected sequences: {stdout}");

    let beauty = seqs
        .iter()
        .find(|s| s["suffix"] == "")
        .expect("beauty sequence");
    assert_eq!(beauty["count"], 3);
    assert_eq!(beauty["padding"], 2);
    assert_eq!(beauty["missing"][0], format!("{root}/shot_003.exr"));

    let matte = seqs
        .iter()
        .find(|s| s["suffix"] == "_matte")
        .expect("matte sequence");
    assert_eq!(matte["count"], 2);
    assert_eq!(matte["missing"].as_array().map(Vec::len), Some(0));
}

#[test]
fn test_missing_prints_paths_and_check_fails() {
    let tmp = util::make_shot_fixture();
    let root = util::root_of(&tmp);
    let expected = format!("{root}/shot_003.exr");

    fscan(&tmp)
        .args(["missing", root.as_str(), "-e", "exr"])
        .assert()
        .success()
        .stdout(predicate::str::contains(expected.clone()));

    fscan(&tmp)
        .args(["missing", root.as_str(), "--check"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("1 missing frame(s)"));
}

#[test]
fn test_missing_with_explicit_range_and_step() {
    let tmp = util::make_frames(&["a_0.jpg", "a_2.jpg", "a_6.jpg", "a_10.jpg"]);
    let root = util::root_of(&tmp);

    let assert = fscan(&tmp)
        .args(["missing", root.as_str(), "--step", "2", "--start", "0", "--end", "10"])
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8");
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines, vec![format!("{root}/a_4.jpg"), format!("{root}/a_8.jpg")]);
}

#[test]
fn test_complete_sequence_reports_nothing_missing() {
    let tmp = util::make_frames(&["plate.1001.dpx", "plate.1002.dpx", "plate.1003.dpx"]);
    let root = util::root_of(&tmp);

    fscan(&tmp)
        .args(["missing", root.as_str(), "--check"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("No missing frames"));
}

#[test]
fn test_extension_filter_with_no_matches() {
    let tmp = util::make_frames(&["a_01.png", "a_02.png"]);
    let root = util::root_of(&tmp);

    fscan(&tmp)
        .args(["scan", root.as_str(), "-e", "jpg"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No sequences found"));
}

#[test]
fn test_unreadable_directory_fails() {
    let tmp = assert_fs::TempDir::new().expect("tempdir");
    let missing = tmp.path().join("does-not-exist");

    fscan(&tmp)
        .arg("scan")
        .arg(&missing)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to scan"));
}

#[test]
fn test_config_file_sets_default_extensions() {
    let tmp = util::make_frames(&["a_01.png", "a_02.png", "b_01.jpg"]);
    let root = util::root_of(&tmp);
    tmp.child("framescan.toml")
        .write_str("[scan]\nextensions = [\"jpg\"]\n")
        .expect("write config");

    let assert = fscan(&tmp)
        .args(["scan", root.as_str(), "--format", "json"])
        .assert()
        .success();
    let v: Value = serde_json::from_slice(&assert.get_output().stdout).expect("json");
    let seqs = v.as_array().expect("array");
    assert_eq!(seqs.len(), 1);
    assert_eq!(seqs[0]["extension"], "jpg");

    // Flags replace the configured list
    let assert = fscan(&tmp)
        .args(["scan", root.as_str(), "--format", "json", "-e", "png"])
        .assert()
        .success();
    let v: Value = serde_json::from_slice(&assert.get_output().stdout).expect("json");
    assert_eq!(v[0]["extension"], "png");
    assert_eq!(v[0]["count"], 2);
}

#[test]
fn test_parse_command_text() {
    let tmp = assert_fs::TempDir::new().expect("tempdir");

    fscan(&tmp)
        .args(["parse", "shot_0042_beauty.exr", "README"])
        .assert()
        .success()
        .stdout(predicate::str::contains("prefix=\"shot_\""))
        .stdout(predicate::str::contains("number=42"))
        .stdout(predicate::str::contains("padding=2"))
        .stdout(predicate::str::contains("README: no match"));
}

#[test]
fn test_init_writes_config_once() {
    let tmp = assert_fs::TempDir::new().expect("tempdir");

    fscan(&tmp).arg("init").assert().success();
    tmp.child("framescan.toml").assert(predicate::path::exists());
    tmp.child("framescan.toml")
        .assert(predicate::str::contains("[missing]"));

    fscan(&tmp)
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    fscan(&tmp).args(["init", "--force"]).assert().success();
}

#[test]
fn test_init_dry_run_prints_without_writing() {
    let tmp = assert_fs::TempDir::new().expect("tempdir");

    fscan(&tmp)
        .args(["init", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[scan]"));
    tmp.child("framescan.toml").assert(predicate::path::missing());

    // Read-only commands no longer take the flag
    fscan(&tmp).args(["scan", "--dry-run"]).assert().failure();
}

#[test]
fn test_missing_reports_off_grid_end_frame() {
    let tmp = util::make_frames(&["a_1.jpg"]);
    let root = util::root_of(&tmp);

    let assert = fscan(&tmp)
        .args(["missing", root.as_str(), "--step", "2", "--end", "6"])
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8");
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines, vec![format!("{root}/a_3.jpg"), format!("{root}/a_5.jpg"), format!("{root}/a_6.jpg")]);
}
