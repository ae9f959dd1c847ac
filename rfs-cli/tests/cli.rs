//! End-to-end tests for the `rfs` binary over piped stdin.

use std::fs;

use assert_cmd::Command;
use tempfile::tempdir;

fn rfs() -> Command {
    let mut cmd = Command::cargo_bin("rfs").unwrap();
    cmd.env("RUST_LOG", "warn");
    cmd
}

#[test]
fn banner_then_demo_listing() {
    let assert = rfs().write_stdin("ls\nquit\n").assert().success();
    let output = assert.get_output();
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    let banner = stdout.find("exit, quit").expect("missing usage banner");
    let listing = stdout.find("README (file)").expect("missing listing");
    assert!(banner < listing, "unexpected output ordering: {stdout:?}");
    assert!(stdout.contains("Coleridge (directory)"));
    assert!(stderr.trim().is_empty(), "unexpected stderr: {stderr:?}");
}

#[test]
fn quiet_suppresses_banner() {
    let assert = rfs()
        .arg("--quiet")
        .write_stdin("pwd\n")
        .assert()
        .success();
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    assert!(!stdout.contains("exit, quit"), "banner printed: {stdout:?}");
    assert!(stdout.contains("> /\n"), "missing pwd output: {stdout:?}");
}

#[test]
fn grammar_error_sets_exit_status() {
    let assert = rfs()
        .args(["--quiet", "--empty"])
        .write_stdin("frobnicate\nls\n")
        .assert()
        .code(1);
    let stderr = String::from_utf8_lossy(&assert.get_output().stderr);
    assert!(
        stderr.contains("error: unknown command 'frobnicate'"),
        "missing diagnostic: {stderr:?}"
    );
}

#[test]
fn operation_failures_keep_status_zero() {
    let assert = rfs()
        .args(["--quiet", "--empty"])
        .write_stdin("cat missing\nrm missing\nmkdir a a\n")
        .assert()
        .success();
    let stderr = String::from_utf8_lossy(&assert.get_output().stderr);
    assert!(stderr.contains("missing: no such file\n"));
    assert!(stderr.contains("missing: no such file or directory\n"));
    assert!(stderr.contains("a: exists already\n"));
}

#[test]
fn long_line_is_rejected() {
    let input = format!("mkdir {}\n", "n".repeat(64));
    let assert = rfs()
        .args(["--quiet", "--empty", "--max-line", "32"])
        .write_stdin(input)
        .assert()
        .code(1);
    let stderr = String::from_utf8_lossy(&assert.get_output().stderr);
    assert!(stderr.contains("error: input line too long"));
}

#[test]
fn script_and_seed_files() {
    let dir = tempdir().unwrap();
    let seed = dir.path().join("tree.json");
    fs::write(
        &seed,
        r#"{"entries": [{"type": "directory", "name": "notes",
            "entries": [{"type": "file", "name": "todo", "lines": ["milk"]}]}]}"#,
    )
    .unwrap();
    let script = dir.path().join("cmds.txt");
    fs::write(&script, "cd notes\nwrite todo eggs bread\ncat todo\npwd\n").unwrap();

    let assert = rfs()
        .arg("--quiet")
        .arg("--seed")
        .arg(&seed)
        .arg("--script")
        .arg(&script)
        .assert()
        .success();
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    assert_eq!(stdout, "eggs\nbread\n/notes\n");
}

#[test]
fn bad_seed_fails_startup() {
    let dir = tempdir().unwrap();
    let seed = dir.path().join("broken.json");
    fs::write(&seed, "{ not json").unwrap();

    let assert = rfs().arg("--seed").arg(&seed).assert().failure();
    let stderr = String::from_utf8_lossy(&assert.get_output().stderr);
    assert!(stderr.contains("failed to load seed"), "stderr: {stderr:?}");
}

#[test]
fn seed_conflicts_with_empty() {
    rfs()
        .args(["--empty", "--seed", "x.json"])
        .assert()
        .failure();
}
