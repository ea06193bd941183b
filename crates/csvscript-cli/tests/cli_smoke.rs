//! CLI binary smoke tests using assert_cmd.
//!
//! These tests exercise the compiled `csvscript` binary to verify that
//! argument parsing, CSV output, and error handling work end-to-end.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;

fn cmd() -> Command {
    Command::cargo_bin("csvscript").unwrap()
}

fn write(dir: &Path, name: &str, text: &str) -> String {
    let path = dir.join(name);
    fs::write(&path, text).unwrap();
    path.to_str().unwrap().to_string()
}

// ---------------------------------------------------------------------------
// Top-level
// ---------------------------------------------------------------------------

#[test]
fn no_args_shows_help() {
    cmd()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn help_flag() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("run"))
        .stdout(predicate::str::contains("transpose"))
        .stdout(predicate::str::contains("multiply"));
}

#[test]
fn version_flag() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("csvscript"));
}

// ---------------------------------------------------------------------------
// Matrix commands
// ---------------------------------------------------------------------------

#[test]
fn shape_prints_rows_and_cols() {
    let dir = tempfile::tempdir().unwrap();
    let a = write(dir.path(), "a.csv", "1,2,3\n4,5,6\n");
    cmd()
        .args(["shape", a.as_str()])
        .assert()
        .success()
        .stdout("2 x 3\n");
}

#[test]
fn transpose_to_stdout() {
    let dir = tempfile::tempdir().unwrap();
    let a = write(dir.path(), "a.csv", "1,2\n3,4\n");
    cmd()
        .args(["transpose", a.as_str()])
        .assert()
        .success()
        .stdout("1,3\n2,4\n");
}

#[test]
fn multiply_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let a = write(dir.path(), "a.csv", "1,2\n");
    let b = write(dir.path(), "b.csv", "3\n4\n");
    let out = dir.path().join("c.csv");
    cmd()
        .args(["multiply", a.as_str(), b.as_str(), "-o", out.to_str().unwrap()])
        .assert()
        .success();
    assert_eq!(fs::read_to_string(&out).unwrap(), "11\n");
}

#[test]
fn multiply_incompatible_fails() {
    let dir = tempfile::tempdir().unwrap();
    let a = write(dir.path(), "a.csv", "1,2\n");
    cmd()
        .args(["multiply", a.as_str(), a.as_str()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("incompatible shapes"));
}

#[test]
fn add_and_negative_scale() {
    let dir = tempfile::tempdir().unwrap();
    let a = write(dir.path(), "a.csv", "1,2\n3,4\n");
    cmd()
        .args(["add", a.as_str(), a.as_str()])
        .assert()
        .success()
        .stdout("2,4\n6,8\n");
    cmd()
        .args(["scale", a.as_str(), "-1"])
        .assert()
        .success()
        .stdout("-1,-2\n-3,-4\n");
}

#[test]
fn row_with_shift() {
    let dir = tempfile::tempdir().unwrap();
    let a = write(dir.path(), "a.csv", "5,6,7\n");
    cmd()
        .args(["row", a.as_str(), "0", "--shift", "10"])
        .assert()
        .success()
        .stdout("15,16,17\n");
}

#[test]
fn row_out_of_bounds_fails() {
    let dir = tempfile::tempdir().unwrap();
    let a = write(dir.path(), "a.csv", "5,6,7\n");
    cmd()
        .args(["row", a.as_str(), "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("out of bounds"));
}

#[test]
fn malformed_csv_fails() {
    let dir = tempfile::tempdir().unwrap();
    let a = write(dir.path(), "a.csv", "1,a\n2,3\n");
    cmd()
        .args(["transpose", a.as_str()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not an integer"));
}

#[test]
fn non_csv_extension_fails() {
    let dir = tempfile::tempdir().unwrap();
    let a = write(dir.path(), "a.txt", "1\n");
    cmd().args(["shape", a.as_str()]).assert().failure();
}

#[test]
fn nonexistent_input_fails() {
    cmd()
        .args(["transpose", "/nonexistent/a.csv"])
        .assert()
        .failure();
}

// ---------------------------------------------------------------------------
// Run subcommand
// ---------------------------------------------------------------------------

#[test]
fn run_without_script_errors() {
    cmd().arg("run").assert().failure();
}

#[test]
fn run_script_updates_persistent_matrix() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "D.csv", "1,2\n3,4\n");
    let script = write(
        dir.path(),
        "prog.csvs",
        "persistent D\nmatrix2 = transpose D\nresult = D * matrix2\nD = result + 10\nD[1][0]\n",
    );
    cmd()
        .args(["run", script.as_str(), "-d", dir.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout("5: 21\n")
        .stderr(predicate::str::contains("No config file provided"));
    assert_eq!(
        fs::read_to_string(dir.path().join("D.csv")).unwrap(),
        "15,21\n21,35\n"
    );
}

#[test]
fn run_with_config_and_no_save() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "A.csv", "1\n");
    let config = write(
        dir.path(),
        "run.json",
        &format!(
            "{{ \"data_dir\": {:?} }}",
            dir.path().to_str().unwrap()
        ),
    );
    let script = write(dir.path(), "prog.csvs", "persistent A\nA = A * 3\nA\n");
    cmd()
        .args(["run", script.as_str(), config.as_str(), "--no-save"])
        .assert()
        .success()
        .stdout("3: [[3]]\n");
    assert_eq!(fs::read_to_string(dir.path().join("A.csv")).unwrap(), "1\n");
}

#[test]
fn run_reports_script_errors() {
    let dir = tempfile::tempdir().unwrap();
    let script = write(dir.path(), "prog.csvs", "x = 1\ny = x / 0\n");
    cmd()
        .args(["run", script.as_str(), "-d", dir.path().to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("line 2: division by zero"));
}
