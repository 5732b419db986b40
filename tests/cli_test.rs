#![cfg(unix)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Temp dir holding fake `fasd`/`fzf` scripts, a config pointing at them, a
/// real directory and a real file for picks to land on.
struct FakeTools {
    dir: TempDir,
}

impl FakeTools {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        std::fs::create_dir(root.join("projects")).unwrap();
        std::fs::write(root.join("notes.txt"), "notes").unwrap();

        let ranker = format!(
            r#"case "$2" in
    nothing) exit 0 ;;
    boom) echo "fasd: database locked" >&2; exit 3 ;;
esac
printf '%s\n' "/a/proj" "{}""#,
            root.join("projects").display()
        );
        write_script(&root.join("fasd"), &ranker);

        let picker = format!(
            r#"case "$FAKE_FZF" in
    tail) tail -n 1 ;;
    cancel) exit 130 ;;
    *) echo "{}" ;;
esac"#,
            root.join("notes.txt").display()
        );
        write_script(&root.join("fzf"), &picker);

        let config = format!(
            "[tools]\nranker = {:?}\npicker = {:?}\n",
            root.join("fasd").display().to_string(),
            root.join("fzf").display().to_string()
        );
        std::fs::write(root.join("config.toml"), config).unwrap();

        Self { dir }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("fm-jump").unwrap();
        cmd.arg("--config").arg(self.path("config.toml"));
        cmd.current_dir(self.dir.path());
        cmd
    }
}

fn write_script(path: &Path, body: &str) {
    std::fs::write(path, format!("#!/bin/sh\n{}\n", body)).unwrap();
    let mut perms = std::fs::metadata(path).unwrap().permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(path, perms).unwrap();
}

#[test]
fn help_exits_zero() {
    Command::cargo_bin("fm-jump")
        .unwrap()
        .arg("--help")
        .assert()
        .success();
}

#[test]
fn no_args_shows_help() {
    Command::cargo_bin("fm-jump").unwrap().assert().failure();
}

#[test]
fn init_bash_prints_wrapper() {
    Command::cargo_bin("fm-jump")
        .unwrap()
        .args(["init", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("fmj() {"))
        .stdout(predicate::str::contains("__FMJ_CD__="));
}

#[test]
fn config_path_needs_no_config() {
    Command::cargo_bin("fm-jump")
        .unwrap()
        .arg("config-path")
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn z_jumps_to_best_match() {
    let tools = FakeTools::new();
    let expected = format!("__FMJ_CD__={}\n", tools.path("projects").display());
    tools
        .cmd()
        .args(["z", "proj"])
        .assert()
        .success()
        .stdout(expected);
}

#[test]
fn z_without_results_warns() {
    let tools = FakeTools::new();
    tools
        .cmd()
        .args(["z", "nothing"])
        .assert()
        .success()
        .stdout("")
        .stderr(predicate::str::contains("No results from"));
}

#[test]
fn z_ranker_failure_is_reported() {
    let tools = FakeTools::new();
    tools
        .cmd()
        .args(["z", "boom"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("exit code: 3"))
        .stderr(predicate::str::contains("database locked"));
}

#[test]
fn z_ranker_failure_with_json_reports_notification() {
    let tools = FakeTools::new();
    tools
        .cmd()
        .args(["--json", "z", "boom"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("\"action\": \"notify\""))
        .stdout(predicate::str::contains("\"severity\": \"bad\""))
        .stdout(predicate::str::contains("\"failed\": true"))
        .stdout(predicate::str::contains("exit code: 3"));
}

#[test]
fn complete_lists_prefixed_candidates() {
    let tools = FakeTools::new();
    let expected = format!("z {}\nz /a/proj\n", tools.path("projects").display());
    tools
        .cmd()
        .args(["complete", "z pro"])
        .assert()
        .success()
        .stdout(expected);
}

#[test]
fn fzf_file_is_selected() {
    let tools = FakeTools::new();
    let expected = format!("__FMJ_SELECT__={}\n", tools.path("notes.txt").display());
    tools
        .cmd()
        .arg("fzf")
        .assert()
        .success()
        .stdout(expected);
}

#[test]
fn fzf_cancel_is_silent() {
    let tools = FakeTools::new();
    tools
        .cmd()
        .arg("fzf")
        .env("FAKE_FZF", "cancel")
        .assert()
        .success()
        .stdout("");
}

#[test]
fn z_dir_pipes_ranker_into_picker() {
    let tools = FakeTools::new();
    let expected = format!("__FMJ_CD__={}\n", tools.path("projects").display());
    tools
        .cmd()
        .arg("z-dir")
        .env("FAKE_FZF", "tail")
        .assert()
        .success()
        .stdout(expected);
}

#[test]
fn json_reports_host_actions() {
    let tools = FakeTools::new();
    tools
        .cmd()
        .args(["--json", "z", "proj"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"action\": \"cd\""))
        .stdout(predicate::str::contains("\"type\": \"Directory\""))
        .stdout(predicate::str::contains("__FMJ_CD__").not());
}

#[test]
fn missing_explicit_config_fails() {
    let tools = FakeTools::new();
    Command::cargo_bin("fm-jump")
        .unwrap()
        .arg("--config")
        .arg(tools.path("absent.toml"))
        .args(["z", "proj"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("config not found"));
}
