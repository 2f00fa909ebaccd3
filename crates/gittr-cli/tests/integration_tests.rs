//! Integration tests for gittr-cli.

use std::path::Path;
use std::process::Command as StdCommand;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn gittr() -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("gittr");
    cmd.env_remove("RUST_LOG").env("NO_COLOR", "1");
    cmd
}

/// An application config file with a commit identity, so tests never depend
/// on the user's own settings.
fn app_config(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("gittr.toml");
    std::fs::write(
        &path,
        "[commit]\nauthor_name = \"gittr tests\"\nauthor_email = \"tests@example.com\"\n",
    )
    .unwrap();
    path
}

fn git_available() -> bool {
    StdCommand::new("git")
        .arg("--version")
        .output()
        .is_ok_and(|o| o.status.success())
}

fn git(dir: &Path, args: &[&str]) -> String {
    let output = StdCommand::new("git")
        .args(["-c", "user.name=Template", "-c", "user.email=template@example.com"])
        .args(["-c", "commit.gpgsign=false"])
        .args(args)
        .current_dir(dir)
        .output()
        .unwrap();
    assert!(output.status.success(), "git {args:?} failed");
    String::from_utf8(output.stdout).unwrap()
}

fn write(root: &Path, path: &str, content: &str) {
    let path = root.join(path);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

fn template_repo() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    git(dir.path(), &["init", "-q"]);
    git(dir.path(), &["symbolic-ref", "HEAD", "refs/heads/main"]);
    write(dir.path(), ".github/ght.yaml", "name: \"{{ 'A' }}{{ 'B' }}\"\n");
    write(dir.path(), "{{ name }}.txt.ght", "Hello {{ name }}");
    write(dir.path(), "BUILT", "{{ now(format='%Y') }}");
    git(dir.path(), &["add", "-A"]);
    git(dir.path(), &["commit", "-q", "-m", "template"]);
    dir
}

#[test]
fn help_lists_subcommands() {
    gittr()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("render"))
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("configure"))
        .stdout(predicate::str::contains("completions"));
}

#[test]
fn version_flag() {
    gittr()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn completions_mention_the_binary() {
    gittr()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("gittr"));
}

#[test]
fn config_get_reads_file_and_environment() {
    let dir = tempfile::tempdir().unwrap();
    let config = app_config(dir.path());

    gittr()
        .arg("--config")
        .arg(&config)
        .args(["config", "get", "commit.author_name"])
        .assert()
        .success()
        .stdout("gittr tests\n");

    gittr()
        .arg("--config")
        .arg(&config)
        .env("GITTR_RENDER__MAX_ITERATIONS", "7")
        .args(["config", "get", "render.max_iterations"])
        .assert()
        .success()
        .stdout("7\n");
}

#[test]
fn config_list_as_json() {
    let dir = tempfile::tempdir().unwrap();
    let output = gittr()
        .arg("--config")
        .arg(app_config(dir.path()))
        .args(["--output-format", "json", "config", "list"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["render"]["max_iterations"], 64);
    assert_eq!(value["commit"]["author_email"], "tests@example.com");
}

#[test]
fn list_shows_only_eligible_sources() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), ".git/HEAD", "ref: refs/heads/main");
    write(dir.path(), ".github/ght.yaml", "name: x");
    write(dir.path(), ".github/workflows/ci.yml.ght", "");
    write(dir.path(), "README.md", "");

    let output = gittr()
        .args(["list", "--format", "json"])
        .arg(dir.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let listed: Vec<String> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(listed, vec![".github/workflows/ci.yml.ght", "README.md"]);
}

#[test]
fn init_then_render_end_to_end() {
    if !git_available() {
        eprintln!("git not available, skipping");
        return;
    }

    let template = template_repo();
    let work = tempfile::tempdir().unwrap();
    let config = app_config(work.path());
    let target = work.path().join("project");
    let locator = format!("{}@main", template.path().display());

    gittr()
        .arg("--config")
        .arg(&config)
        .arg("init")
        .arg(&target)
        .arg(&locator)
        .assert()
        .success()
        .stdout(predicate::str::contains("Next steps"));

    gittr()
        .arg("--config")
        .arg(&config)
        .args(["render", &locator, "--now", "2031-06-07T00:00:00Z", "--repo"])
        .arg(&target)
        .assert()
        .success()
        .stdout(predicate::str::contains("Rendered"));

    assert_eq!(
        std::fs::read_to_string(target.join("AB.txt")).unwrap(),
        "Hello AB"
    );
    assert_eq!(std::fs::read_to_string(target.join("BUILT")).unwrap(), "2031");
    assert_eq!(
        std::fs::read_to_string(target.join(".github/ght.yaml")).unwrap(),
        "name: \"AB\"\n"
    );

    let log = git(&target, &["log", "--format=%s|%an"]);
    assert_eq!(
        log.lines().next(),
        Some(format!("[ght]: rendered {} structure|gittr tests", template.path().display()).as_str())
    );
}

#[test]
fn configure_commits_new_values() {
    if !git_available() {
        return;
    }

    let template = template_repo();
    let work = tempfile::tempdir().unwrap();
    let config = app_config(work.path());
    let target = work.path().join("project");
    let locator = format!("{}@main", template.path().display());

    gittr()
        .arg("--config")
        .arg(&config)
        .arg("init")
        .arg(&target)
        .arg(&locator)
        .assert()
        .success();

    gittr()
        .arg("--config")
        .arg(&config)
        .args(["configure", "--set", "name=Zed", "--set", "port=8080", "--repo"])
        .arg(&target)
        .assert()
        .success();

    let written = std::fs::read_to_string(target.join(".github/ght.yaml")).unwrap();
    assert!(written.contains("name: Zed"), "{written}");
    assert!(written.contains("port: 8080"), "{written}");
    assert_eq!(
        git(&target, &["log", "-1", "--format=%s"]).trim(),
        "[ght]: Update configuration file."
    );
}
