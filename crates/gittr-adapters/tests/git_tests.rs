//! Renders through the real `git` executable. Skipped when git is missing.

use std::path::Path;
use std::process::Command;

use gittr_adapters::{CommitIdentity, GitRepository, TeraRenderer, vcs::git_available};
use gittr_core::{
    application::{
        RenderService,
        ports::{Repository, StagingIndex},
    },
    domain::{ConfigMapping, LogicalPath, TemplateLocator},
};
use serde_json::json;
use tempfile::TempDir;

fn git(dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(["-c", "user.name=Template", "-c", "user.email=template@example.com"])
        .args(["-c", "commit.gpgsign=false"])
        .args(args)
        .current_dir(dir)
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "git {args:?}: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).unwrap()
}

fn write(root: &Path, path: &str, content: &str) {
    let path = root.join(path);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

/// A template repository with a single commit on `main`.
fn template_repo() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    git(dir.path(), &["init", "-q"]);
    git(dir.path(), &["symbolic-ref", "HEAD", "refs/heads/main"]);
    write(dir.path(), "unchanged.md", "this remains unchanged");
    write(dir.path(), "template.md", "{{ ght.hello }}");
    write(dir.path(), "{{ght.a}}/{{ght.b}}/{{ght.c}}", "");
    write(dir.path(), "{{ght.a}}/{{ght.b}}/carlos", "");
    git(dir.path(), &["add", "-A"]);
    git(dir.path(), &["commit", "-q", "-m", "template"]);
    dir
}

fn config() -> ConfigMapping {
    ConfigMapping::from_value(json!({
        "ght": {
            "hello": "Hello World!",
            "a": "alpha",
            "b": "beta",
            "c": "charlie",
        }
    }))
    .unwrap()
}

fn identity() -> Option<CommitIdentity> {
    Some(CommitIdentity::new("gittr", "gittr@example.com"))
}

#[test]
fn init_and_render_against_a_git_checkout() {
    if !git_available() {
        eprintln!("git not available, skipping");
        return;
    }

    let template = template_repo();
    let target = tempfile::tempdir().unwrap();
    let url = template.path().to_str().unwrap();
    let locator = TemplateLocator::new(url, "main");

    let mut repo = GitRepository::init(target.path())
        .unwrap()
        .with_identity(identity());
    let service = RenderService::new(Box::new(TeraRenderer::default()));

    service.initialize(&mut repo, &locator, Some(&config())).unwrap();
    assert_eq!(repo.current_branch().unwrap().as_deref(), Some("ght/master"));

    service.render_tree(&mut repo, &locator).unwrap();

    let root = repo.root().to_path_buf();
    assert_eq!(
        std::fs::read_to_string(root.join("template.md")).unwrap(),
        "Hello World!"
    );
    assert!(root.join("alpha/beta/charlie").is_file());
    assert!(root.join("alpha/beta/carlos").is_file());
    assert!(!root.join("{{ght.a}}").exists());

    let log = git(&root, &["log", "--format=%s"]);
    let subjects: Vec<&str> = log.lines().collect();
    assert_eq!(
        subjects,
        vec![
            format!("[ght]: rendered {url} structure"),
            format!("[ght]: rendered {url} content"),
            "[ght]: Initial Commit".to_string(),
        ]
    );

    let snapshot = repo.snapshot().unwrap();
    assert!(snapshot.contains(&LogicalPath::new("alpha/beta")));
    assert!(snapshot.contains(&LogicalPath::new(".github/ght.yaml")));

    assert!(!repo.has_local_changes().unwrap());
    std::fs::write(root.join("scratch.txt"), "wip").unwrap();
    assert!(repo.has_local_changes().unwrap());
}

#[test]
fn open_outside_a_repository_fails() {
    if !git_available() {
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    assert!(GitRepository::open(dir.path()).is_err());
}

#[cfg(unix)]
#[test]
fn glob_characters_in_names_are_taken_literally() {
    if !git_available() {
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    let mut repo = GitRepository::init(dir.path()).unwrap();

    for name in ["*.md", "keep.md", "[k]eep.txt", "keep.txt"] {
        let path = LogicalPath::new(name);
        repo.write_file(&path, b"x").unwrap();
        repo.add(&path).unwrap();
    }

    repo.remove(&LogicalPath::new("*.md")).unwrap();
    repo.remove(&LogicalPath::new("[k]eep.txt")).unwrap();

    let root = repo.root().to_path_buf();
    assert!(!root.join("*.md").exists());
    assert!(!root.join("[k]eep.txt").exists());
    assert!(root.join("keep.md").is_file());
    assert!(root.join("keep.txt").is_file());
}
