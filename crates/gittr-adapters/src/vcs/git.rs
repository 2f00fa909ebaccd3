//! Repository adapter backed by the `git` executable.
//!
//! Uses the `git` CLI via `std::process::Command`:
//! - transport, credentials and hooks behave exactly as for the user's own git
//! - no libgit2 build dependency
//! - every index mutation is a separate, immediately-persisted command

use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

use thiserror::Error;
use tracing::{debug, instrument, trace};

use gittr_core::{
    application::{
        ApplicationError,
        ports::{Repository, StagingIndex, TemplateSource},
    },
    domain::{LogicalPath, TreeSnapshot},
    error::{GittrError, GittrResult},
};

use crate::source::DirectorySource;

/// Failure running a git command.
#[derive(Debug, Error)]
pub enum GitError {
    #[error("failed to run `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("`{command}` failed: {stderr}")]
    Failed { command: String, stderr: String },
}

impl From<GitError> for GittrError {
    fn from(e: GitError) -> Self {
        let (command, reason) = match e {
            GitError::Spawn { command, source } => (command, source.to_string()),
            GitError::Failed { command, stderr } => (command, stderr),
        };
        ApplicationError::VcsCommandFailed { command, reason }.into()
    }
}

/// Author and committer used for gittr's own commits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitIdentity {
    pub name: String,
    pub email: String,
}

impl CommitIdentity {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

/// A git working tree driven through the `git` command line.
#[derive(Debug, Clone)]
pub struct GitRepository {
    source: DirectorySource,
    identity: Option<CommitIdentity>,
}

impl GitRepository {
    /// Open the repository containing `path`.
    pub fn open(path: impl AsRef<Path>) -> GittrResult<Self> {
        let out = run_git(path.as_ref(), &["rev-parse", "--show-toplevel"])?;
        let root = PathBuf::from(String::from_utf8_lossy(&out).trim());
        debug!(root = %root.display(), "opened repository");
        Ok(Self {
            source: DirectorySource::new(root),
            identity: None,
        })
    }

    /// Create (or reinitialise) a repository at `path`.
    pub fn init(path: impl AsRef<Path>) -> GittrResult<Self> {
        let path = path.as_ref();
        std::fs::create_dir_all(path)
            .map_err(|e| crate::filesystem::map_io_error(path, e, "create directory"))?;
        run_git(path, &["init", "-q"])?;
        Self::open(path)
    }

    pub fn with_identity(mut self, identity: Option<CommitIdentity>) -> Self {
        self.identity = identity;
        self
    }

    pub fn root(&self) -> &Path {
        self.source.filesystem().root()
    }

    pub fn source(&self) -> &DirectorySource {
        &self.source
    }

    /// Name of the checked-out branch, `None` when detached.
    pub fn current_branch(&self) -> GittrResult<Option<String>> {
        let out = self.git(&["rev-parse", "--abbrev-ref", "HEAD"])?;
        let name = String::from_utf8_lossy(&out).trim().to_string();
        Ok((name != "HEAD").then_some(name))
    }

    /// Whether the working tree has staged, unstaged or untracked changes.
    ///
    /// A render replaces every tracked file, so these would be lost.
    pub fn has_local_changes(&self) -> GittrResult<bool> {
        let out = self.git(&["status", "--porcelain"])?;
        Ok(!out.iter().all(u8::is_ascii_whitespace))
    }

    fn git(&self, args: &[&str]) -> Result<Vec<u8>, GitError> {
        run_git(self.root(), args)
    }
}

impl StagingIndex for GitRepository {
    fn add(&mut self, path: &LogicalPath) -> GittrResult<()> {
        self.git(&["add", "-f", "--", path.as_str()])?;
        Ok(())
    }

    fn remove(&mut self, path: &LogicalPath) -> GittrResult<()> {
        self.git(&["rm", "-q", "-r", "-f", "--ignore-unmatch", "--", path.as_str()])?;
        Ok(())
    }

    fn move_entry(&mut self, from: &LogicalPath, to: &LogicalPath) -> GittrResult<()> {
        self.git(&["mv", "--", from.as_str(), to.as_str()])?;
        Ok(())
    }

    fn update(&mut self) -> GittrResult<()> {
        // Each command above already wrote the index.
        trace!("index up to date");
        Ok(())
    }
}

impl Repository for GitRepository {
    fn snapshot(&self) -> GittrResult<TreeSnapshot> {
        let out = self.git(&["ls-files", "-z"])?;
        let paths = out
            .split(|b| *b == 0)
            .filter(|raw| !raw.is_empty())
            .map(|raw| LogicalPath::try_new(String::from_utf8_lossy(raw).into_owned()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(TreeSnapshot::from_blob_paths(paths))
    }

    fn read_file(&self, path: &LogicalPath) -> GittrResult<Option<Vec<u8>>> {
        self.source.filesystem().read(path)
    }

    fn write_file(&mut self, path: &LogicalPath, content: &[u8]) -> GittrResult<()> {
        self.source.filesystem().write(path, content)
    }

    fn index(&mut self) -> &mut dyn StagingIndex {
        self
    }

    fn sources(&self) -> &dyn TemplateSource {
        &self.source
    }

    #[instrument(skip(self))]
    fn fetch(&mut self, url: &str, refspec: &str, local_ref: &str) -> GittrResult<()> {
        let mapping = format!("+{refspec}:refs/heads/{local_ref}");
        self.git(&["fetch", "-q", url, &mapping])?;
        Ok(())
    }

    fn checkout(&mut self, reference: &str, paths: &[LogicalPath]) -> GittrResult<()> {
        let mut args = vec!["checkout", "-q", reference, "--"];
        if paths.is_empty() {
            args.push(".");
        } else {
            args.extend(paths.iter().map(LogicalPath::as_str));
        }
        self.git(&args)?;
        Ok(())
    }

    fn switch_branch(&mut self, branch: &str) -> GittrResult<()> {
        self.git(&["checkout", "-q", branch])?;
        Ok(())
    }

    #[instrument(skip(self))]
    fn commit(&mut self, message: &str) -> GittrResult<()> {
        let mut args: Vec<String> = Vec::new();
        if let Some(identity) = &self.identity {
            args.extend([
                "-c".to_string(),
                format!("user.name={}", identity.name),
                "-c".to_string(),
                format!("user.email={}", identity.email),
            ]);
        }
        args.extend(
            ["commit", "-q", "--allow-empty", "--no-verify", "-m", message].map(String::from),
        );

        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        self.git(&args)?;
        Ok(())
    }
}

/// Run `git <args>` in `dir` and return its stdout.
fn run_git(dir: &Path, args: &[&str]) -> Result<Vec<u8>, GitError> {
    let command = format!("git {}", args.join(" "));
    trace!(dir = %dir.display(), %command, "running");

    // Tree paths are file names, never glob patterns.
    let output = Command::new("git")
        .args(args)
        .env("GIT_LITERAL_PATHSPECS", "1")
        .current_dir(dir)
        .output()
        .map_err(|source| GitError::Spawn {
            command: command.clone(),
            source,
        })?;

    if !output.status.success() {
        return Err(GitError::Failed {
            command,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(output.stdout)
}

/// Check if git is available on the system.
pub fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .is_ok_and(|o| o.status.success())
}
