//! In-memory repository for testing.

use std::collections::{BTreeMap, HashMap};

use gittr_core::{
    application::{
        ApplicationError,
        ports::{Repository, StagingIndex, TemplateSource},
    },
    domain::{LogicalPath, TreeSnapshot},
    error::GittrResult,
};

type Tree = BTreeMap<LogicalPath, Vec<u8>>;

/// A recorded commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryCommit {
    pub message: String,
    pub tree: Tree,
}

/// In-memory repository: working tree, staged paths, branches and remotes.
///
/// The working tree and the index are kept identical, as they are after each
/// staging operation on a real repository. Remotes are registered up front
/// with [`MemoryRepository::with_remote`] and copied by `fetch`.
#[derive(Debug, Clone, Default)]
pub struct MemoryRepository {
    files: Tree,
    branches: HashMap<String, Vec<MemoryCommit>>,
    head: Option<String>,
    remotes: HashMap<(String, String), Tree>,
    moves: Vec<(LogicalPath, LogicalPath)>,
    staged: Vec<LogicalPath>,
    updates: usize,
}

impl MemoryRepository {
    /// Empty repository on the branch `main`, with no commits.
    pub fn new() -> Self {
        Self {
            head: Some("main".to_string()),
            ..Self::default()
        }
    }

    /// Add a working-tree file (builder style).
    pub fn with_file(mut self, path: &str, content: impl AsRef<[u8]>) -> Self {
        self.files
            .insert(LogicalPath::new(path), content.as_ref().to_vec());
        self
    }

    /// Register the tree served for `fetch(url, refspec, ..)`.
    pub fn with_remote(mut self, url: &str, refspec: &str, files: &[(&str, &str)]) -> Self {
        let tree = files
            .iter()
            .map(|(p, c)| (LogicalPath::new(*p), c.as_bytes().to_vec()))
            .collect();
        self.remotes
            .insert((url.to_string(), refspec.to_string()), tree);
        self
    }

    /// Commit the current working tree (builder style).
    pub fn committed(mut self, message: &str) -> Self {
        self.record_commit(message);
        self
    }

    pub fn file(&self, path: &str) -> Option<&[u8]> {
        self.files.get(&LogicalPath::new(path)).map(Vec::as_slice)
    }

    pub fn file_text(&self, path: &str) -> Option<String> {
        self.file(path)
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    }

    pub fn paths(&self) -> Vec<String> {
        self.files.keys().map(ToString::to_string).collect()
    }

    pub fn current_branch(&self) -> Option<&str> {
        self.head.as_deref()
    }

    /// Commits on the current branch, oldest first.
    pub fn commits(&self) -> &[MemoryCommit] {
        self.head
            .as_ref()
            .and_then(|h| self.branches.get(h))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn commit_messages(&self) -> Vec<&str> {
        self.commits().iter().map(|c| c.message.as_str()).collect()
    }

    /// Every `move_entry` call, in order.
    pub fn moves(&self) -> &[(LogicalPath, LogicalPath)] {
        &self.moves
    }

    /// Every `add` call, in order.
    pub fn staged(&self) -> &[LogicalPath] {
        &self.staged
    }

    pub fn update_count(&self) -> usize {
        self.updates
    }

    fn record_commit(&mut self, message: &str) {
        let branch = self.head.clone().unwrap_or_else(|| "main".to_string());
        let commit = MemoryCommit {
            message: message.to_string(),
            tree: self.files.clone(),
        };
        self.branches.entry(branch.clone()).or_default().push(commit);
        self.head = Some(branch);
    }

    /// Tree at the tip of `reference` (`HEAD` or a branch name).
    fn resolve(&self, reference: &str) -> GittrResult<&Tree> {
        let branch = match reference {
            "HEAD" => self.head.as_deref(),
            other => Some(other),
        };
        branch
            .and_then(|b| self.branches.get(b))
            .and_then(|commits| commits.last())
            .map(|commit| &commit.tree)
            .ok_or_else(|| {
                ApplicationError::VcsCommandFailed {
                    command: format!("resolve {reference}"),
                    reason: "unknown revision".into(),
                }
                .into()
            })
    }
}

impl TemplateSource for MemoryRepository {
    fn load(&self, path: &LogicalPath) -> GittrResult<Option<String>> {
        let Some(bytes) = self.files.get(path) else {
            return Ok(None);
        };
        String::from_utf8(bytes.clone()).map(Some).map_err(|_| {
            ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: "file is not valid UTF-8 text".into(),
            }
            .into()
        })
    }
}

impl StagingIndex for MemoryRepository {
    fn add(&mut self, path: &LogicalPath) -> GittrResult<()> {
        self.staged.push(path.clone());
        Ok(())
    }

    fn remove(&mut self, path: &LogicalPath) -> GittrResult<()> {
        self.files
            .retain(|p, _| p != path && !p.starts_with_dir(path.as_str()));
        Ok(())
    }

    fn move_entry(&mut self, from: &LogicalPath, to: &LogicalPath) -> GittrResult<()> {
        let moved = std::mem::take(&mut self.files);
        let mut found = false;
        for (path, content) in moved {
            let path = match path.rebase(from, to) {
                Some(rebased) => {
                    found = true;
                    rebased
                }
                None => path,
            };
            self.files.insert(path, content);
        }

        if !found {
            return Err(ApplicationError::VcsCommandFailed {
                command: format!("mv {from} {to}"),
                reason: "source path is not tracked".into(),
            }
            .into());
        }
        self.moves.push((from.clone(), to.clone()));
        Ok(())
    }

    fn update(&mut self) -> GittrResult<()> {
        self.updates += 1;
        Ok(())
    }
}

impl Repository for MemoryRepository {
    fn snapshot(&self) -> GittrResult<TreeSnapshot> {
        Ok(TreeSnapshot::from_blob_paths(self.files.keys().cloned()))
    }

    fn read_file(&self, path: &LogicalPath) -> GittrResult<Option<Vec<u8>>> {
        Ok(self.files.get(path).cloned())
    }

    fn write_file(&mut self, path: &LogicalPath, content: &[u8]) -> GittrResult<()> {
        self.files.insert(path.clone(), content.to_vec());
        Ok(())
    }

    fn index(&mut self) -> &mut dyn StagingIndex {
        self
    }

    fn sources(&self) -> &dyn TemplateSource {
        self
    }

    fn fetch(&mut self, url: &str, refspec: &str, local_ref: &str) -> GittrResult<()> {
        let tree = self
            .remotes
            .get(&(url.to_string(), refspec.to_string()))
            .cloned()
            .ok_or_else(|| ApplicationError::VcsCommandFailed {
                command: format!("fetch {url} {refspec}:{local_ref}"),
                reason: "couldn't find remote ref".into(),
            })?;

        self.branches.insert(
            local_ref.to_string(),
            vec![MemoryCommit {
                message: format!("fetched {url}@{refspec}"),
                tree,
            }],
        );
        Ok(())
    }

    fn checkout(&mut self, reference: &str, paths: &[LogicalPath]) -> GittrResult<()> {
        let tree = self.resolve(reference)?.clone();
        if paths.is_empty() {
            self.files.extend(tree);
            return Ok(());
        }

        for path in paths {
            let content = tree.get(path).cloned().ok_or_else(|| {
                ApplicationError::VcsCommandFailed {
                    command: format!("checkout {reference} -- {path}"),
                    reason: "pathspec did not match any file".into(),
                }
            })?;
            self.files.insert(path.clone(), content);
        }
        Ok(())
    }

    fn switch_branch(&mut self, branch: &str) -> GittrResult<()> {
        self.files = self.resolve(branch)?.clone();
        self.head = Some(branch.to_string());
        Ok(())
    }

    fn commit(&mut self, message: &str) -> GittrResult<()> {
        self.record_commit(message);
        Ok(())
    }
}
