//! Template sources read straight from a directory tree.

use std::path::PathBuf;

use tracing::{debug, instrument, warn};
use walkdir::WalkDir;

use gittr_core::{
    application::ports::TemplateSource,
    domain::{LogicalPath, PathGuard},
    error::GittrResult,
};

use crate::filesystem::LocalFilesystem;

/// Serves template text from files below a root directory.
///
/// `load` answers for any path; [`DirectorySource::list`] only yields paths the
/// [`PathGuard`] accepts.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    fs: LocalFilesystem,
    guard: PathGuard,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            fs: LocalFilesystem::new(root),
            guard: PathGuard::default(),
        }
    }

    pub fn with_guard(mut self, guard: PathGuard) -> Self {
        self.guard = guard;
        self
    }

    pub fn filesystem(&self) -> &LocalFilesystem {
        &self.fs
    }

    /// Every eligible template source below the root, sorted.
    #[instrument(skip(self), fields(root = %self.fs.root().display()))]
    pub fn list(&self) -> Vec<LogicalPath> {
        let root = self.fs.root();
        let mut paths: Vec<LogicalPath> = WalkDir::new(root)
            .min_depth(1)
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!(error = %e, "skipping unreadable entry");
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file())
            .filter_map(|entry| {
                let relative = entry.path().strip_prefix(root).ok()?;
                let text = relative.to_str()?;
                LogicalPath::try_new(text).ok()
            })
            .filter(|path| self.guard.is_eligible_template_source(path))
            .collect();

        paths.sort();
        debug!(count = paths.len(), "listed template sources");
        paths
    }
}

impl TemplateSource for DirectorySource {
    fn load(&self, path: &LogicalPath) -> GittrResult<Option<String>> {
        self.fs.read_text(path)
    }
}
