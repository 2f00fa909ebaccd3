//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `gittr-adapters` crate provides implementations.

use crate::domain::{ConfigMapping, LogicalPath, TreeSnapshot};
use crate::error::GittrResult;

/// Port for the template language.
///
/// Implemented by:
/// - `gittr_adapters::renderer::TeraRenderer` (production)
///
/// ## Contract
///
/// - `name` is only used in error messages
/// - evaluation reads nothing but `source`, `mapping` and, for
///   [`render_with_partials`](Self::render_with_partials), the templates
///   `source` pulls in by name
/// - rendering the same input twice yields byte-identical output
/// - an undefined variable is an evaluation error, never an empty string
pub trait TemplateRenderer: Send + Sync {
    fn render(&self, name: &str, source: &str, mapping: &ConfigMapping) -> GittrResult<String>;

    /// Render `source`, resolving includes, imports and parents through
    /// `partials`. Errors from `partials` are returned unchanged.
    fn render_with_partials(
        &self,
        name: &str,
        source: &str,
        mapping: &ConfigMapping,
        partials: &dyn PartialSource,
    ) -> GittrResult<String> {
        let _ = partials;
        self.render(name, source, mapping)
    }
}

/// Port for templates referenced from inside another template.
///
/// `name` is exactly what the referencing template wrote. `Ok(None)` leaves
/// the reference unresolved for the renderer to report (or ignore).
pub trait PartialSource {
    fn partial(&self, name: &str) -> GittrResult<Option<String>>;
}

/// Port for "given a logical path, return its raw text".
///
/// `Ok(None)` means the path does not exist (or is refused by the source's
/// own filtering); callers turn that into a not-found error.
pub trait TemplateSource {
    fn load(&self, path: &LogicalPath) -> GittrResult<Option<String>>;
}

/// Port for the version-control staging index.
///
/// Every operation keeps the working tree and the index in lock-step:
/// `remove` deletes the file too, `move_entry` renames on disk and in the index.
pub trait StagingIndex {
    /// Stage the working-tree content of `path`.
    fn add(&mut self, path: &LogicalPath) -> GittrResult<()>;

    /// Delete `path` from the working tree and the index.
    fn remove(&mut self, path: &LogicalPath) -> GittrResult<()>;

    /// Rename a file or directory on disk and in the index.
    fn move_entry(&mut self, from: &LogicalPath, to: &LogicalPath) -> GittrResult<()>;

    /// Flush pending index state.
    fn update(&mut self) -> GittrResult<()>;
}

/// Port for the version-control collaborator.
///
/// Implemented by:
/// - `gittr_adapters::vcs::GitRepository` (git CLI)
/// - `gittr_adapters::vcs::MemoryRepository` (testing)
pub trait Repository: StagingIndex {
    /// Every tracked entry, top-down.
    fn snapshot(&self) -> GittrResult<TreeSnapshot>;

    /// Raw bytes of a working-tree file, `None` if absent.
    fn read_file(&self, path: &LogicalPath) -> GittrResult<Option<Vec<u8>>>;

    /// Overwrite (or create) a working-tree file.
    fn write_file(&mut self, path: &LogicalPath, content: &[u8]) -> GittrResult<()>;

    /// The staging index of this repository.
    fn index(&mut self) -> &mut dyn StagingIndex;

    /// Template-source listing over the working tree.
    fn sources(&self) -> &dyn TemplateSource;

    /// Fetch `refspec` from `url` into the local branch `local_ref`.
    fn fetch(&mut self, url: &str, refspec: &str, local_ref: &str) -> GittrResult<()>;

    /// Restore `paths` (or the whole tree when empty) from `reference` into the
    /// working tree and the index.
    fn checkout(&mut self, reference: &str, paths: &[LogicalPath]) -> GittrResult<()>;

    /// Check out `branch` as the current branch.
    fn switch_branch(&mut self, branch: &str) -> GittrResult<()>;

    /// Record the index as a new commit.
    fn commit(&mut self, message: &str) -> GittrResult<()>;
}
