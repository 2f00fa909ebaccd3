//! Tree snapshot handed out by the version-control collaborator.

use std::collections::BTreeSet;

use crate::domain::entities::common::LogicalPath;

/// Kind of a node in the tree snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    /// A file.
    Blob,
    /// A directory.
    Tree,
}

/// A node in the tree snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TreeEntry {
    pub path: LogicalPath,
    pub kind: EntryKind,
}

impl TreeEntry {
    pub fn blob(path: impl Into<LogicalPath>) -> Self {
        Self {
            path: path.into(),
            kind: EntryKind::Blob,
        }
    }

    pub fn tree(path: impl Into<LogicalPath>) -> Self {
        Self {
            path: path.into(),
            kind: EntryKind::Tree,
        }
    }

    pub fn name(&self) -> &str {
        self.path.name()
    }

    pub fn is_blob(&self) -> bool {
        self.kind == EntryKind::Blob
    }
}

/// Immutable view of every tracked entry, in depth-first pre-order.
///
/// A directory always precedes its descendants; siblings are ordered by name.
/// Reversing the order therefore yields every descendant before its ancestors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeSnapshot {
    entries: Vec<TreeEntry>,
}

impl TreeSnapshot {
    /// Build a snapshot from tracked file paths; directories are derived.
    pub fn from_blob_paths<I>(paths: I) -> Self
    where
        I: IntoIterator<Item = LogicalPath>,
    {
        let mut blobs = BTreeSet::new();
        let mut trees = BTreeSet::new();

        for path in paths {
            let mut parent = path.parent();
            while let Some(dir) = parent {
                parent = dir.parent();
                trees.insert(dir);
            }
            blobs.insert(path);
        }

        let mut entries: Vec<TreeEntry> = trees
            .into_iter()
            .map(|path| TreeEntry {
                path,
                kind: EntryKind::Tree,
            })
            .chain(blobs.into_iter().map(|path| TreeEntry {
                path,
                kind: EntryKind::Blob,
            }))
            .collect();

        // Segment-wise comparison puts a prefix before anything below it.
        entries.sort_by(|a, b| a.path.segments().cmp(b.path.segments()));

        Self { entries }
    }

    /// All entries, top-down.
    pub fn entries(&self) -> &[TreeEntry] {
        &self.entries
    }

    pub fn blobs(&self) -> impl Iterator<Item = &TreeEntry> {
        self.entries.iter().filter(|e| e.kind == EntryKind::Blob)
    }

    pub fn trees(&self) -> impl Iterator<Item = &TreeEntry> {
        self.entries.iter().filter(|e| e.kind == EntryKind::Tree)
    }

    pub fn contains(&self, path: &LogicalPath) -> bool {
        self.entries.iter().any(|e| &e.path == path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths(snapshot: &TreeSnapshot) -> Vec<&str> {
        snapshot.entries().iter().map(|e| e.path.as_str()).collect()
    }

    #[test]
    fn derives_directories_in_pre_order() {
        let snapshot = TreeSnapshot::from_blob_paths(
            ["b.txt", "a/y/z.txt", "a/x.txt"].map(LogicalPath::new),
        );

        assert_eq!(
            paths(&snapshot),
            vec!["a", "a/x.txt", "a/y", "a/y/z.txt", "b.txt"]
        );
        assert_eq!(snapshot.blobs().count(), 3);
        assert_eq!(snapshot.trees().count(), 2);
    }

    #[test]
    fn parent_precedes_siblings_with_longer_names() {
        // "a-b" sorts before "a/..." bytewise but not segment-wise.
        let snapshot =
            TreeSnapshot::from_blob_paths(["a-b", "a/c"].map(LogicalPath::new));
        assert_eq!(paths(&snapshot), vec!["a", "a/c", "a-b"]);
    }

    #[test]
    fn empty_snapshot() {
        let snapshot = TreeSnapshot::from_blob_paths(Vec::new());
        assert!(snapshot.is_empty());
    }
}
