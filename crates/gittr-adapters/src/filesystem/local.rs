//! Working-tree I/O using std::fs.

use std::io;
use std::path::{Path, PathBuf};

use gittr_core::{
    application::ApplicationError,
    domain::LogicalPath,
    error::{GittrError, GittrResult},
};

/// Reads and writes files below a fixed root, addressed by [`LogicalPath`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalFilesystem {
    root: PathBuf,
}

impl LocalFilesystem {
    /// Create a filesystem adapter rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Native path of a logical path.
    pub fn resolve(&self, path: &LogicalPath) -> PathBuf {
        self.root.join(path.to_path_buf())
    }

    pub fn exists(&self, path: &LogicalPath) -> bool {
        self.resolve(path).exists()
    }

    /// File bytes, or `None` if nothing is there.
    pub fn read(&self, path: &LogicalPath) -> GittrResult<Option<Vec<u8>>> {
        let native = self.resolve(path);
        match std::fs::read(&native) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(map_io_error(&native, e, "read file")),
        }
    }

    /// File text, or `None` if nothing is there. Non-UTF-8 content is an error.
    pub fn read_text(&self, path: &LogicalPath) -> GittrResult<Option<String>> {
        let Some(bytes) = self.read(path)? else {
            return Ok(None);
        };
        String::from_utf8(bytes).map(Some).map_err(|_| {
            ApplicationError::FilesystemError {
                path: self.resolve(path),
                reason: "file is not valid UTF-8 text".into(),
            }
            .into()
        })
    }

    /// Write a file, creating missing parent directories.
    pub fn write(&self, path: &LogicalPath, content: &[u8]) -> GittrResult<()> {
        let native = self.resolve(path);
        if let Some(parent) = native.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| map_io_error(parent, e, "create directory"))?;
        }
        std::fs::write(&native, content).map_err(|e| map_io_error(&native, e, "write file"))
    }

    pub fn create_dir_all(&self) -> GittrResult<()> {
        std::fs::create_dir_all(&self.root)
            .map_err(|e| map_io_error(&self.root, e, "create directory"))
    }
}

pub(crate) fn map_io_error(path: &Path, e: io::Error, operation: &str) -> GittrError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to {}: {}", operation, e),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_creates_parents_and_read_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let fs = LocalFilesystem::new(dir.path());
        let path = LogicalPath::new("a/b/c.txt");

        fs.write(&path, b"hello").unwrap();

        assert!(dir.path().join("a/b/c.txt").is_file());
        assert_eq!(fs.read(&path).unwrap().as_deref(), Some(&b"hello"[..]));
        assert_eq!(fs.read_text(&path).unwrap().as_deref(), Some("hello"));
    }

    #[test]
    fn missing_file_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let fs = LocalFilesystem::new(dir.path());
        assert_eq!(fs.read(&LogicalPath::new("nope.txt")).unwrap(), None);
        assert!(!fs.exists(&LogicalPath::new("nope.txt")));
    }

    #[test]
    fn binary_content_is_not_text() {
        let dir = tempfile::tempdir().unwrap();
        let fs = LocalFilesystem::new(dir.path());
        let path = LogicalPath::new("logo.png");
        fs.write(&path, &[0x89, 0x50, 0xff, 0xfe]).unwrap();
        assert!(fs.read_text(&path).is_err());
    }
}
