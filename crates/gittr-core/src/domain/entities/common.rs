use super::DomainError;
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// A `/`-separated path inside the working tree.
///
/// Invariant: never absolute, no empty, `.` or `..` segments. Enforced at
/// construction.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct LogicalPath(String);

impl LogicalPath {
    /// Create a new logical path.
    ///
    /// # Panics
    /// Panics if the path is not a valid logical path (use `try_new` for fallible).
    pub fn new(path: impl Into<String>) -> Self {
        let path = path.into();
        match Self::try_new(path.clone()) {
            Ok(p) => p,
            Err(e) => panic!("LogicalPath is invalid: {:?} ({})", path, e),
        }
    }

    /// Fallible constructor.
    ///
    /// Backslashes are normalised to `/` so Windows-style listings map onto the
    /// same logical path.
    pub fn try_new(path: impl Into<String>) -> Result<Self, DomainError> {
        let raw = path.into();
        let normalized = raw.replace('\\', "/");

        if normalized.starts_with('/') {
            return Err(DomainError::InvalidPath {
                path: raw,
                reason: "absolute paths are not allowed".into(),
            });
        }

        let trimmed = normalized.trim_end_matches('/');
        if trimmed.is_empty() {
            return Err(DomainError::InvalidPath {
                path: raw,
                reason: "path is empty".into(),
            });
        }

        for segment in trimmed.split('/') {
            if segment.is_empty() || segment == "." || segment == ".." {
                return Err(DomainError::InvalidPath {
                    path: raw,
                    reason: format!("segment '{}' is not allowed", segment),
                });
            }
        }

        Ok(Self(trimmed.to_string()))
    }

    /// Last segment of the path.
    pub fn name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }

    /// Parent path, or `None` for top-level entries.
    pub fn parent(&self) -> Option<LogicalPath> {
        self.0
            .rsplit_once('/')
            .map(|(parent, _)| LogicalPath(parent.to_string()))
    }

    /// Join a single segment, maintaining the invariant.
    pub fn join(&self, segment: &str) -> Result<Self, DomainError> {
        Self::try_new(format!("{}/{}", self.0, segment))
    }

    /// Replace the last segment.
    pub fn with_name(&self, name: &str) -> Result<Self, DomainError> {
        match self.parent() {
            Some(parent) => parent.join(name),
            None => Self::try_new(name),
        }
    }

    /// Number of segments (`a` is 1, `a/b` is 2).
    pub fn depth(&self) -> usize {
        self.0.split('/').count()
    }

    /// True if this path is `dir` itself or lives below it.
    pub fn starts_with_dir(&self, dir: &str) -> bool {
        let dir = dir.trim_end_matches('/');
        self.0 == dir
            || (self.0.len() > dir.len()
                && self.0.starts_with(dir)
                && self.0.as_bytes()[dir.len()] == b'/')
    }

    /// Re-root this path from `from` to `to` if it lives below `from`.
    pub fn rebase(&self, from: &LogicalPath, to: &LogicalPath) -> Option<LogicalPath> {
        if self == from {
            return Some(to.clone());
        }
        if self.starts_with_dir(from.as_str()) {
            let rest = &self.0[from.0.len() + 1..];
            return Some(LogicalPath(format!("{}/{}", to.0, rest)));
        }
        None
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/')
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert to a native path relative to some root.
    pub fn to_path_buf(&self) -> PathBuf {
        self.0.split('/').collect()
    }
}

impl AsRef<str> for LogicalPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl AsRef<Path> for LogicalPath {
    fn as_ref(&self) -> &Path {
        Path::new(&self.0)
    }
}

impl From<&str> for LogicalPath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl fmt::Display for LogicalPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
