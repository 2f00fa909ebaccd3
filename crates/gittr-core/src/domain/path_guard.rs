//! Which logical paths may be used as template sources.
//!
//! Rules, in order:
//!
//! 1. Anything under the version-control metadata directory (`.git/`) is
//!    never a template.
//! 2. Anything under the automation metadata directory (`.github/`) is a
//!    template only when its name ends with the scoped suffix (`.ght`) or the
//!    generic suffix (`.j2`).
//!
//! Everything else is eligible.

use crate::domain::{entities::LogicalPath, error::DomainError};

/// Version-control metadata directory.
pub const VCS_DIR: &str = ".git";
/// Automation metadata directory holding the configuration file.
pub const METADATA_DIR: &str = ".github";
/// Suffix marking templates inside the metadata directory; stripped from names.
pub const TEMPLATE_SUFFIX: &str = ".ght";
/// Generic template suffix, accepted inside the metadata directory.
pub const GENERIC_TEMPLATE_SUFFIX: &str = ".j2";

/// Pure predicate over logical paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathGuard {
    vcs_dir: String,
    metadata_dir: String,
    suffixes: Vec<String>,
}

impl PathGuard {
    pub fn new(
        vcs_dir: impl Into<String>,
        metadata_dir: impl Into<String>,
        suffixes: Vec<String>,
    ) -> Self {
        Self {
            vcs_dir: vcs_dir.into(),
            metadata_dir: metadata_dir.into(),
            suffixes,
        }
    }

    pub fn metadata_dir(&self) -> &str {
        &self.metadata_dir
    }

    /// Scoped suffix (the first configured one).
    pub fn template_suffix(&self) -> &str {
        self.suffixes
            .first()
            .map(String::as_str)
            .unwrap_or(TEMPLATE_SUFFIX)
    }

    pub fn is_eligible_template_source(&self, path: &LogicalPath) -> bool {
        self.assert_eligible(path).is_ok()
    }

    pub fn assert_eligible(&self, path: &LogicalPath) -> Result<(), DomainError> {
        if path.starts_with_dir(&self.vcs_dir) {
            return Err(DomainError::RestrictedPath {
                path: path.to_string(),
                reason: format!("the {} folder is not a valid path for templates", self.vcs_dir),
            });
        }

        if path.starts_with_dir(&self.metadata_dir)
            && !self.suffixes.iter().any(|s| path.as_str().ends_with(s.as_str()))
        {
            return Err(DomainError::RestrictedPath {
                path: path.to_string(),
                reason: format!(
                    "templates under the {}/ folder must end in {}",
                    self.metadata_dir,
                    self.suffixes.join(" or ")
                ),
            });
        }

        Ok(())
    }

    /// Content-pass selection: outside the metadata directory, or inside it
    /// with the scoped suffix.
    pub fn is_content_template(&self, path: &LogicalPath) -> bool {
        !path.starts_with_dir(&self.metadata_dir)
            || path.as_str().ends_with(self.template_suffix())
    }
}

impl Default for PathGuard {
    fn default() -> Self {
        Self::new(
            VCS_DIR,
            METADATA_DIR,
            vec![TEMPLATE_SUFFIX.to_string(), GENERIC_TEMPLATE_SUFFIX.to_string()],
        )
    }
}
