//! Application layer errors.
//!
//! These errors represent failures in orchestration and at the ports, not
//! domain rule violations. Domain errors are `DomainError` from `crate::domain`.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use crate::error::{ErrorCategory, GittrError};

/// Why a template could not be loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotFoundReason {
    /// Nothing exists at the path.
    Missing,
    /// The path exists but the path guard refuses it as a template source.
    Restricted,
}

impl fmt::Display for NotFoundReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => f.write_str("no such file"),
            Self::Restricted => f.write_str("path is not an eligible template source"),
        }
    }
}

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// A template could not be loaded (absent or guard-rejected).
    #[error("Template not found: {path} ({reason})")]
    TemplateNotFound { path: String, reason: NotFoundReason },

    /// A template failed to parse.
    #[error("Template syntax error in '{name}': {message}")]
    TemplateSyntax { name: String, message: String },

    /// A template parsed but failed while rendering (e.g. undefined variable).
    #[error("Template evaluation failed in '{name}': {message}")]
    TemplateEval { name: String, message: String },

    /// The content pass aborted on this path; nothing was written.
    #[error("Rendering '{path}' failed: {source}")]
    ContentRenderFailed {
        path: String,
        #[source]
        source: Box<GittrError>,
    },

    /// The configuration file is absent from the working tree.
    #[error("{path} not found: not a gittr repository")]
    ConfigMissing { path: String },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// A version-control command failed.
    #[error("Version control command failed: {command}: {reason}")]
    VcsCommandFailed { command: String, reason: String },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::TemplateNotFound { path, reason } => match reason {
                NotFoundReason::Missing => vec![
                    format!("'{}' does not exist in the working tree", path),
                    "Check that the template checkout completed".into(),
                ],
                NotFoundReason::Restricted => vec![
                    format!("'{}' may not be rendered", path),
                    "Files under .github/ must end in .ght or .j2".into(),
                ],
            },
            Self::TemplateSyntax { name, .. } => vec![
                format!("Fix the template syntax in '{}'", name),
                "Expressions use {{ ... }}, statements use {% ... %}".into(),
            ],
            Self::TemplateEval { name, .. } => vec![
                format!("Check the variables used by '{}'", name),
                "Every referenced value must be defined in .github/ght.yaml".into(),
            ],
            Self::ContentRenderFailed { source, .. } => source.suggestions(),
            Self::ConfigMissing { path } => vec![
                format!("Create {} in the repository", path),
                "Or run: gittr init <path> <url>@<ref>".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
            ],
            Self::VcsCommandFailed { .. } => vec![
                "Ensure git is installed and in your PATH".into(),
                "Check the command output above for details".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::TemplateNotFound { .. } | Self::ConfigMissing { .. } => ErrorCategory::NotFound,
            Self::TemplateSyntax { .. } | Self::TemplateEval { .. } => ErrorCategory::Configuration,
            Self::ContentRenderFailed { source, .. } => source.category(),
            Self::FilesystemError { .. } | Self::VcsCommandFailed { .. } => ErrorCategory::Internal,
        }
    }
}
