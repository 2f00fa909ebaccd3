// ============================================================================
// domain/error.rs - RENDERING DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (results are compared in tests and re-reported by the CLI)
/// - Categorizable (for CLI display and exit codes)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Path Errors
    // ========================================================================
    #[error("Invalid path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    #[error("Restricted path '{path}': {reason}")]
    RestrictedPath { path: String, reason: String },

    #[error("Entry '{path}' renders to an invalid name '{name}'")]
    InvalidRenderedName { path: String, name: String },

    // ========================================================================
    // Configuration Errors
    // ========================================================================
    #[error("Configuration document does not parse: {reason}")]
    ConfigParse { reason: String },

    #[error(
        "Configuration did not converge after {iterations} passes (line {} still changing)",
        .line + 1
    )]
    ConvergenceFailed { iterations: usize, line: usize },

    #[error("Invalid template locator '{locator}': expected <url>@<refspec>")]
    InvalidLocator { locator: String },

    // ========================================================================
    // Render Plan Errors
    // ========================================================================
    #[error("Duplicate rename target '{target}' (from {})", .sources.join(", "))]
    DuplicateTarget { target: String, sources: Vec<String> },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::RestrictedPath { path, .. } => vec![
                format!("'{}' cannot be used as a template", path),
                "Files under .github/ must end in .ght or .j2 to be rendered".into(),
                "Files under .git/ are never rendered".into(),
            ],
            Self::InvalidRenderedName { name, .. } => vec![
                format!("The rendered name '{}' is not a single path segment", name),
                "Names may not be empty, '.', '..' or contain '/'".into(),
            ],
            Self::ConfigParse { reason } => vec![
                "Check .github/ght.yaml for YAML syntax errors".into(),
                "Template expressions must be inside quoted strings".into(),
                format!("Details: {}", reason),
            ],
            Self::ConvergenceFailed { line, .. } => vec![
                format!("Line {} of .github/ght.yaml keeps changing", line + 1),
                "Look for values that reference themselves or each other in a cycle".into(),
            ],
            Self::InvalidLocator { .. } => vec![
                "Use the form <url>@<ref>".into(),
                "Example: https://github.com/org/template.git@main".into(),
            ],
            Self::DuplicateTarget { target, .. } => vec![
                format!("'{}' is claimed twice, or is still in use when the rename runs", target),
                "Make the templated names distinct in the configuration".into(),
                "Two entries cannot swap names in one render".into(),
            ],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidPath { .. }
            | Self::RestrictedPath { .. }
            | Self::InvalidLocator { .. } => ErrorCategory::Validation,
            Self::InvalidRenderedName { .. }
            | Self::ConfigParse { .. }
            | Self::ConvergenceFailed { .. }
            | Self::DuplicateTarget { .. } => ErrorCategory::Configuration,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Configuration,
}
