// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for gittr.
//!
//! This module contains pure logic: path rules, the configuration document,
//! tree snapshots and render plans. All I/O and the template language itself
//! are reached through ports defined in the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, git, or process calls
//! - **Immutable values**: snapshots and plans are computed, then consumed
//!
// Public API - what the world sees
pub mod entities;
pub mod error;
pub mod path_guard;

// Private implementation details - not visible outside domain
mod validation;

// Re-exports for convenience
pub use entities::{
    ConfigDocument, ConfigMapping, EntryKind, LogicalPath, Rename, RenderPlan, TemplateLocator,
    TreeEntry, TreeSnapshot,
};

pub use error::{DomainError, ErrorCategory};

pub use path_guard::{
    GENERIC_TEMPLATE_SUFFIX, METADATA_DIR, PathGuard, TEMPLATE_SUFFIX, VCS_DIR,
};

pub use validation::DomainValidator;

/// Default configuration file, relative to the working tree root.
pub const CONFIG_FILE: &str = ".github/ght.yaml";
