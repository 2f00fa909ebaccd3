//! Application layer for gittr.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (RenderService and the renderers it drives)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer. Path rules, plans and
//! the configuration document live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{
    BASELINE_BRANCH, ConfigConverger, ConfigService, ContentReport, Convergence,
    DEFAULT_MAX_ITERATIONS, RenderOptions, RenderService,
    RenderSummary, TEMPLATE_BRANCH, TemplateEngine, TreeContentRenderer, TreeStructureRenderer,
};

// Re-export port traits (for adapter implementation)
pub use ports::{PartialSource, Repository, StagingIndex, TemplateRenderer, TemplateSource};

pub use error::{ApplicationError, NotFoundReason};
