//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports, leaf first:
//! `TemplateEngine` → `ConfigConverger` → content and structure renderers →
//! `RenderService`.

pub mod config_converger;
pub mod config_service;
pub mod content_renderer;
pub mod render_service;
pub mod structure_renderer;
pub mod template_engine;

#[cfg(test)]
pub(crate) mod testing;

pub use config_converger::{ConfigConverger, Convergence, DEFAULT_MAX_ITERATIONS};
pub use config_service::ConfigService;
pub use content_renderer::{ContentReport, TreeContentRenderer};
pub use render_service::{
    BASELINE_BRANCH, RenderOptions, RenderService, RenderSummary, TEMPLATE_BRANCH,
};
pub use structure_renderer::TreeStructureRenderer;
pub use template_engine::TemplateEngine;
