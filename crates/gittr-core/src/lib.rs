//! gittr Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for gittr, the git
//! template renderer, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            gittr-cli (CLI)              │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │  (RenderService, ConfigConverger, ...)  │
//! │         Orchestrates Use Cases          │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (Driven: Repository, Index, Renderer)   │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     gittr-adapters (Infrastructure)     │
//! │ (GitRepository, TeraRenderer, Memory..) │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Domain Layer (Pure Logic)        │
//! │ (PathGuard, ConfigDocument, RenderPlan) │
//! │         No External Dependencies        │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use gittr_core::prelude::*;
//!
//! // 1. Parse the template locator
//! let locator: TemplateLocator = "https://github.com/acme/template.git@main".parse()?;
//!
//! // 2. Use application service (with injected adapters)
//! let service = RenderService::new(Box::new(renderer));
//! let summary = service.render_tree(&mut repo, &locator)?;
//! ```

// Re-export domain layer (stable, well-defined API)
pub mod domain;

// Re-export application layer (orchestration logic)
pub mod application;

// Re-export error types
pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        ConfigConverger, RenderOptions, RenderService, RenderSummary, TemplateEngine,
        ports::{Repository, StagingIndex, TemplateRenderer, TemplateSource},
    };
    pub use crate::domain::{
        CONFIG_FILE, ConfigDocument, ConfigMapping, LogicalPath, PathGuard, RenderPlan,
        TemplateLocator, TreeSnapshot,
    };
    pub use crate::error::{GittrError, GittrResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
