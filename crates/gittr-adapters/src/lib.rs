//! Infrastructure adapters for gittr.
//!
//! This crate implements the ports defined in `gittr-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod filesystem;
pub mod renderer;
pub mod source;
pub mod vcs;

// Re-export commonly used adapters
pub use filesystem::LocalFilesystem;
pub use renderer::{RenderClock, TeraRenderer};
pub use source::DirectorySource;
pub use vcs::{CommitIdentity, GitRepository, MemoryRepository};
