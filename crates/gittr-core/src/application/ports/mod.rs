//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `gittr-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `TemplateRenderer`: the template language
//!   - `TemplateSource`: raw template text by logical path
//!   - `PartialSource`: templates included by name from another template
//!   - `StagingIndex`: add / remove / move tracked paths
//!   - `Repository`: tree snapshot, working-tree I/O, checkout, commit
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{PartialSource, Repository, StagingIndex, TemplateRenderer, TemplateSource};
