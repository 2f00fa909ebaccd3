//! Template source adapters.

mod directory;

pub use directory::DirectorySource;
