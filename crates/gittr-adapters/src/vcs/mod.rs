//! Version-control adapters.

mod git;
mod memory;

pub use git::{CommitIdentity, GitError, GitRepository, git_available};
pub use memory::{MemoryCommit, MemoryRepository};
