pub mod common;
pub mod config_document;
pub mod locator;
pub mod render_plan;
pub mod tree;

pub use common::LogicalPath;
pub use config_document::{ConfigDocument, ConfigMapping};
pub use locator::TemplateLocator;
pub use render_plan::{Rename, RenderPlan};
pub use tree::{EntryKind, TreeEntry, TreeSnapshot};

use super::error::DomainError;
