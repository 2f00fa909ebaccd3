//! Command handlers, one module per subcommand.
//!
//! Handlers translate arguments into adapter and service calls and report the
//! outcome. No rendering logic lives here.

pub mod completions;
pub mod config;
pub mod configure;
pub mod init;
pub mod list;
pub mod render;

use serde_json::Value;

use gittr_core::{domain::TemplateLocator, error::GittrError};

use crate::error::{CliError, CliResult};

/// Parse a `<url>@<ref>` argument.
pub(crate) fn parse_locator(raw: &str) -> CliResult<TemplateLocator> {
    raw.parse()
        .map_err(|e: gittr_core::domain::DomainError| CliError::Core(GittrError::from(e)))
}

/// Turn `--set` pairs into configuration edits.
///
/// Booleans and numbers keep their type; everything else, template
/// expressions included, is stored as a string.
pub(crate) fn config_edits(pairs: Vec<(String, String)>) -> Vec<(String, Value)> {
    pairs
        .into_iter()
        .map(|(key, raw)| {
            let value = match serde_yaml::from_str::<Value>(&raw) {
                Ok(v @ (Value::Bool(_) | Value::Number(_))) => v,
                _ => Value::String(raw),
            };
            (key, value)
        })
        .collect()
}
