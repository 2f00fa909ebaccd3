//! `gittr config`: inspect the application configuration.

use serde_json::Value;

use crate::{
    cli::{ConfigCommands, GlobalArgs, OutputFormat},
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

/// Dispatch to the correct config subcommand.
pub fn execute(
    cmd: ConfigCommands,
    global: &GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    match cmd {
        ConfigCommands::Get { key } => {
            let value = get_config_value(&config, &key)?;
            if output.format() == OutputFormat::Json {
                output.json(&value)?;
            } else {
                println!("{}", display_value(&value));
            }
        }

        ConfigCommands::List => {
            if output.format() == OutputFormat::Json {
                return output.json(&config);
            }
            output.header("Current Configuration:")?;
            let serialised =
                toml::to_string_pretty(&config).map_err(|e| CliError::ConfigError {
                    message: format!("Failed to serialise config: {e}"),
                    source: Some(Box::new(e)),
                })?;
            output.print(&serialised)?;
        }

        ConfigCommands::Path => {
            let path = global.config.clone().unwrap_or_else(AppConfig::config_path);
            println!("{}", path.display());
        }
    }

    Ok(())
}

// ── helpers ───────────────────────────────────────────────────────────────────

/// Look up a dotted key such as `render.max_iterations`.
fn get_config_value(config: &AppConfig, key: &str) -> CliResult<Value> {
    let root = serde_json::to_value(config).with_cli_context(|| "reading configuration")?;
    key.split('.')
        .try_fold(&root, |value, part| value.get(part))
        .filter(|value| !value.is_object())
        .cloned()
        .ok_or_else(|| CliError::ConfigError {
            message: format!("Unknown config key: '{key}'"),
            source: None,
        })
}

fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use gittr_core::application::DEFAULT_MAX_ITERATIONS;

    #[test]
    fn get_known_key() {
        let cfg = AppConfig::default();
        assert_eq!(
            get_config_value(&cfg, "render.max_iterations").unwrap(),
            Value::from(DEFAULT_MAX_ITERATIONS)
        );
    }

    #[test]
    fn unset_optional_key_displays_empty() {
        let cfg = AppConfig::default();
        let value = get_config_value(&cfg, "commit.author_name").unwrap();
        assert_eq!(display_value(&value), "");
    }

    #[test]
    fn unknown_or_section_key_is_error() {
        let cfg = AppConfig::default();
        for key in ["does.not.exist", "render", "output.no_color.extra"] {
            assert!(
                matches!(get_config_value(&cfg, key), Err(CliError::ConfigError { .. })),
                "{key}"
            );
        }
    }

    #[test]
    fn get_no_color_default() {
        let cfg = AppConfig::default();
        let value = get_config_value(&cfg, "output.no_color").unwrap();
        assert_eq!(display_value(&value), "false");
    }
}
