//! `gittr init`: create a repository from a template.

use std::path::Path;

use serde_json::json;
use tracing::{info, instrument};

use gittr_adapters::{GitRepository, TeraRenderer};
use gittr_core::{
    application::{BASELINE_BRANCH, RenderService},
    domain::{CONFIG_FILE, ConfigMapping},
};

use crate::{
    cli::{InitArgs, OutputFormat},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Create the repository, fetch the template into the baseline branch and
/// commit the initial configuration.
#[instrument(skip_all, fields(path = %args.path.display(), template = %args.template))]
pub fn execute(args: InitArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let locator = super::parse_locator(&args.template)?;
    ensure_empty(&args.path)?;

    let initial = if args.set.is_empty() {
        None
    } else {
        let mut mapping = ConfigMapping::new();
        for (key, value) in super::config_edits(args.set) {
            mapping.insert(&key, value);
        }
        Some(mapping)
    };

    let mut repo = GitRepository::init(&args.path)?.with_identity(config.identity());
    let service = RenderService::new(Box::new(TeraRenderer::default()));

    let spinner = output.spinner(&format!("Fetching {locator}"));
    let result = service.initialize(&mut repo, &locator, initial.as_ref());
    spinner.finish_and_clear();
    result?;

    info!(root = %repo.root().display(), "repository initialized");

    if output.format() == OutputFormat::Json {
        return output.json(&json!({
            "path": repo.root(),
            "template": locator.to_string(),
            "branch": BASELINE_BRANCH,
        }));
    }

    output.success(&format!(
        "Initialized {} from {locator}",
        args.path.display()
    ))?;
    output.print("")?;
    output.print("Next steps:")?;
    output.print(&format!("  cd {}", args.path.display()))?;
    output.print(&format!("  # review the values in {CONFIG_FILE}"))?;
    output.print(&format!("  gittr render {locator}"))?;
    Ok(())
}

/// Refuse to initialize into a directory that already has content.
fn ensure_empty(path: &Path) -> CliResult<()> {
    if !path.exists() {
        return Ok(());
    }
    let occupied = !path.is_dir()
        || std::fs::read_dir(path)
            .map_err(|e| CliError::IoError {
                message: format!("failed to read '{}'", path.display()),
                source: e,
            })?
            .next()
            .is_some();
    if occupied {
        return Err(CliError::InvalidInput {
            message: format!("'{}' already exists and is not empty", path.display()),
            source: None,
        });
    }
    Ok(())
}
