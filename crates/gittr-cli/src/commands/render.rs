//! Implementation of the `gittr render` command.
//!
//! Responsibility: open the repository, build the renderer from the
//! configuration, run the render service, and report the summary.

use std::path::Path;

use tracing::{debug, info, instrument};

use gittr_adapters::{GitRepository, TeraRenderer};
use gittr_core::application::{ContentReport, RenderOptions, RenderService, RenderSummary};

use crate::{
    cli::{OutputFormat, RenderArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Execute the `gittr render` command.
///
/// Dispatch sequence:
/// 1. Parse the template locator and the `now()` instant
/// 2. Open the repository; confirm before discarding local changes
/// 3. Render via `RenderService`
/// 4. Report what changed
#[instrument(skip_all, fields(template = %args.template))]
pub fn execute(args: RenderArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let locator = super::parse_locator(&args.template)?;
    let clock = config
        .clock(args.now.as_deref())
        .map_err(CliError::invalid_input)?;
    let max_iterations = args
        .max_iterations
        .map_or(config.render.max_iterations, |n| n as usize);

    let mut repo = GitRepository::open(&args.repo)?.with_identity(config.identity());
    debug!(root = %repo.root().display(), max_iterations, "repository opened");

    if !args.yes && repo.has_local_changes()? {
        confirm_discard(repo.root())?;
    }

    let service = RenderService::new(Box::new(TeraRenderer::with_clock(clock))).with_options(
        RenderOptions {
            max_iterations,
            ..RenderOptions::default()
        },
    );

    let spinner = output.spinner(&format!("Rendering {locator}"));
    let result = service.render_tree(&mut repo, &locator);
    spinner.finish_and_clear();
    let summary = result?;

    info!(template = %locator, "render finished");
    report(&summary, &output)
}

fn report(summary: &RenderSummary, output: &OutputManager) -> CliResult<()> {
    if output.format() == OutputFormat::Json {
        return output.json(summary);
    }

    output.success(&format!("Rendered {}", summary.locator))?;
    output.print(&format!(
        "  configuration converged in {} pass(es)",
        summary.config_passes
    ))?;
    output.print(&format!("  {}", content_line(&summary.content)))?;
    output.print(&format!("  {} path(s) renamed", summary.structure.len()))?;
    for rename in summary.structure.renames() {
        output.print(&format!("    {} -> {}", rename.from, rename.to))?;
    }
    Ok(())
}

fn content_line(content: &ContentReport) -> String {
    format!(
        "{} file(s) rendered, {} changed, {} unchanged",
        content.rendered.len(),
        content.changed(),
        content.unchanged
    )
}

/// Ask before a render throws away uncommitted work.
fn confirm_discard(root: &Path) -> CliResult<()> {
    match ask_to_discard(root)? {
        Some(true) => Ok(()),
        Some(false) => Err(CliError::Cancelled),
        None => Err(CliError::LocalChanges {
            path: root.to_path_buf(),
        }),
    }
}

/// `None` when there is no terminal to ask on.
#[cfg(feature = "interactive")]
fn ask_to_discard(root: &Path) -> CliResult<Option<bool>> {
    use std::io::IsTerminal as _;

    if !std::io::stdin().is_terminal() {
        return Ok(None);
    }
    dialoguer::Confirm::new()
        .with_prompt(format!(
            "{} has local changes that the render will discard. Continue?",
            root.display()
        ))
        .default(false)
        .interact()
        .map(Some)
        .map_err(|e| CliError::IoError {
            message: "failed to read confirmation input".into(),
            source: std::io::Error::other(e),
        })
}

#[cfg(not(feature = "interactive"))]
fn ask_to_discard(_root: &Path) -> CliResult<Option<bool>> {
    Ok(None)
}
