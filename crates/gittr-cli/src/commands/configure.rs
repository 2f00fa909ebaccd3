//! `gittr configure`: change values in the repository's template
//! configuration and commit them.

use tracing::instrument;

use gittr_adapters::{GitRepository, TeraRenderer};
use gittr_core::{application::RenderService, domain::CONFIG_FILE};

use crate::{
    cli::{ConfigureArgs, OutputFormat},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

#[instrument(skip_all, fields(repo = %args.repo.display()))]
pub fn execute(args: ConfigureArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let edits = super::config_edits(args.set);

    let mut repo = GitRepository::open(&args.repo)?.with_identity(config.identity());
    let service = RenderService::new(Box::new(TeraRenderer::default()));
    let mapping = service.update_config(&mut repo, &edits)?;

    if output.format() == OutputFormat::Json {
        return output.json(&mapping);
    }

    output.success(&format!("Updated {} value(s) in {CONFIG_FILE}", edits.len()))?;
    for (key, value) in &edits {
        output.print(&format!("  {key} = {value}"))?;
    }
    output.info("Run `gittr render <url>@<ref>` to apply the new values")?;
    Ok(())
}
