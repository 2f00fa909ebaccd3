//! Render Service - main application orchestrator.
//!
//! This service coordinates one full render of a working tree:
//! 1. Fetch the template into the template branch
//! 2. Reset the working tree to the template, keeping the configuration
//! 3. Converge the configuration file
//! 4. Render file contents and commit
//! 5. Render file and directory names and commit
//!
//! The two commits are separate checkpoints. A failure in the structure pass
//! leaves the rendered content committed and inspectable; committed phases are
//! never rolled back.

use serde::Serialize;
use serde_json::Value;
use tracing::{info, instrument};

use crate::{
    application::{
        ports::{Repository, TemplateRenderer},
        services::{
            ConfigService, ContentReport, TemplateEngine, TreeContentRenderer,
            TreeStructureRenderer, config_converger,
        },
    },
    domain::{CONFIG_FILE, ConfigMapping, LogicalPath, PathGuard, RenderPlan, TemplateLocator},
    error::GittrResult,
};

/// Local branch the template is fetched into before every render.
pub const TEMPLATE_BRANCH: &str = "ght/template";
/// Branch created by `initialize`.
pub const BASELINE_BRANCH: &str = "ght/master";

/// Tunables for a render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    pub config_path: LogicalPath,
    pub template_branch: String,
    pub max_iterations: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            config_path: LogicalPath::new(CONFIG_FILE),
            template_branch: TEMPLATE_BRANCH.to_string(),
            max_iterations: config_converger::DEFAULT_MAX_ITERATIONS,
        }
    }
}

/// Outcome of a full render.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderSummary {
    #[serde(serialize_with = "serialize_display")]
    pub locator: TemplateLocator,
    /// Render passes the configuration needed to converge.
    pub config_passes: usize,
    pub mapping: ConfigMapping,
    pub content: ContentReport,
    pub structure: RenderPlan,
}

/// Main render service.
pub struct RenderService {
    engine: TemplateEngine,
    options: RenderOptions,
}

impl RenderService {
    /// Create a render service backed by `renderer`.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use gittr_core::application::RenderService;
    ///
    /// let service = RenderService::new(Box::new(renderer));
    /// let summary = service.render_tree(&mut repo, &"https://host/t.git@main".parse()?)?;
    /// ```
    pub fn new(renderer: Box<dyn TemplateRenderer>) -> Self {
        Self {
            engine: TemplateEngine::new(renderer),
            options: RenderOptions::default(),
        }
    }

    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_guard(mut self, guard: PathGuard) -> Self {
        self.engine = self.engine.with_guard(guard);
        self
    }

    pub fn engine(&self) -> &TemplateEngine {
        &self.engine
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Render the template at `locator` into `repo`.
    #[instrument(skip_all, fields(template = %locator))]
    pub fn render_tree(
        &self,
        repo: &mut dyn Repository,
        locator: &TemplateLocator,
    ) -> GittrResult<RenderSummary> {
        // A render only makes sense inside an initialized repository.
        self.load_config(repo)?;

        self.fetch_template(repo, locator)?;
        self.prepare_tree_for_rendering(repo)?;

        let config_passes = self.render_config(repo)?;
        let mapping = self.load_config(repo)?;

        let content = self.render_tree_content(repo, &mapping)?;
        repo.commit(&format!("[ght]: rendered {} content", locator.url()))?;

        let structure = self.render_tree_structure(repo, &mapping)?;
        repo.commit(&format!("[ght]: rendered {} structure", locator.url()))?;

        info!(
            files = content.rendered.len(),
            renames = structure.len(),
            "render complete"
        );
        Ok(RenderSummary {
            locator: locator.clone(),
            config_passes,
            mapping,
            content,
            structure,
        })
    }

    /// Fetch the template into the template branch.
    pub fn fetch_template(
        &self,
        repo: &mut dyn Repository,
        locator: &TemplateLocator,
    ) -> GittrResult<()> {
        repo.fetch(
            locator.url(),
            locator.refspec(),
            &self.options.template_branch,
        )
    }

    /// Replace the working tree with the template branch, then restore the
    /// committed configuration file on top of it.
    pub fn prepare_tree_for_rendering(&self, repo: &mut dyn Repository) -> GittrResult<()> {
        let snapshot = repo.snapshot()?;
        let index = repo.index();
        for entry in snapshot.blobs() {
            index.remove(&entry.path)?;
        }
        index.update()?;

        repo.checkout(&self.options.template_branch, &[])?;
        repo.checkout("HEAD", std::slice::from_ref(&self.options.config_path))
    }

    /// Converge the configuration file in place; returns the pass count.
    pub fn render_config(&self, repo: &mut dyn Repository) -> GittrResult<usize> {
        Ok(self.config_service().render_config(repo)?.iterations)
    }

    pub fn load_config(&self, repo: &dyn Repository) -> GittrResult<ConfigMapping> {
        self.config_service().load_config(repo)
    }

    pub fn render_tree_content(
        &self,
        repo: &mut dyn Repository,
        mapping: &ConfigMapping,
    ) -> GittrResult<ContentReport> {
        let snapshot = repo.snapshot()?;
        TreeContentRenderer::new(&self.engine).render_all(&snapshot, mapping, repo)
    }

    pub fn render_tree_structure(
        &self,
        repo: &mut dyn Repository,
        mapping: &ConfigMapping,
    ) -> GittrResult<RenderPlan> {
        let snapshot = repo.snapshot()?;
        TreeStructureRenderer::new(&self.engine).rename_all(&snapshot, mapping, repo.index())
    }

    /// Start a new repository from the template at `locator`.
    ///
    /// `repo` must be freshly created. The template is fetched into the
    /// baseline branch and checked out; `config`, when given, is written as
    /// the configuration file before the initial commit.
    #[instrument(skip_all, fields(template = %locator))]
    pub fn initialize(
        &self,
        repo: &mut dyn Repository,
        locator: &TemplateLocator,
        config: Option<&ConfigMapping>,
    ) -> GittrResult<()> {
        repo.fetch(locator.url(), locator.refspec(), BASELINE_BRANCH)?;
        repo.switch_branch(BASELINE_BRANCH)?;

        if let Some(config) = config {
            let path = &self.options.config_path;
            repo.write_file(path, config.to_yaml()?.as_bytes())?;
            repo.index().add(path)?;
        }

        repo.commit("[ght]: Initial Commit")?;
        info!("repository initialized");
        Ok(())
    }

    /// Apply `edits` (dotted key, value) to the committed configuration and
    /// commit the result.
    ///
    /// Values are stored verbatim, template expressions included; the next
    /// render converges them. Comments in the original file are not kept.
    #[instrument(skip_all, fields(edits = edits.len()))]
    pub fn update_config(
        &self,
        repo: &mut dyn Repository,
        edits: &[(String, Value)],
    ) -> GittrResult<ConfigMapping> {
        let service = self.config_service();
        let mut mapping = service.read_document(repo)?.parse()?;
        for (key, value) in edits {
            mapping.insert(key, value.clone());
        }

        let path = service.path();
        repo.write_file(path, mapping.to_yaml()?.as_bytes())?;
        repo.index().add(path)?;
        repo.commit("[ght]: Update configuration file.")?;
        Ok(mapping)
    }

    fn config_service(&self) -> ConfigService<'_> {
        ConfigService::new(&self.engine, self.options.config_path.clone())
            .with_max_iterations(self.options.max_iterations)
    }
}

fn serialize_display<T, S>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
where
    T: std::fmt::Display,
    S: serde::Serializer,
{
    serializer.collect_str(value)
}
