//! Config Service - reads, converges and writes back the configuration file.

use tracing::{info, instrument};

use crate::{
    application::{
        ApplicationError,
        ports::Repository,
        services::{ConfigConverger, Convergence, TemplateEngine, config_converger},
    },
    domain::{ConfigDocument, ConfigMapping, DomainError, LogicalPath},
    error::GittrResult,
};

pub struct ConfigService<'a> {
    engine: &'a TemplateEngine,
    path: LogicalPath,
    max_iterations: usize,
}

impl<'a> ConfigService<'a> {
    pub fn new(engine: &'a TemplateEngine, path: LogicalPath) -> Self {
        Self {
            engine,
            path,
            max_iterations: config_converger::DEFAULT_MAX_ITERATIONS,
        }
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn path(&self) -> &LogicalPath {
        &self.path
    }

    /// Read the configuration document from the working tree.
    pub fn read_document(&self, repo: &dyn Repository) -> GittrResult<ConfigDocument> {
        let bytes = repo
            .read_file(&self.path)?
            .ok_or_else(|| ApplicationError::ConfigMissing {
                path: self.path.to_string(),
            })?;

        let text = String::from_utf8(bytes).map_err(|e| DomainError::ConfigParse {
            reason: format!("{} is not valid UTF-8: {}", self.path, e),
        })?;
        Ok(ConfigDocument::from_text(&text))
    }

    /// Converge the configuration file in place and stage it.
    #[instrument(skip_all, fields(path = %self.path))]
    pub fn render_config(&self, repo: &mut dyn Repository) -> GittrResult<Convergence> {
        let document = self.read_document(repo)?;
        let convergence = ConfigConverger::new(self.engine)
            .with_max_iterations(self.max_iterations)
            .converge(&document)?;

        repo.write_file(&self.path, convergence.document.to_text().as_bytes())?;
        repo.index().add(&self.path)?;

        info!(passes = convergence.iterations, "configuration rendered");
        Ok(convergence)
    }

    /// Parse the configuration file as it currently stands.
    pub fn load_config(&self, repo: &dyn Repository) -> GittrResult<ConfigMapping> {
        Ok(self.read_document(repo)?.parse()?)
    }
}
