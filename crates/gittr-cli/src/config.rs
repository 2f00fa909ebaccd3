//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables, `GITTR_` prefix, `__` between sections
//!    (e.g. `GITTR_RENDER__MAX_ITERATIONS=16`)
//! 3. Config file (`--config`, or the platform config directory)
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use gittr_adapters::{CommitIdentity, RenderClock};
use gittr_core::application::DEFAULT_MAX_ITERATIONS;

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Rendering settings.
    pub render: RenderConfig,
    /// Identity used for gittr's own commits.
    pub commit: CommitConfig,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub max_iterations: usize,
    /// Fixed RFC 3339 instant for `now()`; the wall clock when unset.
    pub now: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommitConfig {
    pub author_name: Option<String>,
    pub author_email: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            now: None,
        }
    }
}

impl AppConfig {
    /// Load configuration: defaults, then the config file, then `GITTR_*`
    /// environment variables.
    ///
    /// An explicit `config_file` must exist; the default location is
    /// optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let (path, required) = match config_file {
            Some(path) => (path.clone(), true),
            None => (Self::config_path(), false),
        };
        Self::load_from(&path, required, Environment::with_prefix("GITTR"))
    }

    fn load_from(path: &Path, required: bool, env: Environment) -> anyhow::Result<Self> {
        let settings = Config::builder()
            .add_source(Config::try_from(&Self::default())?)
            .add_source(File::from(path).format(FileFormat::Toml).required(required))
            .add_source(
                env.prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .with_context(|| format!("reading configuration from {}", path.display()))?;

        settings
            .try_deserialize()
            .context("invalid configuration values")
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.gittr.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("org", "zeroae", "gittr")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".gittr.toml"))
    }

    /// Clock for `now()`: the configured instant, or the wall clock.
    pub fn clock(&self, override_now: Option<&str>) -> anyhow::Result<RenderClock> {
        match override_now.or(self.render.now.as_deref()) {
            Some(text) => RenderClock::parse(text)
                .with_context(|| format!("'{text}' is not an RFC 3339 timestamp")),
            None => Ok(RenderClock::system()),
        }
    }

    /// Commit identity, when both name and email are configured.
    pub fn identity(&self) -> Option<CommitIdentity> {
        match (&self.commit.author_name, &self.commit.author_email) {
            (Some(name), Some(email)) => Some(CommitIdentity::new(name, email)),
            _ => None,
        }
    }
}
