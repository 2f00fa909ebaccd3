//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "gittr",
    bin_name = "gittr",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Keep a git repository in sync with a parameterised template",
    long_about = "gittr renders a template repository into your own repository. \
                  The configuration file .github/ght.yaml supplies the values; \
                  file contents and file names are rendered and committed.",
    after_help = "EXAMPLES:\n\
        \x20 gittr init my-project https://github.com/acme/template.git@main\n\
        \x20 gittr render https://github.com/acme/template.git@main\n\
        \x20 gittr configure --set project.name=demo\n\
        \x20 gittr completions bash > /usr/share/bash-completion/completions/gittr",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// (Re)render a repository from its template.
    #[command(
        visible_alias = "r",
        about = "(Re)render an existing repository",
        after_help = "EXAMPLES:\n\
            \x20 gittr render https://github.com/acme/template.git@main\n\
            \x20 gittr render git@github.com:acme/template.git@v1.2 --repo ../service\n\
            \x20 gittr render ../template@main --now 2024-01-01T00:00:00Z --yes"
    )]
    Render(RenderArgs),

    /// Create a repository from a template.
    #[command(
        about = "Initialize a repository from a template",
        after_help = "EXAMPLES:\n\
            \x20 gittr init my-project https://github.com/acme/template.git@main\n\
            \x20 gittr init my-project ../template@main --set name=demo --set port=8080"
    )]
    Init(InitArgs),

    /// Update values in the repository's template configuration.
    #[command(
        about = "Edit the template configuration file",
        after_help = "EXAMPLES:\n\
            \x20 gittr configure --set name=demo\n\
            \x20 gittr configure --repo ../service --set ci.enabled=true"
    )]
    Configure(ConfigureArgs),

    /// List the files a template directory would render.
    #[command(
        visible_alias = "ls",
        about = "List template sources",
        after_help = "EXAMPLES:\n\
            \x20 gittr list\n\
            \x20 gittr list ../template --format json"
    )]
    List(ListArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 gittr completions bash > ~/.local/share/bash-completion/completions/gittr\n\
            \x20 gittr completions zsh  > ~/.zfunc/_gittr\n\
            \x20 gittr completions fish > ~/.config/fish/completions/gittr.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the gittr application configuration.
    #[command(
        about = "Application configuration",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 gittr config get render.max_iterations\n\
            \x20 gittr config list\n\
            \x20 gittr config path"
    )]
    Config(ConfigCommands),
}

// ── render ────────────────────────────────────────────────────────────────────

/// Arguments for `gittr render`.
#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Template locator, `<url>@<ref>`.
    #[arg(value_name = "TEMPLATE_URL", help = "Template locator, <url>@<ref>")]
    pub template: String,

    /// Repository to render into.
    #[arg(
        short = 'r',
        long = "repo",
        value_name = "PATH",
        default_value = ".",
        help = "Repository to render into"
    )]
    pub repo: PathBuf,

    /// Instant seen by `now()` in templates.
    #[arg(
        long = "now",
        value_name = "RFC3339",
        help = "Fixed instant for now(), e.g. 2024-01-01T00:00:00Z"
    )]
    pub now: Option<String>,

    /// Ceiling on configuration render passes.
    #[arg(
        long = "max-iterations",
        value_name = "N",
        value_parser = clap::value_parser!(u32).range(1..),
        help = "Maximum configuration render passes"
    )]
    pub max_iterations: Option<u32>,

    /// Render even when the working tree has local changes.
    #[arg(
        short = 'y',
        long = "yes",
        help = "Skip the local-changes confirmation"
    )]
    pub yes: bool,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `gittr init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Directory for the new repository.
    #[arg(value_name = "PATH", help = "Directory for the new repository")]
    pub path: PathBuf,

    /// Template locator, `<url>@<ref>`.
    #[arg(value_name = "TEMPLATE_URL", help = "Template locator, <url>@<ref>")]
    pub template: String,

    /// Initial configuration values.
    #[arg(
        short = 's',
        long = "set",
        value_name = "KEY=VALUE",
        value_parser = parse_key_value,
        help = "Configuration value to write (repeatable)"
    )]
    pub set: Vec<(String, String)>,
}

// ── configure ─────────────────────────────────────────────────────────────────

/// Arguments for `gittr configure`.
#[derive(Debug, Args)]
pub struct ConfigureArgs {
    /// Repository whose configuration is edited.
    #[arg(
        short = 'r',
        long = "repo",
        value_name = "PATH",
        default_value = ".",
        help = "Repository to configure"
    )]
    pub repo: PathBuf,

    /// Values to change.
    #[arg(
        short = 's',
        long = "set",
        value_name = "KEY=VALUE",
        value_parser = parse_key_value,
        required = true,
        help = "Configuration value to change (repeatable)"
    )]
    pub set: Vec<(String, String)>,
}

// ── list ──────────────────────────────────────────────────────────────────────

/// Arguments for `gittr list`.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Template directory.
    #[arg(value_name = "DIR", default_value = ".", help = "Template directory")]
    pub dir: PathBuf,

    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

/// Output format for the `list` command.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ListFormat {
    /// Human-readable table.
    Table,
    /// One path per line.
    List,
    /// JSON array.
    Json,
    /// CSV rows.
    Csv,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `gittr completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `gittr config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `render.max_iterations`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the default configuration file.
    Path,
}

/// Parse `key=value`; the key must be non-empty.
fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing key in '{raw}'"));
    }
    Ok((key.to_string(), value.to_string()))
}

// ── tests ─────────────────────────────────────────────────────────────────────
