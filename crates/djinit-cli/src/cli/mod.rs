//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums. No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "djinit",
    bin_name = "djinit",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "\u{26a1} Django projects with composable features",
    long_about = "djinit generates a Django project skeleton and merges in the \
                  optional features you pick (REST framework, JWT, CORS, ...), \
                  pulling in their dependencies automatically.",
    after_help = "EXAMPLES:\n\
        \x20 djinit new shop --app catalog --features drf,cors\n\
        \x20 djinit new shop -i\n\
        \x20 djinit resolve --features api_docs\n\
        \x20 djinit list --format json\n\
        \x20 djinit completions bash > /usr/share/bash-completion/completions/djinit",
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
    /// Create a new Django project.
    #[command(
        visible_alias = "n",
        about = "Create a new Django project",
        after_help = "EXAMPLES:\n\
            \x20 djinit new shop\n\
            \x20 djinit new shop --app catalog --features drf,jwt,cors --git\n\
            \x20 djinit new shop --all-features          # fails if two features conflict\n\
            \x20 djinit new shop -o ~/src --dry-run"
    )]
    New(NewArgs),

    /// List catalog features.
    #[command(
        visible_alias = "ls",
        about = "List available features",
        after_help = "EXAMPLES:\n\
            \x20 djinit list\n\
            \x20 djinit list --format json"
    )]
    List(ListArgs),

    /// Show what a feature request resolves to.
    #[command(
        about = "Resolve features without creating anything",
        after_help = "EXAMPLES:\n\
            \x20 djinit resolve --features api_docs\n\
            \x20 djinit resolve --all-features"
    )]
    Resolve(ResolveArgs),

    /// Initialise a djinit configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 djinit init           # user config directory\n\
            \x20 djinit init --local   # ./.djinit.toml"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 djinit completions bash > ~/.local/share/bash-completion/completions/djinit\n\
            \x20 djinit completions zsh  > ~/.zfunc/_djinit\n\
            \x20 djinit completions fish > ~/.config/fish/completions/djinit.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the djinit configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 djinit config get defaults.features\n\
            \x20 djinit config list\n\
            \x20 djinit config path"
    )]
    Config(ConfigCommands),
}

// ── new ───────────────────────────────────────────────────────────────────────

/// Arguments for `djinit new`.
#[derive(Debug, Args)]
pub struct NewArgs {
    /// Project (settings package) name.
    #[arg(value_name = "NAME", help = "Project name, a valid Python identifier")]
    pub name: String,

    /// Name of the first Django app.
    #[arg(
        short = 'a',
        long = "app",
        value_name = "APP",
        help = "App name (default from config, else 'core')"
    )]
    pub app: Option<String>,

    /// Features to enable; dependencies are added automatically.
    #[arg(
        short = 'f',
        long = "features",
        value_name = "IDS",
        value_delimiter = ',',
        conflicts_with_all = ["minimal", "all_features"],
        help = "Comma-separated feature ids"
    )]
    pub features: Vec<String>,

    /// Base project only, ignoring configured default features.
    #[arg(long = "minimal", conflicts_with_all = ["all_features", "interactive"], help = "No optional features")]
    pub minimal: bool,

    /// Every catalog feature.
    #[arg(long = "all-features", conflicts_with = "interactive", help = "Enable every feature")]
    pub all_features: bool,

    /// Pick features with the keyboard.
    #[arg(short = 'i', long = "interactive", help = "Choose features interactively")]
    pub interactive: bool,

    /// Run `git init` in the new project.
    #[arg(long = "git", help = "Initialize a git repository")]
    pub git: bool,

    /// Parent directory of the project.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "DIR",
        help = "Output directory (default: current directory)"
    )]
    pub output: Option<PathBuf>,

    /// Skip the confirmation prompt.
    #[arg(
        short = 'y',
        long = "yes",
        help = "Skip confirmation and create immediately"
    )]
    pub yes: bool,

    /// Overwrite an existing directory (destructive).
    #[arg(long = "force", help = "Overwrite existing directory")]
    pub force: bool,

    /// Preview what would be created without writing any files.
    #[arg(long = "dry-run", help = "Show what would be created without creating")]
    pub dry_run: bool,
}

// ── list ──────────────────────────────────────────────────────────────────────

/// Arguments for `djinit list`.
#[derive(Debug, Args)]
pub struct ListArgs {
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
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    /// Human-readable table.
    Table,
    /// One id per line.
    List,
    /// JSON array.
    Json,
    /// CSV rows.
    Csv,
}

// ── resolve ───────────────────────────────────────────────────────────────────

/// Arguments for `djinit resolve`.
#[derive(Debug, Args)]
pub struct ResolveArgs {
    /// Features to resolve.
    #[arg(
        short = 'f',
        long = "features",
        value_name = "IDS",
        value_delimiter = ',',
        conflicts_with = "all_features",
        help = "Comma-separated feature ids"
    )]
    pub features: Vec<String>,

    /// Resolve the whole catalog.
    #[arg(long = "all-features", help = "Resolve every feature")]
    pub all_features: bool,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `djinit init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Write `.djinit.toml` in the current directory.
    #[arg(
        long = "local",
        help = "Create local configuration in current directory"
    )]
    pub local: bool,

    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `djinit completions`.
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

/// Subcommands for `djinit config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `defaults.app_name`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the user configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────
