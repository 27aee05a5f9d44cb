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
    name    = "stencil",
    bin_name = "stencil",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Template-driven code generation",
    long_about = "Stencil renders a template against a context, writes the result \
                  to a templated path without clobbering hand-edited files, and \
                  optionally formats it.",
    after_help = "EXAMPLES:\n\
        \x20 stencil render -t model.rs.jinja -o 'src/{{ name | snake_case }}.rs' --set name=UserAccount\n\
        \x20 stencil eval '{{ name | kebab_case }}' --set name=UserAccount\n\
        \x20 stencil generate --manifest stencil.toml --force\n\
        \x20 stencil completions bash > /usr/share/bash-completion/completions/stencil",
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
    /// Render one template to one file.
    #[command(
        visible_alias = "r",
        about = "Render one template to one file",
        after_help = "EXAMPLES:\n\
            \x20 stencil render -t model.rs.jinja -o 'src/{{ name }}.rs' --set name=user\n\
            \x20 stencil render -t mod.rs.jinja -o src/mod.rs --append --set name=user\n\
            \x20 stencil render -t entity.jinja -o out.rs --partial --name entity --format"
    )]
    Render(RenderArgs),

    /// Render a template string and print the result.
    #[command(
        about = "Render a template string to stdout",
        after_help = "EXAMPLES:\n\
            \x20 stencil eval '{{ name | pascal_case }}' --set name=user_account\n\
            \x20 stencil eval '{{ uuidv4() }}'"
    )]
    Eval(EvalArgs),

    /// Render every target of a manifest.
    #[command(
        visible_alias = "gen",
        about = "Render every target in a manifest",
        after_help = "EXAMPLES:\n\
            \x20 stencil generate\n\
            \x20 stencil generate --manifest codegen/stencil.toml --force\n\
            \x20 stencil generate --set service.name=billing --dry-run"
    )]
    Generate(GenerateArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 stencil completions bash > ~/.local/share/bash-completion/completions/stencil\n\
            \x20 stencil completions zsh  > ~/.zfunc/_stencil\n\
            \x20 stencil completions fish > ~/.config/fish/completions/stencil.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the effective configuration.
    #[command(
        about = "Configuration inspection",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 stencil config get formatter.command\n\
            \x20 stencil config list\n\
            \x20 stencil config path"
    )]
    Config(ConfigCommands),
}

// ── shared ────────────────────────────────────────────────────────────────────

/// Where template variables come from.
#[derive(Debug, Clone, Default, Args)]
pub struct ContextArgs {
    /// Context files (JSON or TOML), merged left to right.
    #[arg(
        short = 'C',
        long = "context",
        value_name = "FILE",
        help = "Context file (.json or .toml); repeatable"
    )]
    pub files: Vec<PathBuf>,

    /// Single variables, applied after the files.
    #[arg(
        short = 's',
        long = "set",
        value_name = "KEY=VALUE",
        help = "Set a variable; dotted keys nest, values parse as JSON when possible"
    )]
    pub assignments: Vec<String>,
}

/// Runtime write overrides, valid for one invocation only.
#[derive(Debug, Clone, Copy, Default, Args)]
pub struct RunFlags {
    /// Append to existing destinations.
    #[arg(long = "append", help = "Append to existing files")]
    pub append: bool,

    /// Overwrite existing destinations.
    #[arg(long = "force", help = "Overwrite existing files for this run")]
    pub force: bool,

    /// Report what would happen without writing.
    #[arg(long = "dry-run", help = "Show what would be written without writing")]
    pub dry_run: bool,
}

// ── render ────────────────────────────────────────────────────────────────────

/// Arguments for `stencil render`.
#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Content template.
    #[arg(
        short = 't',
        long = "template",
        value_name = "PATH",
        help = "Template file"
    )]
    pub template: PathBuf,

    /// Destination path template.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "PATH_TEMPLATE",
        help = "Destination path; may use template syntax"
    )]
    pub output: String,

    /// Target name; defaults to the template file stem.
    #[arg(short = 'n', long = "name", help = "Target name (partial entry fragment)")]
    pub name: Option<String>,

    /// The template defines fragments; the one named after the target is
    /// expanded.
    #[arg(long = "partial", help = "Treat the template as named fragments")]
    pub partial: bool,

    /// Format the output as Rust source, then run the external formatter.
    #[arg(long = "format", help = "Format the generated file")]
    pub format: bool,

    /// Mark the destination as managed by the generator.
    #[arg(long = "overwrite", help = "Destination is managed; replace it")]
    pub overwrite: bool,

    #[command(flatten)]
    pub run: RunFlags,

    #[command(flatten)]
    pub context: ContextArgs,
}

// ── eval ──────────────────────────────────────────────────────────────────────

/// Arguments for `stencil eval`.
#[derive(Debug, Args)]
pub struct EvalArgs {
    /// Template source.
    #[arg(value_name = "TEMPLATE", help = "Template string to render")]
    pub template: String,

    #[command(flatten)]
    pub context: ContextArgs,
}

// ── generate ──────────────────────────────────────────────────────────────────

/// Arguments for `stencil generate`.
#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Manifest listing the targets.
    #[arg(
        short = 'm',
        long = "manifest",
        value_name = "FILE",
        default_value = "stencil.toml",
        help = "Manifest file"
    )]
    pub manifest: PathBuf,

    #[command(flatten)]
    pub run: RunFlags,

    #[command(flatten)]
    pub context: ContextArgs,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `stencil completions`.
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

/// Subcommands for `stencil config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `formatter.command`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the default configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────
