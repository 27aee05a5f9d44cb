//! Global arguments that apply to every subcommand.
//!
//! Flattened into [`super::Cli`]; every flag is `global = true` so it may
//! appear before or after the subcommand.

use std::io::IsTerminal as _;
use std::path::PathBuf;

use clap::Args;

/// Flags shared by every subcommand.
#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Log verbosity counter. `RUST_LOG` overrides it.
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        global = true,
        help = "Increase verbosity (-v, -vv, -vvv)",
        long_help = "Increase logging verbosity:
    (none)  - Warnings and errors
    -v      - Info level (progress messages)
    -vv     - Debug level (detailed diagnostics)
    -vvv    - Trace level (very verbose)"
    )]
    pub verbose: u8,

    /// Hide per-target report lines. Errors and `eval` output still print.
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        conflicts_with = "verbose",
        help = "Only print errors and requested values"
    )]
    pub quiet: bool,

    /// Disable ANSI colour codes. Honours `NO_COLOR`.
    #[arg(
        long = "no-color",
        global = true,
        env = "NO_COLOR",
        help = "Disable colored output"
    )]
    pub no_color: bool,

    /// Configuration file path.
    ///
    /// Defaults to `config.toml` in the platform config directory.
    #[arg(
        short = 'c',
        long = "config",
        global = true,
        value_name = "FILE",
        env = "STENCIL_CONFIG",
        help = "Configuration file path"
    )]
    pub config: Option<PathBuf>,

    /// Report format. `auto` defers to `output.format` in the config,
    /// then to terminal detection.
    #[arg(
        long = "output-format",
        global = true,
        value_enum,
        default_value = "auto",
        help = "Output format"
    )]
    pub output_format: OutputFormat,
}

impl GlobalArgs {
    /// ANSI colour for diagnostics: stderr is a terminal and colour was not
    /// disabled.
    pub fn stderr_color(&self) -> bool {
        !self.no_color && std::io::stderr().is_terminal()
    }
}

/// How generating commands report what they wrote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Config value, else `human` on a terminal and `plain` when piped.
    #[default]
    Auto,
    /// Coloured report lines.
    Human,
    /// Report lines without ANSI codes.
    Plain,
    /// One JSON array of reports per command.
    Json,
}
