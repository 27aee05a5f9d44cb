//! Output management and formatting.

use std::io::{self, IsTerminal};
use std::path::PathBuf;

use clap::ValueEnum;
use console::Term;
use owo_colors::OwoColorize;
use serde_json::json;
use tracing::warn;

use stencil_core::{application::Generation, domain::WriteOutcome};

use crate::cli::global::{GlobalArgs, OutputFormat};
use crate::config::AppConfig;

/// One line of a generating command's report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub target: String,
    pub path: PathBuf,
    pub outcome: WriteOutcome,
    pub formatted: bool,
    /// Nothing was written; `outcome` is what a real run would do.
    pub dry_run: bool,
}

impl Report {
    pub fn planned(target: impl Into<String>, path: PathBuf, outcome: WriteOutcome) -> Self {
        Self {
            target: target.into(),
            path,
            outcome,
            formatted: false,
            dry_run: true,
        }
    }
}

impl From<Generation> for Report {
    fn from(generation: Generation) -> Self {
        Self {
            target: generation.target,
            path: generation.path,
            outcome: generation.outcome,
            formatted: generation.formatted,
            dry_run: false,
        }
    }
}

/// Manages CLI output based on configuration.
pub struct OutputManager {
    resolved_format: OutputFormat,
    quiet: bool,
    no_color: bool,
    term: Term,
}

impl OutputManager {
    /// Build an `OutputManager` from parsed CLI flags and loaded config.
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        let requested = match args.output_format {
            OutputFormat::Auto => configured_format(&config.output.format),
            explicit => explicit,
        };
        // Auto → Human (TTY) or Plain (piped/redirected).
        let resolved_format = match requested {
            OutputFormat::Auto if io::stdout().is_terminal() => OutputFormat::Human,
            OutputFormat::Auto => OutputFormat::Plain,
            resolved => resolved,
        };

        Self {
            resolved_format,
            quiet: args.quiet,
            no_color: args.no_color
                || config.output.no_color
                || resolved_format != OutputFormat::Human,
            term: Term::stdout(),
        }
    }

    // ── Public write methods ───────────────────────────────────────────────

    /// Command output proper (`eval` results, `config get` values). Written
    /// verbatim and never suppressed.
    pub fn emit(&self, text: &str) -> io::Result<()> {
        self.term.write_str(text)?;
        self.term.flush()
    }

    /// Bold cyan header line.
    pub fn header(&self, text: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            text.to_owned()
        } else {
            text.cyan().bold().to_string()
        };
        self.term.write_line(&line)
    }

    /// Print one line per report, or a single JSON array.
    ///
    /// JSON was asked for explicitly, so `--quiet` does not suppress it.
    pub fn report(&self, reports: &[Report]) -> io::Result<()> {
        if self.resolved_format == OutputFormat::Json {
            let body = reports.iter().map(report_json).collect::<Vec<_>>();
            let text = serde_json::to_string_pretty(&body).map_err(io::Error::other)?;
            return self.term.write_line(&text);
        }
        if self.quiet {
            return Ok(());
        }
        for report in reports {
            self.term.write_line(&self.report_line(report))?;
        }
        Ok(())
    }

    fn report_line(&self, report: &Report) -> String {
        let verb = if report.dry_run {
            format!("would be {}", report.outcome)
        } else {
            report.outcome.to_string()
        };
        let suffix = if report.formatted { " (formatted)" } else { "" };
        let path = report.path.display();

        if self.no_color {
            return format!("{verb:<11} {path}{suffix}");
        }
        let verb = format!("{verb:<11}");
        let verb = match report.outcome {
            WriteOutcome::Created => verb.green().bold().to_string(),
            WriteOutcome::Overwritten => verb.yellow().bold().to_string(),
            WriteOutcome::Appended => verb.cyan().bold().to_string(),
            WriteOutcome::NoOp => verb.dimmed().to_string(),
        };
        format!("{verb} {path}{}", suffix.dimmed())
    }
}

fn configured_format(value: &str) -> OutputFormat {
    OutputFormat::from_str(value, true).unwrap_or_else(|_| {
        warn!(value, "Unknown output.format in configuration, using auto");
        OutputFormat::Auto
    })
}

fn report_json(report: &Report) -> serde_json::Value {
    json!({
        "target": report.target,
        "path": report.path,
        "outcome": report.outcome.to_string(),
        "formatted": report.formatted,
        "dry_run": report.dry_run,
    })
}

// ── tests ─────────────────────────────────────────────────────────────────────
