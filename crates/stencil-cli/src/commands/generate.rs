//! `stencil generate`: render every target listed in a manifest.
//!
//! ```toml
//! [context]
//! service = "billing"
//!
//! [[targets]]
//! template = "templates/model.rs.jinja"
//! path     = "src/{{ service }}/model.rs"
//! format   = true
//!
//! [[targets]]
//! template = "templates/mod.rs.jinja"
//! path     = "src/{{ service }}/mod.rs"
//! append   = true
//! ```
//!
//! Targets run in order and the command stops at the first failure.
//! Reports for the targets that already ran are still printed.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{info, instrument};

use stencil_core::domain::{RenderContext, Target};

use crate::{
    cli::GenerateArgs,
    commands::{build_generator, context, execute_target},
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

/// Parsed `stencil.toml`.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// Variables shared by every target.
    #[serde(default)]
    pub context: toml::Table,
    #[serde(default)]
    pub targets: Vec<Target>,
}

impl Manifest {
    pub fn load(path: &Path) -> CliResult<Self> {
        if !path.is_file() {
            return Err(CliError::ManifestNotFound {
                path: path.to_path_buf(),
            });
        }
        let text = fs::read_to_string(path)
            .with_cli_context(|| format!("cannot read manifest {}", path.display()))?;
        Self::parse(path, &text)
    }

    fn parse(path: &Path, text: &str) -> CliResult<Self> {
        let invalid = |message: String| CliError::ManifestError {
            path: path.to_path_buf(),
            message,
        };

        let manifest: Self = toml::from_str(text).map_err(|e| invalid(e.to_string()))?;
        if manifest.targets.is_empty() {
            return Err(invalid("no [[targets]] defined".into()));
        }
        Ok(manifest)
    }

    /// The `[context]` table as a render context.
    pub fn render_context(&self) -> CliResult<RenderContext> {
        RenderContext::from_serialize(&self.context).map_err(|e| CliError::InvalidInput {
            message: "manifest context cannot be used for rendering".into(),
            source: Some(Box::new(e)),
        })
    }
}

/// Folder the manifest's relative template paths resolve against.
fn manifest_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

#[instrument(skip_all, fields(manifest = %args.manifest.display()))]
pub fn execute(args: GenerateArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let manifest = Manifest::load(&args.manifest)?;
    let context = context::load(&args.context, manifest.render_context()?)?;
    let generator = build_generator(&config, Some(&manifest_dir(&args.manifest)))?;

    let mut reports = Vec::with_capacity(manifest.targets.len());
    for target in &manifest.targets {
        match execute_target(&generator, target, &context, args.run) {
            Ok(report) => reports.push(report),
            Err(e) => {
                output.report(&reports)?;
                return Err(e);
            }
        }
    }

    info!(targets = reports.len(), "Manifest processed");
    output.report(&reports)?;
    Ok(())
}
