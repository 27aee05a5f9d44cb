//! Command handlers. Each module exposes an `execute` function called from
//! `main::run`.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, instrument};

use stencil_adapters::{LocalFileWriter, LocalTemplateSource};
use stencil_core::{
    application::{Generator, ports::TemplateSource},
    domain::{DomainError, RenderContext, RunOptions, Target},
    error::StencilError,
};

use crate::{
    cli::RunFlags,
    config::AppConfig,
    error::{CliResult, IntoCli},
    output::Report,
};

pub mod completions;
pub mod config;
pub mod context;
pub mod eval;
pub mod generate;
pub mod render;

/// Wire a generator writing to the local filesystem.
///
/// `templates.dir` from the config wins; otherwise template paths resolve
/// against `base` (the manifest folder) or the current directory.
pub(crate) fn build_generator(config: &AppConfig, base: Option<&Path>) -> CliResult<Generator> {
    let templates: Arc<dyn TemplateSource> = match (&config.templates.dir, base) {
        (Some(dir), _) => stencil_adapters::template_source(Some(dir))?,
        (None, Some(base)) => Arc::new(LocalTemplateSource::rooted(base)),
        (None, None) => stencil_adapters::template_source(None)?,
    };
    let generator = stencil_adapters::generator(
        templates,
        LocalFileWriter::new(),
        config.external_formatter(),
    )?;
    Ok(generator)
}

/// Run one target, or with `--dry-run` only work out what the run would do.
#[instrument(skip_all, fields(target = %target.name(), dry_run = flags.dry_run))]
pub(crate) fn execute_target(
    generator: &Generator,
    target: &Target,
    context: &RenderContext,
    flags: RunFlags,
) -> CliResult<Report> {
    let run = RunOptions::new(flags.append, flags.force);
    if !flags.dry_run {
        return Ok(generator.run(target, context, run)?.into());
    }

    let mode = target.write_mode().with_runtime(run);
    target
        .validate()
        .and_then(|()| mode.validate())
        .map_err(StencilError::from)?;

    let path = generator.resolve_path(target, context)?;
    if path.as_os_str().is_empty() {
        return Err(StencilError::from(DomainError::EmptyDestination).into());
    }
    generator.render_content(target, context)?;

    let exists = path
        .try_exists()
        .with_cli_context(|| format!("cannot inspect {}", path.display()))?;
    let action = mode.decide(exists).map_err(StencilError::from)?;
    debug!(path = %path.display(), ?action, "Planned write");

    Ok(Report::planned(target.name(), path, action.outcome()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use stencil_core::domain::WriteOutcome;
    use tempfile::TempDir;

    use crate::error::CliError;

    fn setup() -> (TempDir, Generator) {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("model.jinja"), "struct {{ name }};\n").unwrap();
        let generator = build_generator(&AppConfig::default(), Some(dir.path())).unwrap();
        (dir, generator)
    }

    fn target(dir: &Path, file: &str) -> Target {
        Target::builder()
            .template("model.jinja")
            .path_template(dir.join(file).display().to_string())
            .build()
            .unwrap()
    }

    fn dry_run() -> RunFlags {
        RunFlags {
            dry_run: true,
            ..RunFlags::default()
        }
    }

    #[test]
    fn dry_run_reports_without_writing() {
        let (dir, generator) = setup();
        let context = RenderContext::new().with_variable("name", "User");
        let target = target(dir.path(), "out/user.rs");

        let report = execute_target(&generator, &target, &context, dry_run()).unwrap();

        assert!(report.dry_run);
        assert_eq!(report.outcome, WriteOutcome::Created);
        assert!(!dir.path().join("out").exists());
    }

    #[test]
    fn dry_run_sees_existing_destination() {
        let (dir, generator) = setup();
        fs::write(dir.path().join("user.rs"), "// mine").unwrap();
        let context = RenderContext::new().with_variable("name", "User");
        let target = target(dir.path(), "user.rs");

        let preserved = execute_target(&generator, &target, &context, dry_run()).unwrap();
        assert_eq!(preserved.outcome, WriteOutcome::NoOp);

        let forced = RunFlags {
            force: true,
            ..dry_run()
        };
        let overwritten = execute_target(&generator, &target, &context, forced).unwrap();
        assert_eq!(overwritten.outcome, WriteOutcome::Overwritten);
        assert_eq!(fs::read_to_string(dir.path().join("user.rs")).unwrap(), "// mine");
    }

    #[test]
    fn dry_run_still_renders() {
        let (dir, generator) = setup();
        // `name` is missing: the content template cannot execute.
        let err = execute_target(
            &generator,
            &target(dir.path(), "user.rs"),
            &RenderContext::new(),
            dry_run(),
        )
        .unwrap_err();
        assert!(matches!(err, CliError::Core(e) if e.is_render_error()));
    }

    #[test]
    fn real_run_writes() {
        let (dir, generator) = setup();
        let context = RenderContext::new().with_variable("name", "User");
        let report = execute_target(
            &generator,
            &target(dir.path(), "user.rs"),
            &context,
            RunFlags::default(),
        )
        .unwrap();

        assert!(!report.dry_run);
        assert_eq!(
            fs::read_to_string(dir.path().join("user.rs")).unwrap(),
            "struct User;\n"
        );
    }
}
