//! `stencil render`: one template, one destination.

use tracing::{info, instrument};

use stencil_core::{
    domain::{RenderContext, Target},
    error::StencilError,
};

use crate::{
    cli::RenderArgs,
    commands::{build_generator, context, execute_target},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

#[instrument(skip_all, fields(template = %args.template.display()))]
pub fn execute(args: RenderArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let context = context::load(&args.context, RenderContext::new())?;

    let mut builder = Target::builder()
        .template(args.template)
        .path_template(args.output)
        .overwrite_existing(args.overwrite)
        .format_source(args.format);
    if let Some(name) = args.name {
        builder = builder.name(name);
    }
    if args.partial {
        builder = builder.partial();
    }
    let target = builder.build().map_err(StencilError::from)?;

    let generator = build_generator(&config, None)?;
    let report = execute_target(&generator, &target, &context, args.run)?;
    info!(path = %report.path.display(), outcome = %report.outcome, "Target processed");

    output.report(&[report])?;
    Ok(())
}
