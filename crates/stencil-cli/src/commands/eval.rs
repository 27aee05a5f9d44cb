//! `stencil eval`: render a template string to stdout.

use stencil_adapters::MiniJinjaEngine;
use stencil_core::{application::render_string, domain::RenderContext};

use crate::{
    cli::EvalArgs,
    commands::context,
    error::CliResult,
    output::OutputManager,
};

pub fn execute(args: EvalArgs, output: OutputManager) -> CliResult<()> {
    let context = context::load(&args.context, RenderContext::new())?;
    let mut rendered = render_string(&MiniJinjaEngine::new(), &args.template, &context)?;
    if !rendered.ends_with('\n') {
        rendered.push('\n');
    }
    output.emit(&rendered)?;
    Ok(())
}
