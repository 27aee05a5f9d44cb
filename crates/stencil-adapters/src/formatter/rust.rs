//! In-process source formatting.

use stencil_core::{
    application::{ApplicationError, ports::SourceFormatter},
    error::StencilResult,
};

/// Parses rendered output as a Rust file and pretty-prints it.
///
/// Output that does not parse is a `SourceFormatting` error; the raw text
/// is never passed through silently.
#[derive(Debug, Clone, Copy, Default)]
pub struct RustSourceFormatter;

impl SourceFormatter for RustSourceFormatter {
    fn format(&self, name: &str, source: &str) -> StencilResult<String> {
        let file = syn::parse_file(source).map_err(|e| ApplicationError::SourceFormatting {
            name: name.to_owned(),
            reason: e.to_string(),
        })?;
        Ok(prettyplease::unparse(&file))
    }
}

/// Formatter for non-Rust output.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughFormatter;

impl SourceFormatter for PassthroughFormatter {
    fn format(&self, _name: &str, source: &str) -> StencilResult<String> {
        Ok(source.to_owned())
    }
}
