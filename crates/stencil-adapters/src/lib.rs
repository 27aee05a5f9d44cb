//! Infrastructure adapters for Stencil.
//!
//! This crate implements the ports defined in `stencil_core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod engine;
pub mod filesystem;
pub mod formatter;
pub mod templates;

use std::path::Path;
use std::sync::Arc;

use stencil_core::{
    application::{
        Generator,
        ports::{FileWriter, TemplateSource},
    },
    error::StencilResult,
};

// Re-export commonly used adapters
pub use engine::{FunctionRegistry, MiniJinjaEngine};
pub use filesystem::{LocalFileWriter, MemoryFileWriter};
pub use formatter::{CommandFormatter, PassthroughFormatter, RustSourceFormatter};
pub use templates::{EmbeddedTemplates, LocalTemplateSource};

/// Pick the template source.
///
/// With a templates directory, every template under it is loaded into
/// memory once. Without one, templates are read from disk relative to the
/// current directory.
pub fn template_source(templates_dir: Option<&Path>) -> StencilResult<Arc<dyn TemplateSource>> {
    Ok(match templates_dir {
        Some(dir) => Arc::new(EmbeddedTemplates::from_dir(dir)?),
        None => Arc::new(LocalTemplateSource::new()),
    })
}

/// Wire a generator with the production engine and formatters.
pub fn generator(
    templates: Arc<dyn TemplateSource>,
    writer: impl FileWriter + 'static,
    external_formatter: CommandFormatter,
) -> StencilResult<Generator> {
    Generator::builder()
        .engine(MiniJinjaEngine::new())
        .shared_templates(templates)
        .writer(writer)
        .formatter(RustSourceFormatter)
        .import_resolver(external_formatter)
        .build()
}
