//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `stencil-adapters` crate provides implementations.

use std::io::{self, Read};
use std::path::Path;

use crate::domain::{RenderContext, WriteMode, WriteOutcome};
use crate::error::StencilResult;

/// Port for the template engine.
///
/// Implemented by:
/// - `stencil_adapters::engine::MiniJinjaEngine` (MiniJinja + function library)
///
/// ## Contract
///
/// - Syntax errors are reported as `ApplicationError::TemplateConstruction`
/// - Failures against the context (unknown variables, bad function calls)
///   are reported as `ApplicationError::TemplateExecution`
/// - Every call parses afresh; nothing is cached between calls
#[cfg_attr(test, mockall::automock)]
pub trait TemplateEngine: Send + Sync {
    /// Parse `source` under `name`, bind `context` and produce text.
    fn render(&self, name: &str, source: &str, context: &RenderContext) -> StencilResult<String>;

    /// The directive that expands the fragment `fragment` defined in the same
    /// template source.
    fn fragment_call(&self, fragment: &str) -> StencilResult<String>;
}

/// Port for reading template sources.
///
/// Implemented by:
/// - `stencil_adapters::templates::LocalTemplateSource` (local filesystem)
/// - `stencil_adapters::templates::EmbeddedTemplates` (virtual, in-memory)
#[cfg_attr(test, mockall::automock)]
pub trait TemplateSource: Send + Sync {
    /// Open the template at `path`.
    ///
    /// A missing path and a path naming a directory both yield
    /// `io::ErrorKind::NotFound`.
    fn open(&self, path: &Path) -> io::Result<Box<dyn Read + Send>>;
}

/// Port for the write decision engine.
///
/// Implemented by:
/// - `stencil_adapters::filesystem::LocalFileWriter` (production)
/// - `stencil_adapters::filesystem::MemoryFileWriter` (testing, dry runs)
///
/// ## Design Notes
///
/// - `content` is the complete rendered body; implementations never see a
///   partial render
/// - `WriteOutcome::NoOp` is success, not an error
/// - Every opened handle is closed before returning
#[cfg_attr(test, mockall::automock)]
pub trait FileWriter: Send + Sync {
    /// Persist `content` at `path` according to `mode`.
    fn write_file(&self, path: &Path, content: &[u8], mode: WriteMode)
    -> StencilResult<WriteOutcome>;
}

/// Port for in-process source normalization.
///
/// Implemented by:
/// - `stencil_adapters::formatter::RustSourceFormatter` (syn + prettyplease)
/// - `stencil_adapters::formatter::PassthroughFormatter`
#[cfg_attr(test, mockall::automock)]
pub trait SourceFormatter: Send + Sync {
    /// Format the rendered body of template `name`.
    fn format(&self, name: &str, source: &str) -> StencilResult<String>;
}

/// Port for the out-of-process formatter run on a written file.
///
/// Implemented by:
/// - `stencil_adapters::formatter::CommandFormatter` (`rustfmt` by default)
#[cfg_attr(test, mockall::automock)]
pub trait ImportResolver: Send + Sync {
    /// Rewrite the file at `path` in place.
    fn format_path(&self, path: &Path) -> StencilResult<()>;
}
