//! Application layer for Stencil.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (Generator, template renderers)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! business logic itself. Write decisions live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{
    Generation, Generator, GeneratorBuilder, RenderOptions, Renderer, render_string,
};

// Re-export port traits (for adapter implementation)
pub use ports::{FileWriter, ImportResolver, SourceFormatter, TemplateEngine, TemplateSource};

pub use error::ApplicationError;
