//! Stencil Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers of the Stencil
//! code generator: render a template against a context, decide how the
//! result lands on disk, and optionally format it.
//!
//! ## Architecture Overview
//!
//! ```text
//!   stencil-cli ──► Generator::run ──► TemplateSource::open
//!                        │        └──► TemplateEngine::render   (path, content)
//!                        │        └──► SourceFormatter::format  (in-process)
//!                        ├──────────► FileWriter::write_file    (create / overwrite / append / no-op)
//!                        └──────────► ImportResolver::format_path (external, after a write)
//!
//!   domain/       Target, WriteMode, RunOptions, RenderContext   (pure, no I/O)
//!   application/  ports (traits), renderers, Generator
//!   adapters      live in `stencil-adapters`
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use stencil_core::prelude::*;
//!
//! // 1. Describe the target
//! let target = Target::builder()
//!     .template("model.rs.jinja")
//!     .path_template("src/{{ name | snake_case }}.rs")
//!     .format_source(true)
//!     .build()?;
//!
//! // 2. Run the generator (with injected adapters)
//! let context = RenderContext::new().with_variable("name", "UserAccount");
//! let generation = generator.run(&target, &context, RunOptions::default())?;
//! println!("{} {}", generation.outcome, generation.path.display());
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        Generation, Generator, render_string,
        ports::{FileWriter, ImportResolver, SourceFormatter, TemplateEngine, TemplateSource},
    };
    pub use crate::domain::{
        RenderContext, RunOptions, Target, TargetBuilder, TemplateKind, WriteMode, WriteOutcome,
    };
    pub use crate::error::{StencilError, StencilResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
