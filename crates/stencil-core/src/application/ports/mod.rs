//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `stencil-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `TemplateEngine`: Parse and execute templates
//!   - `TemplateSource`: Template bytes (local or virtual filesystem)
//!   - `FileWriter`: Write decision engine
//!   - `SourceFormatter`: In-process formatting of rendered source
//!   - `ImportResolver`: External formatter run on written files
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{FileWriter, ImportResolver, SourceFormatter, TemplateEngine, TemplateSource};

#[cfg(test)]
pub use output::{
    MockFileWriter, MockImportResolver, MockSourceFormatter, MockTemplateEngine,
    MockTemplateSource,
};
