//! Template source adapters.
//!
//! - [`LocalTemplateSource`]: reads templates straight from disk
//! - [`EmbeddedTemplates`]: a virtual filesystem held in memory, either
//!   loaded from a directory tree up front or assembled in code

mod embedded;
mod local;

pub use embedded::EmbeddedTemplates;
pub use local::LocalTemplateSource;
