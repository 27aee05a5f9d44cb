//! Source formatters.
//!
//! - [`RustSourceFormatter`]: in-process, runs on the rendered text
//! - [`PassthroughFormatter`]: returns its input
//! - [`CommandFormatter`]: out-of-process, runs on the written file

mod command;
mod rust;

pub use command::CommandFormatter;
pub use rust::{PassthroughFormatter, RustSourceFormatter};
