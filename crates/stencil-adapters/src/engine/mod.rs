//! Template engine adapter and its function library.

mod case;
mod functions;
mod jinja;

pub use case::{to_camel_case, to_kebab_case, to_pascal_case, to_snake_case, to_upper_snake_case};
pub use functions::FunctionRegistry;
pub use jinja::MiniJinjaEngine;
