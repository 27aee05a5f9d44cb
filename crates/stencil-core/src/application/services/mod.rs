//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "render this template" or "generate this target".

pub mod generator;
pub mod renderer;

pub use generator::{
    Generation, Generator, GeneratorBuilder, PATH_TEMPLATE_NAME, STRING_TEMPLATE_NAME,
    render_string,
};
pub use renderer::{
    BaseTemplate, DEFAULT_TEMPLATE_NAME, FileTemplate, PartialFileTemplate, RenderOptions,
    Renderer, renderer_for,
};
