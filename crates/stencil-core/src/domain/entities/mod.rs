pub mod context;
pub mod target;

pub use crate::domain::DomainError;
pub use context::RenderContext;
pub use target::{Target, TargetBuilder};
