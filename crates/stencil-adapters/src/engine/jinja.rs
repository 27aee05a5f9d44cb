//! MiniJinja template engine adapter.

use minijinja::{AutoEscape, Environment, UndefinedBehavior};
use tracing::trace;

use stencil_core::{
    application::{ApplicationError, ports::TemplateEngine},
    domain::{RenderContext, validate_fragment_name},
    error::StencilResult,
};

use super::functions::FunctionRegistry;

/// Template engine backed by MiniJinja.
///
/// Each render builds a fresh environment, so nothing is cached between
/// calls and concurrent renders never share state. Undefined variables are
/// execution errors, not empty strings. Output is never auto-escaped,
/// whatever extension the template name carries.
#[derive(Debug, Clone)]
pub struct MiniJinjaEngine {
    functions: FunctionRegistry,
}

impl MiniJinjaEngine {
    /// Engine with the standard function library.
    pub fn new() -> Self {
        Self::with_functions(FunctionRegistry::standard())
    }

    /// Engine with exactly `functions`.
    pub fn with_functions(functions: FunctionRegistry) -> Self {
        Self { functions }
    }

    pub fn functions(&self) -> &FunctionRegistry {
        &self.functions
    }

    fn environment<'source>(&self) -> Environment<'source> {
        let mut env = Environment::new();
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_keep_trailing_newline(true);
        self.functions.install(&mut env);
        env
    }
}

impl Default for MiniJinjaEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateEngine for MiniJinjaEngine {
    fn render(&self, name: &str, source: &str, context: &RenderContext) -> StencilResult<String> {
        let env = self.environment();

        let template = env.template_from_named_str(name, source).map_err(|e| {
            ApplicationError::TemplateConstruction {
                name: name.to_owned(),
                reason: e.to_string(),
            }
        })?;

        let rendered = template.render(context.as_value()).map_err(|e| {
            ApplicationError::TemplateExecution {
                name: name.to_owned(),
                reason: e.to_string(),
            }
        })?;

        trace!(template = name, bytes = rendered.len(), "Template rendered");
        Ok(rendered)
    }

    /// `{{ name() }}`: fragments are macros, expanded by calling them.
    fn fragment_call(&self, fragment: &str) -> StencilResult<String> {
        validate_fragment_name(fragment)?;
        Ok(format!("{{{{ {fragment}() }}}}"))
    }
}
