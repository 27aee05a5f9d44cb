//! Generator - main application orchestrator.
//!
//! This service coordinates one generation run:
//! 1. Compute the effective write mode (target flags + runtime flags)
//! 2. Render the destination path template
//! 3. Render the content template (full or partial)
//! 4. Hand the complete body to the file writer
//! 5. Run the external formatter on the written file
//!
//! A `NoOp` write is success: the run stops there and the existing file is
//! neither touched nor formatted.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::{
    application::{
        ApplicationError,
        ports::{FileWriter, ImportResolver, SourceFormatter, TemplateEngine, TemplateSource},
        services::renderer::{BaseTemplate, RenderOptions, renderer_for},
    },
    domain::{DomainValidator as validator, RenderContext, RunOptions, Target, WriteOutcome},
    error::StencilResult,
};

/// Template name used when rendering a target's destination path.
pub const PATH_TEMPLATE_NAME: &str = "target-path";

/// Template name used by [`render_string`].
pub const STRING_TEMPLATE_NAME: &str = "parse-string";

/// Result of a successful generator run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generation {
    /// Target name.
    pub target: String,
    /// Rendered destination path.
    pub path: PathBuf,
    pub outcome: WriteOutcome,
    /// `true` if the external formatter ran on the written file.
    pub formatted: bool,
}

/// Render an arbitrary string template against `context`. No file I/O.
pub fn render_string(
    engine: &dyn TemplateEngine,
    template: &str,
    context: &RenderContext,
) -> StencilResult<String> {
    engine.render(STRING_TEMPLATE_NAME, template, context)
}

/// Render → write → format pipeline over injected adapters.
///
/// A generator holds no per-target state; the same instance can run any
/// number of targets, one at a time.
pub struct Generator {
    engine: Arc<dyn TemplateEngine>,
    templates: Arc<dyn TemplateSource>,
    writer: Arc<dyn FileWriter>,
    formatter: Arc<dyn SourceFormatter>,
    import_resolver: Arc<dyn ImportResolver>,
}

impl Generator {
    /// Start building a generator from its adapters.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use stencil_core::application::Generator;
    ///
    /// let generator = Generator::builder()
    ///     .engine(engine)             // impl TemplateEngine
    ///     .templates(templates)       // impl TemplateSource
    ///     .writer(writer)             // impl FileWriter
    ///     .formatter(formatter)       // impl SourceFormatter
    ///     .import_resolver(resolver)  // impl ImportResolver
    ///     .build()?;
    /// ```
    pub fn builder() -> GeneratorBuilder {
        GeneratorBuilder::default()
    }

    /// Generate `target` against `context`.
    ///
    /// `options` only affect this call; the target keeps its configured
    /// write mode.
    #[instrument(
        skip_all,
        fields(
            target = %target.name(),
            append = options.append,
            force = options.force_overwrite
        )
    )]
    pub fn run(
        &self,
        target: &Target,
        context: &RenderContext,
        options: RunOptions,
    ) -> StencilResult<Generation> {
        validator::validate_target(target)?;
        let mode = target.write_mode().with_runtime(options);

        // 1. Destination
        let path = self.resolve_path(target, context)?;
        debug!(path = %path.display(), mode = %mode, "Destination resolved");

        // 2. Content, fully rendered before anything is written
        let content = self.render_content(target, context)?;

        // 3. Write
        let outcome = self.writer.write_file(&path, content.as_bytes(), mode)?;

        if outcome.is_noop() {
            info!(path = %path.display(), "Destination exists and is unmanaged, left untouched");
            return Ok(Generation {
                target: target.name().to_owned(),
                path,
                outcome,
                formatted: false,
            });
        }
        info!(path = %path.display(), outcome = %outcome, "Target written");

        // 4. External formatter; the written file stays on failure
        let formatted = if target.format_source() {
            self.import_resolver.format_path(&path)?;
            debug!(path = %path.display(), "External formatter finished");
            true
        } else {
            false
        };

        Ok(Generation {
            target: target.name().to_owned(),
            path,
            outcome,
            formatted,
        })
    }

    /// Render the target's destination path template.
    pub fn resolve_path(&self, target: &Target, context: &RenderContext) -> StencilResult<PathBuf> {
        self.engine
            .render(PATH_TEMPLATE_NAME, target.path_template(), context)
            .map(PathBuf::from)
    }

    /// Render the target's content template without writing it.
    pub fn render_content(&self, target: &Target, context: &RenderContext) -> StencilResult<String> {
        let base = BaseTemplate::new(
            RenderOptions::for_target(target),
            self.templates.as_ref(),
            self.engine.as_ref(),
            self.formatter.as_ref(),
        );
        renderer_for(target.kind(), base).render(context)
    }

    /// Render an arbitrary string template. See [`render_string`].
    pub fn render_string(&self, template: &str, context: &RenderContext) -> StencilResult<String> {
        render_string(self.engine.as_ref(), template, context)
    }

    /// Resolve the destination path of `target`.
    ///
    /// Meant for logging and composing paths where a broken path template
    /// is a programming mistake. [`Generator::run`] never panics.
    ///
    /// # Panics
    ///
    /// Panics if the path template cannot be rendered against `context`.
    pub fn path(&self, target: &Target, context: &RenderContext) -> PathBuf {
        self.resolve_path(target, context)
            .unwrap_or_else(|e| panic!("rendered path failed: {e}"))
    }
}

/// Builder for [`Generator`]. Every adapter is required.
#[derive(Default)]
pub struct GeneratorBuilder {
    engine: Option<Arc<dyn TemplateEngine>>,
    templates: Option<Arc<dyn TemplateSource>>,
    writer: Option<Arc<dyn FileWriter>>,
    formatter: Option<Arc<dyn SourceFormatter>>,
    import_resolver: Option<Arc<dyn ImportResolver>>,
}

impl GeneratorBuilder {
    pub fn engine(mut self, engine: impl TemplateEngine + 'static) -> Self {
        self.engine = Some(Arc::new(engine));
        self
    }

    pub fn templates(mut self, templates: impl TemplateSource + 'static) -> Self {
        self.templates = Some(Arc::new(templates));
        self
    }

    /// Use an already shared template source.
    pub fn shared_templates(mut self, templates: Arc<dyn TemplateSource>) -> Self {
        self.templates = Some(templates);
        self
    }

    pub fn writer(mut self, writer: impl FileWriter + 'static) -> Self {
        self.writer = Some(Arc::new(writer));
        self
    }

    pub fn formatter(mut self, formatter: impl SourceFormatter + 'static) -> Self {
        self.formatter = Some(Arc::new(formatter));
        self
    }

    pub fn import_resolver(mut self, resolver: impl ImportResolver + 'static) -> Self {
        self.import_resolver = Some(Arc::new(resolver));
        self
    }

    pub fn build(self) -> StencilResult<Generator> {
        Ok(Generator {
            engine: self
                .engine
                .ok_or(ApplicationError::AdapterNotConfigured { name: "engine" })?,
            templates: self
                .templates
                .ok_or(ApplicationError::AdapterNotConfigured { name: "templates" })?,
            writer: self
                .writer
                .ok_or(ApplicationError::AdapterNotConfigured { name: "writer" })?,
            formatter: self
                .formatter
                .ok_or(ApplicationError::AdapterNotConfigured { name: "formatter" })?,
            import_resolver: self
                .import_resolver
                .ok_or(ApplicationError::AdapterNotConfigured {
                    name: "import_resolver",
                })?,
        })
    }
}
