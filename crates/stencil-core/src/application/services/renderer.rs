//! Template renderer - turns one template source into one file body.
//!
//! Two variants share [`BaseTemplate`]:
//!
//! - [`FileTemplate`]: the source *is* the file body
//!   (read → parse → execute → format).
//! - [`PartialFileTemplate`]: the source defines named fragments that may
//!   call each other; the engine's self-invocation directive for the
//!   fragment named after the template is appended before parsing, so the
//!   fragments are expanded into one combined output.
//!
//! The whole body is produced in memory. Nothing is written here.

use std::io::Read;
use std::path::PathBuf;

use tracing::{debug, instrument};

use crate::{
    application::{
        ApplicationError,
        ports::{SourceFormatter, TemplateEngine, TemplateSource},
    },
    domain::{RenderContext, Target, TemplateKind, validate_fragment_name},
    error::StencilResult,
};

/// Name used when a template is rendered without an explicit name.
pub const DEFAULT_TEMPLATE_NAME: &str = "default_template";

/// Immutable render configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Template name; also the entry fragment of a partial template.
    pub name: String,
    /// Location of the template inside the template source.
    pub path: PathBuf,
    /// Run the source formatter over the rendered output.
    pub format_source: bool,
}

impl RenderOptions {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            format_source: false,
        }
    }

    pub fn with_format_source(mut self, format_source: bool) -> Self {
        self.format_source = format_source;
        self
    }

    pub fn for_target(target: &Target) -> Self {
        Self::new(target.name(), target.template_path()).with_format_source(target.format_source())
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::new(DEFAULT_TEMPLATE_NAME, PathBuf::new())
    }
}

/// Something that renders a context into a file body.
pub trait Renderer {
    fn render(&self, context: &RenderContext) -> StencilResult<String>;
}

/// Behaviour shared by every template variant.
pub struct BaseTemplate<'a> {
    options: RenderOptions,
    source: &'a dyn TemplateSource,
    engine: &'a dyn TemplateEngine,
    formatter: &'a dyn SourceFormatter,
}

impl<'a> BaseTemplate<'a> {
    pub fn new(
        options: RenderOptions,
        source: &'a dyn TemplateSource,
        engine: &'a dyn TemplateEngine,
        formatter: &'a dyn SourceFormatter,
    ) -> Self {
        Self {
            options,
            source,
            engine,
            formatter,
        }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Read the template source in full. The reader is dropped (and the
    /// handle closed) before this returns.
    fn read_template(&self) -> StencilResult<String> {
        let path = &self.options.path;

        let mut reader = self
            .source
            .open(path)
            .map_err(|e| ApplicationError::FileOpen {
                path: path.clone(),
                reason: e.to_string(),
            })?;

        let mut bytes = Vec::new();
        reader
            .read_to_end(&mut bytes)
            .map_err(|e| ApplicationError::FileRead {
                path: path.clone(),
                reason: e.to_string(),
            })?;

        let text = String::from_utf8(bytes).map_err(|e| ApplicationError::FileRead {
            path: path.clone(),
            reason: format!("not valid UTF-8: {e}"),
        })?;

        debug!(path = %path.display(), bytes = text.len(), "Template read");
        Ok(text)
    }

    fn execute(&self, source: &str, context: &RenderContext) -> StencilResult<String> {
        self.engine.render(&self.options.name, source, context)
    }

    fn finish(&self, rendered: String) -> StencilResult<String> {
        if !self.options.format_source {
            return Ok(rendered);
        }
        debug!(template = %self.options.name, "Formatting rendered source");
        self.formatter.format(&self.options.name, &rendered)
    }
}

/// Full-file template.
pub struct FileTemplate<'a> {
    base: BaseTemplate<'a>,
}

impl<'a> FileTemplate<'a> {
    pub fn new(base: BaseTemplate<'a>) -> Self {
        Self { base }
    }
}

impl Renderer for FileTemplate<'_> {
    #[instrument(skip_all, fields(template = %self.base.options.name))]
    fn render(&self, context: &RenderContext) -> StencilResult<String> {
        let source = self.base.read_template()?;
        let rendered = self.base.execute(&source, context)?;
        self.base.finish(rendered)
    }
}

/// Template composed of named fragments.
pub struct PartialFileTemplate<'a> {
    base: BaseTemplate<'a>,
}

impl<'a> PartialFileTemplate<'a> {
    pub fn new(base: BaseTemplate<'a>) -> Self {
        Self { base }
    }
}

impl Renderer for PartialFileTemplate<'_> {
    #[instrument(skip_all, fields(template = %self.base.options.name))]
    fn render(&self, context: &RenderContext) -> StencilResult<String> {
        let name = &self.base.options.name;
        validate_fragment_name(name)?;

        let mut source = self.base.read_template()?;
        source.push_str(&self.base.engine.fragment_call(name)?);

        let rendered = self.base.execute(&source, context)?;
        self.base.finish(rendered)
    }
}

/// Pick the renderer variant for `kind`.
pub fn renderer_for<'a>(kind: TemplateKind, base: BaseTemplate<'a>) -> Box<dyn Renderer + 'a> {
    match kind {
        TemplateKind::Full => Box::new(FileTemplate::new(base)),
        TemplateKind::Partial => Box::new(PartialFileTemplate::new(base)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{MockSourceFormatter, MockTemplateEngine, MockTemplateSource};
    use crate::error::StencilError;
    use std::io::{self, Cursor};

    fn source_with(text: &'static str) -> MockTemplateSource {
        let mut source = MockTemplateSource::new();
        source
            .expect_open()
            .returning(move |_| Ok(Box::new(Cursor::new(text.as_bytes().to_vec()))));
        source
    }

    fn options() -> RenderOptions {
        RenderOptions::new("greeting", "greeting.jinja")
    }

    #[test]
    fn full_template_renders_source_as_is() {
        let source = source_with("Hello {{ Name }}");
        let mut engine = MockTemplateEngine::new();
        engine
            .expect_render()
            .withf(|name, src, _| name == "greeting" && src == "Hello {{ Name }}")
            .returning(|_, _, _| Ok("Hello Bob".into()));
        let formatter = MockSourceFormatter::new();

        let base = BaseTemplate::new(options(), &source, &engine, &formatter);
        let out = FileTemplate::new(base).render(&RenderContext::new()).unwrap();
        assert_eq!(out, "Hello Bob");
    }

    #[test]
    fn partial_template_appends_fragment_call() {
        let source = source_with("{% macro greeting() %}hi{% endmacro %}");
        let mut engine = MockTemplateEngine::new();
        engine
            .expect_fragment_call()
            .withf(|fragment| fragment == "greeting")
            .returning(|n| Ok(format!("{{{{ {n}() }}}}")));
        engine
            .expect_render()
            .withf(|_, src, _| src.ends_with("{% endmacro %}{{ greeting() }}"))
            .returning(|_, _, _| Ok("hi".into()));
        let formatter = MockSourceFormatter::new();

        let base = BaseTemplate::new(options(), &source, &engine, &formatter);
        let out = renderer_for(TemplateKind::Partial, base)
            .render(&RenderContext::new())
            .unwrap();
        assert_eq!(out, "hi");
    }

    #[test]
    fn partial_template_rejects_non_identifier_names() {
        let source = MockTemplateSource::new();
        let engine = MockTemplateEngine::new();
        let formatter = MockSourceFormatter::new();

        let base = BaseTemplate::new(
            RenderOptions::new("not-a-fragment", "x.jinja"),
            &source,
            &engine,
            &formatter,
        );
        let err = PartialFileTemplate::new(base)
            .render(&RenderContext::new())
            .unwrap_err();
        assert!(matches!(err, StencilError::Domain(_)));
    }

    #[test]
    fn open_failure_is_a_file_open_error() {
        let mut source = MockTemplateSource::new();
        source
            .expect_open()
            .returning(|_| Err(io::Error::new(io::ErrorKind::NotFound, "missing")));
        let engine = MockTemplateEngine::new();
        let formatter = MockSourceFormatter::new();

        let base = BaseTemplate::new(options(), &source, &engine, &formatter);
        let err = FileTemplate::new(base)
            .render(&RenderContext::new())
            .unwrap_err();
        assert!(matches!(
            err,
            StencilError::Application(ApplicationError::FileOpen { .. })
        ));
    }

    #[test]
    fn invalid_utf8_is_a_file_read_error() {
        let mut source = MockTemplateSource::new();
        source
            .expect_open()
            .returning(|_| Ok(Box::new(Cursor::new(vec![0xff, 0xfe, 0xfd]))));
        let engine = MockTemplateEngine::new();
        let formatter = MockSourceFormatter::new();

        let base = BaseTemplate::new(options(), &source, &engine, &formatter);
        let err = FileTemplate::new(base)
            .render(&RenderContext::new())
            .unwrap_err();
        assert!(matches!(
            err,
            StencilError::Application(ApplicationError::FileRead { .. })
        ));
    }

    #[test]
    fn formatter_runs_only_when_requested() {
        let source = source_with("fn main(){}");
        let mut engine = MockTemplateEngine::new();
        engine
            .expect_render()
            .returning(|_, src, _| Ok(src.to_owned()));
        let mut formatter = MockSourceFormatter::new();
        formatter
            .expect_format()
            .times(1)
            .returning(|_, _| Ok("fn main() {}\n".into()));

        let base = BaseTemplate::new(
            options().with_format_source(true),
            &source,
            &engine,
            &formatter,
        );
        let out = FileTemplate::new(base).render(&RenderContext::new()).unwrap();
        assert_eq!(out, "fn main() {}\n");
    }

    #[test]
    fn format_failure_is_reported_after_successful_render() {
        let source = source_with("fn main( {");
        let mut engine = MockTemplateEngine::new();
        engine
            .expect_render()
            .returning(|_, src, _| Ok(src.to_owned()));
        let mut formatter = MockSourceFormatter::new();
        formatter.expect_format().returning(|name, _| {
            Err(ApplicationError::SourceFormatting {
                name: name.into(),
                reason: "expected `)`".into(),
            }
            .into())
        });

        let base = BaseTemplate::new(
            options().with_format_source(true),
            &source,
            &engine,
            &formatter,
        );
        let err = FileTemplate::new(base)
            .render(&RenderContext::new())
            .unwrap_err();
        assert!(matches!(
            err,
            StencilError::Application(ApplicationError::SourceFormatting { .. })
        ));
    }

    #[test]
    fn options_default_to_named_default_template() {
        let opts = RenderOptions::default();
        assert_eq!(opts.name, DEFAULT_TEMPLATE_NAME);
        assert!(!opts.format_source);
    }
}
