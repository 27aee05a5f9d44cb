//! The `Target` aggregate and its builder.
//!
//! A `Target` binds a content template, a destination path template and the
//! persisted write flags. It is immutable: a generator run reads it and
//! returns the resolved destination separately, so the same target can be
//! rendered against many contexts.
//!
//! # Domain purity
//!
//! This module must not import `tracing`. Observability is the responsibility
//! of the application and CLI layers, not the domain.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::domain::{
    error::DomainError,
    value_objects::{TemplateKind, WriteMode},
};

// ── Aggregate root ────────────────────────────────────────────────────────────

/// A validated generation target.
///
/// Guaranteed on construction:
/// - `name`, `template_path` and `path_template` are non-empty
/// - partial targets have a `name` usable as a fragment identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "TargetSpec")]
pub struct Target {
    name: String,
    template_path: PathBuf,
    path_template: String,
    kind: TemplateKind,
    write_mode: WriteMode,
    format_source: bool,
}

impl Target {
    /// Start building a new `Target`.
    pub fn builder() -> TargetBuilder {
        TargetBuilder::new()
    }

    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn template_path(&self) -> &Path {
        &self.template_path
    }
    pub fn path_template(&self) -> &str {
        &self.path_template
    }
    pub const fn kind(&self) -> TemplateKind {
        self.kind
    }
    pub const fn write_mode(&self) -> WriteMode {
        self.write_mode
    }
    pub const fn format_source(&self) -> bool {
        self.format_source
    }

    /// Validate this target's internal consistency.
    ///
    /// Called automatically by the builder and by deserialization.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::MissingRequiredField { field: "name" });
        }
        if self.template_path.as_os_str().is_empty() {
            return Err(DomainError::MissingRequiredField {
                field: "template_path",
            });
        }
        if self.path_template.trim().is_empty() {
            return Err(DomainError::MissingRequiredField {
                field: "path_template",
            });
        }
        if self.kind == TemplateKind::Partial {
            validate_fragment_name(&self.name)?;
        }
        Ok(())
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}, {}) -> {}",
            self.name,
            self.kind,
            self.template_path.display(),
            self.path_template
        )?;
        if self.format_source {
            f.write_str(" [format]")?;
        }
        Ok(())
    }
}

/// Fragment names are invoked by name from generated template code, so they
/// must be plain identifiers.
pub fn validate_fragment_name(name: &str) -> Result<(), DomainError> {
    let mut chars = name.chars();
    let valid_start = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
    if !valid_start {
        return Err(DomainError::InvalidFragmentName {
            name: name.into(),
            reason: "must start with a letter or underscore".into(),
        });
    }
    if let Some(bad) = chars.find(|c| !(c.is_ascii_alphanumeric() || *c == '_')) {
        return Err(DomainError::InvalidFragmentName {
            name: name.into(),
            reason: format!("contains '{bad}'"),
        });
    }
    Ok(())
}

// ── Builder ───────────────────────────────────────────────────────────────────

/// Builder for [`Target`].
///
/// Defaults: full template, preserve existing files, no formatting.
#[derive(Debug, Default)]
pub struct TargetBuilder {
    name: Option<String>,
    template_path: Option<PathBuf>,
    path_template: Option<String>,
    kind: TemplateKind,
    write_mode: WriteMode,
    format_source: bool,
}

impl TargetBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Location of the content template inside the template source.
    pub fn template(mut self, path: impl Into<PathBuf>) -> Self {
        self.template_path = Some(path.into());
        self
    }

    /// Destination path template, rendered against the same context as the
    /// content.
    pub fn path_template(mut self, template: impl Into<String>) -> Self {
        self.path_template = Some(template.into());
        self
    }

    pub fn kind(mut self, kind: TemplateKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn partial(self) -> Self {
        self.kind(TemplateKind::Partial)
    }

    pub fn write_mode(mut self, mode: WriteMode) -> Self {
        self.write_mode = mode;
        self
    }

    pub fn overwrite_existing(mut self, overwrite: bool) -> Self {
        self.write_mode.overwrite_existing = overwrite;
        self
    }

    pub fn append(mut self, append: bool) -> Self {
        self.write_mode.append = append;
        self
    }

    pub fn format_source(mut self, format: bool) -> Self {
        self.format_source = format;
        self
    }

    /// Build and validate the `Target`.
    ///
    /// When no name is given, the template file stem is used.
    pub fn build(self) -> Result<Target, DomainError> {
        let template_path = self
            .template_path
            .ok_or(DomainError::MissingRequiredField {
                field: "template_path",
            })?;
        let path_template = self
            .path_template
            .ok_or(DomainError::MissingRequiredField {
                field: "path_template",
            })?;
        let name = match self.name {
            Some(name) => name,
            None => default_name(&template_path)?,
        };

        let target = Target {
            name,
            template_path,
            path_template,
            kind: self.kind,
            write_mode: self.write_mode,
            format_source: self.format_source,
        };

        target.validate()?;
        Ok(target)
    }
}

/// `templates/model.rs.jinja` → `model`.
fn default_name(template_path: &Path) -> Result<String, DomainError> {
    template_path
        .file_name()
        .and_then(|n| n.to_str())
        .and_then(|n| n.split('.').next())
        .filter(|n| !n.is_empty())
        .map(str::to_owned)
        .ok_or_else(|| {
            DomainError::InvalidTarget(format!(
                "cannot derive a template name from '{}'",
                template_path.display()
            ))
        })
}

// ── Serialized form ───────────────────────────────────────────────────────────

/// Manifest representation of a target.
///
/// ```toml
/// [[targets]]
/// name      = "model"
/// template  = "templates/model.rs.jinja"
/// path      = "src/{{ module }}/model.rs"
/// kind      = "full"       # full | partial
/// overwrite = true
/// append    = false
/// format    = true
/// ```
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TargetSpec {
    name: Option<String>,
    template: PathBuf,
    path: String,
    #[serde(default)]
    kind: TemplateKind,
    #[serde(default)]
    overwrite: bool,
    #[serde(default)]
    append: bool,
    #[serde(default)]
    format: bool,
}

impl TryFrom<TargetSpec> for Target {
    type Error = DomainError;

    fn try_from(spec: TargetSpec) -> Result<Self, Self::Error> {
        let mut builder = Target::builder()
            .template(spec.template)
            .path_template(spec.path)
            .kind(spec.kind)
            .overwrite_existing(spec.overwrite)
            .append(spec.append)
            .format_source(spec.format);
        if let Some(name) = spec.name {
            builder = builder.name(name);
        }
        builder.build()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
