//! Application layer errors.
//!
//! These errors represent failures while reading, rendering, formatting or
//! writing a target. Configuration problems are `DomainError` from
//! `crate::domain`.
//!
//! Every variant carries a stable message prefix so callers can branch on
//! the variant and humans can still read the underlying cause.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur while running the render pipeline.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// The template could not be opened (missing, a directory, no access).
    #[error("unable to open template file {path}: {reason}")]
    FileOpen { path: PathBuf, reason: String },

    /// The template was opened but its bytes could not be read as text.
    #[error("failed to read template file {path}: {reason}")]
    FileRead { path: PathBuf, reason: String },

    /// The template source did not parse.
    #[error("failed to create template '{name}': {reason}")]
    TemplateConstruction { name: String, reason: String },

    /// The template parsed but failed against the context.
    #[error("template execution failed for '{name}': {reason}")]
    TemplateExecution { name: String, reason: String },

    /// Rendering succeeded but the output is not valid source.
    #[error("failed to format generated source for '{name}': {reason}")]
    SourceFormatting { name: String, reason: String },

    /// The destination's parent directory could not be created.
    #[error("writer could not ensure target folder {path}: {reason}")]
    DirectoryBootstrap { path: PathBuf, reason: String },

    /// The destination's parent directory is not writable and could not be
    /// repaired.
    #[error("writer path {path} not writeable and chmod failed: {reason}")]
    PermissionRepair { path: PathBuf, reason: String },

    /// A write syscall failed.
    #[error("unable to write {path}: {reason}")]
    WriteFailed { path: PathBuf, reason: String },

    /// The file was written but the external formatter failed.
    #[error("external formatter '{command}' failed on {path}: {reason}")]
    ExternalFormatter {
        command: String,
        path: PathBuf,
        reason: String,
    },

    /// Port/Adapter not configured.
    #[error("Required adapter not configured: {name}")]
    AdapterNotConfigured { name: &'static str },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::FileOpen { path, .. } => vec![
                format!("Template not found: {}", path.display()),
                "Template paths are relative to the template directory (or the CWD)".into(),
                "Check 'templates.dir' in your configuration".into(),
            ],
            Self::FileRead { .. } => vec![
                "Templates must be UTF-8 text".into(),
                "Check the file is readable".into(),
            ],
            Self::TemplateConstruction { name, .. } => vec![
                format!("Template '{}' has a syntax error", name),
                "Check for unbalanced '{{ }}' and '{% %}' tags".into(),
            ],
            Self::TemplateExecution { name, .. } => vec![
                format!("Template '{}' references data the context does not provide", name),
                "Pass the missing values with --set key=value or --context FILE".into(),
            ],
            Self::SourceFormatting { .. } => vec![
                "The rendered output is not valid Rust source".into(),
                "Render without --format to inspect the raw output".into(),
            ],
            Self::DirectoryBootstrap { path, .. } | Self::PermissionRepair { path, .. } => vec![
                format!("Failed to prepare: {}", path.display()),
                "Check that you have write permissions".into(),
            ],
            Self::WriteFailed { path, .. } => vec![
                format!("Failed to write: {}", path.display()),
                "Check available disk space and permissions".into(),
            ],
            Self::ExternalFormatter { command, path, .. } => vec![
                format!("'{}' is still written, unformatted: {}", command, path.display()),
                format!("Ensure '{}' is installed and in your PATH", command),
                "Configure it under [formatter] in your config file".into(),
            ],
            Self::AdapterNotConfigured { name } => vec![
                format!("Required component not configured: {}", name),
                "This is likely a configuration error".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::FileOpen { .. } => ErrorCategory::NotFound,
            Self::FileRead { .. }
            | Self::TemplateConstruction { .. }
            | Self::TemplateExecution { .. }
            | Self::SourceFormatting { .. } => ErrorCategory::Validation,
            Self::DirectoryBootstrap { .. }
            | Self::PermissionRepair { .. }
            | Self::WriteFailed { .. }
            | Self::ExternalFormatter { .. } => ErrorCategory::Internal,
            Self::AdapterNotConfigured { .. } => ErrorCategory::Configuration,
        }
    }
}
