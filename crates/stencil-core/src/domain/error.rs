// ============================================================================
// domain/error.rs - CONFIGURATION & INVARIANT ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// Domain errors never involve I/O. They describe a target or write-mode
/// configuration that cannot be honoured, so they are:
/// - Cloneable (reported once per target, kept in manifests' summaries)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Configuration Errors
    // ========================================================================
    #[error("path cannot be empty")]
    EmptyDestination,

    #[error("append and overwrite flags are both set, you have to choose one of them")]
    WriteModeConflict,

    #[error("Invalid target configuration: {0}")]
    InvalidTarget(String),

    #[error("Invalid render context: {0}")]
    InvalidContext(String),

    #[error("Required field missing: {field}")]
    MissingRequiredField { field: &'static str },

    #[error("'{name}' cannot name a template fragment: {reason}")]
    InvalidFragmentName { name: String, reason: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::EmptyDestination => vec![
                "The rendered destination path is empty".into(),
                "Check that the path template produces a value for this context".into(),
            ],
            Self::WriteModeConflict => vec![
                "Pass either --overwrite (or --force) or --append, not both".into(),
                "Check the target's write mode in your manifest".into(),
            ],
            Self::InvalidTarget(msg) => vec![
                "Check your target configuration".into(),
                format!("Details: {}", msg),
            ],
            Self::InvalidContext(msg) => vec![
                "Render contexts must serialize to a JSON object with string keys".into(),
                format!("Details: {}", msg),
            ],
            Self::MissingRequiredField { field } => vec![
                format!("Set '{}' on the target", field),
            ],
            Self::InvalidFragmentName { name, .. } => vec![
                format!("Partial templates must define a fragment named '{}'", name),
                "Fragment names may only contain letters, digits and underscores".into(),
            ],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::EmptyDestination | Self::WriteModeConflict => ErrorCategory::Configuration,
            Self::InvalidTarget(_)
            | Self::InvalidContext(_)
            | Self::MissingRequiredField { .. }
            | Self::InvalidFragmentName { .. } => ErrorCategory::Validation,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Configuration,
}
