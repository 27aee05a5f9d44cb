//! Value objects: template kinds, write modes and write outcomes.
//!
//! Everything here is `Copy` and free of I/O. The write decision table lives
//! on [`WriteMode::decide`]; adapters only execute the [`WriteAction`] it
//! returns.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

// ── TemplateKind ──────────────────────────────────────────────────────────────

/// How a content template is turned into a file body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateKind {
    /// The template source is the complete file body.
    #[default]
    Full,
    /// The template source defines named fragments; the fragment named after
    /// the target is invoked to produce the body.
    Partial,
}

impl TemplateKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Partial => "partial",
        }
    }
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemplateKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "full" => Ok(Self::Full),
            "partial" => Ok(Self::Partial),
            _ => Err(DomainError::InvalidTarget(format!(
                "unknown template kind '{s}' (expected 'full' or 'partial')"
            ))),
        }
    }
}

// ── WriteMode ─────────────────────────────────────────────────────────────────

/// Persisted write flags of a target.
///
/// `overwrite_existing` marks the destination as managed by the generator;
/// `append` adds rendered content to the end of an existing file. Setting
/// both is rejected by [`WriteMode::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WriteMode {
    pub overwrite_existing: bool,
    pub append: bool,
}

impl WriteMode {
    /// Leave existing files untouched.
    pub const fn preserve() -> Self {
        Self {
            overwrite_existing: false,
            append: false,
        }
    }

    pub const fn overwrite() -> Self {
        Self {
            overwrite_existing: true,
            append: false,
        }
    }

    pub const fn append() -> Self {
        Self {
            overwrite_existing: false,
            append: true,
        }
    }

    /// Apply the per-call runtime flags on top of the persisted ones.
    ///
    /// The receiver is not modified; the effective mode only lives for the
    /// call it was computed for.
    pub const fn with_runtime(self, options: RunOptions) -> Self {
        Self {
            overwrite_existing: self.overwrite_existing || options.force_overwrite,
            append: self.append || options.append,
        }
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.overwrite_existing && self.append {
            return Err(DomainError::WriteModeConflict);
        }
        Ok(())
    }

    /// Decide what to do with a destination.
    ///
    /// | exists | overwrite | append | action      |
    /// |--------|-----------|--------|-------------|
    /// | no     | any       | any    | `Create`    |
    /// | yes    | true      | false  | `Overwrite` |
    /// | yes    | false     | true   | `Append`    |
    /// | yes    | false     | false  | `Skip`      |
    ///
    /// Conflicting flags are an error whether or not the destination exists.
    pub fn decide(&self, exists: bool) -> Result<WriteAction, DomainError> {
        self.validate()?;

        if !exists {
            return Ok(WriteAction::Create);
        }
        if self.overwrite_existing {
            return Ok(WriteAction::Overwrite);
        }
        if self.append {
            return Ok(WriteAction::Append);
        }
        Ok(WriteAction::Skip)
    }
}

impl fmt::Display for WriteMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.overwrite_existing, self.append) {
            (false, false) => f.write_str("preserve"),
            (true, false) => f.write_str("overwrite"),
            (false, true) => f.write_str("append"),
            (true, true) => f.write_str("overwrite+append"),
        }
    }
}

// ── RunOptions ────────────────────────────────────────────────────────────────

/// One-shot flags supplied by the caller of a single generator run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunOptions {
    /// Append the rendered content to an existing destination.
    pub append: bool,
    /// Treat the destination as managed for this run only.
    pub force_overwrite: bool,
}

impl RunOptions {
    pub const fn new(append: bool, force_overwrite: bool) -> Self {
        Self {
            append,
            force_overwrite,
        }
    }
}

// ── WriteAction / WriteOutcome ────────────────────────────────────────────────

/// What the writer is about to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteAction {
    Create,
    Overwrite,
    Append,
    Skip,
}

impl WriteAction {
    pub const fn outcome(self) -> WriteOutcome {
        match self {
            Self::Create => WriteOutcome::Created,
            Self::Overwrite => WriteOutcome::Overwritten,
            Self::Append => WriteOutcome::Appended,
            Self::Skip => WriteOutcome::NoOp,
        }
    }
}

/// What the writer did. `NoOp` is a successful outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WriteOutcome {
    Created,
    Overwritten,
    Appended,
    NoOp,
}

impl WriteOutcome {
    pub const fn is_noop(self) -> bool {
        matches!(self, Self::NoOp)
    }

    /// `true` if the destination's bytes changed.
    pub const fn modified(self) -> bool {
        !self.is_noop()
    }
}

impl fmt::Display for WriteOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Created => "created",
            Self::Overwritten => "overwritten",
            Self::Appended => "appended",
            Self::NoOp => "unchanged",
        })
    }
}
