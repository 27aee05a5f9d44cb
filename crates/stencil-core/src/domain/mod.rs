// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for Stencil.
//!
//! This module contains pure logic with no I/O. Reading templates, running
//! the template engine and touching the destination filesystem are handled
//! via ports (traits) defined in the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, network, or external calls
//! - **Immutable entities**: `Target` is never mutated by a render
//! - **Decisions, not effects**: `WriteMode::decide` chooses, adapters act
//!
// Public API - what the world sees
pub mod entities;
pub mod error;
pub mod value_objects;

// Private implementation details - not visible outside domain
mod validation;

// Re-exports for convenience
pub use entities::{
    context::RenderContext,
    target::{Target, TargetBuilder, validate_fragment_name},
};

pub use error::{DomainError, ErrorCategory};

pub use value_objects::{RunOptions, TemplateKind, WriteAction, WriteMode, WriteOutcome};

pub use validation::DomainValidator;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validator_accepts_built_targets() {
        let target = Target::builder()
            .template("t.jinja")
            .path_template("out.rs")
            .build()
            .unwrap();
        assert!(DomainValidator::validate_target(&target).is_ok());
    }

    #[test]
    fn validator_rejects_empty_destination() {
        assert_eq!(
            DomainValidator::validate_destination(""),
            Err(DomainError::EmptyDestination)
        );
        assert!(DomainValidator::validate_destination("out/a.rs").is_ok());
    }

    #[test]
    fn validator_rejects_conflicting_write_mode() {
        let mode = WriteMode {
            overwrite_existing: true,
            append: true,
        };
        assert_eq!(
            DomainValidator::validate_write_mode(&mode),
            Err(DomainError::WriteModeConflict)
        );
    }

    #[test]
    fn configuration_errors_are_categorized() {
        assert_eq!(
            DomainError::WriteModeConflict.category(),
            ErrorCategory::Configuration
        );
        assert_eq!(
            DomainError::MissingRequiredField { field: "name" }.category(),
            ErrorCategory::Validation
        );
    }

    #[test]
    fn every_domain_error_has_suggestions() {
        let errors = [
            DomainError::EmptyDestination,
            DomainError::WriteModeConflict,
            DomainError::InvalidTarget("x".into()),
            DomainError::InvalidContext("x".into()),
            DomainError::MissingRequiredField { field: "name" },
            DomainError::InvalidFragmentName {
                name: "a-b".into(),
                reason: "contains '-'".into(),
            },
        ];
        for err in errors {
            assert!(!err.suggestions().is_empty(), "{err:?}");
        }
    }
}
