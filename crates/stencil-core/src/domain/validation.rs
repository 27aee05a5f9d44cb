use std::path::Path;

use crate::domain::{entities::Target, error::DomainError, value_objects::WriteMode};

/// Centralized domain validation.
///
/// All validation logic lives here, not scattered across adapters.
pub struct DomainValidator;

impl DomainValidator {
    pub fn validate_target(target: &Target) -> Result<(), DomainError> {
        target.validate()
    }

    pub fn validate_write_mode(mode: &WriteMode) -> Result<(), DomainError> {
        mode.validate()
    }

    pub fn validate_destination(path: impl AsRef<Path>) -> Result<(), DomainError> {
        if path.as_ref().as_os_str().is_empty() {
            return Err(DomainError::EmptyDestination);
        }
        Ok(())
    }
}
