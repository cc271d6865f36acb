//! # Store Error Types
//!
//! Failures raised by the reference store. Domain errors from the core
//! pass through unchanged so callers see a single taxonomy.

use thiserror::Error;

use quoteforge_core::CoreError;

/// Store operation errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Entity not found in the store.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// Unique key violation (duplicate part number, quotation number, ...).
    #[error("Duplicate {field}: '{value}' already exists")]
    Duplicate { field: &'static str, value: String },

    /// Domain failure from the core engines.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl StoreError {
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        StoreError::NotFound {
            entity,
            id: id.into(),
        }
    }

    pub fn duplicate(field: &'static str, value: impl Into<String>) -> Self {
        StoreError::Duplicate {
            field,
            value: value.into(),
        }
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = StoreError::not_found("Quotation", "QT/2025/0007");
        assert_eq!(err.to_string(), "Quotation not found: QT/2025/0007");

        let err = StoreError::duplicate("part_no", "PN001");
        assert_eq!(err.to_string(), "Duplicate part_no: 'PN001' already exists");
    }

    #[test]
    fn test_core_error_passes_through() {
        let err: StoreError = CoreError::CompanyNotFound.into();
        assert_eq!(err.to_string(), "Company record not found");
    }
}
