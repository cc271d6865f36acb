//! # Error Types
//!
//! Domain-specific error types for quoteforge-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                 │
//! │                                                                     │
//! │  quoteforge-core errors (this file)                                 │
//! │  ├── CoreError        - Costing/quotation domain failures           │
//! │  └── ValidationError  - Input validation failures                   │
//! │                                                                     │
//! │  quoteforge-store errors (separate crate)                           │
//! │  └── StoreError       - Catalog/persistence failures                │
//! │                                                                     │
//! │  Flow: ValidationError → CoreError → StoreError → calling shell     │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every error here is a recoverable, per-request failure. The engines
//! never panic on bad input; the calling shell translates these variants
//! into user-facing responses (HTTP 4xx or similar).

use rust_decimal::Decimal;
use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Costing and quotation domain errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A physical dimension (or density) is zero or negative.
    #[error("Invalid dimension: {field} must be positive, got {value}")]
    InvalidDimension { field: &'static str, value: Decimal },

    /// A percentage input is outside [0, 100].
    #[error("Invalid percentage: {field} must be between 0 and 100, got {value}")]
    InvalidPercentage { field: &'static str, value: Decimal },

    /// A monetary amount that must be non-negative is negative.
    #[error("Invalid amount: {0} is negative")]
    InvalidAmount(Decimal),

    /// A GST state code outside the valid 1..=37 range.
    #[error("Invalid GST state code: {0} (must be 1..=37)")]
    InvalidStateCode(u8),

    /// Item cannot be found in the catalog.
    #[error("Item not found: {0}")]
    ItemNotFound(String),

    /// Item exists but is inactive (soft-deleted or disabled).
    #[error("Item is inactive: {0}")]
    ItemInactive(String),

    /// No dimension record exists for the part, so weight cannot be derived.
    #[error("Dimensions missing for part: {0}")]
    DimensionMissing(String),

    /// No active raw-material rate exists for the material.
    #[error("No active rate found for material: {0}")]
    RateNotFound(String),

    /// No active costing exists for the part, so it cannot be quoted.
    #[error("No costing found for part: {0}")]
    CostingNotFound(String),

    /// No tax table entry for the HSN code.
    #[error("No tax entry found for HSN code: {0}")]
    TaxNotFound(String),

    /// Company profile (own state code) is missing.
    #[error("Company record not found")]
    CompanyNotFound,

    /// A quotation must carry at least one line item.
    #[error("Quotation must contain at least one line item")]
    EmptyQuotation,

    /// A quotation already carries a line for the part; mutations address
    /// lines by part number, so each part appears at most once.
    #[error("Part is already quoted on this quotation: {0}")]
    DuplicateLineItem(String),

    /// Attempted to mutate a quotation that has left Draft.
    ///
    /// Once a quotation is sent or approved its line items and totals are
    /// frozen; only Draft quotations accept edits or deletion.
    #[error("Quotation {quotation_no} is {status}, only Draft quotations can be modified")]
    QuotationNotDraft {
        quotation_no: String,
        status: String,
    },

    /// Attempted a status transition the lifecycle does not allow.
    #[error("Cannot transition quotation {quotation_no} from {from} to {to}")]
    InvalidStatusTransition {
        quotation_no: String,
        from: String,
        to: String,
    },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// An external collaborator (catalog, sequence) failed.
    ///
    /// The core performs no retries; the failure propagates immediately
    /// and no partial result is produced.
    #[error("Storage error: {0}")]
    Storage(String),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors, raised before any business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (bad characters, malformed code).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InvalidDimension {
            field: "thickness_mm",
            value: dec!(-5),
        };
        assert_eq!(
            err.to_string(),
            "Invalid dimension: thickness_mm must be positive, got -5"
        );

        let err = CoreError::RateNotFound("Copper".to_string());
        assert_eq!(err.to_string(), "No active rate found for material: Copper");

        let err = CoreError::QuotationNotDraft {
            quotation_no: "QT/2025/0001".to_string(),
            status: "Approved".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Quotation QT/2025/0001 is Approved, only Draft quotations can be modified"
        );
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "part_no".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
