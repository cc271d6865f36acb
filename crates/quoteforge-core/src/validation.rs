//! # Validation Module
//!
//! Input validation for values arriving from the calling shell.
//!
//! Validation runs before any business logic: the engines assume their
//! inputs already passed these checks (or the constructor-level checks in
//! [`crate::weight::Dimensions`] and [`crate::tax::StateCode`]).

use rust_decimal::Decimal;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::MAX_LINE_QUANTITY;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a part number.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - Maximum 50 characters
/// - Alphanumeric, hyphens and underscores only
///
/// ## Example
/// ```rust
/// use quoteforge_core::validation::validate_part_no;
///
/// assert!(validate_part_no("PN001").is_ok());
/// assert!(validate_part_no("").is_err());
/// assert!(validate_part_no("PN 001").is_err());
/// ```
pub fn validate_part_no(part_no: &str) -> ValidationResult<()> {
    let part_no = part_no.trim();

    if part_no.is_empty() {
        return Err(ValidationError::Required {
            field: "part_no".to_string(),
        });
    }

    if part_no.len() > 50 {
        return Err(ValidationError::TooLong {
            field: "part_no".to_string(),
            max: 50,
        });
    }

    if !part_no
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "part_no".to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a quotation line quantity.
///
/// ## Rules
/// - Must be at least 1
/// - Must not exceed MAX_LINE_QUANTITY
pub fn validate_quantity(quantity: u32) -> ValidationResult<()> {
    if quantity == 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if quantity > MAX_LINE_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_LINE_QUANTITY as i64,
        });
    }

    Ok(())
}

/// Validates a percentage is within [0, 100].
///
/// Used for scrap/transport-loss loadings, overhead, margin and GST.
pub fn validate_percentage(field: &'static str, value: Decimal) -> CoreResult<()> {
    if value < Decimal::ZERO || value > Decimal::ONE_HUNDRED {
        return Err(CoreError::InvalidPercentage { field, value });
    }
    Ok(())
}

/// Validates a monetary amount is non-negative.
pub fn validate_non_negative(value: Decimal) -> CoreResult<()> {
    if value < Decimal::ZERO {
        return Err(CoreError::InvalidAmount(value));
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
