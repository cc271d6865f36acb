//! # Effective Rate Engine
//!
//! Raw-material cost rates, loaded for expected scrap and transport loss:
//!
//! ```text
//! effective_rate = rate_per_kg × (1 + (scrap% + loss%) / 100)
//! ```
//!
//! Also owns the selection policy for dated rate rows: the current rate
//! for a material is the most recent `effective_date` among active rows.

use rust_decimal::Decimal;

use crate::error::{CoreError, CoreResult};
use crate::types::RawMaterialRate;
use crate::validation::validate_percentage;

/// Computes the effective raw-material rate.
///
/// The effective rate is intentionally NOT rounded here; currency rounding
/// happens where it enters the costing chain (rm_cost).
///
/// ## Errors
/// - `InvalidAmount` when `rate_per_kg` is negative
/// - `InvalidPercentage` when either percentage is outside [0, 100]
///
/// ## Example
/// ```rust
/// use quoteforge_core::rates::effective_rate;
/// use rust_decimal_macros::dec;
///
/// // 100/kg with 3% scrap and 2% transport loss
/// assert_eq!(effective_rate(dec!(100), dec!(3), dec!(2)).unwrap(), dec!(105.00));
/// ```
pub fn effective_rate(
    rate_per_kg: Decimal,
    scrap_percentage: Decimal,
    transport_loss_percentage: Decimal,
) -> CoreResult<Decimal> {
    if rate_per_kg < Decimal::ZERO {
        return Err(CoreError::InvalidAmount(rate_per_kg));
    }
    validate_percentage("scrap_percentage", scrap_percentage)?;
    validate_percentage("transport_loss_percentage", transport_loss_percentage)?;

    let loading = (scrap_percentage + transport_loss_percentage) / Decimal::ONE_HUNDRED;
    Ok(rate_per_kg * (Decimal::ONE + loading))
}

/// Effective rate derived from a catalog rate row.
pub fn effective_rate_of(rate: &RawMaterialRate) -> CoreResult<Decimal> {
    effective_rate(
        rate.rate_per_kg,
        rate.scrap_percentage,
        rate.transport_loss_percentage,
    )
}

/// Selects the current rate for a material among dated rows.
///
/// Policy: latest `effective_date` among rows that are active AND belong
/// to the named material. Ties on date resolve to the later row in input
/// order, matching a sort-descending-take-first query.
///
/// ## Errors
/// `RateNotFound` when no active row matches the material.
pub fn current_rate<'a>(
    material_name: &str,
    rates: &'a [RawMaterialRate],
) -> CoreResult<&'a RawMaterialRate> {
    rates
        .iter()
        .filter(|r| r.is_active && r.material_name == material_name)
        .max_by_key(|r| r.effective_date)
        .ok_or_else(|| CoreError::RateNotFound(material_name.to_string()))
}

// =============================================================================
// Unit Tests
// =============================================================================
