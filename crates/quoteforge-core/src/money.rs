//! # Money Module
//!
//! Rounding rules for the costing pipeline.
//!
//! ## Why Progressive Rounding?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  THE ROUNDING CONTRACT                                              │
//! │                                                                     │
//! │  Every derived monetary field is rounded to 2 decimals BEFORE it    │
//! │  feeds the next step:                                               │
//! │                                                                     │
//! │    rm_cost    = round2(weight × rate)        = 376.88               │
//! │    sub_cost   = round2(rm_cost + extras)     = 466.88               │
//! │    overhead   = round2(sub_cost × 10%)       = 46.69                │
//! │                                                                     │
//! │  Downstream totals are computed from the already-rounded values,    │
//! │  so a single final rounding would produce DIFFERENT numbers.        │
//! │  Printed quotations must reproduce these figures bit-for-bit.       │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All rounding is half-away-from-zero (`RoundingStrategy::MidpointAwayFromZero`),
//! the commercial rounding the original figures were produced with - NOT
//! bankers rounding.

use rust_decimal::{Decimal, RoundingStrategy};

/// Decimal places for monetary values.
pub const CURRENCY_DECIMALS: u32 = 2;

/// Decimal places for weights and volumes.
pub const WEIGHT_DECIMALS: u32 = 3;

/// Rounds a monetary value to 2 decimal places, half away from zero.
///
/// ## Example
/// ```rust
/// use quoteforge_core::money::round_currency;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(round_currency(dec!(376.875)), dec!(376.88));
/// assert_eq!(round_currency(dec!(5.0655)), dec!(5.07));
/// ```
#[inline]
pub fn round_currency(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(CURRENCY_DECIMALS, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds a weight or volume to 3 decimal places, half away from zero.
#[inline]
pub fn round_weight(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(WEIGHT_DECIMALS, RoundingStrategy::MidpointAwayFromZero)
}

/// Line amount: quantity × unit rate, rounded to currency precision.
///
/// ## Example
/// ```rust
/// use quoteforge_core::money::line_amount;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(line_amount(100, dec!(42.22)), dec!(4222.00));
/// ```
#[inline]
pub fn line_amount(quantity: u32, unit_rate: Decimal) -> Decimal {
    round_currency(Decimal::from(quantity) * unit_rate)
}

/// Percentage of a base amount, rounded to currency precision.
///
/// `percent_of(466.88, 15)` = round2(466.88 × 0.15) = 70.03
#[inline]
pub fn percent_of(base: Decimal, percentage: Decimal) -> Decimal {
    round_currency(base * percentage / Decimal::ONE_HUNDRED)
}

// =============================================================================
// Unit Tests
// =============================================================================
