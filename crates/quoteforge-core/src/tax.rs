//! # Tax Jurisdiction Resolver
//!
//! Indian GST jurisdiction rules for quotations.
//!
//! ## The Rule
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  company state ≠ counterparty state  →  INTER-state  →  IGST        │
//! │  company state = counterparty state  →  INTRA-state  →  CGST+SGST  │
//! │                                                                     │
//! │  IGST:       igst = total,    cgst = 0,        sgst = 0            │
//! │  CGST+SGST:  igst = 0,        cgst = total/2,  sgst = total/2      │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The half split is exact Decimal division - no rounding rule applies
//! here, so an odd total percentage legitimately yields fractional halves
//! (e.g. 5% → 2.5% + 2.5%).

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{CoreError, CoreResult};
use crate::validation::validate_percentage;

// =============================================================================
// State Code
// =============================================================================

/// A GST state code (1..=37 per the Indian GSTIN state list).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateCode(u8);

impl StateCode {
    /// Creates a validated state code.
    ///
    /// ## Example
    /// ```rust
    /// use quoteforge_core::tax::StateCode;
    ///
    /// let maharashtra = StateCode::new(27).unwrap();
    /// assert_eq!(maharashtra.code(), 27);
    /// assert!(StateCode::new(0).is_err());
    /// assert!(StateCode::new(38).is_err());
    /// ```
    pub fn new(code: u8) -> CoreResult<Self> {
        if !(1..=37).contains(&code) {
            return Err(CoreError::InvalidStateCode(code));
        }
        Ok(StateCode(code))
    }

    #[inline]
    pub const fn code(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for StateCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // GSTIN prefixes are zero-padded two-digit codes
        write!(f, "{:02}", self.0)
    }
}

// =============================================================================
// GST Type & Split
// =============================================================================

/// Which GST regime applies to a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GstType {
    /// Inter-state: a single Integrated GST component.
    Igst,
    /// Intra-state: Central + State components, half each.
    CgstSgst,
}

impl GstType {
    pub fn as_str(&self) -> &'static str {
        match self {
            GstType::Igst => "IGST",
            GstType::CgstSgst => "CGST+SGST",
        }
    }
}

impl fmt::Display for GstType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A total GST percentage split across its components.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GstSplit {
    pub gst_type: GstType,
    pub total_percentage: Decimal,
    pub cgst_percentage: Decimal,
    pub sgst_percentage: Decimal,
    pub igst_percentage: Decimal,
}

// =============================================================================
// Resolver
// =============================================================================

/// Resolves the GST regime and percentage split for a transaction.
///
/// ## Errors
/// `InvalidPercentage` when `total_percentage` is outside [0, 100].
///
/// ## Example
/// ```rust
/// use quoteforge_core::tax::{resolve, StateCode};
/// use rust_decimal_macros::dec;
///
/// let mh = StateCode::new(27).unwrap();
/// let gj = StateCode::new(24).unwrap();
///
/// let intra = resolve(mh, mh, dec!(18)).unwrap();
/// assert_eq!(intra.cgst_percentage, dec!(9));
///
/// let inter = resolve(mh, gj, dec!(18)).unwrap();
/// assert_eq!(inter.igst_percentage, dec!(18));
/// ```
pub fn resolve(
    company_state: StateCode,
    counterparty_state: StateCode,
    total_percentage: Decimal,
) -> CoreResult<GstSplit> {
    validate_percentage("gst_percentage", total_percentage)?;

    if company_state == counterparty_state {
        let half = total_percentage / dec!(2);
        Ok(GstSplit {
            gst_type: GstType::CgstSgst,
            total_percentage,
            cgst_percentage: half,
            sgst_percentage: half,
            igst_percentage: Decimal::ZERO,
        })
    } else {
        Ok(GstSplit {
            gst_type: GstType::Igst,
            total_percentage,
            cgst_percentage: Decimal::ZERO,
            sgst_percentage: Decimal::ZERO,
            igst_percentage: total_percentage,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_code_range() {
        assert!(StateCode::new(1).is_ok());
        assert!(StateCode::new(37).is_ok());
        assert!(matches!(StateCode::new(0), Err(CoreError::InvalidStateCode(0))));
        assert!(matches!(StateCode::new(38), Err(CoreError::InvalidStateCode(38))));
    }

    #[test]
    fn test_state_code_display_zero_padded() {
        assert_eq!(StateCode::new(7).unwrap().to_string(), "07");
        assert_eq!(StateCode::new(27).unwrap().to_string(), "27");
    }

    #[test]
    fn test_intra_state_splits_half() {
        let mh = StateCode::new(27).unwrap();
        let split = resolve(mh, mh, dec!(18)).unwrap();

        assert_eq!(split.gst_type, GstType::CgstSgst);
        assert_eq!(split.cgst_percentage, dec!(9));
        assert_eq!(split.sgst_percentage, dec!(9));
        assert_eq!(split.igst_percentage, dec!(0));
        assert_eq!(split.total_percentage, dec!(18));
    }

    #[test]
    fn test_inter_state_is_igst() {
        let mh = StateCode::new(27).unwrap();
        let gj = StateCode::new(24).unwrap();
        let split = resolve(mh, gj, dec!(18)).unwrap();

        assert_eq!(split.gst_type, GstType::Igst);
        assert_eq!(split.igst_percentage, dec!(18));
        assert_eq!(split.cgst_percentage, dec!(0));
        assert_eq!(split.sgst_percentage, dec!(0));
    }

    #[test]
    fn test_odd_percentage_halves_exactly() {
        // 5% intra-state → 2.5 + 2.5, no rounding applied
        let mh = StateCode::new(27).unwrap();
        let split = resolve(mh, mh, dec!(5)).unwrap();
        assert_eq!(split.cgst_percentage, dec!(2.5));
        assert_eq!(split.sgst_percentage, dec!(2.5));
    }

    #[test]
    fn test_rejects_out_of_range_percentage() {
        let mh = StateCode::new(27).unwrap();
        assert!(resolve(mh, mh, dec!(-1)).is_err());
        assert!(resolve(mh, mh, dec!(100.5)).is_err());
    }

    #[test]
    fn test_gst_type_display() {
        assert_eq!(GstType::Igst.to_string(), "IGST");
        assert_eq!(GstType::CgstSgst.to_string(), "CGST+SGST");
    }
}
