//! # Weight Engine
//!
//! Derives part weight from physical dimensions and material density.
//!
//! ```text
//! volume_mm3 = thickness × width × length
//! weight_kg  = volume_mm3 × density(g/cm³) / 1,000,000
//! ```
//!
//! The mm³→cm³ and g→kg conversions cancel into the single 10⁶ divisor.
//! Both outputs are rounded to 3 decimal places; volume is informational,
//! weight feeds the costing chain.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::round_weight;
use crate::types::DimensionRecord;
use crate::DEFAULT_DENSITY_G_CM3;

/// mm³ × g/cm³ → kg conversion divisor.
const WEIGHT_DIVISOR: Decimal = dec!(1000000);

// =============================================================================
// Dimensions
// =============================================================================

/// Validated part dimensions.
///
/// Construction is the validation seam: a `Dimensions` value always holds
/// strictly positive measurements, so the weight derivation itself cannot
/// fail.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub thickness_mm: Decimal,
    pub width_mm: Decimal,
    pub length_mm: Decimal,
    pub density_g_cm3: Decimal,
}

impl Dimensions {
    /// Creates validated dimensions.
    ///
    /// `density_g_cm3` defaults to 8.96 g/cm³ (copper) when `None`.
    ///
    /// ## Errors
    /// `InvalidDimension` naming the first non-positive field.
    ///
    /// ## Example
    /// ```rust
    /// use quoteforge_core::weight::Dimensions;
    /// use rust_decimal_macros::dec;
    ///
    /// let dims = Dimensions::new(dec!(5), dec!(50), dec!(100), None).unwrap();
    /// assert_eq!(dims.weight().weight_kg, dec!(0.224));
    /// ```
    pub fn new(
        thickness_mm: Decimal,
        width_mm: Decimal,
        length_mm: Decimal,
        density_g_cm3: Option<Decimal>,
    ) -> CoreResult<Self> {
        let density = density_g_cm3.unwrap_or(DEFAULT_DENSITY_G_CM3);

        let checks: [(&'static str, Decimal); 4] = [
            ("thickness_mm", thickness_mm),
            ("width_mm", width_mm),
            ("length_mm", length_mm),
            ("density_g_cm3", density),
        ];
        for (field, value) in checks {
            if value <= Decimal::ZERO {
                return Err(CoreError::InvalidDimension { field, value });
            }
        }

        Ok(Dimensions {
            thickness_mm,
            width_mm,
            length_mm,
            density_g_cm3: density,
        })
    }

    /// Builds validated dimensions from a shell catalog record.
    pub fn from_record(record: &DimensionRecord) -> CoreResult<Self> {
        Dimensions::new(
            record.thickness_mm,
            record.width_mm,
            record.length_mm,
            record.density_g_cm3,
        )
    }

    /// Computes volume and weight, both rounded to 3 decimal places.
    pub fn weight(&self) -> WeightBreakdown {
        let volume_mm3 = self.thickness_mm * self.width_mm * self.length_mm;
        let weight_kg = volume_mm3 * self.density_g_cm3 / WEIGHT_DIVISOR;

        WeightBreakdown {
            volume_mm3: round_weight(volume_mm3),
            weight_kg: round_weight(weight_kg),
        }
    }
}

// =============================================================================
// Weight Breakdown
// =============================================================================

/// Derived physical quantities for a part.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightBreakdown {
    /// Raw volume in mm³ (informational).
    pub volume_mm3: Decimal,
    /// Part weight in kg; feeds rm_cost in the costing chain.
    pub weight_kg: Decimal,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_copper_strip_weight() {
        // 5 × 50 × 100 mm at copper density
        let dims = Dimensions::new(dec!(5), dec!(50), dec!(100), Some(dec!(8.96))).unwrap();
        let w = dims.weight();
        assert_eq!(w.volume_mm3, dec!(25000));
        assert_eq!(w.weight_kg, dec!(0.224));
    }

    #[test]
    fn test_density_defaults_to_copper() {
        let explicit = Dimensions::new(dec!(5), dec!(50), dec!(100), Some(dec!(8.96))).unwrap();
        let defaulted = Dimensions::new(dec!(5), dec!(50), dec!(100), None).unwrap();
        assert_eq!(explicit.weight(), defaulted.weight());
    }

    #[test]
    fn test_weight_rounds_to_three_decimals() {
        // 1 × 1 × 1 mm of copper = 0.00000896 kg → 0.000
        let dims = Dimensions::new(dec!(1), dec!(1), dec!(1), None).unwrap();
        assert_eq!(dims.weight().weight_kg, dec!(0.000));

        // 7 × 13 × 17 at density 7.85: 1547 mm³ × 7.85 / 1e6 = 0.01214395 → 0.012
        let dims = Dimensions::new(dec!(7), dec!(13), dec!(17), Some(dec!(7.85))).unwrap();
        assert_eq!(dims.weight().weight_kg, dec!(0.012));
    }

    #[test]
    fn test_rejects_non_positive_inputs() {
        let err = Dimensions::new(dec!(0), dec!(50), dec!(100), None).unwrap_err();
        assert!(matches!(
            err,
            CoreError::InvalidDimension { field: "thickness_mm", .. }
        ));

        let err = Dimensions::new(dec!(5), dec!(-1), dec!(100), None).unwrap_err();
        assert!(matches!(
            err,
            CoreError::InvalidDimension { field: "width_mm", .. }
        ));

        let err = Dimensions::new(dec!(5), dec!(50), dec!(100), Some(dec!(0))).unwrap_err();
        assert!(matches!(
            err,
            CoreError::InvalidDimension { field: "density_g_cm3", .. }
        ));
    }
}
