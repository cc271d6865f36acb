//! # Catalog Record Types
//!
//! Plain records the engines consume. Persistence identity, pagination,
//! search and soft-delete policy all belong to the calling shell; the
//! engines only care about the values carried here.
//!
//! ## Record Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  Shell lookups                     Engines                          │
//! │                                                                     │
//! │  ItemRecord ───────────┐                                            │
//! │  DimensionRecord ──────┼──► CostingService ──► CostingResult        │
//! │  RawMaterialRate ──────┤                                            │
//! │  ProcessRecord ────────┘                                            │
//! │                                                                     │
//! │  TaxRecord ────────────┐                                            │
//! │  CompanyRecord ────────┼──► create_quotation ──► Quotation          │
//! │  CounterpartyRecord ───┘                                            │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::tax::StateCode;

// =============================================================================
// Item
// =============================================================================

/// A manufactured part that can be costed and quoted.
///
/// `is_active` reflects the shell's soft-delete flag: inactive items are
/// visible to lookups but refuse costing and quotation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemRecord {
    /// Business key (e.g. "PN001").
    pub part_no: String,
    /// Human-readable description, carried onto quotation lines.
    pub description: String,
    /// Raw material this part is made from (joins to rate records).
    pub material_name: String,
    /// HSN classification code, used to look up the GST percentage.
    pub hsn_code: String,
    pub is_active: bool,
}

// =============================================================================
// Dimensions
// =============================================================================

/// Physical dimensions recorded for a part.
///
/// `density_g_cm3` is optional; when absent the copper default
/// ([`crate::DEFAULT_DENSITY_G_CM3`]) applies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DimensionRecord {
    pub part_no: String,
    pub thickness_mm: Decimal,
    pub width_mm: Decimal,
    pub length_mm: Decimal,
    pub density_g_cm3: Option<Decimal>,
}

// =============================================================================
// Material & Rates
// =============================================================================

/// A raw material master record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaterialRecord {
    pub name: String,
    pub density_g_cm3: Decimal,
    pub is_active: bool,
}

/// A dated raw-material rate row.
///
/// Multiple rows may exist per material; the current one is the most
/// recent `effective_date` among active rows (see [`crate::rates::current_rate`]).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawMaterialRate {
    pub material_name: String,
    /// Base purchase rate per kilogram.
    pub rate_per_kg: Decimal,
    /// Expected scrap, as a percentage in [0, 100].
    pub scrap_percentage: Decimal,
    /// Expected transport loss, as a percentage in [0, 100].
    pub transport_loss_percentage: Decimal,
    pub effective_date: NaiveDate,
    pub is_active: bool,
}

// =============================================================================
// Processes
// =============================================================================

/// How a process definition's rate is applied when summing process cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessRateType {
    /// Flat rate per piece produced.
    PerNos,
    /// Rate scaled by the part weight in kg.
    PerKg,
    /// Rate per hour (applied once per piece).
    PerHour,
    /// Flat charge regardless of quantity or weight.
    Fixed,
}

impl ProcessRateType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProcessRateType::PerNos => "Per Nos",
            ProcessRateType::PerKg => "Per Kg",
            ProcessRateType::PerHour => "Per Hour",
            ProcessRateType::Fixed => "Fixed",
        }
    }
}

/// A manufacturing process definition (stamping, plating, ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessRecord {
    pub name: String,
    pub rate_type: ProcessRateType,
    pub rate: Decimal,
    pub is_active: bool,
}

// =============================================================================
// Tax / Company / Counterparty
// =============================================================================

/// A tax table entry mapping an HSN code to its total GST percentage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxRecord {
    pub hsn_code: String,
    pub gst_percentage: Decimal,
}

/// The quoting company's own profile (the "from" side of a quotation).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyRecord {
    pub name: String,
    pub state_code: StateCode,
}

/// The customer/vendor being quoted (the "to" side).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CounterpartyRecord {
    pub name: String,
    pub state_code: StateCode,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process_rate_type_as_str() {
        assert_eq!(ProcessRateType::PerNos.as_str(), "Per Nos");
        assert_eq!(ProcessRateType::PerKg.as_str(), "Per Kg");
        assert_eq!(ProcessRateType::PerHour.as_str(), "Per Hour");
        assert_eq!(ProcessRateType::Fixed.as_str(), "Fixed");
    }

    #[test]
    fn test_process_rate_type_serde_snake_case() {
        let json = serde_json::to_string(&ProcessRateType::PerKg).unwrap();
        assert_eq!(json, "\"per_kg\"");
        let back: ProcessRateType = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ProcessRateType::PerKg);
    }
}
