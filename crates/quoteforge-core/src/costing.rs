//! # Costing Engine
//!
//! Turns weight and rates into the layered per-unit sale price.
//!
//! ## The Chain
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  1. rm_cost       = weight_kg × rm_rate                             │
//! │  2. sub_cost      = rm_cost + process + finishing + packing         │
//! │  3. overhead_cost = sub_cost × overhead%                            │
//! │  4. margin_cost   = sub_cost × margin%      ← margin on SUB_COST,   │
//! │                                               not sub + overhead    │
//! │  5. final_rate    = sub_cost + overhead_cost + margin_cost          │
//! │                                                                     │
//! │  Every step is rounded to 2 decimals BEFORE the next step reads it. │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Two usage modes:
//! - [`calculate`] - stateless calculator over an explicit [`CostingInput`]
//! - [`CostingService::cost_part`] - auto-sources weight, rate and process
//!   cost from a [`CostingCatalog`], with per-field overrides

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::catalog::CostingCatalog;
use crate::error::{CoreError, CoreResult};
use crate::money::{percent_of, round_currency};
use crate::rates::{current_rate, effective_rate_of};
use crate::types::{ProcessRateType, ProcessRecord};
use crate::validation::{validate_non_negative, validate_part_no, validate_percentage};
use crate::weight::Dimensions;
use crate::{DEFAULT_MARGIN_PERCENTAGE, DEFAULT_OVERHEAD_PERCENTAGE};

// =============================================================================
// Costing Input
// =============================================================================

/// Fully-resolved inputs to the cost chain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostingInput {
    pub weight_kg: Decimal,
    /// Effective raw-material rate per kg (already loaded for scrap/loss).
    pub rm_rate: Decimal,
    pub process_cost: Decimal,
    pub finishing_cost: Decimal,
    pub packing_cost: Decimal,
    pub overhead_percentage: Decimal,
    pub margin_percentage: Decimal,
}

impl CostingInput {
    /// Input with the standard defaults: zero extra costs, 10% overhead,
    /// 15% margin.
    pub fn new(weight_kg: Decimal, rm_rate: Decimal) -> Self {
        CostingInput {
            weight_kg,
            rm_rate,
            process_cost: Decimal::ZERO,
            finishing_cost: Decimal::ZERO,
            packing_cost: Decimal::ZERO,
            overhead_percentage: DEFAULT_OVERHEAD_PERCENTAGE,
            margin_percentage: DEFAULT_MARGIN_PERCENTAGE,
        }
    }
}

// =============================================================================
// Costing Result
// =============================================================================

/// The derived cost breakdown. Every monetary field is already rounded to
/// 2 decimals; downstream consumers (quotations) must not re-derive them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostingResult {
    /// Weight the costing was computed from (3 dp).
    pub weight_kg: Decimal,
    /// Effective raw-material rate used.
    pub rm_rate: Decimal,
    pub rm_cost: Decimal,
    pub sub_cost: Decimal,
    pub overhead_cost: Decimal,
    pub margin_cost: Decimal,
    /// The fully-loaded per-unit sale price.
    pub final_rate: Decimal,
}

// =============================================================================
// Calculator
// =============================================================================

/// Runs the cost chain with progressive rounding.
///
/// ## Errors
/// - `InvalidAmount` for negative weight, rate or cost inputs
/// - `InvalidPercentage` for overhead/margin outside [0, 100]
///
/// ## Example
/// ```rust
/// use quoteforge_core::costing::{calculate, CostingInput};
/// use rust_decimal_macros::dec;
///
/// let mut input = CostingInput::new(dec!(2.5), dec!(150.75));
/// input.process_cost = dec!(50);
/// input.finishing_cost = dec!(25);
/// input.packing_cost = dec!(15);
///
/// let result = calculate(&input).unwrap();
/// assert_eq!(result.final_rate, dec!(583.60));
/// ```
pub fn calculate(input: &CostingInput) -> CoreResult<CostingResult> {
    validate_non_negative(input.weight_kg)?;
    validate_non_negative(input.rm_rate)?;
    validate_non_negative(input.process_cost)?;
    validate_non_negative(input.finishing_cost)?;
    validate_non_negative(input.packing_cost)?;
    validate_percentage("overhead_percentage", input.overhead_percentage)?;
    validate_percentage("margin_percentage", input.margin_percentage)?;

    let rm_cost = round_currency(input.weight_kg * input.rm_rate);
    let sub_cost = round_currency(
        rm_cost + input.process_cost + input.finishing_cost + input.packing_cost,
    );
    let overhead_cost = percent_of(sub_cost, input.overhead_percentage);
    let margin_cost = percent_of(sub_cost, input.margin_percentage);
    let final_rate = round_currency(sub_cost + overhead_cost + margin_cost);

    Ok(CostingResult {
        weight_kg: input.weight_kg,
        rm_rate: input.rm_rate,
        rm_cost,
        sub_cost,
        overhead_cost,
        margin_cost,
        final_rate,
    })
}

/// Sums active process definitions into a per-unit process cost.
///
/// Rate-type rules: `Per Nos` and `Per Hour` apply the rate once per piece,
/// `Fixed` is a flat charge, `Per Kg` scales by the part weight.
pub fn process_cost(processes: &[ProcessRecord], weight_kg: Decimal) -> Decimal {
    let total: Decimal = processes
        .iter()
        .filter(|p| p.is_active)
        .map(|p| match p.rate_type {
            ProcessRateType::PerKg => p.rate * weight_kg,
            ProcessRateType::PerNos | ProcessRateType::PerHour | ProcessRateType::Fixed => p.rate,
        })
        .sum();
    round_currency(total)
}

// =============================================================================
// Costing Service (auto-sourcing)
// =============================================================================

/// Per-field overrides for the auto-sourcing path. `None` means
/// "source it" (rate, process cost) or "use the default" (the rest).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CostingOverrides {
    pub rm_rate: Option<Decimal>,
    pub process_cost: Option<Decimal>,
    pub finishing_cost: Option<Decimal>,
    pub packing_cost: Option<Decimal>,
    pub overhead_percentage: Option<Decimal>,
    pub margin_percentage: Option<Decimal>,
}

/// Costing over a catalog: resolves weight, rate and process cost for a
/// part, then runs [`calculate`].
#[derive(Debug, Clone)]
pub struct CostingService<C> {
    catalog: C,
}

impl<C: CostingCatalog> CostingService<C> {
    pub fn new(catalog: C) -> Self {
        CostingService { catalog }
    }

    /// Costs a part end to end.
    ///
    /// ## Sourcing
    /// - weight: from the part's dimension record (`DimensionMissing` if absent)
    /// - rm_rate: effective rate of the material's current rate row
    ///   (`RateNotFound`), unless overridden
    /// - process_cost: sum of active process definitions, unless overridden
    ///
    /// ## Errors
    /// `ItemNotFound` / `ItemInactive` / `DimensionMissing` / `RateNotFound`
    /// plus the [`calculate`] input checks. All-or-nothing: any failure
    /// yields no result.
    pub fn cost_part(&self, part_no: &str, overrides: &CostingOverrides) -> CoreResult<CostingResult> {
        validate_part_no(part_no)?;

        let item = self
            .catalog
            .item(part_no)?
            .ok_or_else(|| CoreError::ItemNotFound(part_no.to_string()))?;
        if !item.is_active {
            return Err(CoreError::ItemInactive(part_no.to_string()));
        }

        let dimension_record = self
            .catalog
            .dimensions(part_no)?
            .ok_or_else(|| CoreError::DimensionMissing(part_no.to_string()))?;
        let weight_kg = Dimensions::from_record(&dimension_record)?.weight().weight_kg;

        let rm_rate = match overrides.rm_rate {
            Some(rate) => {
                validate_non_negative(rate)?;
                rate
            }
            None => {
                let rows = self.catalog.material_rates(&item.material_name)?;
                effective_rate_of(current_rate(&item.material_name, &rows)?)?
            }
        };

        let sourced_process_cost = match overrides.process_cost {
            Some(cost) => cost,
            None => process_cost(&self.catalog.processes()?, weight_kg),
        };

        calculate(&CostingInput {
            weight_kg,
            rm_rate,
            process_cost: sourced_process_cost,
            finishing_cost: overrides.finishing_cost.unwrap_or(Decimal::ZERO),
            packing_cost: overrides.packing_cost.unwrap_or(Decimal::ZERO),
            overhead_percentage: overrides
                .overhead_percentage
                .unwrap_or(DEFAULT_OVERHEAD_PERCENTAGE),
            margin_percentage: overrides
                .margin_percentage
                .unwrap_or(DEFAULT_MARGIN_PERCENTAGE),
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
