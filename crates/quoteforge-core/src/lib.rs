//! # quoteforge-core: Pure Calculation Logic
//!
//! The deterministic heart of the manufacturing quotation back office:
//! raw dimensions and material rates in, tax-correct sales quotations out.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      QuoteForge Architecture                        │
//! │                                                                     │
//! │  ┌───────────────────────────────────────────────────────────────┐ │
//! │  │        CRUD Shell (external: HTTP, auth, persistence)         │ │
//! │  └──────────────────────────────┬────────────────────────────────┘ │
//! │                                 │ catalog traits                    │
//! │  ┌──────────────────────────────▼────────────────────────────────┐ │
//! │  │              ★ quoteforge-core (THIS CRATE) ★                 │ │
//! │  │                                                               │ │
//! │  │  Dimensions ──► weight ──┐                                    │ │
//! │  │  RateRows ──► rates ─────┼──► costing ──► final_rate          │ │
//! │  │  Processes ──────────────┘        │                           │ │
//! │  │                                   ▼                           │ │
//! │  │  StateCodes ──► tax ──────► quotation ◄── words               │ │
//! │  │                                                               │ │
//! │  │  NO I/O • NO CLOCK READS • NO GLOBAL STATE                    │ │
//! │  └───────────────────────────────────────────────────────────────┘ │
//! │                                 │                                   │
//! │  ┌──────────────────────────────▼────────────────────────────────┐ │
//! │  │        quoteforge-store (reference catalog + sequence)        │ │
//! │  └───────────────────────────────────────────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`weight`] - part weight from dimensions and density
//! - [`rates`] - effective raw-material rates and current-rate selection
//! - [`costing`] - the layered cost chain (rm → sub → overhead → margin)
//! - [`tax`] - GST jurisdiction resolution (IGST vs CGST+SGST)
//! - [`words`] - amount-in-words rendering (Indian numbering)
//! - [`quotation`] - line-item aggregation and the quotation lifecycle
//! - [`catalog`] - trait contracts for external data owners
//! - [`money`] - the rounding rules everything above shares
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: same input, same output - every figure on a
//!    printed quotation must be reproducible bit-for-bit
//! 2. **No I/O**: catalog data arrives through traits; clock values are
//!    passed in by the caller
//! 3. **Decimal arithmetic**: `rust_decimal` everywhere; progressive
//!    half-away-from-zero rounding per the costing contract
//! 4. **Explicit errors**: typed, recoverable failures - the engines
//!    never panic on bad input
//!
//! ## Example
//!
//! ```rust
//! use quoteforge_core::costing::{calculate, CostingInput};
//! use quoteforge_core::weight::Dimensions;
//! use rust_decimal_macros::dec;
//!
//! // 5 × 50 × 100 mm copper strip
//! let dims = Dimensions::new(dec!(5), dec!(50), dec!(100), None).unwrap();
//! let weight = dims.weight().weight_kg; // 0.224 kg
//!
//! let result = calculate(&CostingInput::new(weight, dec!(150.75))).unwrap();
//! assert_eq!(result.final_rate, dec!(42.22));
//! ```

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod costing;
pub mod error;
pub mod money;
pub mod quotation;
pub mod rates;
pub mod tax;
pub mod types;
pub mod validation;
pub mod weight;
pub mod words;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use catalog::{CostingCatalog, QuotationCatalog, QuotationSequence};
pub use costing::{CostingInput, CostingOverrides, CostingResult, CostingService};
pub use error::{CoreError, CoreResult, ValidationError};
pub use quotation::{CreateQuotation, Quotation, QuotationLineItem, QuotationStatus};
pub use tax::{GstSplit, GstType, StateCode};
pub use types::*;
pub use weight::{Dimensions, WeightBreakdown};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Default material density in g/cm³ when a dimension record carries none.
///
/// 8.96 is copper - the dominant raw material in this catalog.
pub const DEFAULT_DENSITY_G_CM3: Decimal = dec!(8.96);

/// Default overhead percentage applied to sub_cost.
pub const DEFAULT_OVERHEAD_PERCENTAGE: Decimal = dec!(10);

/// Default margin percentage applied to sub_cost.
pub const DEFAULT_MARGIN_PERCENTAGE: Decimal = dec!(15);

/// Maximum quantity on a single quotation line.
///
/// Guards against fat-fingered orders (1000000 instead of 100) while
/// leaving room for genuine high-volume manufacturing runs.
pub const MAX_LINE_QUANTITY: u32 = 999_999;

/// Days a quotation stays valid when the caller supplies no explicit
/// `valid_till` date.
pub const DEFAULT_VALIDITY_DAYS: u64 = 30;
