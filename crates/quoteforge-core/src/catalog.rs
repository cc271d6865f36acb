//! # Catalog Contracts
//!
//! Trait seams between the pure engines and whatever owns the data.
//!
//! The CRUD shell (or the in-memory reference store in `quoteforge-store`)
//! implements these; the engines only ever see plain records. Every method
//! is synchronous and fallible - a failing lookup aborts the calculation
//! immediately with no retries and no partial output.

use rust_decimal::Decimal;

use crate::costing::CostingResult;
use crate::error::CoreResult;
use crate::types::{CompanyRecord, DimensionRecord, ItemRecord, ProcessRecord, RawMaterialRate};

/// Lookups needed by the auto-sourcing costing path.
pub trait CostingCatalog {
    /// Item by part number, `None` when unknown.
    fn item(&self, part_no: &str) -> CoreResult<Option<ItemRecord>>;

    /// Dimension record for a part, `None` when never measured.
    fn dimensions(&self, part_no: &str) -> CoreResult<Option<DimensionRecord>>;

    /// All rate rows for a material (active and inactive; selection policy
    /// lives in [`crate::rates::current_rate`]).
    fn material_rates(&self, material_name: &str) -> CoreResult<Vec<RawMaterialRate>>;

    /// All process definitions (active ones contribute to process cost).
    fn processes(&self) -> CoreResult<Vec<ProcessRecord>>;
}

/// Lookups needed when assembling a quotation.
pub trait QuotationCatalog {
    /// Item by part number.
    fn item(&self, part_no: &str) -> CoreResult<Option<ItemRecord>>;

    /// The active costing for a part (source of the unit final rate).
    fn costing(&self, part_no: &str) -> CoreResult<Option<CostingResult>>;

    /// Total GST percentage for an HSN classification code.
    fn gst_for_hsn(&self, hsn_code: &str) -> CoreResult<Option<Decimal>>;

    /// The quoting company's own profile.
    fn company(&self) -> CoreResult<Option<CompanyRecord>>;
}

// Shared references delegate, so a store can serve several consumers at
// once (e.g. a CostingService and create_quotation over one catalog).

impl<T: CostingCatalog + ?Sized> CostingCatalog for &T {
    fn item(&self, part_no: &str) -> CoreResult<Option<ItemRecord>> {
        (**self).item(part_no)
    }
    fn dimensions(&self, part_no: &str) -> CoreResult<Option<DimensionRecord>> {
        (**self).dimensions(part_no)
    }
    fn material_rates(&self, material_name: &str) -> CoreResult<Vec<RawMaterialRate>> {
        (**self).material_rates(material_name)
    }
    fn processes(&self) -> CoreResult<Vec<ProcessRecord>> {
        (**self).processes()
    }
}

impl<T: QuotationCatalog + ?Sized> QuotationCatalog for &T {
    fn item(&self, part_no: &str) -> CoreResult<Option<ItemRecord>> {
        (**self).item(part_no)
    }
    fn costing(&self, part_no: &str) -> CoreResult<Option<CostingResult>> {
        (**self).costing(part_no)
    }
    fn gst_for_hsn(&self, hsn_code: &str) -> CoreResult<Option<Decimal>> {
        (**self).gst_for_hsn(hsn_code)
    }
    fn company(&self) -> CoreResult<Option<CompanyRecord>> {
        (**self).company()
    }
}

/// Date-scoped monotonic counter for quotation numbers.
///
/// ## Atomicity Contract
/// Two concurrent calls for the same year MUST return distinct values -
/// implementations serialize the read-increment-persist step (a mutex in
/// the reference store, an atomic increment / transactional counter row in
/// a real database). An in-process `static` counter is not acceptable for
/// production since multiple instances may run concurrently.
pub trait QuotationSequence {
    /// Returns the next sequence number for the given year, starting at 1.
    fn next_sequence(&self, year: i32) -> CoreResult<u32>;
}
