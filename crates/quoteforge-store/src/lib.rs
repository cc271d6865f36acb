//! # quoteforge-store: Reference Store
//!
//! In-memory implementations of the data contracts quoteforge-core
//! defines: catalog registries, the year-scoped quotation-number
//! sequence, and quotation persistence with lifecycle enforcement.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                     quoteforge-store Layout                         │
//! │                                                                     │
//! │  catalog    MemoryStore        items / dimensions / materials /     │
//! │                                rates / processes / taxes / company  │
//! │                                + saved costings                     │
//! │  sequence   YearSequence       atomic QT/<year>/<seq> counter       │
//! │  quotations QuotationRepository  insert / get / update / delete     │
//! │                                  (Draft-only mutation)              │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The production deployment backs these contracts with the CRUD shell's
//! database. This crate exists so the costing → quotation pipeline runs
//! and tests end to end without that shell, and it doubles as the
//! reference semantics a database-backed implementation must match.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod error;
pub mod quotations;
pub mod sequence;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use catalog::MemoryStore;
pub use error::{StoreError, StoreResult};
pub use quotations::QuotationRepository;
pub use sequence::YearSequence;
