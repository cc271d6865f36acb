//! # Quotation Number Sequence
//!
//! Year-scoped monotonic counter backing quotation numbers.
//!
//! ## Atomicity
//! The read-increment-return step is serialized behind a single `Mutex`,
//! so two concurrent quotation creations can never receive the same
//! number. A production deployment replaces this with the database's own
//! atomic increment (auto-increment column or a compare-and-swap counter
//! row) - the contract is the same, the serialization point moves into
//! the storage engine.

use std::collections::HashMap;
use std::sync::Mutex;

use tracing::debug;

use quoteforge_core::catalog::QuotationSequence;
use quoteforge_core::error::{CoreError, CoreResult};

/// Mutex-serialized year → last-issued-sequence map.
#[derive(Debug, Default)]
pub struct YearSequence {
    counters: Mutex<HashMap<i32, u32>>,
}

impl YearSequence {
    pub fn new() -> Self {
        YearSequence::default()
    }

    /// Seeds the counter for a year (e.g. when resuming from persisted
    /// state). Later `next_sequence` calls continue from `last_issued + 1`.
    pub fn seed(&self, year: i32, last_issued: u32) -> CoreResult<()> {
        let mut counters = self.lock()?;
        counters.insert(year, last_issued);
        Ok(())
    }

    fn lock(&self) -> CoreResult<std::sync::MutexGuard<'_, HashMap<i32, u32>>> {
        self.counters
            .lock()
            .map_err(|_| CoreError::Storage("sequence lock poisoned".to_string()))
    }
}

impl QuotationSequence for YearSequence {
    fn next_sequence(&self, year: i32) -> CoreResult<u32> {
        let mut counters = self.lock()?;
        let next = counters.entry(year).or_insert(0);
        *next += 1;
        debug!(year, sequence = *next, "Issued quotation sequence");
        Ok(*next)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
