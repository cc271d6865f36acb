//! # Quotation Repository
//!
//! Saved quotations, keyed by quotation number, with the lifecycle rules
//! enforced at the persistence boundary:
//!
//! - insert: number must be fresh (the sequence guarantees this under
//!   normal operation; the check catches seeding mistakes)
//! - update: content edits land only while the STORED quotation is still
//!   Draft; past Draft, the only writes accepted are pure lifecycle
//!   transitions the state machine allows (Sent → Converted, Approved →
//!   Expired, ...) with the line items untouched
//! - delete: Draft only

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::debug;

use quoteforge_core::error::{CoreError, CoreResult};
use quoteforge_core::quotation::{Quotation, QuotationStatus};

use crate::error::{StoreError, StoreResult};

/// In-memory quotation persistence.
#[derive(Debug, Default)]
pub struct QuotationRepository {
    quotations: RwLock<HashMap<String, Quotation>>,
}

impl QuotationRepository {
    pub fn new() -> Self {
        QuotationRepository::default()
    }

    fn read(&self) -> CoreResult<RwLockReadGuard<'_, HashMap<String, Quotation>>> {
        self.quotations
            .read()
            .map_err(|_| CoreError::Storage("quotation lock poisoned".to_string()))
    }

    fn write(&self) -> CoreResult<RwLockWriteGuard<'_, HashMap<String, Quotation>>> {
        self.quotations
            .write()
            .map_err(|_| CoreError::Storage("quotation lock poisoned".to_string()))
    }

    /// Persists a freshly created quotation.
    pub fn insert(&self, quotation: Quotation) -> StoreResult<()> {
        let mut quotations = self.write()?;
        if quotations.contains_key(&quotation.quotation_no) {
            return Err(StoreError::duplicate(
                "quotation_no",
                &quotation.quotation_no,
            ));
        }
        debug!(
            quotation_no = %quotation.quotation_no,
            grand_total = %quotation.grand_total,
            "Inserting quotation"
        );
        quotations.insert(quotation.quotation_no.clone(), quotation);
        Ok(())
    }

    /// Loads a quotation by number.
    pub fn get(&self, quotation_no: &str) -> StoreResult<Quotation> {
        self.read()?
            .get(quotation_no)
            .cloned()
            .ok_or_else(|| StoreError::not_found("Quotation", quotation_no))
    }

    /// Replaces a stored quotation with an edited/transitioned version.
    ///
    /// While the STORED copy is Draft, anything goes: edits and the
    /// Draft → Sent/Approved transitions all land. Past Draft, line items
    /// and totals are frozen; the only writes accepted are pure status
    /// transitions the lifecycle allows from the stored status (e.g.
    /// Sent → Converted), with the line items byte-identical. Totals are
    /// derived from the line items, so they cannot drift in such a write.
    pub fn update(&self, quotation: Quotation) -> StoreResult<()> {
        let mut quotations = self.write()?;
        let stored = quotations
            .get(&quotation.quotation_no)
            .ok_or_else(|| StoreError::not_found("Quotation", &quotation.quotation_no))?;

        let pure_transition = stored.status.can_transition(quotation.status)
            && quotation.line_items == stored.line_items;
        if !stored.status.is_draft() && !pure_transition {
            return Err(CoreError::QuotationNotDraft {
                quotation_no: stored.quotation_no.clone(),
                status: stored.status.to_string(),
            }
            .into());
        }

        debug!(
            quotation_no = %quotation.quotation_no,
            status = %quotation.status,
            "Updating quotation"
        );
        quotations.insert(quotation.quotation_no.clone(), quotation);
        Ok(())
    }

    /// Deletes a quotation; Draft only.
    pub fn delete(&self, quotation_no: &str) -> StoreResult<()> {
        let mut quotations = self.write()?;
        let stored = quotations
            .get(quotation_no)
            .ok_or_else(|| StoreError::not_found("Quotation", quotation_no))?;

        if !stored.status.is_draft() {
            return Err(CoreError::QuotationNotDraft {
                quotation_no: stored.quotation_no.clone(),
                status: stored.status.to_string(),
            }
            .into());
        }

        debug!(quotation_no, "Deleting quotation");
        quotations.remove(quotation_no);
        Ok(())
    }

    /// All quotations currently in the given status (listing/expiry sweeps).
    pub fn list_by_status(&self, status: QuotationStatus) -> StoreResult<Vec<Quotation>> {
        Ok(self
            .read()?
            .values()
            .filter(|q| q.status == status)
            .cloned()
            .collect())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use quoteforge_core::quotation::{format_quotation_no, QuotationLineItem};
    use quoteforge_core::tax::{resolve, StateCode};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn draft_quotation(seq: u32) -> Quotation {
        let state = StateCode::new(27).unwrap();
        let line =
            QuotationLineItem::new("PN001", "Copper strip", "7409", 100, dec!(42.22)).unwrap();
        let now = Utc::now();

        let mut q = Quotation {
            id: Uuid::new_v4(),
            quotation_no: format_quotation_no(2025, seq),
            quotation_date: NaiveDate::from_ymd_opt(2025, 4, 10).unwrap(),
            valid_till: NaiveDate::from_ymd_opt(2025, 5, 10).unwrap(),
            company_state: state,
            counterparty_name: "Sharma Industries".to_string(),
            counterparty_state: state,
            gst: resolve(state, state, dec!(18)).unwrap(),
            line_items: vec![line],
            sub_total: Decimal::ZERO,
            gst_amount: Decimal::ZERO,
            grand_total: Decimal::ZERO,
            amount_in_words: String::new(),
            status: QuotationStatus::Draft,
            created_at: now,
            updated_at: now,
            status_changed_at: None,
        };
        q.recalculate().unwrap();
        q
    }

    #[test]
    fn test_insert_get_roundtrip() {
        let repo = QuotationRepository::new();
        let q = draft_quotation(1);
        repo.insert(q.clone()).unwrap();

        let loaded = repo.get(&q.quotation_no).unwrap();
        assert_eq!(loaded.grand_total, dec!(4981.96));
    }

    #[test]
    fn test_duplicate_number_rejected() {
        let repo = QuotationRepository::new();
        repo.insert(draft_quotation(1)).unwrap();
        let err = repo.insert(draft_quotation(1)).unwrap_err();
        assert!(matches!(err, StoreError::Duplicate { field: "quotation_no", .. }));
    }

    #[test]
    fn test_update_allows_draft_edits_and_approval() {
        let repo = QuotationRepository::new();
        let mut q = draft_quotation(1);
        repo.insert(q.clone()).unwrap();

        // Draft edit lands
        q.set_quantity("PN001", 50, Utc::now()).unwrap();
        repo.update(q.clone()).unwrap();
        assert_eq!(repo.get(&q.quotation_no).unwrap().sub_total, dec!(2111.00));

        // The approval transition itself lands
        q.approve(Utc::now()).unwrap();
        repo.update(q.clone()).unwrap();

        // ...after which re-writing the same state does not
        let err = repo.update(q.clone()).unwrap_err();
        assert!(matches!(
            err,
            StoreError::Core(CoreError::QuotationNotDraft { .. })
        ));
    }

    #[test]
    fn test_lifecycle_transitions_persist_past_draft() {
        let repo = QuotationRepository::new();
        repo.insert(draft_quotation(1)).unwrap();

        let mut q = repo.get("QT/2025/0001").unwrap();
        q.send(Utc::now()).unwrap();
        repo.update(q).unwrap();

        // Sent → Converted is a second-stage transition; it must land too
        let mut q = repo.get("QT/2025/0001").unwrap();
        q.convert(Utc::now()).unwrap();
        repo.update(q).unwrap();
        assert_eq!(
            repo.get("QT/2025/0001").unwrap().status,
            QuotationStatus::Converted
        );

        // Expiry sweeps can see quotations that went through the flow
        repo.insert(draft_quotation(2)).unwrap();
        let mut q = repo.get("QT/2025/0002").unwrap();
        q.send(Utc::now()).unwrap();
        repo.update(q).unwrap();
        let mut q = repo.get("QT/2025/0002").unwrap();
        q.expire(Utc::now()).unwrap();
        repo.update(q).unwrap();
        assert_eq!(
            repo.list_by_status(QuotationStatus::Expired).unwrap().len(),
            1
        );
    }

    #[test]
    fn test_update_rejects_content_change_smuggled_with_transition() {
        let repo = QuotationRepository::new();
        let mut q = draft_quotation(1);
        q.send(Utc::now()).unwrap();
        repo.insert(q).unwrap();

        // Valid transition, but the line items differ from the stored copy
        let mut tampered = repo.get("QT/2025/0001").unwrap();
        tampered.convert(Utc::now()).unwrap();
        tampered.line_items[0].quantity = 1;

        let err = repo.update(tampered).unwrap_err();
        assert!(matches!(
            err,
            StoreError::Core(CoreError::QuotationNotDraft { .. })
        ));
        assert_eq!(repo.get("QT/2025/0001").unwrap().line_items[0].quantity, 100);
    }

    #[test]
    fn test_delete_draft_only() {
        let repo = QuotationRepository::new();
        let mut q = draft_quotation(1);
        repo.insert(q.clone()).unwrap();
        repo.delete(&q.quotation_no).unwrap();
        assert!(repo.get(&q.quotation_no).is_err());

        q.approve(Utc::now()).unwrap();
        repo.insert(q.clone()).unwrap();
        let err = repo.delete(&q.quotation_no).unwrap_err();
        assert!(matches!(
            err,
            StoreError::Core(CoreError::QuotationNotDraft { .. })
        ));
    }

    #[test]
    fn test_list_by_status() {
        let repo = QuotationRepository::new();
        let mut approved = draft_quotation(1);
        approved.approve(Utc::now()).unwrap();
        repo.insert(approved).unwrap();
        repo.insert(draft_quotation(2)).unwrap();

        assert_eq!(repo.list_by_status(QuotationStatus::Draft).unwrap().len(), 1);
        assert_eq!(
            repo.list_by_status(QuotationStatus::Approved).unwrap().len(),
            1
        );
        assert!(repo
            .list_by_status(QuotationStatus::Expired)
            .unwrap()
            .is_empty());
    }
}
