//! # Quotation Aggregator
//!
//! Assembles priced line items into a tax-correct sales quotation and
//! guards its lifecycle.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                     Quotation Lifecycle                             │
//! │                                                                     │
//! │              ┌────────┐                                             │
//! │   create ──► │ Draft  │ ◄── only state that permits edits/deletion  │
//! │              └───┬────┘                                             │
//! │            ┌─────┴─────┐                                            │
//! │            ▼           ▼                                            │
//! │        ┌──────┐   ┌──────────┐                                      │
//! │        │ Sent │   │ Approved │   line items & totals frozen         │
//! │        └──┬───┘   └────┬─────┘                                      │
//! │           └─────┬──────┘                                            │
//! │     ┌─────┬─────┼─────────┬────────┐                                │
//! │     ▼     ▼     ▼         ▼        │                                │
//! │ Rejected Cancelled Converted Expired  ◄── terminal (absorbing)      │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Totals are always derived from the stored line items via
//! [`Quotation::recalculate`], which gives the round-trip law: a quotation
//! serialized, reloaded and recalculated reproduces its own totals.

use chrono::{DateTime, Datelike, Days, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::catalog::{QuotationCatalog, QuotationSequence};
use crate::error::{CoreError, CoreResult};
use crate::money::{line_amount, percent_of, round_currency};
use crate::tax::{resolve, GstSplit, StateCode};
use crate::types::CounterpartyRecord;
use crate::validation::{validate_part_no, validate_quantity};
use crate::words::amount_in_words;
use crate::DEFAULT_VALIDITY_DAYS;

// =============================================================================
// Status
// =============================================================================

/// Quotation lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuotationStatus {
    Draft,
    Sent,
    Approved,
    Rejected,
    Cancelled,
    Converted,
    Expired,
}

impl QuotationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuotationStatus::Draft => "Draft",
            QuotationStatus::Sent => "Sent",
            QuotationStatus::Approved => "Approved",
            QuotationStatus::Rejected => "Rejected",
            QuotationStatus::Cancelled => "Cancelled",
            QuotationStatus::Converted => "Converted",
            QuotationStatus::Expired => "Expired",
        }
    }

    /// True while line items and totals may still change.
    #[inline]
    pub fn is_draft(&self) -> bool {
        matches!(self, QuotationStatus::Draft)
    }

    /// Terminal states accept no further transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            QuotationStatus::Rejected
                | QuotationStatus::Cancelled
                | QuotationStatus::Converted
                | QuotationStatus::Expired
        )
    }

    /// Whether the lifecycle permits `self → to`.
    pub fn can_transition(&self, to: QuotationStatus) -> bool {
        match self {
            QuotationStatus::Draft => {
                matches!(to, QuotationStatus::Sent | QuotationStatus::Approved)
            }
            QuotationStatus::Sent | QuotationStatus::Approved => matches!(
                to,
                QuotationStatus::Rejected
                    | QuotationStatus::Cancelled
                    | QuotationStatus::Converted
                    | QuotationStatus::Expired
            ),
            _ => false,
        }
    }
}

impl fmt::Display for QuotationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// A priced quotation line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuotationLineItem {
    pub part_no: String,
    pub description: String,
    pub hsn_code: String,
    pub quantity: u32,
    /// Per-unit final rate sourced from the part's active costing.
    pub unit_rate: Decimal,
    /// quantity × unit_rate, rounded to 2 decimals.
    pub amount: Decimal,
}

impl QuotationLineItem {
    pub fn new(
        part_no: impl Into<String>,
        description: impl Into<String>,
        hsn_code: impl Into<String>,
        quantity: u32,
        unit_rate: Decimal,
    ) -> CoreResult<Self> {
        let part_no = part_no.into();
        validate_part_no(&part_no)?;
        validate_quantity(quantity)?;
        if unit_rate < Decimal::ZERO {
            return Err(CoreError::InvalidAmount(unit_rate));
        }

        Ok(QuotationLineItem {
            amount: line_amount(quantity, unit_rate),
            part_no,
            description: description.into(),
            hsn_code: hsn_code.into(),
            quantity,
            unit_rate,
        })
    }
}

// =============================================================================
// Quotation
// =============================================================================

/// A sales quotation with derived totals.
///
/// Totals (`sub_total`, `gst_amount`, `grand_total`, `amount_in_words`)
/// are owned by this type: external writers never set them directly, and
/// every mutation re-derives them from the line items.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quotation {
    /// Entity identity; `quotation_no` stays the business key.
    pub id: Uuid,
    /// Generated `QT/<year>/<4-digit-seq>` number.
    pub quotation_no: String,
    pub quotation_date: NaiveDate,
    pub valid_till: NaiveDate,
    pub company_state: StateCode,
    pub counterparty_name: String,
    pub counterparty_state: StateCode,
    /// Jurisdiction split of the quotation-level GST percentage.
    pub gst: GstSplit,
    pub line_items: Vec<QuotationLineItem>,
    pub sub_total: Decimal,
    pub gst_amount: Decimal,
    pub grand_total: Decimal,
    pub amount_in_words: String,
    pub status: QuotationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Stamp of the most recent status transition.
    pub status_changed_at: Option<DateTime<Utc>>,
}

// =============================================================================
// Creation
// =============================================================================

/// Request to create a quotation.
///
/// Callers supply the clock values (`quotation_date`, `created_at`) so the
/// aggregator stays deterministic.
#[derive(Debug, Clone)]
pub struct CreateQuotation {
    pub counterparty: CounterpartyRecord,
    pub lines: Vec<QuotationRequestLine>,
    pub quotation_date: NaiveDate,
    /// Defaults to `quotation_date + 30 days` when absent.
    pub valid_till: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

/// One requested line: which part, how many.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuotationRequestLine {
    pub part_no: String,
    pub quantity: u32,
}

/// Resolves a requested line against the catalog.
///
/// The item must exist and be active, and an active costing must supply
/// the unit final rate.
pub fn resolve_line<C: QuotationCatalog>(
    catalog: &C,
    part_no: &str,
    quantity: u32,
) -> CoreResult<QuotationLineItem> {
    validate_part_no(part_no)?;
    validate_quantity(quantity)?;

    let item = catalog
        .item(part_no)?
        .ok_or_else(|| CoreError::ItemNotFound(part_no.to_string()))?;
    if !item.is_active {
        return Err(CoreError::ItemInactive(part_no.to_string()));
    }

    let costing = catalog
        .costing(part_no)?
        .ok_or_else(|| CoreError::CostingNotFound(part_no.to_string()))?;

    QuotationLineItem::new(
        item.part_no,
        item.description,
        item.hsn_code,
        quantity,
        costing.final_rate,
    )
}

/// Creates a quotation from requested lines.
///
/// All-or-nothing: the first missing item/costing/tax/company record
/// aborts the whole creation (the error names the offending part number)
/// and nothing partial is returned to the caller for persistence.
///
/// ## Known limitation (reproduced from the original system)
/// The GST percentage for the WHOLE quotation comes from the tax table
/// entry matching the FIRST line's HSN code. A quotation spanning parts
/// with different HSN classifications silently uses the first part's rate.
pub fn create_quotation<C, S>(
    catalog: &C,
    sequence: &S,
    request: &CreateQuotation,
) -> CoreResult<Quotation>
where
    C: QuotationCatalog,
    S: QuotationSequence,
{
    if request.lines.is_empty() {
        return Err(CoreError::EmptyQuotation);
    }
    for (index, line) in request.lines.iter().enumerate() {
        if request.lines[..index]
            .iter()
            .any(|earlier| earlier.part_no == line.part_no)
        {
            return Err(CoreError::DuplicateLineItem(line.part_no.clone()));
        }
    }

    let line_items = request
        .lines
        .iter()
        .map(|line| resolve_line(catalog, &line.part_no, line.quantity))
        .collect::<CoreResult<Vec<_>>>()?;

    let first_hsn = &line_items[0].hsn_code;
    let gst_percentage = catalog
        .gst_for_hsn(first_hsn)?
        .ok_or_else(|| CoreError::TaxNotFound(first_hsn.clone()))?;

    let company = catalog.company()?.ok_or(CoreError::CompanyNotFound)?;
    let gst = resolve(
        company.state_code,
        request.counterparty.state_code,
        gst_percentage,
    )?;

    let year = request.quotation_date.year();
    let seq = sequence.next_sequence(year)?;
    let quotation_no = format_quotation_no(year, seq);

    let valid_till = match request.valid_till {
        Some(date) => date,
        None => request
            .quotation_date
            .checked_add_days(Days::new(DEFAULT_VALIDITY_DAYS))
            .ok_or_else(|| CoreError::Storage("validity date out of range".to_string()))?,
    };

    let mut quotation = Quotation {
        id: Uuid::new_v4(),
        quotation_no,
        quotation_date: request.quotation_date,
        valid_till,
        company_state: company.state_code,
        counterparty_name: request.counterparty.name.clone(),
        counterparty_state: request.counterparty.state_code,
        gst,
        line_items,
        sub_total: Decimal::ZERO,
        gst_amount: Decimal::ZERO,
        grand_total: Decimal::ZERO,
        amount_in_words: String::new(),
        status: QuotationStatus::Draft,
        created_at: request.created_at,
        updated_at: request.created_at,
        status_changed_at: None,
    };
    quotation.recalculate()?;

    Ok(quotation)
}

/// `QT/<year>/<4-digit-seq>` - sequential and reproducible, never random.
pub fn format_quotation_no(year: i32, sequence: u32) -> String {
    format!("QT/{}/{:04}", year, sequence)
}

// =============================================================================
// Mutation & Transitions
// =============================================================================

impl Quotation {
    /// Recomputes all derived totals from the stored line items.
    ///
    /// `sub_total` is the exact sum of the already-rounded line amounts,
    /// so summation order cannot introduce drift.
    pub fn recalculate(&mut self) -> CoreResult<()> {
        let sub_total: Decimal = self.line_items.iter().map(|line| line.amount).sum();
        self.sub_total = sub_total;
        self.gst_amount = percent_of(sub_total, self.gst.total_percentage);
        self.grand_total = round_currency(sub_total + self.gst_amount);
        self.amount_in_words = amount_in_words(self.grand_total)?;
        Ok(())
    }

    /// Fails with `QuotationNotDraft` once the quotation has advanced.
    pub fn ensure_draft(&self) -> CoreResult<()> {
        if !self.status.is_draft() {
            return Err(CoreError::QuotationNotDraft {
                quotation_no: self.quotation_no.clone(),
                status: self.status.to_string(),
            });
        }
        Ok(())
    }

    /// Appends a resolved line (Draft only). Each part may appear on at
    /// most one line; `set_quantity` is the way to quote more of it.
    pub fn add_line(&mut self, line: QuotationLineItem, at: DateTime<Utc>) -> CoreResult<()> {
        self.ensure_draft()?;
        if self.line_items.iter().any(|l| l.part_no == line.part_no) {
            return Err(CoreError::DuplicateLineItem(line.part_no));
        }
        self.line_items.push(line);
        self.recalculate()?;
        self.updated_at = at;
        Ok(())
    }

    /// Changes the quantity of the line for `part_no` (Draft only).
    pub fn set_quantity(
        &mut self,
        part_no: &str,
        quantity: u32,
        at: DateTime<Utc>,
    ) -> CoreResult<()> {
        self.ensure_draft()?;
        validate_quantity(quantity)?;

        let line = self
            .line_items
            .iter_mut()
            .find(|line| line.part_no == part_no)
            .ok_or_else(|| CoreError::ItemNotFound(part_no.to_string()))?;
        line.quantity = quantity;
        line.amount = line_amount(quantity, line.unit_rate);

        self.recalculate()?;
        self.updated_at = at;
        Ok(())
    }

    /// Removes the line for `part_no` (Draft only; the last line cannot
    /// be removed - delete the quotation instead).
    pub fn remove_line(&mut self, part_no: &str, at: DateTime<Utc>) -> CoreResult<()> {
        self.ensure_draft()?;

        let index = self
            .line_items
            .iter()
            .position(|line| line.part_no == part_no)
            .ok_or_else(|| CoreError::ItemNotFound(part_no.to_string()))?;
        if self.line_items.len() == 1 {
            return Err(CoreError::EmptyQuotation);
        }
        self.line_items.remove(index);

        self.recalculate()?;
        self.updated_at = at;
        Ok(())
    }

    /// Applies a lifecycle transition, stamping the timestamp.
    pub fn transition(&mut self, to: QuotationStatus, at: DateTime<Utc>) -> CoreResult<()> {
        if !self.status.can_transition(to) {
            return Err(CoreError::InvalidStatusTransition {
                quotation_no: self.quotation_no.clone(),
                from: self.status.to_string(),
                to: to.to_string(),
            });
        }
        self.status = to;
        self.status_changed_at = Some(at);
        self.updated_at = at;
        Ok(())
    }

    pub fn send(&mut self, at: DateTime<Utc>) -> CoreResult<()> {
        self.transition(QuotationStatus::Sent, at)
    }

    pub fn approve(&mut self, at: DateTime<Utc>) -> CoreResult<()> {
        self.transition(QuotationStatus::Approved, at)
    }

    pub fn reject(&mut self, at: DateTime<Utc>) -> CoreResult<()> {
        self.transition(QuotationStatus::Rejected, at)
    }

    pub fn cancel(&mut self, at: DateTime<Utc>) -> CoreResult<()> {
        self.transition(QuotationStatus::Cancelled, at)
    }

    pub fn convert(&mut self, at: DateTime<Utc>) -> CoreResult<()> {
        self.transition(QuotationStatus::Converted, at)
    }

    pub fn expire(&mut self, at: DateTime<Utc>) -> CoreResult<()> {
        self.transition(QuotationStatus::Expired, at)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
