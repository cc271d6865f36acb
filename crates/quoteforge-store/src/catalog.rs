//! # Catalog Store
//!
//! In-memory registries for the master data the engines consume: items,
//! dimensions, materials, rate rows, process definitions, the tax table
//! and the company profile, plus saved costings.
//!
//! Implements both catalog contracts from the core
//! ([`CostingCatalog`], [`QuotationCatalog`]), so a [`MemoryStore`] can be
//! handed directly to `CostingService` and `create_quotation`.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::debug;

use quoteforge_core::catalog::{CostingCatalog, QuotationCatalog};
use quoteforge_core::costing::CostingResult;
use quoteforge_core::error::{CoreError, CoreResult};
use quoteforge_core::types::{
    CompanyRecord, DimensionRecord, ItemRecord, MaterialRecord, ProcessRecord, RawMaterialRate,
    TaxRecord,
};
use rust_decimal::Decimal;

use crate::error::{StoreError, StoreResult};

// =============================================================================
// Registries
// =============================================================================

#[derive(Debug, Default)]
struct Registries {
    items: HashMap<String, ItemRecord>,
    dimensions: HashMap<String, DimensionRecord>,
    materials: HashMap<String, MaterialRecord>,
    rates: Vec<RawMaterialRate>,
    processes: Vec<ProcessRecord>,
    taxes: HashMap<String, TaxRecord>,
    company: Option<CompanyRecord>,
    costings: HashMap<String, CostingResult>,
}

/// In-memory master-data store.
///
/// All access goes through an `RwLock`; lookups never block writers for
/// longer than a clone of the requested record.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Registries>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }

    fn read(&self) -> CoreResult<RwLockReadGuard<'_, Registries>> {
        self.inner
            .read()
            .map_err(|_| CoreError::Storage("catalog lock poisoned".to_string()))
    }

    fn write(&self) -> CoreResult<RwLockWriteGuard<'_, Registries>> {
        self.inner
            .write()
            .map_err(|_| CoreError::Storage("catalog lock poisoned".to_string()))
    }

    // -------------------------------------------------------------------------
    // Writes (upsert semantics, keyed by the business key)
    // -------------------------------------------------------------------------

    pub fn upsert_item(&self, item: ItemRecord) -> StoreResult<()> {
        debug!(part_no = %item.part_no, "Upserting item");
        self.write()?.items.insert(item.part_no.clone(), item);
        Ok(())
    }

    pub fn upsert_dimensions(&self, record: DimensionRecord) -> StoreResult<()> {
        debug!(part_no = %record.part_no, "Upserting dimensions");
        self.write()?
            .dimensions
            .insert(record.part_no.clone(), record);
        Ok(())
    }

    pub fn upsert_material(&self, material: MaterialRecord) -> StoreResult<()> {
        debug!(name = %material.name, "Upserting material");
        self.write()?
            .materials
            .insert(material.name.clone(), material);
        Ok(())
    }

    /// Adds a dated rate row. The material master must exist first.
    pub fn add_rate(&self, rate: RawMaterialRate) -> StoreResult<()> {
        let mut inner = self.write()?;
        if !inner.materials.contains_key(&rate.material_name) {
            return Err(StoreError::not_found("Material", &rate.material_name));
        }
        debug!(
            material = %rate.material_name,
            rate_per_kg = %rate.rate_per_kg,
            effective_date = %rate.effective_date,
            "Adding rate row"
        );
        inner.rates.push(rate);
        Ok(())
    }

    pub fn add_process(&self, process: ProcessRecord) -> StoreResult<()> {
        debug!(name = %process.name, rate_type = ?process.rate_type, "Adding process");
        self.write()?.processes.push(process);
        Ok(())
    }

    pub fn upsert_tax(&self, tax: TaxRecord) -> StoreResult<()> {
        debug!(hsn_code = %tax.hsn_code, gst = %tax.gst_percentage, "Upserting tax entry");
        self.write()?.taxes.insert(tax.hsn_code.clone(), tax);
        Ok(())
    }

    pub fn set_company(&self, company: CompanyRecord) -> StoreResult<()> {
        debug!(name = %company.name, state = %company.state_code, "Setting company profile");
        self.write()?.company = Some(company);
        Ok(())
    }

    /// Saves the active costing for a part, replacing any previous one.
    pub fn save_costing(&self, part_no: impl Into<String>, costing: CostingResult) -> StoreResult<()> {
        let part_no = part_no.into();
        debug!(part_no = %part_no, final_rate = %costing.final_rate, "Saving costing");
        self.write()?.costings.insert(part_no, costing);
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Reads beyond the catalog contracts
    // -------------------------------------------------------------------------

    pub fn material(&self, name: &str) -> StoreResult<MaterialRecord> {
        self.read()?
            .materials
            .get(name)
            .cloned()
            .ok_or_else(|| StoreError::not_found("Material", name))
    }

    pub fn saved_costing(&self, part_no: &str) -> StoreResult<CostingResult> {
        self.read()?
            .costings
            .get(part_no)
            .cloned()
            .ok_or_else(|| StoreError::not_found("Costing", part_no))
    }
}

// =============================================================================
// Catalog Contract Implementations
// =============================================================================

impl CostingCatalog for MemoryStore {
    fn item(&self, part_no: &str) -> CoreResult<Option<ItemRecord>> {
        Ok(self.read()?.items.get(part_no).cloned())
    }

    fn dimensions(&self, part_no: &str) -> CoreResult<Option<DimensionRecord>> {
        Ok(self.read()?.dimensions.get(part_no).cloned())
    }

    fn material_rates(&self, material_name: &str) -> CoreResult<Vec<RawMaterialRate>> {
        Ok(self
            .read()?
            .rates
            .iter()
            .filter(|r| r.material_name == material_name)
            .cloned()
            .collect())
    }

    fn processes(&self) -> CoreResult<Vec<ProcessRecord>> {
        Ok(self.read()?.processes.clone())
    }
}

impl QuotationCatalog for MemoryStore {
    fn item(&self, part_no: &str) -> CoreResult<Option<ItemRecord>> {
        Ok(self.read()?.items.get(part_no).cloned())
    }

    fn costing(&self, part_no: &str) -> CoreResult<Option<CostingResult>> {
        Ok(self.read()?.costings.get(part_no).cloned())
    }

    fn gst_for_hsn(&self, hsn_code: &str) -> CoreResult<Option<Decimal>> {
        Ok(self
            .read()?
            .taxes
            .get(hsn_code)
            .map(|tax| tax.gst_percentage))
    }

    fn company(&self) -> CoreResult<Option<CompanyRecord>> {
        Ok(self.read()?.company.clone())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use quoteforge_core::tax::StateCode;
    use rust_decimal_macros::dec;

    fn copper() -> MaterialRecord {
        MaterialRecord {
            name: "Copper".to_string(),
            density_g_cm3: dec!(8.96),
            is_active: true,
        }
    }

    #[test]
    fn test_rate_requires_material_master() {
        let store = MemoryStore::new();
        let rate = RawMaterialRate {
            material_name: "Copper".to_string(),
            rate_per_kg: dec!(150.75),
            scrap_percentage: dec!(0),
            transport_loss_percentage: dec!(0),
            effective_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            is_active: true,
        };

        let err = store.add_rate(rate.clone()).unwrap_err();
        assert!(matches!(err, StoreError::NotFound { entity: "Material", .. }));

        store.upsert_material(copper()).unwrap();
        store.add_rate(rate).unwrap();
        assert_eq!(store.material_rates("Copper").unwrap().len(), 1);
    }

    #[test]
    fn test_upsert_replaces() {
        let store = MemoryStore::new();
        let mut item = ItemRecord {
            part_no: "PN001".to_string(),
            description: "Copper strip".to_string(),
            material_name: "Copper".to_string(),
            hsn_code: "7409".to_string(),
            is_active: true,
        };
        store.upsert_item(item.clone()).unwrap();

        item.is_active = false;
        store.upsert_item(item).unwrap();

        let loaded = CostingCatalog::item(&store, "PN001").unwrap().unwrap();
        assert!(!loaded.is_active);
    }

    #[test]
    fn test_company_and_tax_lookups() {
        let store = MemoryStore::new();
        assert!(store.company().unwrap().is_none());
        assert!(store.gst_for_hsn("7409").unwrap().is_none());

        store
            .set_company(CompanyRecord {
                name: "Acme Components".to_string(),
                state_code: StateCode::new(27).unwrap(),
            })
            .unwrap();
        store
            .upsert_tax(TaxRecord {
                hsn_code: "7409".to_string(),
                gst_percentage: dec!(18),
            })
            .unwrap();

        assert_eq!(store.company().unwrap().unwrap().state_code.code(), 27);
        assert_eq!(store.gst_for_hsn("7409").unwrap(), Some(dec!(18)));
    }
}
