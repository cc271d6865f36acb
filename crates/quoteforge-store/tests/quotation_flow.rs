//! End-to-end pipeline test: seed master data, cost a part, save the
//! costing, raise a quotation, then walk its lifecycle through the
//! repository.

use chrono::{NaiveDate, Utc};
use rust_decimal_macros::dec;

use quoteforge_core::costing::{CostingOverrides, CostingService};
use quoteforge_core::quotation::{create_quotation, CreateQuotation, QuotationRequestLine};
use quoteforge_core::tax::{GstType, StateCode};
use quoteforge_core::types::{
    CompanyRecord, CounterpartyRecord, DimensionRecord, ItemRecord, MaterialRecord,
    RawMaterialRate, TaxRecord,
};
use quoteforge_core::CoreError;
use quoteforge_store::{MemoryStore, QuotationRepository, StoreError, YearSequence};

fn seeded_store() -> MemoryStore {
    let store = MemoryStore::new();

    store
        .upsert_material(MaterialRecord {
            name: "Copper".to_string(),
            density_g_cm3: dec!(8.96),
            is_active: true,
        })
        .unwrap();
    store
        .upsert_item(ItemRecord {
            part_no: "PN001".to_string(),
            description: "Copper strip 5x50x100".to_string(),
            material_name: "Copper".to_string(),
            hsn_code: "7409".to_string(),
            is_active: true,
        })
        .unwrap();
    store
        .upsert_dimensions(DimensionRecord {
            part_no: "PN001".to_string(),
            thickness_mm: dec!(5),
            width_mm: dec!(50),
            length_mm: dec!(100),
            density_g_cm3: Some(dec!(8.96)),
        })
        .unwrap();
    store
        .add_rate(RawMaterialRate {
            material_name: "Copper".to_string(),
            rate_per_kg: dec!(150.75),
            scrap_percentage: dec!(0),
            transport_loss_percentage: dec!(0),
            effective_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            is_active: true,
        })
        .unwrap();
    store
        .upsert_tax(TaxRecord {
            hsn_code: "7409".to_string(),
            gst_percentage: dec!(18),
        })
        .unwrap();
    store
        .set_company(CompanyRecord {
            name: "Acme Components".to_string(),
            state_code: StateCode::new(27).unwrap(),
        })
        .unwrap();

    store
}

fn request(lines: Vec<(&str, u32)>) -> CreateQuotation {
    CreateQuotation {
        counterparty: CounterpartyRecord {
            name: "Sharma Industries".to_string(),
            state_code: StateCode::new(27).unwrap(),
        },
        lines: lines
            .into_iter()
            .map(|(part_no, quantity)| QuotationRequestLine {
                part_no: part_no.to_string(),
                quantity,
            })
            .collect(),
        quotation_date: NaiveDate::from_ymd_opt(2025, 4, 10).unwrap(),
        valid_till: None,
        created_at: Utc::now(),
    }
}

#[test]
fn test_costing_to_quotation_pipeline() {
    let store = seeded_store();

    // Cost the part from the seeded master data
    let service = CostingService::new(&store);
    let costing = service
        .cost_part("PN001", &CostingOverrides::default())
        .unwrap();
    assert_eq!(costing.weight_kg, dec!(0.224));
    assert_eq!(costing.rm_cost, dec!(33.77));
    assert_eq!(costing.final_rate, dec!(42.22));

    store.save_costing("PN001", costing).unwrap();

    // Raise a quotation for 100 pieces
    let sequence = YearSequence::new();
    let quotation = create_quotation(&store, &sequence, &request(vec![("PN001", 100)])).unwrap();

    assert_eq!(quotation.quotation_no, "QT/2025/0001");
    assert_eq!(quotation.gst.gst_type, GstType::CgstSgst);
    assert_eq!(quotation.gst.cgst_percentage, dec!(9));
    assert_eq!(quotation.sub_total, dec!(4222.00));
    assert_eq!(quotation.gst_amount, dec!(759.96));
    assert_eq!(quotation.grand_total, dec!(4981.96));
    assert_eq!(
        quotation.amount_in_words,
        "Four Thousand Nine Hundred Eighty One Rupees and Ninety Six Paise Only"
    );
    assert_eq!(
        quotation.valid_till,
        NaiveDate::from_ymd_opt(2025, 5, 10).unwrap()
    );

    // Persist, approve, and verify the freeze
    let repo = QuotationRepository::new();
    repo.insert(quotation.clone()).unwrap();

    let mut loaded = repo.get("QT/2025/0001").unwrap();
    loaded.approve(Utc::now()).unwrap();
    repo.update(loaded).unwrap();

    let mut frozen = repo.get("QT/2025/0001").unwrap();
    let err = frozen.set_quantity("PN001", 1, Utc::now()).unwrap_err();
    assert!(matches!(err, CoreError::QuotationNotDraft { .. }));
    let err = repo.delete("QT/2025/0001").unwrap_err();
    assert!(matches!(
        err,
        StoreError::Core(CoreError::QuotationNotDraft { .. })
    ));
    assert_eq!(repo.get("QT/2025/0001").unwrap().grand_total, dec!(4981.96));
}

#[test]
fn test_failed_creation_consumes_no_sequence_number() {
    let store = seeded_store();
    let service = CostingService::new(&store);
    let costing = service
        .cost_part("PN001", &CostingOverrides::default())
        .unwrap();
    store.save_costing("PN001", costing).unwrap();

    let sequence = YearSequence::new();

    // Unknown part aborts before a number is issued
    let err = create_quotation(
        &store,
        &sequence,
        &request(vec![("PN001", 10), ("NOPE", 1)]),
    )
    .unwrap_err();
    assert!(matches!(err, CoreError::ItemNotFound(p) if p == "NOPE"));

    // So the next successful creation still gets 0001
    let quotation = create_quotation(&store, &sequence, &request(vec![("PN001", 10)])).unwrap();
    assert_eq!(quotation.quotation_no, "QT/2025/0001");
}

#[test]
fn test_quotation_without_costing_is_rejected() {
    let store = seeded_store();
    let sequence = YearSequence::new();

    let err = create_quotation(&store, &sequence, &request(vec![("PN001", 10)])).unwrap_err();
    assert!(matches!(err, CoreError::CostingNotFound(p) if p == "PN001"));
}
