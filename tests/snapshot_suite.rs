use homebudget_core::{
    domain::expense::{ExpenseAmount, ExpenseCategory, MonthKey},
    errors::BudgetError,
    frequency::Frequency,
    store::{BudgetStore, ExpenseDraft, PersonDraft, CURRENT_SCHEMA_VERSION},
    store::snapshot::BudgetSnapshot,
};

#[test]
fn legacy_single_salary_json_upgrades_once() {
    let snapshot =
        BudgetSnapshot::from_json(r#"{"salary": 48000, "year": 2026}"#).expect("parse legacy");
    let load = BudgetStore::from_snapshot(snapshot).expect("upgrade");

    assert_eq!(load.migrations.len(), 1);
    assert_eq!(load.store.people().len(), 1);
    assert_eq!(load.store.people()[0].salary, 48000.0);
    assert_eq!(load.store.annual_summary().total_income, 48000.0);

    // A second save/load cycle carries no further migrations.
    let reload = BudgetStore::from_snapshot(load.store.to_snapshot()).expect("reload");
    assert!(reload.migrations.is_empty());
}

#[test]
fn current_snapshots_round_trip_losslessly() {
    let mut store = BudgetStore::for_year(2026);
    store.add_person(PersonDraft {
        name: "Sam".into(),
        salary: Some(30000.0),
        color: None,
    });
    store.add_expense(
        ExpenseDraft::new(
            "Streaming",
            ExpenseAmount::range(12.0, 18.0),
            Frequency::Monthly,
            ExpenseCategory::Subscriptions,
        )
        .with_months([MonthKey::new(2026, 1).unwrap()].into_iter().collect()),
    );

    let json = store.to_snapshot().to_json().expect("serialize");
    let load =
        BudgetStore::from_snapshot(BudgetSnapshot::from_json(&json).expect("parse")).expect("load");

    assert_eq!(load.store.expenses(), store.expenses());
    assert_eq!(load.store.monthly_summary(), store.monthly_summary());
    assert_eq!(load.store.to_snapshot().schema_version, CURRENT_SCHEMA_VERSION);
}

#[test]
fn snapshots_from_newer_schemas_are_refused() {
    let json = format!(r#"{{"schemaVersion": {}}}"#, CURRENT_SCHEMA_VERSION + 1);
    let snapshot = BudgetSnapshot::from_json(&json).expect("parse");
    let err = BudgetStore::from_snapshot(snapshot).expect_err("future schema should fail");
    match err {
        BudgetError::UnsupportedSchema { found, supported } => {
            assert_eq!(found, CURRENT_SCHEMA_VERSION + 1);
            assert_eq!(supported, CURRENT_SCHEMA_VERSION);
        }
        other => panic!("expected schema error, got {other:?}"),
    }
}
