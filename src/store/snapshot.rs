//! Versioned serde snapshot of the budget state.
//!
//! Legacy shapes are upgraded by an explicit [`BudgetSnapshot::upgrade`] step
//! that runs once at load time, never on the read path. Schema v1 carried a
//! single household `salary` figure instead of a people collection.

use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::expense::{Assignment, Expense};
use crate::domain::person::{Person, PersonColor};
use crate::errors::BudgetError;
use crate::store::BudgetStore;

pub const CURRENT_SCHEMA_VERSION: u8 = 2;

/// Name given to the person seeded from a legacy single-salary snapshot.
const LEGACY_PERSON_NAME: &str = "Primary";

/// Serde shape of a store's state at a schema version.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetSnapshot {
    #[serde(default = "legacy_schema_version")]
    pub schema_version: u8,
    #[serde(default)]
    pub people: Vec<Person>,
    #[serde(default)]
    pub expenses: Vec<Expense>,
    #[serde(default = "default_year")]
    pub year: i32,
    /// Legacy v1 field; upgraded into a one-person collection and dropped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary: Option<f64>,
}

impl BudgetSnapshot {
    pub fn from_json(data: &str) -> Result<Self, BudgetError> {
        Ok(serde_json::from_str(data)?)
    }

    pub fn to_json(&self) -> Result<String, BudgetError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Brings the snapshot to [`CURRENT_SCHEMA_VERSION`], returning the list
    /// of applied migrations. Idempotent; rejects snapshots from the future.
    pub fn upgrade(&mut self) -> Result<Vec<String>, BudgetError> {
        if self.schema_version > CURRENT_SCHEMA_VERSION {
            return Err(BudgetError::UnsupportedSchema {
                found: self.schema_version,
                supported: CURRENT_SCHEMA_VERSION,
            });
        }
        let mut migrations = Vec::new();
        if self.schema_version < 2 {
            if let Some(salary) = self.salary.take() {
                if self.people.is_empty() {
                    self.people
                        .push(Person::new(LEGACY_PERSON_NAME, salary, PersonColor::default()));
                    migrations
                        .push("converted legacy salary field into a one-person collection".into());
                } else {
                    migrations.push("dropped legacy salary field (people already present)".into());
                }
            }
            self.schema_version = CURRENT_SCHEMA_VERSION;
        }
        // Current-version snapshots may still carry a stray salary field.
        self.salary = None;
        Ok(migrations)
    }
}

/// Outcome of loading a snapshot into a store.
#[derive(Debug)]
pub struct SnapshotLoad {
    pub store: BudgetStore,
    pub migrations: Vec<String>,
}

impl BudgetStore {
    /// Builds a store from a snapshot, upgrading legacy shapes exactly once.
    pub fn from_snapshot(mut snapshot: BudgetSnapshot) -> Result<SnapshotLoad, BudgetError> {
        let migrations = snapshot.upgrade()?;
        for migration in &migrations {
            tracing::info!(%migration, "applied snapshot migration");
        }
        let mut store = BudgetStore::for_year(snapshot.year);
        store.set_people(snapshot.people);
        for expense in snapshot.expenses {
            store.push_restored_expense(expense);
        }
        Ok(SnapshotLoad { store, migrations })
    }

    /// Captures the current state; the transient loading flag is not included.
    pub fn to_snapshot(&self) -> BudgetSnapshot {
        BudgetSnapshot {
            schema_version: CURRENT_SCHEMA_VERSION,
            people: self.people().to_vec(),
            expenses: self.expenses().to_vec(),
            year: self.year(),
            salary: None,
        }
    }

    /// Restores a fully-formed expense, keeping its id and creation time.
    /// Store invariants still apply: out-of-year months are dropped and
    /// assignments to people absent from the snapshot fall back to shared.
    fn push_restored_expense(&mut self, mut expense: Expense) {
        let year = self.year;
        expense.months.retain(|key| key.year() == year);
        if !self.assignment_resolves(expense.assigned_to) {
            expense.assigned_to = Assignment::Shared;
        }
        self.expenses.push(expense);
        self.touch();
    }
}

fn legacy_schema_version() -> u8 {
    1
}

fn default_year() -> i32 {
    Utc::now().year()
}
