//! Domain types representing recurring expenses.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::*;
use crate::errors::BudgetError;
use crate::frequency::Frequency;

/// A recurring household expense.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: Uuid,
    pub name: String,
    pub amount: ExpenseAmount,
    pub frequency: Frequency,
    pub category: ExpenseCategory,
    pub assigned_to: Assignment,
    /// Seasonal metadata for charting; does not pro-rate summary totals.
    pub months: BTreeSet<MonthKey>,
    pub created_at: DateTime<Utc>,
}

impl Expense {
    pub fn new(
        name: impl Into<String>,
        amount: ExpenseAmount,
        frequency: Frequency,
        category: ExpenseCategory,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            amount,
            frequency,
            category,
            assigned_to: Assignment::Shared,
            months: BTreeSet::new(),
            created_at: Utc::now(),
        }
    }

    pub fn with_assignment(mut self, assigned_to: Assignment) -> Self {
        self.assigned_to = assigned_to;
        self
    }

    pub fn with_months(mut self, months: BTreeSet<MonthKey>) -> Self {
        self.months = months;
        self
    }

    /// Whether this expense belongs to the given person.
    pub fn is_assigned_to(&self, person_id: Uuid) -> bool {
        matches!(self.assigned_to, Assignment::Person(id) if id == person_id)
    }

    pub fn is_shared(&self) -> bool {
        matches!(self.assigned_to, Assignment::Shared)
    }
}

impl Identifiable for Expense {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for Expense {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Displayable for Expense {
    fn display_label(&self) -> String {
        format!("{} ({}, {})", self.name, self.category, self.frequency)
    }
}

/// Single-figure or estimated-range expense amount.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum ExpenseAmount {
    Fixed { amount: f64 },
    Range { min_amount: f64, max_amount: f64 },
}

impl ExpenseAmount {
    pub fn fixed(amount: f64) -> Self {
        ExpenseAmount::Fixed { amount }
    }

    pub fn range(min_amount: f64, max_amount: f64) -> Self {
        ExpenseAmount::Range {
            min_amount,
            max_amount,
        }
    }

    /// Resolves the single figure used by aggregation; ranges use the midpoint.
    pub fn value(&self) -> f64 {
        match self {
            ExpenseAmount::Fixed { amount } => *amount,
            ExpenseAmount::Range {
                min_amount,
                max_amount,
            } => (min_amount + max_amount) / 2.0,
        }
    }
}

/// Supported expense categories.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseCategory {
    Housing,
    Utilities,
    Groceries,
    Transport,
    Insurance,
    Health,
    Entertainment,
    Subscriptions,
    Savings,
    Other,
}

impl ExpenseCategory {
    pub const ALL: [ExpenseCategory; 10] = [
        ExpenseCategory::Housing,
        ExpenseCategory::Utilities,
        ExpenseCategory::Groceries,
        ExpenseCategory::Transport,
        ExpenseCategory::Insurance,
        ExpenseCategory::Health,
        ExpenseCategory::Entertainment,
        ExpenseCategory::Subscriptions,
        ExpenseCategory::Savings,
        ExpenseCategory::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ExpenseCategory::Housing => "housing",
            ExpenseCategory::Utilities => "utilities",
            ExpenseCategory::Groceries => "groceries",
            ExpenseCategory::Transport => "transport",
            ExpenseCategory::Insurance => "insurance",
            ExpenseCategory::Health => "health",
            ExpenseCategory::Entertainment => "entertainment",
            ExpenseCategory::Subscriptions => "subscriptions",
            ExpenseCategory::Savings => "savings",
            ExpenseCategory::Other => "other",
        }
    }
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ExpenseCategory {
    type Err = BudgetError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_lowercase();
        ExpenseCategory::ALL
            .iter()
            .find(|candidate| candidate.label() == normalized)
            .copied()
            .ok_or_else(|| BudgetError::InvalidInput(format!("unknown category `{value}`")))
    }
}

/// Who carries an expense: a single person or the whole household.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(into = "String", try_from = "String")]
pub enum Assignment {
    Shared,
    Person(Uuid),
}

pub const SHARED_LABEL: &str = "shared";

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Assignment::Shared => f.write_str(SHARED_LABEL),
            Assignment::Person(id) => write!(f, "{id}"),
        }
    }
}

impl From<Assignment> for String {
    fn from(value: Assignment) -> Self {
        value.to_string()
    }
}

impl FromStr for Assignment {
    type Err = BudgetError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if trimmed.eq_ignore_ascii_case(SHARED_LABEL) {
            return Ok(Assignment::Shared);
        }
        Uuid::parse_str(trimmed)
            .map(Assignment::Person)
            .map_err(|_| BudgetError::InvalidInput(format!("invalid assignment `{value}`")))
    }
}

impl TryFrom<String> for Assignment {
    type Error = BudgetError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A calendar month within a specific year, serialized as `YYYY-MM`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(into = "String", try_from = "String")]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Result<Self, BudgetError> {
        if !(1..=12).contains(&month) {
            return Err(BudgetError::InvalidInput(format!(
                "month must be 1..=12, got {month}"
            )));
        }
        Ok(Self { year, month })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// All twelve months of the given year.
    pub fn full_year(year: i32) -> BTreeSet<MonthKey> {
        (1..=12).map(|month| MonthKey { year, month }).collect()
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl From<MonthKey> for String {
    fn from(value: MonthKey) -> Self {
        value.to_string()
    }
}

impl FromStr for MonthKey {
    type Err = BudgetError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || BudgetError::InvalidInput(format!("invalid month key `{value}`"));
        let (year, month) = value.trim().split_once('-').ok_or_else(invalid)?;
        let year = year.parse::<i32>().map_err(|_| invalid())?;
        let month = month.parse::<u32>().map_err(|_| invalid())?;
        MonthKey::new(year, month)
    }
}

impl TryFrom<String> for MonthKey {
    type Error = BudgetError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
