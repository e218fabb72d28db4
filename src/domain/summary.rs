//! Derived summary values; computed by the engine, never stored.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::expense::MonthKey;

/// Household-wide income versus expenses for one period basis.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BudgetSummary {
    pub total_income: f64,
    pub total_expenses: f64,
    pub remaining_budget: f64,
    pub budget_ratio: f64,
    pub is_positive: bool,
}

impl BudgetSummary {
    /// Applies the boundary rounding policy: totals to 2 decimals, the ratio
    /// to 3. Intermediate sums must arrive unrounded.
    pub fn from_parts(total_income: f64, total_expenses: f64) -> Self {
        let remaining = total_income - total_expenses;
        let ratio = safe_ratio(total_expenses, total_income);
        Self {
            total_income: round2(total_income),
            total_expenses: round2(total_expenses),
            remaining_budget: round2(remaining),
            budget_ratio: round3(ratio),
            is_positive: remaining >= 0.0,
        }
    }
}

/// One person's income versus their personal expenses plus shared split.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PersonBudgetSummary {
    pub person_id: Uuid,
    pub income: f64,
    pub personal_expenses: f64,
    pub shared_expenses: f64,
    pub total_expenses: f64,
    pub remaining_budget: f64,
    pub budget_ratio: f64,
    pub is_positive: bool,
}

impl PersonBudgetSummary {
    pub fn from_parts(
        person_id: Uuid,
        income: f64,
        personal_expenses: f64,
        shared_expenses: f64,
    ) -> Self {
        let total_expenses = personal_expenses + shared_expenses;
        let remaining = income - total_expenses;
        let ratio = safe_ratio(total_expenses, income);
        Self {
            person_id,
            income: round2(income),
            personal_expenses: round2(personal_expenses),
            shared_expenses: round2(shared_expenses),
            total_expenses: round2(total_expenses),
            remaining_budget: round2(remaining),
            budget_ratio: round3(ratio),
            is_positive: remaining >= 0.0,
        }
    }
}

/// Income and seasonal expense flow for a single calendar month; chart feed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyFlow {
    pub month: MonthKey,
    pub income: f64,
    pub expenses: f64,
}

fn safe_ratio(expenses: f64, income: f64) -> f64 {
    if income.abs() < f64::EPSILON {
        0.0
    } else {
        expenses / income
    }
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub(crate) fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
