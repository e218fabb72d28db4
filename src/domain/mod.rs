//! Domain models shared across the budget core.

pub mod common;
pub mod expense;
pub mod person;
pub mod summary;

pub use common::{Displayable, Identifiable, NamedEntity};
pub use expense::{
    Assignment, Expense, ExpenseAmount, ExpenseCategory, MonthKey, SHARED_LABEL,
};
pub use person::{Person, PersonColor};
pub use summary::{BudgetSummary, MonthlyFlow, PersonBudgetSummary};
