//! The budget state store: an explicit, constructible object owning the
//! canonical people and expenses collections.
//!
//! All mutation flows through [`BudgetStore::dispatch`]; reads are borrowed
//! views plus memoized derived summaries. Multiple independent stores may
//! coexist (there is no process-wide singleton).

pub mod snapshot;

use std::cell::RefCell;
use std::collections::BTreeSet;

use chrono::{Datelike, Utc};
use uuid::Uuid;

use crate::domain::expense::{Assignment, Expense, ExpenseAmount, ExpenseCategory, MonthKey};
use crate::domain::person::{Person, PersonColor};
use crate::domain::summary::{BudgetSummary, MonthlyFlow, PersonBudgetSummary};
use crate::engine;
use crate::frequency::Frequency;

pub use snapshot::{BudgetSnapshot, SnapshotLoad, CURRENT_SCHEMA_VERSION};

/// Input for creating a person; missing fields take store defaults.
#[derive(Debug, Clone, Default)]
pub struct PersonDraft {
    pub name: String,
    pub salary: Option<f64>,
    pub color: Option<PersonColor>,
}

/// Input for creating an expense; missing fields take store defaults.
#[derive(Debug, Clone)]
pub struct ExpenseDraft {
    pub name: String,
    pub amount: ExpenseAmount,
    pub frequency: Frequency,
    pub category: ExpenseCategory,
    pub assigned_to: Option<Assignment>,
    pub months: Option<BTreeSet<MonthKey>>,
}

impl ExpenseDraft {
    pub fn new(
        name: impl Into<String>,
        amount: ExpenseAmount,
        frequency: Frequency,
        category: ExpenseCategory,
    ) -> Self {
        Self {
            name: name.into(),
            amount,
            frequency,
            category,
            assigned_to: None,
            months: None,
        }
    }

    pub fn assigned_to(mut self, assignment: Assignment) -> Self {
        self.assigned_to = Some(assignment);
        self
    }

    pub fn with_months(mut self, months: BTreeSet<MonthKey>) -> Self {
        self.months = Some(months);
        self
    }
}

/// Shallow-merge patch for a person.
#[derive(Debug, Clone, Default)]
pub struct PersonPatch {
    pub name: Option<String>,
    pub salary: Option<f64>,
    pub color: Option<PersonColor>,
}

impl PersonPatch {
    pub fn has_effect(&self) -> bool {
        self.name.is_some() || self.salary.is_some() || self.color.is_some()
    }
}

/// Shallow-merge patch for an expense.
#[derive(Debug, Clone, Default)]
pub struct ExpensePatch {
    pub name: Option<String>,
    pub amount: Option<ExpenseAmount>,
    pub frequency: Option<Frequency>,
    pub category: Option<ExpenseCategory>,
    pub assigned_to: Option<Assignment>,
    pub months: Option<BTreeSet<MonthKey>>,
}

impl ExpensePatch {
    pub fn has_effect(&self) -> bool {
        self.name.is_some()
            || self.amount.is_some()
            || self.frequency.is_some()
            || self.category.is_some()
            || self.assigned_to.is_some()
            || self.months.is_some()
    }
}

/// The ten store operations; every mutation goes through one of these.
#[derive(Debug, Clone)]
pub enum BudgetAction {
    SetPeople(Vec<Person>),
    AddPerson(PersonDraft),
    UpdatePerson { id: Uuid, patch: PersonPatch },
    DeletePerson { id: Uuid },
    SetPersonSalary { id: Uuid, salary: f64 },
    AddExpense(ExpenseDraft),
    UpdateExpense { id: Uuid, patch: ExpensePatch },
    DeleteExpense { id: Uuid },
    SetLoading(bool),
    ResetBudget,
}

type SummaryCache = RefCell<Option<(u64, BudgetSummary)>>;

/// Reducer-backed store over the budget state.
#[derive(Debug)]
pub struct BudgetStore {
    people: Vec<Person>,
    expenses: Vec<Expense>,
    is_loading: bool,
    year: i32,
    revision: u64,
    annual_cache: SummaryCache,
    monthly_cache: SummaryCache,
}

impl Default for BudgetStore {
    fn default() -> Self {
        Self::new()
    }
}

impl BudgetStore {
    /// Empty store configured for the current calendar year.
    pub fn new() -> Self {
        Self::for_year(Utc::now().year())
    }

    /// Empty store with an explicit active year for month defaults.
    pub fn for_year(year: i32) -> Self {
        Self {
            people: Vec::new(),
            expenses: Vec::new(),
            is_loading: false,
            year,
            revision: 0,
            annual_cache: RefCell::new(None),
            monthly_cache: RefCell::new(None),
        }
    }

    /// Applies one action synchronously. Unknown ids are no-ops.
    pub fn dispatch(&mut self, action: BudgetAction) {
        tracing::debug!(?action, "dispatching budget action");
        match action {
            BudgetAction::SetPeople(mut people) => {
                for person in &mut people {
                    person.salary = person.salary.max(0.0);
                }
                self.people = dedup_by_id(people);
                self.touch();
            }
            BudgetAction::AddPerson(draft) => {
                let person = Person::new(
                    draft.name,
                    draft.salary.unwrap_or(0.0),
                    draft.color.unwrap_or_default(),
                );
                self.people.push(person);
                self.touch();
            }
            BudgetAction::UpdatePerson { id, patch } => {
                if !patch.has_effect() {
                    return;
                }
                if let Some(person) = self.people.iter_mut().find(|person| person.id == id) {
                    if let Some(name) = patch.name {
                        person.name = name;
                    }
                    if let Some(salary) = patch.salary {
                        person.salary = salary.max(0.0);
                    }
                    if let Some(color) = patch.color {
                        person.color = color;
                    }
                    self.touch();
                }
            }
            BudgetAction::DeletePerson { id } => {
                let before = self.people.len();
                self.people.retain(|person| person.id != id);
                if self.people.len() != before {
                    // Orphaned personal expenses fall back to the household.
                    for expense in &mut self.expenses {
                        if expense.is_assigned_to(id) {
                            expense.assigned_to = Assignment::Shared;
                        }
                    }
                    self.touch();
                }
            }
            BudgetAction::SetPersonSalary { id, salary } => {
                if let Some(person) = self.people.iter_mut().find(|person| person.id == id) {
                    person.salary = salary.max(0.0);
                    self.touch();
                }
            }
            BudgetAction::AddExpense(draft) => {
                let assigned_to = draft
                    .assigned_to
                    .filter(|assignment| self.assignment_resolves(*assignment))
                    .unwrap_or_else(|| {
                        self.people
                            .first()
                            .map(|person| Assignment::Person(person.id))
                            .unwrap_or(Assignment::Shared)
                    });
                let months = match draft.months {
                    Some(months) => self.clamp_months(months),
                    None => MonthKey::full_year(self.year),
                };
                let expense =
                    Expense::new(draft.name, draft.amount, draft.frequency, draft.category)
                        .with_assignment(assigned_to)
                        .with_months(months);
                self.expenses.push(expense);
                self.touch();
            }
            BudgetAction::UpdateExpense { id, patch } => {
                if !patch.has_effect() {
                    return;
                }
                let year = self.year;
                // Dangling assignments never enter the collection.
                let assigned_to = patch
                    .assigned_to
                    .filter(|assignment| self.assignment_resolves(*assignment));
                if let Some(expense) = self.expenses.iter_mut().find(|expense| expense.id == id) {
                    if let Some(name) = patch.name {
                        expense.name = name;
                    }
                    if let Some(amount) = patch.amount {
                        expense.amount = amount;
                    }
                    if let Some(frequency) = patch.frequency {
                        expense.frequency = frequency;
                    }
                    if let Some(category) = patch.category {
                        expense.category = category;
                    }
                    if let Some(assigned_to) = assigned_to {
                        expense.assigned_to = assigned_to;
                    }
                    if let Some(months) = patch.months {
                        expense.months =
                            months.into_iter().filter(|key| key.year() == year).collect();
                    }
                    self.touch();
                }
            }
            BudgetAction::DeleteExpense { id } => {
                let before = self.expenses.len();
                self.expenses.retain(|expense| expense.id != id);
                if self.expenses.len() != before {
                    self.touch();
                }
            }
            BudgetAction::SetLoading(is_loading) => {
                // Loading is presentation state; it never invalidates summaries.
                self.is_loading = is_loading;
            }
            BudgetAction::ResetBudget => {
                self.people.clear();
                self.expenses.clear();
                self.is_loading = false;
                self.touch();
            }
        }
    }

    // Convenience dispatchers mirroring the action set.

    pub fn set_people(&mut self, people: Vec<Person>) {
        self.dispatch(BudgetAction::SetPeople(people));
    }

    pub fn add_person(&mut self, draft: PersonDraft) {
        self.dispatch(BudgetAction::AddPerson(draft));
    }

    pub fn update_person(&mut self, id: Uuid, patch: PersonPatch) {
        self.dispatch(BudgetAction::UpdatePerson { id, patch });
    }

    pub fn delete_person(&mut self, id: Uuid) {
        self.dispatch(BudgetAction::DeletePerson { id });
    }

    pub fn set_person_salary(&mut self, id: Uuid, salary: f64) {
        self.dispatch(BudgetAction::SetPersonSalary { id, salary });
    }

    pub fn add_expense(&mut self, draft: ExpenseDraft) {
        self.dispatch(BudgetAction::AddExpense(draft));
    }

    pub fn update_expense(&mut self, id: Uuid, patch: ExpensePatch) {
        self.dispatch(BudgetAction::UpdateExpense { id, patch });
    }

    pub fn delete_expense(&mut self, id: Uuid) {
        self.dispatch(BudgetAction::DeleteExpense { id });
    }

    pub fn set_loading(&mut self, is_loading: bool) {
        self.dispatch(BudgetAction::SetLoading(is_loading));
    }

    pub fn reset_budget(&mut self) {
        self.dispatch(BudgetAction::ResetBudget);
    }

    // Read accessors.

    pub fn people(&self) -> &[Person] {
        &self.people
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// Household annual summary, memoized per store revision.
    pub fn annual_summary(&self) -> BudgetSummary {
        self.cached(&self.annual_cache, engine::calculate_annual_budget)
    }

    /// Household monthly summary, memoized per store revision.
    pub fn monthly_summary(&self) -> BudgetSummary {
        self.cached(&self.monthly_cache, engine::calculate_monthly_budget)
    }

    pub fn person_annual_summary(&self, person_id: Uuid) -> Option<PersonBudgetSummary> {
        engine::calculate_person_annual_budget(&self.people, &self.expenses, person_id)
    }

    pub fn person_monthly_summary(&self, person_id: Uuid) -> Option<PersonBudgetSummary> {
        engine::calculate_person_monthly_budget(&self.people, &self.expenses, person_id)
    }

    /// Per-month chart feed for the configured year.
    pub fn monthly_flows(&self) -> Vec<MonthlyFlow> {
        engine::monthly_breakdown(&self.people, &self.expenses, self.year)
    }

    fn cached(
        &self,
        cache: &SummaryCache,
        compute: fn(&[Person], &[Expense]) -> BudgetSummary,
    ) -> BudgetSummary {
        let mut slot = cache.borrow_mut();
        if let Some((revision, summary)) = slot.as_ref() {
            if *revision == self.revision {
                return summary.clone();
            }
        }
        let summary = compute(&self.people, &self.expenses);
        *slot = Some((self.revision, summary.clone()));
        summary
    }

    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }

    /// Shared always resolves; person assignments must reference a member.
    fn assignment_resolves(&self, assignment: Assignment) -> bool {
        match assignment {
            Assignment::Shared => true,
            Assignment::Person(id) => self.people.iter().any(|person| person.id == id),
        }
    }

    fn clamp_months(&self, months: BTreeSet<MonthKey>) -> BTreeSet<MonthKey> {
        months
            .into_iter()
            .filter(|key| key.year() == self.year)
            .collect()
    }
}

fn dedup_by_id(people: Vec<Person>) -> Vec<Person> {
    let mut seen = BTreeSet::new();
    people
        .into_iter()
        .filter(|person| seen.insert(person.id))
        .collect()
}
