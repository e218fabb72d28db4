//! Aggregation engine: turns `(people, expenses)` into household and
//! per-person budget summaries.
//!
//! Rounding happens once, at the boundary of each public function, so
//! intermediate sums never compound rounding error. An expense's `months`
//! subset never reduces its contribution to a summary total; seasonal
//! weighting only shows up in [`monthly_breakdown`].

use uuid::Uuid;

use crate::domain::expense::{Expense, MonthKey};
use crate::domain::person::Person;
use crate::domain::summary::{round2, BudgetSummary, MonthlyFlow, PersonBudgetSummary};
use crate::frequency::{to_annual, to_monthly};

const MONTHS_PER_YEAR: f64 = 12.0;

/// Household annual summary: all salaries against all annualized expenses.
pub fn calculate_annual_budget(people: &[Person], expenses: &[Expense]) -> BudgetSummary {
    BudgetSummary::from_parts(total_income(people), total_annual_expenses(expenses))
}

/// Household monthly summary; same algorithm over monthly-normalized figures.
pub fn calculate_monthly_budget(people: &[Person], expenses: &[Expense]) -> BudgetSummary {
    BudgetSummary::from_parts(
        total_income(people) / MONTHS_PER_YEAR,
        total_annual_expenses(expenses) / MONTHS_PER_YEAR,
    )
}

/// Annual summary for one person: their salary against personally-assigned
/// expenses plus an even split of shared expenses across the current
/// headcount. `None` when the id does not resolve.
pub fn calculate_person_annual_budget(
    people: &[Person],
    expenses: &[Expense],
    person_id: Uuid,
) -> Option<PersonBudgetSummary> {
    person_budget(people, expenses, person_id, 1.0)
}

/// Monthly variant of [`calculate_person_annual_budget`].
pub fn calculate_person_monthly_budget(
    people: &[Person],
    expenses: &[Expense],
    person_id: Uuid,
) -> Option<PersonBudgetSummary> {
    person_budget(people, expenses, person_id, MONTHS_PER_YEAR)
}

/// Per-month income and expense flow for charting. Unlike the summary totals,
/// an expense only counts toward the months its `months` set names.
pub fn monthly_breakdown(people: &[Person], expenses: &[Expense], year: i32) -> Vec<MonthlyFlow> {
    let monthly_income = total_income(people) / MONTHS_PER_YEAR;
    MonthKey::full_year(year)
        .into_iter()
        .map(|key| {
            let spent: f64 = expenses
                .iter()
                .filter(|expense| expense.months.contains(&key))
                .map(|expense| to_monthly(expense.amount.value(), expense.frequency))
                .sum();
            MonthlyFlow {
                month: key,
                income: round2(monthly_income),
                expenses: round2(spent),
            }
        })
        .collect()
}

fn person_budget(
    people: &[Person],
    expenses: &[Expense],
    person_id: Uuid,
    divisor: f64,
) -> Option<PersonBudgetSummary> {
    let person = people.iter().find(|person| person.id == person_id)?;

    let personal: f64 = expenses
        .iter()
        .filter(|expense| expense.is_assigned_to(person_id))
        .map(annualized)
        .sum();
    let shared: f64 = expenses
        .iter()
        .filter(|expense| expense.is_shared())
        .map(annualized)
        .sum();
    // Shared cost splits across today's headcount, not the headcount at
    // expense-creation time.
    let shared_share = shared / people.len() as f64;

    Some(PersonBudgetSummary::from_parts(
        person_id,
        person.salary / divisor,
        personal / divisor,
        shared_share / divisor,
    ))
}

fn total_income(people: &[Person]) -> f64 {
    people.iter().map(|person| person.salary).sum()
}

fn total_annual_expenses(expenses: &[Expense]) -> f64 {
    expenses.iter().map(annualized).sum()
}

fn annualized(expense: &Expense) -> f64 {
    to_annual(expense.amount.value(), expense.frequency)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::expense::{Assignment, ExpenseAmount, ExpenseCategory};
    use crate::domain::person::PersonColor;
    use crate::frequency::Frequency;

    fn household() -> Vec<Person> {
        vec![
            Person::new("Sam", 30000.0, PersonColor::Teal),
            Person::new("Rowan", 25000.0, PersonColor::Coral),
        ]
    }

    fn monthly_expense(amount: f64) -> Expense {
        Expense::new(
            "Utilities",
            ExpenseAmount::fixed(amount),
            Frequency::Monthly,
            ExpenseCategory::Utilities,
        )
    }

    #[test]
    fn annual_budget_annualizes_expenses() {
        let people = household();
        let expenses = vec![monthly_expense(100.0)];
        let summary = calculate_annual_budget(&people, &expenses);
        assert_eq!(summary.total_income, 55000.0);
        assert_eq!(summary.total_expenses, 1200.0);
        assert_eq!(summary.remaining_budget, 53800.0);
        assert_eq!(summary.budget_ratio, 0.022);
        assert!(summary.is_positive);
    }

    #[test]
    fn monthly_budget_divides_by_twelve() {
        let people = household();
        let expenses = vec![monthly_expense(100.0)];
        let summary = calculate_monthly_budget(&people, &expenses);
        assert_eq!(summary.total_expenses, 100.0);
        assert_eq!(summary.total_income, round2(55000.0 / 12.0));
    }

    #[test]
    fn months_subset_does_not_prorate_totals() {
        let people = household();
        let seasonal = monthly_expense(100.0)
            .with_months([MonthKey::new(2026, 7).unwrap()].into_iter().collect());
        let summary = calculate_annual_budget(&people, &[seasonal]);
        assert_eq!(summary.total_expenses, 1200.0);
    }

    #[test]
    fn shared_split_tracks_current_headcount() {
        let mut people = household();
        let shared = Expense::new(
            "Rent",
            ExpenseAmount::fixed(200.0),
            Frequency::Monthly,
            ExpenseCategory::Housing,
        );
        let expenses = vec![shared];

        let first = calculate_person_annual_budget(&people, &expenses, people[0].id)
            .expect("person resolves");
        assert_eq!(first.shared_expenses, 1200.0);

        people.push(Person::new("Jules", 20000.0, PersonColor::Indigo));
        let after = calculate_person_annual_budget(&people, &expenses, people[0].id)
            .expect("person resolves");
        assert_eq!(after.shared_expenses, 800.0);
    }

    #[test]
    fn personal_expenses_only_count_for_their_owner() {
        let people = household();
        let personal = monthly_expense(50.0).with_assignment(Assignment::Person(people[1].id));
        let expenses = vec![personal];

        let owner = calculate_person_annual_budget(&people, &expenses, people[1].id)
            .expect("person resolves");
        assert_eq!(owner.personal_expenses, 600.0);

        let other = calculate_person_annual_budget(&people, &expenses, people[0].id)
            .expect("person resolves");
        assert_eq!(other.personal_expenses, 0.0);
        assert_eq!(other.total_expenses, 0.0);
    }

    #[test]
    fn unknown_person_yields_none() {
        let people = household();
        assert!(calculate_person_annual_budget(&people, &[], Uuid::new_v4()).is_none());
        assert!(calculate_person_monthly_budget(&people, &[], Uuid::new_v4()).is_none());
    }

    #[test]
    fn person_monthly_budget_scales_annual_figures() {
        let people = household();
        let expenses = vec![monthly_expense(120.0)];
        let annual = calculate_person_annual_budget(&people, &expenses, people[0].id).unwrap();
        let monthly = calculate_person_monthly_budget(&people, &expenses, people[0].id).unwrap();
        assert_eq!(monthly.income, 2500.0);
        assert_eq!(monthly.shared_expenses, round2(annual.shared_expenses / 12.0));
    }

    #[test]
    fn breakdown_counts_only_named_months() {
        let people = household();
        let july = MonthKey::new(2026, 7).unwrap();
        let seasonal = monthly_expense(90.0).with_months([july].into_iter().collect());
        let flows = monthly_breakdown(&people, &[seasonal], 2026);
        assert_eq!(flows.len(), 12);
        let july_flow = flows.iter().find(|flow| flow.month == july).unwrap();
        assert_eq!(july_flow.expenses, 90.0);
        assert!(flows
            .iter()
            .filter(|flow| flow.month != july)
            .all(|flow| flow.expenses == 0.0));
    }

    #[test]
    fn empty_household_summary_is_all_zero() {
        let summary = calculate_annual_budget(&[], &[]);
        assert_eq!(summary.total_income, 0.0);
        assert_eq!(summary.total_expenses, 0.0);
        assert_eq!(summary.budget_ratio, 0.0);
        assert!(summary.is_positive);
    }
}
