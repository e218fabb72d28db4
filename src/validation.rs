//! Form validation for the budget entry surfaces.
//!
//! Validators are pure and allocation-light so the presentation layer can run
//! them on every keystroke. Failures are structured data, never errors.

use std::collections::BTreeMap;
use std::str::FromStr;

use crate::domain::expense::{Assignment, ExpenseCategory};
use crate::domain::person::PersonColor;
use crate::frequency::Frequency;

pub const DEFAULT_MIN_LENGTH: usize = 2;

/// Outcome of a single field check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldCheck {
    pub is_valid: bool,
    pub error: Option<String>,
}

impl FieldCheck {
    pub fn ok() -> Self {
        Self {
            is_valid: true,
            error: None,
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            error: Some(message.into()),
        }
    }
}

/// True iff the value is present and not blank.
pub fn required(value: &str) -> FieldCheck {
    if value.trim().is_empty() {
        FieldCheck::fail("This field is required")
    } else {
        FieldCheck::ok()
    }
}

/// True iff the value is present, finite, and greater than zero.
pub fn positive_number(value: Option<f64>) -> FieldCheck {
    match value {
        Some(number) if number.is_finite() && number > 0.0 => FieldCheck::ok(),
        _ => FieldCheck::fail("Enter a value greater than zero"),
    }
}

/// True iff the trimmed value has at least `min` characters.
pub fn min_length(value: &str, min: usize) -> FieldCheck {
    if value.trim().chars().count() >= min {
        FieldCheck::ok()
    } else {
        FieldCheck::fail(format!("Must be at least {min} characters"))
    }
}

/// Aggregated validation outcome for a whole form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormValidation {
    pub is_valid: bool,
    pub errors: BTreeMap<&'static str, String>,
    pub first_error: Option<String>,
}

/// Collects field failures in form order.
#[derive(Debug, Default)]
struct FormErrors {
    entries: Vec<(&'static str, String)>,
}

impl FormErrors {
    fn check(&mut self, field: &'static str, check: FieldCheck) {
        if let Some(message) = check.error {
            // Only the first failure per field is reported.
            if !self.entries.iter().any(|(key, _)| *key == field) {
                self.entries.push((field, message));
            }
        }
    }

    fn finish(self) -> FormValidation {
        let first_error = self.entries.first().map(|(_, message)| message.clone());
        let errors: BTreeMap<&'static str, String> = self.entries.into_iter().collect();
        FormValidation {
            is_valid: errors.is_empty(),
            errors,
            first_error,
        }
    }
}

/// Whether the expense form carries a single amount or an estimated range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AmountMode {
    #[default]
    Fixed,
    Range,
}

/// Raw expense-form input as the presentation layer holds it.
#[derive(Debug, Clone, Default)]
pub struct ExpenseForm {
    pub name: String,
    pub amount_mode: AmountMode,
    pub amount: Option<f64>,
    pub min_amount: Option<f64>,
    pub max_amount: Option<f64>,
    pub frequency: String,
    pub category: String,
    /// Person id or `shared`; blank defaults to shared.
    pub assigned_to: String,
}

/// Raw person-form input.
#[derive(Debug, Clone, Default)]
pub struct PersonForm {
    pub name: String,
    pub salary: Option<f64>,
    pub color: String,
}

/// Raw salary-edit input.
#[derive(Debug, Clone, Default)]
pub struct SalaryForm {
    pub salary: Option<f64>,
}

pub fn validate_expense_form(form: &ExpenseForm) -> FormValidation {
    let mut errors = FormErrors::default();

    errors.check("name", required(&form.name));
    errors.check("name", min_length(&form.name, DEFAULT_MIN_LENGTH));

    match form.amount_mode {
        AmountMode::Fixed => errors.check("amount", positive_number(form.amount)),
        AmountMode::Range => {
            errors.check("minAmount", positive_number(form.min_amount));
            errors.check("maxAmount", positive_number(form.max_amount));
            if let (Some(min), Some(max)) = (form.min_amount, form.max_amount) {
                if min > 0.0 && max > 0.0 && min > max {
                    errors.check(
                        "maxAmount",
                        FieldCheck::fail("Maximum must be at least the minimum amount"),
                    );
                }
            }
        }
    }

    errors.check("frequency", parse_field::<Frequency>(&form.frequency, "Select a frequency"));
    errors.check("category", parse_field::<ExpenseCategory>(&form.category, "Select a category"));

    // Blank assignment falls back to the shared sentinel, which is valid.
    if !form.assigned_to.trim().is_empty() {
        errors.check(
            "assignedTo",
            parse_field::<Assignment>(&form.assigned_to, "Select who this belongs to"),
        );
    }

    errors.finish()
}

pub fn validate_person_form(form: &PersonForm) -> FormValidation {
    let mut errors = FormErrors::default();
    errors.check("name", required(&form.name));
    errors.check("name", min_length(&form.name, DEFAULT_MIN_LENGTH));
    errors.check("salary", positive_number(form.salary));
    errors.check("color", parse_field::<PersonColor>(&form.color, "Pick a color"));
    errors.finish()
}

pub fn validate_salary_form(form: &SalaryForm) -> FormValidation {
    let mut errors = FormErrors::default();
    errors.check("salary", positive_number(form.salary));
    errors.finish()
}

fn parse_field<T: FromStr>(value: &str, message: &str) -> FieldCheck {
    if value.trim().is_empty() {
        return FieldCheck::fail(message);
    }
    match value.parse::<T>() {
        Ok(_) => FieldCheck::ok(),
        Err(_) => FieldCheck::fail(message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_expense_form() -> ExpenseForm {
        ExpenseForm {
            name: "Groceries".into(),
            amount_mode: AmountMode::Fixed,
            amount: Some(100.0),
            frequency: "monthly".into(),
            category: "groceries".into(),
            assigned_to: "shared".into(),
            ..ExpenseForm::default()
        }
    }

    #[test]
    fn accepts_a_complete_fixed_expense() {
        let result = validate_expense_form(&valid_expense_form());
        assert!(result.is_valid, "unexpected errors: {:?}", result.errors);
        assert!(result.first_error.is_none());
    }

    #[test]
    fn empty_name_reports_a_name_error_first() {
        let form = ExpenseForm {
            name: "".into(),
            ..valid_expense_form()
        };
        let result = validate_expense_form(&form);
        assert!(!result.is_valid);
        assert!(result.errors.contains_key("name"));
        assert_eq!(result.first_error.as_deref(), Some("This field is required"));
    }

    #[test]
    fn short_name_fails_min_length() {
        let form = ExpenseForm {
            name: "x".into(),
            ..valid_expense_form()
        };
        let result = validate_expense_form(&form);
        assert!(result.errors["name"].contains("at least 2"));
    }

    #[test]
    fn inverted_range_flags_the_max_field() {
        let form = ExpenseForm {
            name: "Heating".into(),
            amount_mode: AmountMode::Range,
            min_amount: Some(120.0),
            max_amount: Some(80.0),
            ..valid_expense_form()
        };
        let result = validate_expense_form(&form);
        assert!(!result.is_valid);
        assert!(result.errors["maxAmount"].contains("at least the minimum"));
        assert!(!result.errors.contains_key("minAmount"));
    }

    #[test]
    fn range_mode_requires_both_bounds_positive() {
        let form = ExpenseForm {
            name: "Heating".into(),
            amount_mode: AmountMode::Range,
            min_amount: Some(0.0),
            max_amount: None,
            ..valid_expense_form()
        };
        let result = validate_expense_form(&form);
        assert!(result.errors.contains_key("minAmount"));
        assert!(result.errors.contains_key("maxAmount"));
    }

    #[test]
    fn unknown_frequency_and_category_are_rejected() {
        let form = ExpenseForm {
            frequency: "fortnightly".into(),
            category: "gadgets".into(),
            ..valid_expense_form()
        };
        let result = validate_expense_form(&form);
        assert!(result.errors.contains_key("frequency"));
        assert!(result.errors.contains_key("category"));
    }

    #[test]
    fn blank_assignment_defaults_to_shared() {
        let form = ExpenseForm {
            assigned_to: "".into(),
            ..valid_expense_form()
        };
        assert!(validate_expense_form(&form).is_valid);
    }

    #[test]
    fn garbage_assignment_is_rejected() {
        let form = ExpenseForm {
            assigned_to: "somebody".into(),
            ..valid_expense_form()
        };
        assert!(validate_expense_form(&form)
            .errors
            .contains_key("assignedTo"));
    }

    #[test]
    fn person_form_requires_positive_salary_and_known_color() {
        let form = PersonForm {
            name: "Alex".into(),
            salary: Some(0.0),
            color: "teal".into(),
        };
        let result = validate_person_form(&form);
        assert!(result.errors.contains_key("salary"));

        let form = PersonForm {
            name: "Alex".into(),
            salary: Some(42000.0),
            color: "plaid".into(),
        };
        assert!(validate_person_form(&form).errors.contains_key("color"));
    }

    #[test]
    fn salary_form_checks_positivity() {
        assert!(!validate_salary_form(&SalaryForm { salary: None }).is_valid);
        assert!(validate_salary_form(&SalaryForm { salary: Some(1.0) }).is_valid);
    }

    #[test]
    fn validators_are_pure_on_repeated_calls() {
        let form = valid_expense_form();
        let first = validate_expense_form(&form);
        let second = validate_expense_form(&form);
        assert_eq!(first, second);
    }
}
