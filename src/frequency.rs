//! Recurring-amount frequency normalization.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::BudgetError;

/// How often a recurring amount repeats.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Weekly,
    Monthly,
    Annual,
}

impl Frequency {
    /// Number of occurrences per year for this frequency.
    pub fn per_year(self) -> f64 {
        match self {
            Frequency::Weekly => 52.0,
            Frequency::Monthly => 12.0,
            Frequency::Annual => 1.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Frequency::Weekly => "Weekly",
            Frequency::Monthly => "Monthly",
            Frequency::Annual => "Annual",
        }
    }

    pub const ALL: [Frequency; 3] = [Frequency::Weekly, Frequency::Monthly, Frequency::Annual];
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Frequency {
    type Err = BudgetError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "weekly" => Ok(Frequency::Weekly),
            "monthly" => Ok(Frequency::Monthly),
            "annual" => Ok(Frequency::Annual),
            other => Err(BudgetError::InvalidInput(format!(
                "unknown frequency `{other}`"
            ))),
        }
    }
}

/// Converts `amount` between frequency bases via an annual normalization.
///
/// Non-positive or non-finite amounts resolve to zero so downstream sums never
/// see NaN or negative noise.
pub fn convert_amount(amount: f64, from: Frequency, to: Frequency) -> f64 {
    if !amount.is_finite() || amount <= 0.0 {
        return 0.0;
    }
    amount * from.per_year() / to.per_year()
}

/// Normalizes `amount` to a monthly figure.
pub fn to_monthly(amount: f64, from: Frequency) -> f64 {
    convert_amount(amount, from, Frequency::Monthly)
}

/// Normalizes `amount` to an annual figure.
pub fn to_annual(amount: f64, from: Frequency) -> f64 {
    convert_amount(amount, from, Frequency::Annual)
}
