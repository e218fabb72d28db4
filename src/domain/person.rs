//! Domain types representing household members.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::*;
use crate::errors::BudgetError;

/// A household member with an annual salary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub id: Uuid,
    pub name: String,
    /// Annual gross salary; never negative.
    pub salary: f64,
    pub color: PersonColor,
}

impl Person {
    pub fn new(name: impl Into<String>, salary: f64, color: PersonColor) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            salary: salary.max(0.0),
            color,
        }
    }
}

impl Identifiable for Person {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for Person {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Displayable for Person {
    fn display_label(&self) -> String {
        format!("{} ({})", self.name, self.color)
    }
}

/// Accent color used to tag a person across charts and lists.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PersonColor {
    #[default]
    Teal,
    Coral,
    Indigo,
    Amber,
    Rose,
    Slate,
}

impl PersonColor {
    pub const ALL: [PersonColor; 6] = [
        PersonColor::Teal,
        PersonColor::Coral,
        PersonColor::Indigo,
        PersonColor::Amber,
        PersonColor::Rose,
        PersonColor::Slate,
    ];
}

impl fmt::Display for PersonColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PersonColor::Teal => "teal",
            PersonColor::Coral => "coral",
            PersonColor::Indigo => "indigo",
            PersonColor::Amber => "amber",
            PersonColor::Rose => "rose",
            PersonColor::Slate => "slate",
        };
        f.write_str(label)
    }
}

impl FromStr for PersonColor {
    type Err = BudgetError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "teal" => Ok(PersonColor::Teal),
            "coral" => Ok(PersonColor::Coral),
            "indigo" => Ok(PersonColor::Indigo),
            "amber" => Ok(PersonColor::Amber),
            "rose" => Ok(PersonColor::Rose),
            "slate" => Ok(PersonColor::Slate),
            other => Err(BudgetError::InvalidInput(format!(
                "unknown person color `{other}`"
            ))),
        }
    }
}
