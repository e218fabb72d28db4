use thiserror::Error;
use uuid::Uuid;

/// Error type that captures common budget-core failures.
#[derive(Debug, Error)]
pub enum BudgetError {
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Unknown person: {0}")]
    UnknownPerson(Uuid),
    #[error("snapshot schema v{found} is newer than supported v{supported}")]
    UnsupportedSchema { found: u8, supported: u8 },
}
