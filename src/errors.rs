use thiserror::Error;
use uuid::Uuid;

/// Error type that captures common ledger failures.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Expense not found: {0}")]
    ExpenseNotFound(Uuid),
    #[error("Group not found: {0}")]
    GroupNotFound(String),
    #[error("Goal not found: {0}")]
    GoalNotFound(String),
    #[error("Invalid reference: {0}")]
    InvalidRef(String),
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Configuration error: {0}")]
    Config(String),
}
