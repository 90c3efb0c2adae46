//! Command layer: validates input at the boundary, then mutates the ledger.

pub mod budget_service;
pub mod category_service;
pub mod expense_service;
pub mod goal_service;
pub mod group_service;

pub use budget_service::BudgetService;
pub use category_service::CategoryService;
pub use expense_service::ExpenseService;
pub use goal_service::GoalService;
pub use group_service::GroupService;

use crate::errors::LedgerError;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error("{0}")]
    Invalid(String),
}

/// Money amounts must be finite and not negative.
pub(crate) fn validate_amount(label: &str, amount: f64) -> ServiceResult<()> {
    if !amount.is_finite() {
        return Err(ServiceError::Invalid(format!("{label} must be a number")));
    }
    if amount < 0.0 {
        return Err(ServiceError::Invalid(format!("{label} must not be negative")));
    }
    Ok(())
}

pub(crate) fn validate_positive(label: &str, amount: f64) -> ServiceResult<()> {
    validate_amount(label, amount)?;
    if amount == 0.0 {
        return Err(ServiceError::Invalid(format!("{label} must be greater than zero")));
    }
    Ok(())
}

pub(crate) fn require_text(label: &str, value: &str) -> ServiceResult<()> {
    if value.trim().is_empty() {
        return Err(ServiceError::Invalid(format!("{label} must not be empty")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amount_validation_rejects_nan_and_negatives() {
        assert!(validate_amount("Amount", 0.0).is_ok());
        assert!(validate_amount("Amount", f64::NAN).is_err());
        assert!(validate_amount("Amount", f64::INFINITY).is_err());
        let err = validate_amount("Amount", -1.0).unwrap_err();
        assert_eq!(err.to_string(), "Amount must not be negative");
        assert!(validate_positive("Target", 0.0).is_err());
    }
}
