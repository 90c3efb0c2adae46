use crate::errors::LedgerError;
use crate::ledger::{Budget, Ledger};

use super::{validate_amount, ServiceResult};

pub struct BudgetService;

impl BudgetService {
    /// Sets the budget for `category`, returning the amount it replaced.
    pub fn set(ledger: &mut Ledger, category: &str, amount: f64) -> ServiceResult<Option<f64>> {
        validate_amount("Budget amount", amount)?;
        let category = category.trim();
        if !ledger.is_budgetable(category) {
            return Err(LedgerError::InvalidRef(format!("unknown category `{category}`")).into());
        }
        let previous = ledger.budgets.set(category, amount);
        ledger.touch();
        tracing::info!(category, amount, replaced = previous.is_some(), "budget set");
        Ok(previous)
    }

    /// Deletes the budget for `category`; a missing budget is not an error.
    pub fn remove(ledger: &mut Ledger, category: &str) -> Option<Budget> {
        let removed = ledger.budgets.remove(category.trim());
        if removed.is_some() {
            ledger.touch();
            tracing::info!(category, "budget deleted");
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::services::ServiceError;
    use crate::ledger::{Category, OVERALL_BUDGET};

    #[test]
    fn budgets_accept_known_categories_and_overall() {
        let mut ledger = Ledger::new("You", vec![Category::new("Food", "🍔")]);
        assert_eq!(BudgetService::set(&mut ledger, "Food", 100.0).unwrap(), None);
        assert_eq!(BudgetService::set(&mut ledger, "Food", 120.0).unwrap(), Some(100.0));
        BudgetService::set(&mut ledger, OVERALL_BUDGET, 900.0).unwrap();

        let err = BudgetService::set(&mut ledger, "Travel", 50.0).unwrap_err();
        assert!(matches!(err, ServiceError::Ledger(LedgerError::InvalidRef(_))));
        assert_eq!(ledger.budgets.len(), 2);
    }

    #[test]
    fn removing_missing_budget_is_a_no_op() {
        let mut ledger = Ledger::new("You", vec![Category::new("Food", "🍔")]);
        assert!(BudgetService::remove(&mut ledger, "Food").is_none());
    }
}
