//! Spend-versus-budget status per category.

use serde::{Deserialize, Serialize};

use crate::ledger::{Budget, Ledger};

/// Percentage above which a budget is shown as nearly used up.
pub const WARNING_THRESHOLD: f64 = 70.0;
/// Percentage above which a budget is shown as critical.
pub const CRITICAL_THRESHOLD: f64 = 90.0;

/// Display band derived from [`BudgetStatus::percentage`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum BudgetSeverity {
    Normal,
    Warning,
    Critical,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BudgetStatus {
    pub category: String,
    pub budget_amount: f64,
    pub spent_amount: f64,
    /// Share of the budget used, capped to `[0, 100]`.
    pub percentage: f64,
    pub exceeded: bool,
}

impl BudgetStatus {
    fn from_parts(category: &str, budget_amount: f64, spent_amount: f64) -> Self {
        let percentage = if budget_amount > 0.0 {
            (spent_amount / budget_amount * 100.0).min(100.0)
        } else {
            0.0
        };
        Self {
            category: category.to_string(),
            budget_amount,
            spent_amount,
            percentage,
            exceeded: spent_amount >= budget_amount,
        }
    }

    pub fn remaining(&self) -> f64 {
        self.budget_amount - self.spent_amount
    }

    pub fn severity(&self) -> BudgetSeverity {
        if self.percentage > CRITICAL_THRESHOLD {
            BudgetSeverity::Critical
        } else if self.percentage > WARNING_THRESHOLD {
            BudgetSeverity::Warning
        } else {
            BudgetSeverity::Normal
        }
    }
}

/// Computes one status per budget entry, in budget order.
///
/// Only personal expenses count. The `Overall` budget sums all of them; every
/// other budget sums the personal expenses whose category matches exactly.
pub fn compute_budget_status(ledger: &Ledger) -> Vec<BudgetStatus> {
    ledger
        .budgets
        .iter()
        .map(|budget| {
            BudgetStatus::from_parts(&budget.category, budget.amount, spent_for(ledger, budget))
        })
        .collect()
}

fn spent_for(ledger: &Ledger, budget: &Budget) -> f64 {
    ledger
        .personal_expenses()
        .filter(|expense| budget.is_overall() || expense.category == budget.category)
        .map(|expense| expense.amount)
        .sum()
}

/// Total of every personal expense.
pub fn personal_total(ledger: &Ledger) -> f64 {
    ledger.personal_expenses().map(|expense| expense.amount).sum()
}
