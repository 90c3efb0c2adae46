use serde::{Deserialize, Serialize};

/// Pseudo-category whose budget covers every personal expense.
pub const OVERALL_BUDGET: &str = "Overall";

/// A spending target for one category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Budget {
    pub category: String,
    pub amount: f64,
}

impl Budget {
    pub fn new(category: impl Into<String>, amount: f64) -> Self {
        Self {
            category: category.into(),
            amount,
        }
    }

    pub fn is_overall(&self) -> bool {
        self.category == OVERALL_BUDGET
    }
}

/// Category-keyed budgets in the order they were first set.
///
/// Setting an existing category replaces its amount in place, so the order
/// shown to the user is stable across edits.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct BudgetBook {
    entries: Vec<Budget>,
}

impl BudgetBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the budget for `category`, returning the previous amount.
    pub fn set(&mut self, category: &str, amount: f64) -> Option<f64> {
        match self.entries.iter_mut().find(|b| b.category == category) {
            Some(existing) => Some(std::mem::replace(&mut existing.amount, amount)),
            None => {
                self.entries.push(Budget::new(category, amount));
                None
            }
        }
    }

    pub fn remove(&mut self, category: &str) -> Option<Budget> {
        let index = self.entries.iter().position(|b| b.category == category)?;
        Some(self.entries.remove(index))
    }

    pub fn get(&self, category: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|b| b.category == category)
            .map(|b| b.amount)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Budget> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
