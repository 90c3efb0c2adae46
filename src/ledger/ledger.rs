use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{
    budget::{BudgetBook, OVERALL_BUDGET},
    category::Category,
    expense::Expense,
    goal::Goal,
    group::Group,
    user::UserActivityState,
};

/// In-memory record of everything the engine derives its views from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ledger {
    #[serde(default)]
    pub expenses: Vec<Expense>,
    #[serde(default)]
    pub budgets: BudgetBook,
    #[serde(default)]
    pub groups: Vec<Group>,
    #[serde(default)]
    pub goals: Vec<Goal>,
    #[serde(default)]
    pub categories: Vec<Category>,
    pub user: UserActivityState,
    pub updated_at: DateTime<Utc>,
}

impl Ledger {
    pub fn new(owner: impl Into<String>, categories: Vec<Category>) -> Self {
        Self {
            expenses: Vec::new(),
            budgets: BudgetBook::new(),
            groups: Vec::new(),
            goals: Vec::new(),
            categories,
            user: UserActivityState::new(owner),
            updated_at: Utc::now(),
        }
    }

    pub fn owner(&self) -> &str {
        &self.user.name
    }

    pub fn add_expense(&mut self, expense: Expense) -> Uuid {
        let id = expense.id;
        self.expenses.push(expense);
        self.touch();
        id
    }

    pub fn expense(&self, id: Uuid) -> Option<&Expense> {
        self.expenses.iter().find(|expense| expense.id == id)
    }

    pub fn expense_mut(&mut self, id: Uuid) -> Option<&mut Expense> {
        self.expenses.iter_mut().find(|expense| expense.id == id)
    }

    pub fn remove_expense(&mut self, id: Uuid) -> Option<Expense> {
        let index = self.expenses.iter().position(|expense| expense.id == id)?;
        let removed = self.expenses.remove(index);
        self.touch();
        Some(removed)
    }

    pub fn expense_count(&self) -> usize {
        self.expenses.len()
    }

    /// Expenses with no group attached.
    pub fn personal_expenses(&self) -> impl Iterator<Item = &Expense> {
        self.expenses.iter().filter(|expense| expense.is_personal())
    }

    pub fn group_expenses(&self, group_id: Uuid) -> Vec<&Expense> {
        self.expenses
            .iter()
            .filter(|expense| expense.group_id == Some(group_id))
            .collect()
    }

    /// Most recently added first.
    pub fn expenses_newest_first(&self) -> impl Iterator<Item = &Expense> {
        self.expenses.iter().rev()
    }

    pub fn add_group(&mut self, group: Group) -> Uuid {
        let id = group.id;
        self.groups.push(group);
        self.touch();
        id
    }

    pub fn group(&self, id: Uuid) -> Option<&Group> {
        self.groups.iter().find(|group| group.id == id)
    }

    pub fn group_by_name(&self, name: &str) -> Option<&Group> {
        self.groups
            .iter()
            .find(|group| group.name.eq_ignore_ascii_case(name.trim()))
    }

    pub fn add_goal(&mut self, goal: Goal) -> Uuid {
        let id = goal.id;
        self.goals.push(goal);
        self.touch();
        id
    }

    pub fn goal(&self, id: Uuid) -> Option<&Goal> {
        self.goals.iter().find(|goal| goal.id == id)
    }

    pub fn goal_mut(&mut self, id: Uuid) -> Option<&mut Goal> {
        self.goals.iter_mut().find(|goal| goal.id == id)
    }

    pub fn goal_by_name(&self, name: &str) -> Option<&Goal> {
        self.goals
            .iter()
            .find(|goal| goal.name.eq_ignore_ascii_case(name.trim()))
    }

    pub fn add_category(&mut self, category: Category) {
        self.categories.push(category);
        self.touch();
    }

    pub fn category(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|category| category.matches(name))
    }

    /// Budgets may target a known category or the `Overall` pseudo-category.
    pub fn is_budgetable(&self, category: &str) -> bool {
        category == OVERALL_BUDGET || self.categories.iter().any(|c| c.name == category)
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_ledger() -> Ledger {
        Ledger::new("You", vec![Category::new("Food", "🍔")])
    }

    #[test]
    fn remove_missing_expense_returns_none() {
        let mut ledger = sample_ledger();
        assert!(ledger.remove_expense(Uuid::new_v4()).is_none());
    }

    #[test]
    fn newest_first_reverses_insertion_order() {
        let mut ledger = sample_ledger();
        let date = Utc.with_ymd_and_hms(2025, 1, 1, 9, 0, 0).unwrap();
        let first = ledger.add_expense(Expense::new("Tea", 2.0, "Food", date, "You"));
        let second = ledger.add_expense(Expense::new("Lunch", 9.0, "Food", date, "You"));
        let ids: Vec<_> = ledger.expenses_newest_first().map(|e| e.id).collect();
        assert_eq!(ids, vec![second, first]);
    }

    #[test]
    fn budgetable_categories_include_overall() {
        let ledger = sample_ledger();
        assert!(ledger.is_budgetable("Food"));
        assert!(ledger.is_budgetable(OVERALL_BUDGET));
        assert!(!ledger.is_budgetable("Travel"));
    }
}
