//! Read models handed to the presentation layer after each command.

use serde::{Deserialize, Serialize};

use crate::ledger::{Expense, Group};

use super::{
    achievements::AchievementState, budget::BudgetStatus, settlement::GroupSettlement,
    streak::StreakState, trends::MonthlySpend,
};

/// Headline numbers for the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DashboardSummary {
    pub total_spent: f64,
    /// `Overall` budget amount, or zero when none is set.
    pub overall_budget: f64,
    pub streak: u32,
    pub points: u64,
    pub recent: Vec<Expense>,
}

/// A group, its expenses (newest first) and the derived settlement.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GroupBalanceSheet {
    pub group: Group,
    pub expenses: Vec<Expense>,
    pub settlement: GroupSettlement,
}

/// Everything the presentation layer renders, recomputed from scratch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DashboardViews {
    pub budgets: Vec<BudgetStatus>,
    pub dashboard: DashboardSummary,
    pub streak: StreakState,
    pub achievements: AchievementState,
    pub trend: Vec<MonthlySpend>,
    pub group: Option<GroupBalanceSheet>,
}
