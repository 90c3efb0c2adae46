//! Ledger computation engine: pure derivations over a ledger snapshot plus
//! the command layer that mutates it.

pub mod achievements;
pub mod budget;
pub mod controller;
pub mod export;
pub mod services;
pub mod settlement;
pub mod streak;
pub mod trends;
pub mod views;

pub use achievements::{evaluate_achievements, AchievementCard, AchievementState};
pub use budget::{compute_budget_status, BudgetSeverity, BudgetStatus};
pub use controller::{CommandOutcome, LedgerController};
pub use settlement::{compute_group_settlement, GroupSettlement, MemberBalance, Transfer};
pub use streak::{
    month_calendar, StreakCalendar, StreakChange, StreakRules, StreakState, StreakTracker,
};
pub use trends::{monthly_spending, MonthlySpend};
pub use views::{DashboardSummary, DashboardViews, GroupBalanceSheet};
