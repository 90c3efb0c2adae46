use std::fmt;

use serde::{Deserialize, Serialize};

/// One-way flags unlocked when their predicate first holds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "camelCase")]
pub enum Achievement {
    FirstExpense,
    TenTransactions,
    FirstBudget,
    LongStreak,
    GoalSetter,
}

impl Achievement {
    /// Every achievement, in display order.
    pub const ALL: [Achievement; 5] = [
        Achievement::FirstExpense,
        Achievement::TenTransactions,
        Achievement::FirstBudget,
        Achievement::LongStreak,
        Achievement::GoalSetter,
    ];

    /// Stable key used in serialized state.
    pub fn key(self) -> &'static str {
        match self {
            Achievement::FirstExpense => "firstExpense",
            Achievement::TenTransactions => "tenTransactions",
            Achievement::FirstBudget => "firstBudget",
            Achievement::LongStreak => "longStreak",
            Achievement::GoalSetter => "goalSetter",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Achievement::FirstExpense => "First Expense",
            Achievement::TenTransactions => "Transaction Pro",
            Achievement::FirstBudget => "Budget Setter",
            Achievement::LongStreak => "Weekly Warrior",
            Achievement::GoalSetter => "Dream Big",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Achievement::FirstExpense => "🎉",
            Achievement::TenTransactions => "💼",
            Achievement::FirstBudget => "🎯",
            Achievement::LongStreak => "🔥",
            Achievement::GoalSetter => "🚀",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Achievement::FirstExpense => "Log your first transaction",
            Achievement::TenTransactions => "Log 10 transactions",
            Achievement::FirstBudget => "Create your first budget",
            Achievement::LongStreak => "Maintain a 7-day streak",
            Achievement::GoalSetter => "Create a savings goal",
        }
    }
}

impl fmt::Display for Achievement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}
