use serde::{Deserialize, Serialize};

use crate::ledger::{Achievement, Ledger};

const TRANSACTION_PRO_COUNT: usize = 10;
const LONG_STREAK_DAYS: u32 = 7;

/// Unlock predicate for each achievement.
pub fn is_earned(achievement: Achievement, ledger: &Ledger) -> bool {
    match achievement {
        Achievement::FirstExpense => ledger.expense_count() >= 1,
        Achievement::TenTransactions => ledger.expense_count() >= TRANSACTION_PRO_COUNT,
        Achievement::FirstBudget => !ledger.budgets.is_empty(),
        Achievement::LongStreak => ledger.user.streak >= LONG_STREAK_DAYS,
        Achievement::GoalSetter => !ledger.goals.is_empty(),
    }
}

/// Unlocks every achievement whose predicate now holds and returns the ones
/// that were locked before this call. Unlocked flags are never cleared.
pub fn evaluate_achievements(ledger: &mut Ledger) -> Vec<Achievement> {
    let earned: Vec<Achievement> = Achievement::ALL
        .iter()
        .copied()
        .filter(|achievement| is_earned(*achievement, ledger))
        .collect();

    let newly_unlocked: Vec<Achievement> = earned
        .into_iter()
        .filter(|achievement| ledger.user.unlock(*achievement))
        .collect();

    for achievement in &newly_unlocked {
        tracing::info!(achievement = achievement.key(), "achievement unlocked");
    }
    newly_unlocked
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AchievementCard {
    pub key: Achievement,
    pub title: String,
    pub icon: String,
    pub description: String,
    pub unlocked: bool,
}

/// The full catalogue plus the keys unlocked by the latest command.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AchievementState {
    pub cards: Vec<AchievementCard>,
    pub newly_unlocked: Vec<Achievement>,
}

impl AchievementState {
    pub fn build(ledger: &Ledger, newly_unlocked: &[Achievement]) -> Self {
        let cards = Achievement::ALL
            .iter()
            .map(|achievement| AchievementCard {
                key: *achievement,
                title: achievement.title().to_string(),
                icon: achievement.icon().to_string(),
                description: achievement.description().to_string(),
                unlocked: ledger.user.is_unlocked(*achievement),
            })
            .collect();
        Self {
            cards,
            newly_unlocked: newly_unlocked.to_vec(),
        }
    }

    pub fn unlocked(&self) -> impl Iterator<Item = Achievement> + '_ {
        self.cards.iter().filter(|card| card.unlocked).map(|card| card.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{Category, Expense, Goal};
    use chrono::{TimeZone, Utc};

    fn ledger() -> Ledger {
        Ledger::new("You", vec![Category::new("Food", "🍔")])
    }

    fn add_expense(ledger: &mut Ledger) {
        let date = Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap();
        ledger.add_expense(Expense::new("snack", 3.0, "Food", date, "You"));
    }

    #[test]
    fn tenth_expense_unlocks_transaction_pro_once() {
        let mut ledger = ledger();
        add_expense(&mut ledger);
        assert_eq!(evaluate_achievements(&mut ledger), vec![Achievement::FirstExpense]);

        for _ in 2..10 {
            add_expense(&mut ledger);
            assert!(evaluate_achievements(&mut ledger).is_empty());
        }

        add_expense(&mut ledger);
        assert_eq!(evaluate_achievements(&mut ledger), vec![Achievement::TenTransactions]);
        assert!(evaluate_achievements(&mut ledger).is_empty());
    }

    #[test]
    fn unlocked_flags_survive_when_predicates_stop_holding() {
        let mut ledger = ledger();
        add_expense(&mut ledger);
        ledger.budgets.set("Food", 50.0);
        ledger.add_goal(Goal::new("Trip", 1000.0));
        let unlocked = evaluate_achievements(&mut ledger);
        assert_eq!(
            unlocked,
            vec![
                Achievement::FirstExpense,
                Achievement::FirstBudget,
                Achievement::GoalSetter
            ]
        );

        ledger.expenses.clear();
        ledger.budgets.remove("Food");
        assert!(evaluate_achievements(&mut ledger).is_empty());
        assert!(ledger.user.is_unlocked(Achievement::FirstExpense));
        assert!(ledger.user.is_unlocked(Achievement::FirstBudget));
    }

    #[test]
    fn long_streak_needs_seven_days() {
        let mut ledger = ledger();
        ledger.user.streak = 6;
        assert!(evaluate_achievements(&mut ledger).is_empty());
        ledger.user.streak = 7;
        assert_eq!(evaluate_achievements(&mut ledger), vec![Achievement::LongStreak]);
    }

    #[test]
    fn state_lists_every_card() {
        let mut ledger = ledger();
        add_expense(&mut ledger);
        let newly = evaluate_achievements(&mut ledger);
        let state = AchievementState::build(&ledger, &newly);
        assert_eq!(state.cards.len(), Achievement::ALL.len());
        assert_eq!(state.unlocked().collect::<Vec<_>>(), vec![Achievement::FirstExpense]);
        assert_eq!(state.newly_unlocked, vec![Achievement::FirstExpense]);
        assert_eq!(state.cards[3].title, "Weekly Warrior");
    }
}
