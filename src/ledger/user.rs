use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::achievement::Achievement;

/// Activity counters and unlock flags for the ledger's owner.
///
/// `points` and unlocked achievements only grow; `streak` may drop back to 1.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserActivityState {
    pub name: String,
    pub streak: u32,
    pub points: u64,
    #[serde(default)]
    pub last_active_date: Option<NaiveDate>,
    #[serde(default)]
    pub active_dates: BTreeSet<NaiveDate>,
    #[serde(default = "UserActivityState::locked_achievements")]
    pub achievements: BTreeMap<Achievement, bool>,
}

impl UserActivityState {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            streak: 0,
            points: 0,
            last_active_date: None,
            active_dates: BTreeSet::new(),
            achievements: Self::locked_achievements(),
        }
    }

    pub fn locked_achievements() -> BTreeMap<Achievement, bool> {
        Achievement::ALL.iter().map(|a| (*a, false)).collect()
    }

    pub fn is_unlocked(&self, achievement: Achievement) -> bool {
        self.achievements.get(&achievement).copied().unwrap_or(false)
    }

    /// Flips `achievement` to unlocked. Returns `true` only on the transition.
    pub fn unlock(&mut self, achievement: Achievement) -> bool {
        let flag = self.achievements.entry(achievement).or_insert(false);
        if *flag {
            return false;
        }
        *flag = true;
        true
    }

    pub fn unlocked(&self) -> Vec<Achievement> {
        Achievement::ALL
            .iter()
            .copied()
            .filter(|a| self.is_unlocked(*a))
            .collect()
    }

    pub fn was_active_on(&self, day: NaiveDate) -> bool {
        self.active_dates.contains(&day)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unlock_reports_only_the_transition() {
        let mut user = UserActivityState::new("You");
        assert!(!user.is_unlocked(Achievement::GoalSetter));
        assert!(user.unlock(Achievement::GoalSetter));
        assert!(!user.unlock(Achievement::GoalSetter));
        assert_eq!(user.unlocked(), vec![Achievement::GoalSetter]);
    }

    #[test]
    fn achievement_keys_serialize_camel_case() {
        let user = UserActivityState::new("You");
        let json = serde_json::to_string(&user).unwrap();
        assert!(json.contains("\"tenTransactions\":false"));
        assert!(json.contains("\"last_active_date\":null"));
    }
}
