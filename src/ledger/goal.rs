use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A savings target that only ever grows through explicit contributions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Goal {
    pub id: Uuid,
    pub name: String,
    pub target_amount: f64,
    pub current_amount: f64,
}

impl Goal {
    pub fn new(name: impl Into<String>, target_amount: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            target_amount,
            current_amount: 0.0,
        }
    }

    /// Adds `amount` to the saved total. Non-positive amounts are ignored.
    pub fn contribute(&mut self, amount: f64) -> f64 {
        if amount > 0.0 {
            self.current_amount += amount;
        }
        self.current_amount
    }

    /// Progress toward the target, capped at 100.
    pub fn progress_percentage(&self) -> f64 {
        if self.target_amount > 0.0 {
            (self.current_amount / self.target_amount * 100.0).min(100.0)
        } else {
            0.0
        }
    }

    pub fn is_reached(&self) -> bool {
        self.target_amount > 0.0 && self.current_amount >= self.target_amount
    }
}
