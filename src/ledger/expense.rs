use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single spend record, either personal or attached to a group.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Expense {
    pub id: Uuid,
    pub description: String,
    pub amount: f64,
    pub category: String,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub recurring: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<Uuid>,
    pub paid_by: String,
}

impl Expense {
    /// Creates a personal, non-recurring expense dated `date`.
    pub fn new(
        description: impl Into<String>,
        amount: f64,
        category: impl Into<String>,
        date: DateTime<Utc>,
        paid_by: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            description: description.into(),
            amount,
            category: category.into(),
            date,
            recurring: false,
            group_id: None,
            paid_by: paid_by.into(),
        }
    }

    /// Materialises a draft into a new expense with a fresh identity.
    pub fn from_draft(draft: ExpenseDraft, date: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            description: draft.description,
            amount: draft.amount,
            category: draft.category,
            date,
            recurring: draft.recurring,
            group_id: draft.group_id,
            paid_by: draft.paid_by,
        }
    }

    pub fn with_group(mut self, group_id: Uuid) -> Self {
        self.group_id = Some(group_id);
        self
    }

    pub fn with_recurring(mut self, recurring: bool) -> Self {
        self.recurring = recurring;
        self
    }

    /// Personal expenses are the ones not shared with any group.
    pub fn is_personal(&self) -> bool {
        self.group_id.is_none()
    }

    /// Overwrites the mutable fields, keeping `id` and `date`.
    pub fn apply(&mut self, draft: ExpenseDraft) {
        self.description = draft.description;
        self.amount = draft.amount;
        self.category = draft.category;
        self.recurring = draft.recurring;
        self.group_id = draft.group_id;
        self.paid_by = draft.paid_by;
    }
}

/// The user-editable part of an expense, as submitted by an add or edit command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseDraft {
    pub description: String,
    pub amount: f64,
    pub category: String,
    #[serde(default)]
    pub recurring: bool,
    #[serde(default)]
    pub group_id: Option<Uuid>,
    pub paid_by: String,
}

impl ExpenseDraft {
    pub fn new(
        description: impl Into<String>,
        amount: f64,
        category: impl Into<String>,
        paid_by: impl Into<String>,
    ) -> Self {
        Self {
            description: description.into(),
            amount,
            category: category.into(),
            recurring: false,
            group_id: None,
            paid_by: paid_by.into(),
        }
    }

    pub fn in_group(mut self, group_id: Uuid) -> Self {
        self.group_id = Some(group_id);
        self
    }

    pub fn recurring(mut self, recurring: bool) -> Self {
        self.recurring = recurring;
        self
    }
}
