//! Business logic helpers for managing expenses.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::errors::LedgerError;
use crate::ledger::{Expense, ExpenseDraft, Ledger};

use super::{require_text, validate_amount, ServiceResult};

/// Provides validated CRUD helpers for ledger expenses.
pub struct ExpenseService;

impl ExpenseService {
    /// Adds a new expense dated `now` and returns its identifier.
    pub fn add(
        ledger: &mut Ledger,
        draft: ExpenseDraft,
        now: DateTime<Utc>,
    ) -> ServiceResult<Uuid> {
        Self::validate(ledger, &draft)?;
        let id = ledger.add_expense(Expense::from_draft(draft, now));
        tracing::info!(%id, "expense added");
        Ok(id)
    }

    /// Replaces the editable fields of expense `id`. Identity and date are kept.
    pub fn edit(ledger: &mut Ledger, id: Uuid, draft: ExpenseDraft) -> ServiceResult<()> {
        Self::validate(ledger, &draft)?;
        let expense = ledger
            .expense_mut(id)
            .ok_or(LedgerError::ExpenseNotFound(id))?;
        expense.apply(draft);
        ledger.touch();
        tracing::info!(%id, "expense updated");
        Ok(())
    }

    /// Removes expense `id`. Unknown ids are ignored.
    pub fn remove(ledger: &mut Ledger, id: Uuid) -> Option<Expense> {
        let removed = ledger.remove_expense(id);
        if removed.is_some() {
            tracing::info!(%id, "expense deleted");
        }
        removed
    }

    /// Resolves a full id or a unique id prefix of at least four characters.
    pub fn resolve(ledger: &Ledger, key: &str) -> ServiceResult<Uuid> {
        let key = key.trim().to_ascii_lowercase();
        if let Ok(id) = Uuid::parse_str(&key) {
            return Ok(id);
        }
        if key.len() < 4 {
            return Err(LedgerError::InvalidRef(format!("expense id `{key}` is too short")).into());
        }
        let mut matches = ledger
            .expenses
            .iter()
            .filter(|expense| expense.id.to_string().starts_with(&key));
        match (matches.next(), matches.next()) {
            (Some(expense), None) => Ok(expense.id),
            (None, _) => Err(LedgerError::InvalidRef(format!("no expense matches `{key}`")).into()),
            (Some(_), Some(_)) => {
                Err(LedgerError::InvalidRef(format!("expense id `{key}` is ambiguous")).into())
            }
        }
    }

    fn validate(ledger: &Ledger, draft: &ExpenseDraft) -> ServiceResult<()> {
        require_text("Description", &draft.description)?;
        require_text("Category", &draft.category)?;
        require_text("Payer", &draft.paid_by)?;
        validate_amount("Amount", draft.amount)?;
        if let Some(group_id) = draft.group_id {
            if ledger.group(group_id).is_none() {
                let message = format!("group {group_id} does not exist");
                return Err(LedgerError::InvalidRef(message).into());
            }
        }
        Ok(())
    }
}
