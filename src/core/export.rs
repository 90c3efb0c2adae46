//! Flat CSV projection of the expense list.

use std::{fs, io::Write, path::Path};

use chrono::SecondsFormat;
use serde::Serialize;
use uuid::Uuid;

use crate::{
    errors::LedgerError,
    ledger::{Expense, Ledger},
};

/// Column order of the export. Consumers rely on it.
pub const EXPORT_HEADERS: [&str; 7] = [
    "ID",
    "Description",
    "Amount",
    "Category",
    "Date",
    "Recurring",
    "GroupID",
];

#[derive(Debug, Serialize)]
struct ExportRow<'a> {
    #[serde(rename = "ID")]
    id: Uuid,
    #[serde(rename = "Description")]
    description: &'a str,
    #[serde(rename = "Amount")]
    amount: f64,
    #[serde(rename = "Category")]
    category: &'a str,
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Recurring")]
    recurring: bool,
    #[serde(rename = "GroupID")]
    group_id: Option<Uuid>,
}

impl<'a> From<&'a Expense> for ExportRow<'a> {
    fn from(expense: &'a Expense) -> Self {
        Self {
            id: expense.id,
            description: &expense.description,
            amount: expense.amount,
            category: &expense.category,
            date: expense.date.to_rfc3339_opts(SecondsFormat::Millis, true),
            recurring: expense.recurring,
            group_id: expense.group_id,
        }
    }
}

/// Writes every expense, newest first, as CSV with a header row.
pub fn write_csv<W: Write>(ledger: &Ledger, writer: W) -> Result<usize, LedgerError> {
    let mut csv = csv::Writer::from_writer(writer);
    if ledger.expenses.is_empty() {
        csv.write_record(EXPORT_HEADERS)?;
    }
    let mut rows = 0;
    for expense in ledger.expenses_newest_first() {
        csv.serialize(ExportRow::from(expense))?;
        rows += 1;
    }
    csv.flush()?;
    Ok(rows)
}

pub fn export_csv(ledger: &Ledger) -> Result<String, LedgerError> {
    let mut buffer = Vec::new();
    write_csv(ledger, &mut buffer)?;
    String::from_utf8(buffer).map_err(|err| LedgerError::Validation(err.to_string()))
}

/// Writes the export to `path`, creating parent directories as needed.
pub fn export_to_path(ledger: &Ledger, path: &Path) -> Result<usize, LedgerError> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let file = fs::File::create(path)?;
    let rows = write_csv(ledger, file)?;
    tracing::info!(path = %path.display(), rows, "expenses exported");
    Ok(rows)
}
