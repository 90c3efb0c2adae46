use chrono::{Datelike, NaiveDate};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::ledger::{calendar_day, Ledger};

/// Longest series `monthly_spending` produces.
pub const MAX_TREND_MONTHS: u32 = 120;

const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Personal spend for one calendar month.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonthlySpend {
    pub year: i32,
    pub month: u32,
    /// `YYYY-Mon`, e.g. `2025-Mar`.
    pub label: String,
    pub total: f64,
}

impl MonthlySpend {
    fn empty(index: i32) -> Self {
        let year = index.div_euclid(12);
        let month0 = index.rem_euclid(12) as usize;
        Self {
            year,
            month: month0 as u32 + 1,
            label: format!("{}-{}", year, MONTH_NAMES[month0]),
            total: 0.0,
        }
    }
}

fn month_index(date: NaiveDate) -> i32 {
    date.year() * 12 + date.month0() as i32
}

/// Personal spend for the `months` calendar months ending with the month of
/// `today`, oldest first. Months without spend are reported as zero.
/// `months` is clamped to `1..=MAX_TREND_MONTHS`.
pub fn monthly_spending(
    ledger: &Ledger,
    today: NaiveDate,
    months: u32,
    tz: Tz,
) -> Vec<MonthlySpend> {
    let last = month_index(today);
    let span = months.clamp(1, MAX_TREND_MONTHS) as i32;
    let first = last - (span - 1);
    let mut series: Vec<MonthlySpend> = (first..=last).map(MonthlySpend::empty).collect();

    for expense in ledger.personal_expenses() {
        let index = month_index(calendar_day(expense.date, tz));
        if (first..=last).contains(&index) {
            series[(index - first) as usize].total += expense.amount;
        }
    }
    series
}
