//! Ledger data model: expenses, budgets, groups, goals, categories and the
//! owner's activity state.

pub mod achievement;
pub mod budget;
pub mod category;
pub mod expense;
pub mod goal;
pub mod group;
#[allow(clippy::module_inception)]
pub mod ledger;
pub mod time;
pub mod user;

pub use achievement::Achievement;
pub use budget::{Budget, BudgetBook, OVERALL_BUDGET};
pub use category::Category;
pub use expense::{Expense, ExpenseDraft};
pub use goal::Goal;
pub use group::Group;
pub use ledger::Ledger;
pub use time::{calendar_day, parse_timezone, Clock, FixedClock, SystemClock, DEFAULT_REFERENCE_TZ};
pub use user::UserActivityState;
