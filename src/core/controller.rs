//! Owns the ledger and runs every command through the same pipeline:
//! validate and mutate, record streak activity for new expenses, then
//! re-evaluate achievements. Views are recomputed from the snapshot on demand.

use std::path::Path;

use chrono::{Datelike, NaiveDate};
use chrono_tz::Tz;
use uuid::Uuid;

use crate::{
    config::EngineConfig,
    core::{
        achievements::{evaluate_achievements, AchievementState},
        budget::{compute_budget_status, personal_total, BudgetStatus},
        export,
        services::{
            BudgetService, CategoryService, ExpenseService, GoalService, GroupService,
            ServiceResult,
        },
        settlement::compute_group_settlement,
        streak::{month_calendar, StreakCalendar, StreakState, StreakTracker},
        trends::{monthly_spending, MonthlySpend},
        views::{DashboardSummary, DashboardViews, GroupBalanceSheet},
    },
    errors::LedgerError,
    ledger::{Achievement, Clock, ExpenseDraft, Ledger, SystemClock, OVERALL_BUDGET},
};

/// Result of a command plus the achievements it unlocked.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandOutcome<T> {
    pub value: T,
    pub unlocked: Vec<Achievement>,
}

pub struct LedgerController {
    ledger: Ledger,
    config: EngineConfig,
    tz: Tz,
    streak: StreakTracker,
    clock: Box<dyn Clock>,
}

impl LedgerController {
    pub fn new(config: EngineConfig, clock: Box<dyn Clock>) -> Result<Self, LedgerError> {
        config.validate()?;
        let tz = config.timezone()?;
        let streak = StreakTracker::from_config(&config)?;
        let ledger = Ledger::new(config.owner_name.trim(), config.default_categories.clone());
        Ok(Self {
            ledger,
            config,
            tz,
            streak,
            clock,
        })
    }

    pub fn with_system_clock(config: EngineConfig) -> Result<Self, LedgerError> {
        Self::new(config, Box::new(SystemClock))
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Today's calendar day in the reference timezone.
    pub fn today(&self) -> NaiveDate {
        self.streak.today(self.clock.now())
    }

    pub fn add_expense(&mut self, draft: ExpenseDraft) -> ServiceResult<CommandOutcome<Uuid>> {
        let now = self.clock.now();
        let id = ExpenseService::add(&mut self.ledger, draft, now)?;
        self.streak.record_activity(&mut self.ledger.user, now);
        Ok(self.finish(id))
    }

    pub fn edit_expense(
        &mut self,
        id: Uuid,
        draft: ExpenseDraft,
    ) -> ServiceResult<CommandOutcome<()>> {
        ExpenseService::edit(&mut self.ledger, id, draft)?;
        Ok(self.finish(()))
    }

    /// Returns whether an expense was removed.
    pub fn delete_expense(&mut self, id: Uuid) -> CommandOutcome<bool> {
        let removed = ExpenseService::remove(&mut self.ledger, id).is_some();
        self.finish(removed)
    }

    pub fn set_budget(
        &mut self,
        category: &str,
        amount: f64,
    ) -> ServiceResult<CommandOutcome<Option<f64>>> {
        let previous = BudgetService::set(&mut self.ledger, category, amount)?;
        Ok(self.finish(previous))
    }

    pub fn delete_budget(&mut self, category: &str) -> CommandOutcome<bool> {
        let removed = BudgetService::remove(&mut self.ledger, category).is_some();
        self.finish(removed)
    }

    pub fn create_group<S: AsRef<str>>(
        &mut self,
        name: &str,
        members: &[S],
    ) -> ServiceResult<CommandOutcome<Uuid>> {
        let id = GroupService::create(&mut self.ledger, name, members)?;
        Ok(self.finish(id))
    }

    pub fn create_goal(
        &mut self,
        name: &str,
        target_amount: f64,
    ) -> ServiceResult<CommandOutcome<Uuid>> {
        let id = GoalService::create(&mut self.ledger, name, target_amount)?;
        Ok(self.finish(id))
    }

    pub fn contribute_to_goal(
        &mut self,
        goal_id: Uuid,
        amount: f64,
    ) -> ServiceResult<CommandOutcome<f64>> {
        let total = GoalService::contribute(&mut self.ledger, goal_id, amount)?;
        Ok(self.finish(total))
    }

    pub fn add_category(&mut self, name: &str, icon: &str) -> ServiceResult<CommandOutcome<()>> {
        CategoryService::add(&mut self.ledger, name, icon)?;
        Ok(self.finish(()))
    }

    fn finish<T>(&mut self, value: T) -> CommandOutcome<T> {
        let unlocked = evaluate_achievements(&mut self.ledger);
        CommandOutcome { value, unlocked }
    }

    pub fn budget_status(&self) -> Vec<BudgetStatus> {
        compute_budget_status(&self.ledger)
    }

    pub fn group_sheet(&self, group_id: Uuid) -> Result<GroupBalanceSheet, LedgerError> {
        let group = self
            .ledger
            .group(group_id)
            .ok_or_else(|| LedgerError::GroupNotFound(group_id.to_string()))?;
        let expenses = self.ledger.group_expenses(group_id);
        let epsilon = self.config.settlement_epsilon;
        let settlement = compute_group_settlement(group, expenses.iter().copied(), epsilon);
        Ok(GroupBalanceSheet {
            group: group.clone(),
            expenses: expenses.into_iter().rev().cloned().collect(),
            settlement,
        })
    }

    pub fn streak_state(&self) -> StreakState {
        StreakState::from(&self.ledger.user)
    }

    /// Activity calendar for the current month.
    pub fn streak_calendar(&self) -> StreakCalendar {
        let today = self.today();
        self.month_calendar(today.year(), today.month())
            .unwrap_or_else(|| StreakCalendar {
                year: today.year(),
                month: today.month(),
                leading_blanks: 0,
                days: Vec::new(),
            })
    }

    pub fn month_calendar(&self, year: i32, month: u32) -> Option<StreakCalendar> {
        month_calendar(&self.ledger.user, year, month, self.today())
    }

    pub fn achievement_state(&self, newly_unlocked: &[Achievement]) -> AchievementState {
        AchievementState::build(&self.ledger, newly_unlocked)
    }

    pub fn monthly_spending(&self) -> Vec<MonthlySpend> {
        monthly_spending(&self.ledger, self.today(), self.config.trend_months, self.tz)
    }

    pub fn dashboard(&self) -> DashboardSummary {
        DashboardSummary {
            total_spent: personal_total(&self.ledger),
            overall_budget: self.ledger.budgets.get(OVERALL_BUDGET).unwrap_or(0.0),
            streak: self.ledger.user.streak,
            points: self.ledger.user.points,
            recent: self
                .ledger
                .expenses_newest_first()
                .take(self.config.recent_limit)
                .cloned()
                .collect(),
        }
    }

    /// Recomputes every view. `newly_unlocked` is usually the last outcome's list.
    pub fn views(
        &self,
        selected_group: Option<Uuid>,
        newly_unlocked: &[Achievement],
    ) -> Result<DashboardViews, LedgerError> {
        let group = selected_group
            .map(|group_id| self.group_sheet(group_id))
            .transpose()?;
        Ok(DashboardViews {
            budgets: self.budget_status(),
            dashboard: self.dashboard(),
            streak: self.streak_state(),
            achievements: self.achievement_state(newly_unlocked),
            trend: self.monthly_spending(),
            group,
        })
    }

    pub fn export_csv(&self) -> Result<String, LedgerError> {
        export::export_csv(&self.ledger)
    }

    pub fn export_to_path(&self, path: &Path) -> Result<usize, LedgerError> {
        export::export_to_path(&self.ledger, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::services::ServiceError;
    use crate::ledger::FixedClock;
    use chrono::{TimeZone, Utc};

    fn controller() -> (LedgerController, FixedClock) {
        let clock = FixedClock::new(Utc.with_ymd_and_hms(2025, 3, 1, 6, 0, 0).unwrap());
        let controller =
            LedgerController::new(EngineConfig::default(), Box::new(clock.clone())).unwrap();
        (controller, clock)
    }

    fn food(amount: f64) -> ExpenseDraft {
        ExpenseDraft::new("Snack", amount, "Food", "You")
    }

    #[test]
    fn only_new_expenses_move_the_streak() {
        let (mut controller, clock) = controller();
        let id = controller.add_expense(food(5.0)).unwrap().value;
        assert_eq!(controller.streak_state().streak, 1);

        clock.set(Utc.with_ymd_and_hms(2025, 3, 2, 6, 0, 0).unwrap());
        controller.edit_expense(id, food(6.0)).unwrap();
        controller.set_budget("Food", 50.0).unwrap();
        assert_eq!(controller.streak_state().streak, 1);

        controller.add_expense(food(1.0)).unwrap();
        assert_eq!(controller.streak_state().streak, 2);
    }

    #[test]
    fn outcomes_report_unlocks_once() {
        let (mut controller, _clock) = controller();
        let first = controller.add_expense(food(5.0)).unwrap();
        assert_eq!(first.unlocked, vec![Achievement::FirstExpense]);
        let second = controller.add_expense(food(5.0)).unwrap();
        assert!(second.unlocked.is_empty());

        let goal = controller.create_goal("Bike", 400.0).unwrap();
        assert_eq!(goal.unlocked, vec![Achievement::GoalSetter]);
        let contribution = controller.contribute_to_goal(goal.value, 40.0).unwrap();
        assert_eq!(contribution.value, 40.0);
        assert!(contribution.unlocked.is_empty());
    }

    #[test]
    fn rejected_commands_leave_the_ledger_untouched() {
        let (mut controller, _clock) = controller();
        let err = controller.add_expense(food(-3.0)).unwrap_err();
        assert!(matches!(err, ServiceError::Invalid(_)));
        assert_eq!(controller.ledger().expense_count(), 0);
        assert_eq!(controller.streak_state().streak, 0);
        assert!(!controller.ledger().user.is_unlocked(Achievement::FirstExpense));
    }

    #[test]
    fn views_include_selected_group() {
        let (mut controller, _clock) = controller();
        let group_id = controller.create_group("Trip", &["Asha"]).unwrap().value;
        let draft = ExpenseDraft::new("Hotel", 100.0, "Other", "You").in_group(group_id);
        controller.add_expense(draft).unwrap();
        controller.add_expense(food(20.0)).unwrap();
        controller.set_budget(OVERALL_BUDGET, 200.0).unwrap();

        let views = controller.views(Some(group_id), &[]).unwrap();
        let sheet = views.group.unwrap();
        assert_eq!(sheet.expenses.len(), 1);
        assert_eq!(sheet.settlement.transfers.len(), 1);
        assert_eq!(sheet.settlement.transfers[0].from, "Asha");
        assert_eq!(views.dashboard.total_spent, 20.0);
        assert_eq!(views.dashboard.overall_budget, 200.0);
        assert_eq!(views.budgets[0].spent_amount, 20.0);
        assert_eq!(views.trend.len(), 6);
        assert_eq!(views.trend[5].total, 20.0);

        let missing = controller.views(Some(Uuid::new_v4()), &[]);
        assert!(matches!(missing, Err(LedgerError::GroupNotFound(_))));
    }

    #[test]
    fn group_sheet_lists_newest_expenses_first() {
        let (mut controller, _clock) = controller();
        let group_id = controller.create_group("Trip", &["Asha"]).unwrap().value;
        for description in ["Train", "Hotel", "Dinner"] {
            let draft = ExpenseDraft::new(description, 30.0, "Other", "You").in_group(group_id);
            controller.add_expense(draft).unwrap();
        }

        let sheet = controller.group_sheet(group_id).unwrap();
        let order: Vec<&str> = sheet
            .expenses
            .iter()
            .map(|expense| expense.description.as_str())
            .collect();
        assert_eq!(order, vec!["Dinner", "Hotel", "Train"]);
    }

    #[test]
    fn calendar_tracks_the_current_month() {
        let (mut controller, _clock) = controller();
        controller.add_expense(food(2.0)).unwrap();
        let calendar = controller.streak_calendar();
        assert_eq!((calendar.year, calendar.month), (2025, 3));
        assert!(calendar.days[0].active);
        assert!(calendar.days[0].today);
    }
}
