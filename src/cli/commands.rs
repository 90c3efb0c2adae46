use std::path::PathBuf;

use colored::Colorize;
use uuid::Uuid;

use crate::{
    core::{
        services::{ExpenseService, GoalService, GroupService},
        BudgetSeverity, GroupBalanceSheet,
    },
    ledger::{Expense, ExpenseDraft},
    utils::{build_info, paths},
};

use super::{
    context::ShellContext,
    output,
    registry::CommandEntry,
    CommandError, CommandResult,
};

const BAR_WIDTH: usize = 20;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "add-expense",
            "Record an expense",
            "add-expense <amount> <category> <description...> [--group G | --personal] \
             [--paid-by P] [--recurring | --no-recurring]",
            cmd_add_expense,
        ),
        CommandEntry::new(
            "edit-expense",
            "Replace the fields of an expense",
            "edit-expense <id> <amount> <category> <description...> [flags as add-expense]",
            cmd_edit_expense,
        ),
        CommandEntry::new(
            "delete-expense",
            "Delete an expense",
            "delete-expense <id>",
            cmd_delete_expense,
        ),
        CommandEntry::new("list", "List expenses, newest first", "list [limit]", cmd_list),
        CommandEntry::new(
            "set-budget",
            "Create or update a budget",
            "set-budget <category|Overall> <amount>",
            cmd_set_budget,
        ),
        CommandEntry::new(
            "delete-budget",
            "Remove a budget",
            "delete-budget <category|Overall>",
            cmd_delete_budget,
        ),
        CommandEntry::new("budgets", "Show budget usage", "budgets", cmd_budgets),
        CommandEntry::new(
            "create-group",
            "Create a shared-expense group",
            "create-group <name> <member...>",
            cmd_create_group,
        ),
        CommandEntry::new(
            "group",
            "Show a group's balances and settlement plan",
            "group [name|id]",
            cmd_group,
        ),
        CommandEntry::new(
            "create-goal",
            "Create a savings goal",
            "create-goal <name> <target>",
            cmd_create_goal,
        ),
        CommandEntry::new(
            "contribute",
            "Add money to a savings goal",
            "contribute <goal> <amount>",
            cmd_contribute,
        ),
        CommandEntry::new("goals", "Show savings goals", "goals", cmd_goals),
        CommandEntry::new(
            "add-category",
            "Add an expense category",
            "add-category <name> [icon]",
            cmd_add_category,
        ),
        CommandEntry::new("categories", "List categories", "categories", cmd_categories),
        CommandEntry::new("streak", "Show the activity streak", "streak", cmd_streak),
        CommandEntry::new(
            "calendar",
            "Show active days for a month",
            "calendar [YYYY-MM]",
            cmd_calendar,
        ),
        CommandEntry::new(
            "achievements",
            "Show achievements",
            "achievements",
            cmd_achievements,
        ),
        CommandEntry::new("trend", "Show monthly personal spending", "trend", cmd_trend),
        CommandEntry::new("dashboard", "Show the summary dashboard", "dashboard", cmd_dashboard),
        CommandEntry::new("export", "Export expenses as CSV", "export [path]", cmd_export),
        CommandEntry::new(
            "config",
            "Show or change stored settings",
            "config [set <key> <value>]",
            cmd_config,
        ),
        CommandEntry::new("version", "Show build metadata", "version", cmd_version),
        CommandEntry::new("help", "Show available commands", "help [command]", cmd_help),
        CommandEntry::new("exit", "Exit the shell", "exit", cmd_exit),
    ]
}

/// Group requested on the command line.
#[derive(Debug, Default, PartialEq)]
enum GroupArg {
    /// No flag: new expenses are personal, edits keep the current group.
    #[default]
    Unchanged,
    Named(String),
    Personal,
}

/// Positional and flag arguments shared by `add-expense` and `edit-expense`.
///
/// Flags left out keep the edited expense's value.
#[derive(Debug, Default, PartialEq)]
struct ExpenseArgs {
    amount: f64,
    category: String,
    description: String,
    group: GroupArg,
    paid_by: Option<String>,
    recurring: Option<bool>,
}

fn parse_expense_args(args: &[&str]) -> Result<ExpenseArgs, CommandError> {
    let mut positional = Vec::new();
    let mut parsed = ExpenseArgs::default();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match *arg {
            "--group" => parsed.group = GroupArg::Named(flag_value(&mut iter, "--group")?),
            "--personal" => parsed.group = GroupArg::Personal,
            "--paid-by" => parsed.paid_by = Some(flag_value(&mut iter, "--paid-by")?),
            "--recurring" => parsed.recurring = Some(true),
            "--no-recurring" => parsed.recurring = Some(false),
            other => positional.push(other),
        }
    }

    if positional.len() < 3 {
        return Err(CommandError::InvalidArguments(
            "expected <amount> <category> <description...>".into(),
        ));
    }
    parsed.amount = parse_amount(positional[0])?;
    parsed.category = positional[1].to_string();
    parsed.description = positional[2..].join(" ");
    Ok(parsed)
}

fn flag_value(iter: &mut std::slice::Iter<'_, &str>, flag: &str) -> Result<String, CommandError> {
    iter.next()
        .map(|value| value.to_string())
        .ok_or_else(|| CommandError::InvalidArguments(format!("{flag} needs a value")))
}

fn parse_amount(raw: &str) -> Result<f64, CommandError> {
    raw.parse::<f64>()
        .map_err(|_| CommandError::InvalidArguments(format!("`{raw}` is not a valid amount")))
}

fn require_args(args: &[&str], count: usize, usage: &str) -> CommandResult {
    if args.len() < count {
        return Err(CommandError::InvalidArguments(format!("usage: {usage}")));
    }
    Ok(())
}

fn build_draft(
    context: &ShellContext,
    parsed: ExpenseArgs,
    existing: Option<&Expense>,
) -> Result<ExpenseDraft, CommandError> {
    let ledger = context.controller.ledger();
    let group_id = match &parsed.group {
        GroupArg::Named(key) => Some(GroupService::resolve(ledger, key)?),
        GroupArg::Personal => None,
        GroupArg::Unchanged => existing.and_then(|expense| expense.group_id),
    };
    let recurring = parsed
        .recurring
        .or_else(|| existing.map(|expense| expense.recurring))
        .unwrap_or(false);
    let paid_by = parsed
        .paid_by
        .or_else(|| existing.map(|expense| expense.paid_by.clone()))
        .unwrap_or_else(|| ledger.owner().to_string());

    let mut draft = ExpenseDraft::new(parsed.description, parsed.amount, parsed.category, paid_by)
        .recurring(recurring);
    if let Some(group_id) = group_id {
        draft = draft.in_group(group_id);
    }
    Ok(draft)
}

fn short_id(id: Uuid) -> String {
    id.to_string()[..8].to_string()
}

fn cmd_add_expense(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let parsed = parse_expense_args(args)?;
    let draft = build_draft(context, parsed, None)?;
    let amount = draft.amount;
    let outcome = context.controller.add_expense(draft)?;
    output::success(format!(
        "Added expense {} ({}).",
        short_id(outcome.value),
        context.money(amount)
    ));
    context.announce(outcome.unlocked);
    Ok(())
}

fn cmd_edit_expense(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (key, rest) = args.split_first().ok_or_else(|| {
        CommandError::InvalidArguments("usage: edit-expense <id> <amount> <category> ...".into())
    })?;
    let id = ExpenseService::resolve(context.controller.ledger(), key)?;
    let parsed = parse_expense_args(rest)?;
    let existing = context.controller.ledger().expense(id).cloned();
    let draft = build_draft(context, parsed, existing.as_ref())?;
    let outcome = context.controller.edit_expense(id, draft)?;
    output::success(format!("Updated expense {}.", short_id(id)));
    context.announce(outcome.unlocked);
    Ok(())
}

fn cmd_delete_expense(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    require_args(args, 1, "delete-expense <id>")?;
    let id = match ExpenseService::resolve(context.controller.ledger(), args[0]) {
        Ok(id) => id,
        Err(_) => {
            output::warning(format!("No expense matches `{}`.", args[0]));
            return Ok(());
        }
    };
    let outcome = context.controller.delete_expense(id);
    if outcome.value {
        output::success(format!("Deleted expense {}.", short_id(id)));
    }
    context.announce(outcome.unlocked);
    Ok(())
}

fn cmd_list(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let limit = match args.first() {
        Some(raw) => raw
            .parse::<usize>()
            .map_err(|_| CommandError::InvalidArguments(format!("`{raw}` is not a count")))?,
        None => usize::MAX,
    };
    let ledger = context.controller.ledger();
    if ledger.expenses.is_empty() {
        output::info("No expenses recorded.");
        return Ok(());
    }

    output::section("Expenses");
    for expense in ledger.expenses_newest_first().take(limit) {
        output::info(format_expense(context, expense));
    }
    Ok(())
}

fn format_expense(context: &ShellContext, expense: &Expense) -> String {
    let ledger = context.controller.ledger();
    let scope = match expense.group_id.and_then(|id| ledger.group(id)) {
        Some(group) => format!(" [{}]", group.name),
        None => String::new(),
    };
    let icon = ledger
        .category(&expense.category)
        .map(|category| category.icon.as_str())
        .unwrap_or("•");
    format!(
        "{}  {}  {} {:<14} {:>12}  {}{}{}",
        short_id(expense.id),
        expense.date.format("%Y-%m-%d"),
        icon,
        expense.category,
        context.money(expense.amount),
        expense.description,
        scope,
        if expense.recurring { " (recurring)" } else { "" },
    )
}

fn cmd_set_budget(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    require_args(args, 2, "set-budget <category|Overall> <amount>")?;
    let amount = parse_amount(args[1])?;
    let outcome = context.controller.set_budget(args[0], amount)?;
    match outcome.value {
        Some(previous) => output::success(format!(
            "Budget for {} changed from {} to {}.",
            args[0],
            context.money(previous),
            context.money(amount)
        )),
        None => output::success(format!(
            "Budget for {} set to {}.",
            args[0],
            context.money(amount)
        )),
    }
    context.announce(outcome.unlocked);
    Ok(())
}

fn cmd_delete_budget(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    require_args(args, 1, "delete-budget <category|Overall>")?;
    let outcome = context.controller.delete_budget(args[0]);
    if outcome.value {
        output::success(format!("Budget for {} removed.", args[0]));
    } else {
        output::warning(format!("No budget set for {}.", args[0]));
    }
    context.announce(outcome.unlocked);
    Ok(())
}

fn cmd_budgets(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let statuses = context.controller.budget_status();
    if statuses.is_empty() {
        output::info("No budgets set. Use `set-budget` to add one.");
        return Ok(());
    }

    output::section("Budgets");
    for status in statuses {
        let line = format!(
            "{:<14} {} {:>5.1}%  {} / {}",
            status.category,
            output::progress_bar(status.percentage, BAR_WIDTH),
            status.percentage,
            context.money(status.spent_amount),
            context.money(status.budget_amount),
        );
        let line = match status.severity() {
            BudgetSeverity::Normal => line.normal(),
            BudgetSeverity::Warning => line.yellow(),
            BudgetSeverity::Critical => line.red(),
        };
        if status.exceeded {
            output::info(format!("{line}  EXCEEDED"));
        } else {
            output::info(format!("{line}  {} left", context.money(status.remaining())));
        }
    }
    Ok(())
}

fn cmd_create_group(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    require_args(args, 2, "create-group <name> <member...>")?;
    let outcome = context.controller.create_group(args[0], &args[1..])?;
    context.selected_group = Some(outcome.value);
    output::success(format!("Group {} created.", args[0]));
    context.announce(outcome.unlocked);
    Ok(())
}

fn cmd_group(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let group_id = match args.first() {
        Some(key) => GroupService::resolve(context.controller.ledger(), key)?,
        None => match context.selected_group {
            Some(id) => id,
            None => {
                let ledger = context.controller.ledger();
                if ledger.groups.is_empty() {
                    output::info("No groups yet. Use `create-group` to add one.");
                } else {
                    output::section("Groups");
                    for group in &ledger.groups {
                        output::info(format!("{}  ({})", group.name, group.members.join(", ")));
                    }
                }
                return Ok(());
            }
        },
    };

    let sheet = context.controller.group_sheet(group_id)?;
    context.selected_group = Some(group_id);
    render_group_sheet(context, &sheet);
    Ok(())
}

fn render_group_sheet(context: &ShellContext, sheet: &GroupBalanceSheet) {
    let settlement = &sheet.settlement;
    output::section(format!("Group {}", sheet.group.name));
    output::info(format!(
        "Total spent: {}  Share per member: {}",
        context.money(settlement.total_spent),
        context.money(settlement.share)
    ));

    for expense in &sheet.expenses {
        output::info(format!(
            "  {} paid {} for {}",
            expense.paid_by,
            context.money(expense.amount),
            expense.description
        ));
    }

    output::info("Balances:");
    for entry in &settlement.balances {
        output::info(format!(
            "  {:<12} paid {:>12}  balance {:>12}",
            entry.member,
            context.money(entry.paid),
            context.money(entry.balance)
        ));
    }
    if settlement.unattributed > 0.0 {
        output::warning(format!(
            "{} was paid by non-members and is not credited to anyone.",
            context.money(settlement.unattributed)
        ));
    }

    if settlement.is_settled() {
        output::success("All settled up.");
        return;
    }
    output::info("Settlement:");
    for transfer in &settlement.transfers {
        output::info(format!(
            "  {} pays {} {}",
            transfer.from,
            transfer.to,
            context.money(transfer.amount)
        ));
    }
}

fn cmd_create_goal(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    require_args(args, 2, "create-goal <name> <target>")?;
    let target = parse_amount(args[1])?;
    let outcome = context.controller.create_goal(args[0], target)?;
    output::success(format!("Goal {} created with target {}.", args[0], context.money(target)));
    context.announce(outcome.unlocked);
    Ok(())
}

fn cmd_contribute(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    require_args(args, 2, "contribute <goal> <amount>")?;
    let goal_id = GoalService::resolve(context.controller.ledger(), args[0])?;
    let amount = parse_amount(args[1])?;
    let outcome = context.controller.contribute_to_goal(goal_id, amount)?;
    output::success(format!("Saved {} towards {}.", context.money(outcome.value), args[0]));
    context.announce(outcome.unlocked);
    Ok(())
}

fn cmd_goals(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let goals = &context.controller.ledger().goals;
    if goals.is_empty() {
        output::info("No goals yet. Use `create-goal` to add one.");
        return Ok(());
    }
    output::section("Goals");
    for goal in goals {
        let marker = if goal.is_reached() { "  reached" } else { "" };
        output::info(format!(
            "{:<16} {} {:>5.1}%  {} / {}{}",
            goal.name,
            output::progress_bar(goal.progress_percentage(), BAR_WIDTH),
            goal.progress_percentage(),
            context.money(goal.current_amount),
            context.money(goal.target_amount),
            marker
        ));
    }
    Ok(())
}

fn cmd_add_category(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    require_args(args, 1, "add-category <name> [icon]")?;
    let icon = args.get(1).copied().unwrap_or("🏷️");
    let outcome = context.controller.add_category(args[0], icon)?;
    output::success(format!("Category {} {} added.", icon, args[0]));
    context.announce(outcome.unlocked);
    Ok(())
}

fn cmd_categories(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    output::section("Categories");
    for category in &context.controller.ledger().categories {
        output::info(format!("{} {}", category.icon, category.name));
    }
    Ok(())
}

fn cmd_streak(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let state = context.controller.streak_state();
    output::section("Streak");
    output::info(format!("Current streak: {} day(s)", state.streak));
    output::info(format!("Points: {}", state.points));
    match state.last_active_date {
        Some(date) => output::info(format!("Last active: {date}")),
        None => output::info("No activity yet."),
    }
    Ok(())
}

fn cmd_calendar(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let calendar = match args.first() {
        Some(raw) => {
            let (year, month) = parse_year_month(raw)?;
            context
                .controller
                .month_calendar(year, month)
                .ok_or_else(|| CommandError::InvalidArguments(format!("`{raw}` is not a month")))?
        }
        None => context.controller.streak_calendar(),
    };

    output::section(format!("{:04}-{:02}", calendar.year, calendar.month));
    output::info(" Su  Mo  Tu  We  Th  Fr  Sa");
    let mut cells: Vec<String> = vec!["    ".to_string(); calendar.leading_blanks as usize];
    for day in &calendar.days {
        let cell = match (day.today, day.active) {
            (true, _) => format!("[{:>2}]", day.day),
            (false, true) => format!(" {:>2}*", day.day),
            (false, false) => format!(" {:>2} ", day.day),
        };
        cells.push(if day.active { cell.green().to_string() } else { cell });
    }
    for week in cells.chunks(7) {
        output::info(week.concat());
    }
    output::info("* active day, [ ] today");
    Ok(())
}

fn parse_year_month(raw: &str) -> Result<(i32, u32), CommandError> {
    let invalid = || CommandError::InvalidArguments(format!("`{raw}` is not in YYYY-MM form"));
    let (year, month) = raw.split_once('-').ok_or_else(invalid)?;
    let year = year.parse::<i32>().map_err(|_| invalid())?;
    let month = month.parse::<u32>().map_err(|_| invalid())?;
    Ok((year, month))
}

fn cmd_achievements(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let state = context.controller.achievement_state(&context.last_unlocked);
    output::section("Achievements");
    for card in &state.cards {
        let status = if card.unlocked { "[x]" } else { "[ ]" };
        let fresh = if state.newly_unlocked.contains(&card.key) {
            "  new!"
        } else {
            ""
        };
        output::info(format!(
            "{} {} {:<16} {}{}",
            status, card.icon, card.title, card.description, fresh
        ));
    }
    Ok(())
}

fn cmd_trend(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let series = context.controller.monthly_spending();
    let peak = series.iter().map(|month| month.total).fold(0.0, f64::max);
    output::section("Monthly spending");
    for month in &series {
        let percentage = if peak > 0.0 {
            month.total / peak * 100.0
        } else {
            0.0
        };
        output::info(format!(
            "{}  {} {:>12}",
            month.label,
            output::progress_bar(percentage, BAR_WIDTH),
            context.money(month.total)
        ));
    }
    Ok(())
}

fn cmd_dashboard(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let summary = context.controller.dashboard();
    output::section("Dashboard");
    output::info(format!("Total spent   : {}", context.money(summary.total_spent)));
    if summary.overall_budget > 0.0 {
        output::info(format!(
            "Overall budget: {} ({} left)",
            context.money(summary.overall_budget),
            context.money(summary.overall_budget - summary.total_spent)
        ));
    } else {
        output::info("Overall budget: not set");
    }
    output::info(format!("Streak        : {} day(s)", summary.streak));
    output::info(format!("Points        : {}", summary.points));

    if summary.recent.is_empty() {
        return Ok(());
    }
    output::info("Recent expenses:");
    for expense in &summary.recent {
        output::info(format!("  {}", format_expense(context, expense)));
    }
    Ok(())
}

fn cmd_export(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let path = args
        .first()
        .map(PathBuf::from)
        .unwrap_or_else(paths::default_export_file);
    let rows = context.controller.export_to_path(&path)?;
    output::success(format!("Exported {} expense(s) to {}.", rows, path.display()));
    Ok(())
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] => {
            output::section("Configuration");
            output::info(format!("File: {}", context.config_manager.path().display()));
            for (key, value) in context.controller.config().entries() {
                output::info(format!("  {:<24} {}", key, value));
            }
            Ok(())
        }
        ["set", key, value] => {
            let mut stored = context.config_manager.load()?;
            stored.set_value(key, value)?;
            context.config_manager.save(&stored)?;
            output::success(format!("{key} set to {value}."));
            output::info("The new value applies from the next session.");
            Ok(())
        }
        _ => Err(CommandError::InvalidArguments(
            "usage: config [set <key> <value>]".into(),
        )),
    }
}

fn cmd_version(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let info = build_info::current();
    output::section(format!("Expense Core {}", info.version));
    output::info(format!("  Build hash: {}", info.git_hash));
    output::info(format!("  Built at  : {}", info.built_at));
    output::info(format!("  Target    : {} ({})", info.target, info.profile));
    output::info(format!("  Rustc     : {}", info.rustc));
    Ok(())
}

fn cmd_help(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if let Some(name) = args.first() {
        match context.command(&name.to_lowercase()) {
            Some(entry) => {
                output::section(entry.name);
                output::info(entry.description);
                output::info(format!("Usage: {}", entry.usage));
            }
            None => context.suggest_command(name),
        }
        return Ok(());
    }

    output::section("Commands");
    for entry in context.registry.iter() {
        output::info(format!("  {:<16} {}", entry.name, entry.description));
    }
    Ok(())
}

fn cmd_exit(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    Err(CommandError::ExitRequested)
}
