//! Property tests for the pure engine derivations.

use chrono::{Duration, TimeZone, Utc};
use expense_core::core::{
    compute_budget_status, compute_group_settlement, evaluate_achievements, StreakRules,
    StreakTracker,
};
use expense_core::ledger::{
    Achievement, Category, Expense, Goal, Group, Ledger, UserActivityState, OVERALL_BUDGET,
};
use proptest::prelude::*;

fn member_name(index: usize) -> String {
    if index == 0 {
        "You".to_string()
    } else {
        format!("Member{index}")
    }
}

/// A group of 1..6 members plus expenses paid by random members.
fn arb_group_expenses() -> impl Strategy<Value = (Group, Vec<Expense>)> {
    (1usize..6)
        .prop_flat_map(|size| {
            (
                Just(size),
                prop::collection::vec((0..size, 0.0f64..5_000.0), 0..40),
            )
        })
        .prop_map(|(size, payments)| {
            let others: Vec<String> = (1..size).map(member_name).collect();
            let group = Group::new("Trip", "You", others).unwrap();
            let date = Utc.with_ymd_and_hms(2025, 2, 1, 12, 0, 0).unwrap();
            let expenses = payments
                .into_iter()
                .map(|(payer, amount)| {
                    Expense::new("shared", amount, "Food", date, member_name(payer))
                        .with_group(group.id)
                })
                .collect();
            (group, expenses)
        })
}

proptest! {
    #[test]
    fn balances_sum_to_zero((group, expenses) in arb_group_expenses()) {
        let sheet = compute_group_settlement(&group, &expenses, 0.0);
        let total: f64 = sheet.balances.iter().map(|entry| entry.balance).sum();
        prop_assert!(total.abs() < 1e-6, "sum of balances was {}", total);
        prop_assert_eq!(sheet.balances.len(), group.members.len());
    }

    #[test]
    fn debtors_pay_exactly_what_they_owe((group, expenses) in arb_group_expenses()) {
        let sheet = compute_group_settlement(&group, &expenses, 0.0);
        for entry in &sheet.balances {
            if entry.balance < 0.0 {
                let paid = sheet.paid_by(&entry.member);
                prop_assert!((paid - entry.balance.abs()).abs() < 1e-6);
            }
        }
        for transfer in &sheet.transfers {
            prop_assert!(transfer.amount > 0.0);
            prop_assert!(sheet.balance_of(&transfer.from).unwrap_or(0.0) < 0.0);
            prop_assert!(sheet.balance_of(&transfer.to).unwrap_or(0.0) > 0.0);
        }
    }

    #[test]
    fn epsilon_only_hides_small_transfers((group, expenses) in arb_group_expenses()) {
        let exact = compute_group_settlement(&group, &expenses, 0.0);
        let filtered = compute_group_settlement(&group, &expenses, 0.01);
        prop_assert!(filtered.transfers.iter().all(|transfer| transfer.amount > 0.01));
        let kept = exact.transfers.iter().filter(|transfer| transfer.amount > 0.01).count();
        prop_assert_eq!(filtered.transfers.len(), kept);
    }

    #[test]
    fn budget_percentage_stays_in_range(
        spends in prop::collection::vec(0.0f64..1_000.0, 0..30),
        budget in 0.0f64..2_000.0,
    ) {
        let mut ledger = Ledger::new("You", vec![Category::new("Food", "🍔")]);
        let date = Utc.with_ymd_and_hms(2025, 2, 1, 12, 0, 0).unwrap();
        for amount in &spends {
            ledger.add_expense(Expense::new("meal", *amount, "Food", date, "You"));
        }
        ledger.budgets.set("Food", budget);
        ledger.budgets.set(OVERALL_BUDGET, budget);

        for status in compute_budget_status(&ledger) {
            prop_assert!((0.0..=100.0).contains(&status.percentage));
            prop_assert_eq!(status.exceeded, status.spent_amount >= status.budget_amount);
        }
    }

    #[test]
    fn achievements_never_relock(steps in prop::collection::vec(0u8..5, 1..40)) {
        let mut ledger = Ledger::new("You", vec![Category::new("Food", "🍔")]);
        let date = Utc.with_ymd_and_hms(2025, 2, 1, 12, 0, 0).unwrap();
        let mut unlocked: Vec<Achievement> = Vec::new();

        for step in steps {
            match step {
                0 => { ledger.add_expense(Expense::new("x", 1.0, "Food", date, "You")); }
                1 => { ledger.expenses.pop(); }
                2 => { ledger.budgets.set("Food", 10.0); }
                3 => { ledger.budgets.remove("Food"); }
                _ => { ledger.add_goal(Goal::new("Bike", 100.0)); }
            }
            let fresh = evaluate_achievements(&mut ledger);
            for achievement in &fresh {
                prop_assert!(!unlocked.contains(achievement));
            }
            unlocked.extend(fresh);
            for achievement in &unlocked {
                prop_assert!(ledger.user.is_unlocked(*achievement));
            }
        }
    }

    #[test]
    fn streak_counts_trailing_consecutive_days(gaps in prop::collection::vec(0i64..4, 1..30)) {
        let tracker = StreakTracker::new(chrono_tz::UTC, StreakRules::default());
        let mut user = UserActivityState::new("You");
        let mut now = Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap();
        let mut expected = 0u32;
        let mut expected_points = 0u64;

        for (index, gap) in gaps.into_iter().enumerate() {
            now += Duration::days(gap);
            if index == 0 {
                expected = 1;
            } else {
                match gap {
                    0 => continue,
                    1 => expected += 1,
                    _ => expected = 1,
                }
            }
            tracker.record_activity(&mut user, now);
            if expected > 10 {
                expected_points += 10;
            }
            prop_assert_eq!(user.streak, expected);
        }
        prop_assert_eq!(user.points, expected_points);
    }
}
