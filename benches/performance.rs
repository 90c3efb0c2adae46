use chrono::{Duration, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use expense_core::core::{compute_budget_status, compute_group_settlement, monthly_spending};
use expense_core::ledger::{Category, Expense, Group, Ledger, OVERALL_BUDGET};

const CATEGORIES: [&str; 4] = ["Food", "Transport", "Shopping", "Other"];

fn build_sample_ledger(expense_count: usize) -> (Ledger, Group) {
    let categories = CATEGORIES
        .iter()
        .map(|name| Category::new(*name, "•"))
        .collect();
    let mut ledger = Ledger::new("You", categories);
    let members: Vec<String> = (1..12).map(|index| format!("Friend{index}")).collect();
    let group = Group::new("Festival", "You", &members).expect("valid group");
    let group_id = ledger.add_group(group.clone());

    let start = Utc.with_ymd_and_hms(2025, 1, 1, 9, 0, 0).unwrap();
    for idx in 0..expense_count {
        let date = start + Duration::hours((idx % 4_000) as i64);
        let category = CATEGORIES[idx % CATEGORIES.len()];
        let amount = 5.0 + (idx % 250) as f64;
        let expense = if idx % 3 == 0 {
            let payer = group.members[idx % group.members.len()].clone();
            Expense::new("shared", amount, category, date, payer).with_group(group_id)
        } else {
            Expense::new("personal", amount, category, date, "You")
        };
        ledger.add_expense(expense);
    }

    ledger.budgets.set(OVERALL_BUDGET, 50_000.0);
    for name in CATEGORIES {
        ledger.budgets.set(name, 10_000.0);
    }
    (ledger, group)
}

fn bench_engine(c: &mut Criterion) {
    let (ledger, group) = build_sample_ledger(black_box(10_000));
    let today = Utc
        .with_ymd_and_hms(2025, 6, 30, 0, 0, 0)
        .unwrap()
        .date_naive();

    c.bench_function("budget_status_10k", |b| {
        b.iter(|| black_box(compute_budget_status(&ledger)))
    });

    c.bench_function("group_settlement_10k", |b| {
        b.iter(|| {
            let expenses = ledger.group_expenses(group.id);
            black_box(compute_group_settlement(&group, expenses.iter().copied(), 0.01))
        })
    });

    c.bench_function("monthly_spending_10k", |b| {
        b.iter(|| black_box(monthly_spending(&ledger, today, 12, chrono_tz::Asia::Kolkata)))
    });
}

criterion_group!(benches, bench_engine);
criterion_main!(benches);
