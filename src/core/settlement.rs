//! Equal-split balances and a greedy transfer plan for one group.
//!
//! The plan is correct but not minimal: each debtor pays creditors in
//! membership order until their debt is cleared, so the number of transfers
//! can exceed the minimum possible.

use serde::{Deserialize, Serialize};

use crate::ledger::{Expense, Group};

/// A directed payment that moves a debtor and a creditor toward zero.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transfer {
    pub from: String,
    pub to: String,
    pub amount: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MemberBalance {
    pub member: String,
    pub paid: f64,
    /// Paid minus share. Negative members owe money, positive members are owed.
    pub balance: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GroupSettlement {
    pub total_spent: f64,
    pub share: f64,
    /// Pre-settlement balances in membership order.
    pub balances: Vec<MemberBalance>,
    pub transfers: Vec<Transfer>,
    /// Spend paid by someone outside the member list; it is not credited to anyone.
    pub unattributed: f64,
}

impl GroupSettlement {
    pub fn balance_of(&self, member: &str) -> Option<f64> {
        self.balances
            .iter()
            .find(|entry| entry.member == member)
            .map(|entry| entry.balance)
    }

    /// True when no transfer is worth showing.
    pub fn is_settled(&self) -> bool {
        self.transfers.is_empty()
    }

    pub fn paid_by(&self, debtor: &str) -> f64 {
        self.transfers
            .iter()
            .filter(|transfer| transfer.from == debtor)
            .map(|transfer| transfer.amount)
            .sum()
    }
}

/// Computes balances and a transfer plan for `group` from its expenses.
///
/// Transfers at or below `epsilon` are dropped from the plan as rounding noise.
pub fn compute_group_settlement<'a, I>(group: &Group, expenses: I, epsilon: f64) -> GroupSettlement
where
    I: IntoIterator<Item = &'a Expense>,
{
    let members = &group.members;
    let mut paid = vec![0.0_f64; members.len()];
    let mut total_spent = 0.0;
    let mut unattributed = 0.0;

    for expense in expenses {
        total_spent += expense.amount;
        match members.iter().position(|member| *member == expense.paid_by) {
            Some(index) => paid[index] += expense.amount,
            None => {
                unattributed += expense.amount;
                tracing::warn!(
                    group = %group.name,
                    paid_by = %expense.paid_by,
                    amount = expense.amount,
                    "expense paid by a non-member is excluded from settlement"
                );
            }
        }
    }

    let share = if members.is_empty() {
        0.0
    } else {
        total_spent / members.len() as f64
    };

    let balances: Vec<MemberBalance> = members
        .iter()
        .zip(&paid)
        .map(|(member, paid)| MemberBalance {
            member: member.clone(),
            paid: *paid,
            balance: paid - share,
        })
        .collect();

    let transfers = settle(&balances)
        .into_iter()
        .filter(|transfer| transfer.amount > epsilon)
        .collect::<Vec<_>>();

    tracing::debug!(
        group = %group.name,
        members = members.len(),
        transfers = transfers.len(),
        "group settlement computed"
    );

    GroupSettlement {
        total_spent,
        share,
        balances,
        transfers,
        unattributed,
    }
}

/// Greedy pass: every debtor walks the creditors in order, paying
/// `min(remaining debt, remaining credit)` against running balances.
fn settle(balances: &[MemberBalance]) -> Vec<Transfer> {
    let mut running: Vec<f64> = balances.iter().map(|entry| entry.balance).collect();
    let debtors: Vec<usize> = (0..running.len()).filter(|&i| running[i] < 0.0).collect();
    let creditors: Vec<usize> = (0..running.len()).filter(|&i| running[i] > 0.0).collect();

    let mut transfers = Vec::new();
    for &debtor in &debtors {
        let mut owed = -running[debtor];
        for &creditor in &creditors {
            if owed <= 0.0 {
                break;
            }
            let available = running[creditor];
            if available <= 0.0 {
                continue;
            }
            let payment = owed.min(available);
            if payment > 0.0 {
                transfers.push(Transfer {
                    from: balances[debtor].member.clone(),
                    to: balances[creditor].member.clone(),
                    amount: payment,
                });
            }
            running[debtor] += payment;
            running[creditor] -= payment;
            owed -= payment;
        }
    }
    transfers
}
