//! Debt settlement for a group that splits every payment equally.
//!
//! Balances are computed in exact decimal arithmetic; only transfer amounts
//! are rounded to cents. Matching is the usual greedy largest-debtor against
//! largest-creditor heuristic: deterministic and few transfers for small
//! groups, but not a guaranteed minimum for every input.

use crate::core::models::{Member, MemberBalance, Payment, Settlement};
use rust_decimal::{Decimal, RoundingStrategy};
use std::cmp::Ordering;
use std::collections::HashMap;
use tracing::warn;

/// One cent. Balances and transfers at or below this are treated as settled.
pub const SETTLEMENT_THRESHOLD: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

const CURRENCY_SCALE: u32 = 2;

/// Rounds to cents, halves away from zero.
pub fn round_currency(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(CURRENCY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Net balance of every member against an equal split of the total spend.
///
/// Payments whose `member_id` matches no member still count toward the total
/// (and so toward everyone's share) but are credited to nobody. Amounts whose
/// sum does not fit in a `Decimal` yield no balances at all.
pub fn net_balances(members: &[Member], payments: &[Payment]) -> Vec<MemberBalance> {
    if members.is_empty() {
        return Vec::new();
    }

    try_net_balances(members, payments).unwrap_or_else(|| {
        warn!(
            members = members.len(),
            payments = payments.len(),
            "payment totals overflow, no balances computed"
        );
        Vec::new()
    })
}

fn try_net_balances(members: &[Member], payments: &[Payment]) -> Option<Vec<MemberBalance>> {
    let total_spend = payments
        .iter()
        .try_fold(Decimal::ZERO, |total, p| total.checked_add(p.amount))?;
    let equal_share = total_spend.checked_div(Decimal::from(members.len()))?;

    let mut paid_by_member: HashMap<&str, Decimal> =
        members.iter().map(|m| (m.id.as_str(), Decimal::ZERO)).collect();
    for payment in payments {
        if let Some(paid) = paid_by_member.get_mut(payment.member_id.as_str()) {
            *paid = paid.checked_add(payment.amount)?;
        }
    }

    members
        .iter()
        .map(|member| {
            let total_paid = paid_by_member
                .get(member.id.as_str())
                .copied()
                .unwrap_or(Decimal::ZERO);
            Some(MemberBalance {
                member_id: member.id.clone(),
                member_name: member.name.clone(),
                total_paid,
                equal_share,
                net: total_paid.checked_sub(equal_share)?,
            })
        })
        .collect()
}

/// Transfers that bring every member's net balance to within one cent of zero.
///
/// Total over any input: empty members or payments yield no transfers, and
/// malformed input (duplicate ids, negative amounts) is not rejected here.
pub fn compute_settlements(members: &[Member], payments: &[Payment]) -> Vec<Settlement> {
    if members.is_empty() || payments.is_empty() {
        return Vec::new();
    }

    let balances = net_balances(members, payments);

    let mut creditors: Vec<OpenPosition<'_>> = balances
        .iter()
        .filter(|b| b.net > SETTLEMENT_THRESHOLD)
        .map(|b| OpenPosition::new(b, b.net))
        .collect();
    let mut debtors: Vec<OpenPosition<'_>> = balances
        .iter()
        .filter(|b| b.net < -SETTLEMENT_THRESHOLD)
        .map(|b| OpenPosition::new(b, -b.net))
        .collect();

    let mut settlements = Vec::new();
    loop {
        creditors.sort_by(OpenPosition::largest_first);
        debtors.sort_by(OpenPosition::largest_first);

        let (Some(debtor), Some(creditor)) = (debtors.first_mut(), creditors.first_mut()) else {
            break;
        };

        let transfer = round_currency(debtor.remaining.min(creditor.remaining));
        if transfer > SETTLEMENT_THRESHOLD {
            settlements.push(Settlement {
                from_member_id: debtor.balance.member_id.clone(),
                from_member_name: debtor.balance.member_name.clone(),
                to_member_id: creditor.balance.member_id.clone(),
                to_member_name: creditor.balance.member_name.clone(),
                amount: transfer,
            });
        }

        // The smaller side ends within half a cent of zero, so each pass
        // retires at least one position.
        debtor.remaining -= transfer;
        creditor.remaining -= transfer;

        debtors.retain(OpenPosition::is_open);
        creditors.retain(OpenPosition::is_open);
    }

    settlements
}

/// A debtor or creditor still being matched; `remaining` is a magnitude.
struct OpenPosition<'a> {
    balance: &'a MemberBalance,
    remaining: Decimal,
}

impl<'a> OpenPosition<'a> {
    fn new(balance: &'a MemberBalance, remaining: Decimal) -> Self {
        OpenPosition { balance, remaining }
    }

    fn is_open(&self) -> bool {
        self.remaining > SETTLEMENT_THRESHOLD
    }

    fn largest_first(a: &Self, b: &Self) -> Ordering {
        b.remaining
            .cmp(&a.remaining)
            .then_with(|| a.balance.member_id.cmp(&b.balance.member_id))
    }
}
