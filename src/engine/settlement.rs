use crate::core::balance::{Balance, Debt};
use crate::core::expense::Expense;
use crate::core::member::Member;
use crate::core::payment::Payment;
use crate::engine::{round_cents, CENT};
use log::debug;
use rust_decimal::Decimal;

/// Global settlement: balance aggregation and greedy debt simplification.
///
/// This is the public-group path. All expenses and payments are folded
/// into one net position per member, then a greedy sweep suggests the
/// transfers that zero every position.
pub struct SettlementEngine;

impl SettlementEngine {
    /// Fold expenses and payments into per-member balances.
    ///
    /// # Algorithm
    ///
    /// 1. Start one zeroed balance per member, in roster order.
    /// 2. Each expense adds its amount to the payer's `total_paid` and each
    ///    participant's share to their `total_owed`.
    /// 3. Each payment is resolved by display name against the roster
    ///    (first match). It adds to the payer's `total_paid` and the
    ///    receiver's `total_owed` — the receiver was owed money and has now
    ///    been given it, so their claim shrinks. Payments naming an unknown
    ///    member on either side are silently skipped.
    /// 4. `net_balance = total_paid - total_owed`.
    ///
    /// Permissive by design: expenses referencing members outside the
    /// roster simply contribute nothing to anyone. Accumulation is
    /// unrounded; rounding happens only when debts are emitted.
    pub fn calculate_balances(
        members: &[Member],
        expenses: &[Expense],
        payments: &[Payment],
    ) -> Vec<Balance> {
        let mut balances: Vec<Balance> = members
            .iter()
            .map(|m| Balance::zero(m.id.clone(), m.name.clone()))
            .collect();

        for expense in expenses {
            if let Some(payer) = balances.iter_mut().find(|b| &b.member_id == expense.paid_by())
            {
                payer.total_paid += expense.amount();
            }
            for balance in balances.iter_mut() {
                balance.total_owed += expense.share_of(&balance.member_id);
            }
        }

        for payment in payments {
            let payer_known = balances.iter().any(|b| b.member_name == payment.from());
            let receiver_known = balances.iter().any(|b| b.member_name == payment.to());
            if !payer_known || !receiver_known {
                debug!(
                    "ignoring payment {} -> {}: unresolved member name",
                    payment.from(),
                    payment.to()
                );
                continue;
            }
            if let Some(payer) = balances.iter_mut().find(|b| b.member_name == payment.from())
            {
                payer.total_paid += payment.amount();
            }
            if let Some(receiver) = balances.iter_mut().find(|b| b.member_name == payment.to())
            {
                receiver.total_owed += payment.amount();
            }
        }

        for balance in balances.iter_mut() {
            balance.net_balance = balance.total_paid - balance.total_owed;
        }
        balances
    }

    /// Reduce net balances to a small set of suggested transfers.
    ///
    /// Largest-first greedy matching: repeatedly pair the biggest remaining
    /// creditor with the biggest remaining debtor and transfer as much as
    /// possible. This minimizes transfer count heuristically, not optimally
    /// in the general case.
    ///
    /// Positions within [`CENT`] of zero are treated as settled, and
    /// emitted amounts are rounded to whole cents. The sum of emitted debts
    /// equals the sum of positive net balances, up to rounding.
    pub fn simplify_debts(balances: &[Balance]) -> Vec<Debt> {
        let mut creditors: Vec<(String, Decimal)> = balances
            .iter()
            .filter(|b| b.net_balance > CENT)
            .map(|b| (b.member_name.clone(), b.net_balance))
            .collect();
        let mut debtors: Vec<(String, Decimal)> = balances
            .iter()
            .filter(|b| b.net_balance < -CENT)
            .map(|b| (b.member_name.clone(), -b.net_balance))
            .collect();

        creditors.sort_by(|a, b| b.1.cmp(&a.1));
        debtors.sort_by(|a, b| b.1.cmp(&a.1));

        let mut debts = Vec::new();
        let mut i = 0;
        let mut j = 0;

        while i < creditors.len() && j < debtors.len() {
            let amount = creditors[i].1.min(debtors[j].1);

            if amount > CENT {
                debts.push(Debt::new(
                    debtors[j].0.clone(),
                    creditors[i].0.clone(),
                    round_cents(amount),
                ));
            }

            creditors[i].1 -= amount;
            debtors[j].1 -= amount;

            if creditors[i].1 < CENT {
                i += 1;
            }
            if debtors[j].1 < CENT {
                j += 1;
            }
        }

        debug!(
            "simplified {} balances into {} transfers",
            balances.len(),
            debts.len()
        );
        debts
    }
}
