use crate::core::balance::Debt;
use crate::core::expense::Expense;
use crate::core::member::{Member, MemberId};
use crate::core::payment::Payment;
use crate::engine::{round_cents, CENT};
use log::debug;
use rust_decimal::Decimal;
use std::collections::HashMap;

/// Tracks the net obligation between each ordered pair of members.
///
/// Debts in one direction offset debts in the other: if A owes B 10 and
/// B owes A 4, the pair nets to A owes B 6. Nothing nets across pairs —
/// that is the whole point. A transfer through a third member would rely
/// on transactions a private-group viewer may not be able to see.
///
/// Internally each pair is stored once, keyed by the smaller member id,
/// with a signed amount: positive means the smaller id owes the larger.
#[derive(Debug, Clone, Default)]
pub struct PairLedger {
    positions: HashMap<(MemberId, MemberId), Decimal>,
}

impl PairLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `debtor` owes `creditor` an additional `amount`.
    /// Negative amounts are allowed and reduce the existing obligation.
    pub fn record(&mut self, debtor: &MemberId, creditor: &MemberId, amount: Decimal) {
        if debtor == creditor {
            return;
        }
        let (key, signed) = if debtor < creditor {
            ((debtor.clone(), creditor.clone()), amount)
        } else {
            ((creditor.clone(), debtor.clone()), -amount)
        };
        *self.positions.entry(key).or_insert(Decimal::ZERO) += signed;
    }

    /// The net amount `debtor` currently owes `creditor`. Negative means
    /// the obligation runs the other way.
    pub fn net(&self, debtor: &MemberId, creditor: &MemberId) -> Decimal {
        if debtor == creditor {
            return Decimal::ZERO;
        }
        let (key, sign) = if debtor < creditor {
            ((debtor.clone(), creditor.clone()), Decimal::ONE)
        } else {
            ((creditor.clone(), debtor.clone()), -Decimal::ONE)
        };
        self.positions.get(&key).copied().unwrap_or(Decimal::ZERO) * sign
    }

    /// Whether every pair is within a cent of settled.
    pub fn is_settled(&self) -> bool {
        self.positions.values().all(|v| v.abs() <= CENT)
    }

    /// Emit one debt per pair with a non-negligible net amount, with
    /// member ids projected to display names. Output is sorted by
    /// (from, to) so results are deterministic.
    pub fn to_debts(&self, members: &[Member]) -> Vec<Debt> {
        let name_of = |id: &MemberId| -> Option<&str> {
            members.iter().find(|m| &m.id == id).map(|m| m.name.as_str())
        };

        let mut debts: Vec<Debt> = self
            .positions
            .iter()
            .filter(|(_, amount)| amount.abs() > CENT)
            .filter_map(|((low, high), amount)| {
                let (debtor, creditor) = if *amount > Decimal::ZERO {
                    (low, high)
                } else {
                    (high, low)
                };
                match (name_of(debtor), name_of(creditor)) {
                    (Some(from), Some(to)) => {
                        Some(Debt::new(from, to, round_cents(amount.abs())))
                    }
                    _ => None,
                }
            })
            .collect();

        debts.sort_by(|a, b| a.from.cmp(&b.from).then_with(|| a.to.cmp(&b.to)));
        debts
    }
}

/// Per-transaction debt derivation for private groups.
///
/// Where [`SettlementEngine`](crate::engine::settlement::SettlementEngine)
/// nets every member against the whole group, this engine keeps one
/// obligation per member pair, attributable to the specific expenses and
/// payments between them. Run over a viewer's visible subset, the result
/// is fully explained by transactions the viewer can inspect.
pub struct DirectDebtEngine;

impl DirectDebtEngine {
    /// Compute pairwise direct debts from a (possibly filtered) view of
    /// a group's activity.
    ///
    /// # Algorithm
    ///
    /// - Per expense: every participant other than the payer owes the
    ///   payer their share. Shares accumulate into the pair ledger and
    ///   net against obligations in the reverse direction.
    /// - Per payment: the paid amount reduces what `from` owes `to`.
    ///   Payments naming unknown members are silently skipped.
    ///
    /// One debt is emitted per pair with a net amount over a cent.
    pub fn calculate_direct_debts(
        members: &[Member],
        expenses: &[Expense],
        payments: &[Payment],
    ) -> Vec<Debt> {
        let mut ledger = PairLedger::new();

        for expense in expenses {
            for participant in expense.participants() {
                if participant == expense.paid_by() {
                    continue;
                }
                ledger.record(participant, expense.paid_by(), expense.share_of(participant));
            }
        }

        for payment in payments {
            let payer = members.iter().find(|m| m.name == payment.from());
            let receiver = members.iter().find(|m| m.name == payment.to());
            match (payer, receiver) {
                (Some(payer), Some(receiver)) => {
                    ledger.record(&payer.id, &receiver.id, -payment.amount());
                }
                _ => debug!(
                    "ignoring payment {} -> {}: unresolved member name",
                    payment.from(),
                    payment.to()
                ),
            }
        }

        ledger.to_debts(members)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::expense::Split;
    use rust_decimal_macros::dec;

    fn roster() -> Vec<Member> {
        vec![
            Member::new("a", "Alice"),
            Member::new("b", "Bob"),
            Member::new("c", "Carol"),
        ]
    }

    fn equal_expense(amount: Decimal, paid_by: &str, participants: &[&str]) -> Expense {
        Expense::new(
            "Test",
            amount,
            MemberId::new(paid_by),
            participants.iter().map(|p| MemberId::new(*p)).collect(),
            Split::Equally,
        )
        .unwrap()
    }

    #[test]
    fn test_pair_ledger_nets_directions() {
        let mut ledger = PairLedger::new();
        let a = MemberId::new("a");
        let b = MemberId::new("b");

        ledger.record(&a, &b, dec!(10));
        ledger.record(&b, &a, dec!(4));
        assert_eq!(ledger.net(&a, &b), dec!(6));
        assert_eq!(ledger.net(&b, &a), dec!(-6));
    }

    #[test]
    fn test_pair_ledger_perfect_offset_settles() {
        let mut ledger = PairLedger::new();
        let a = MemberId::new("a");
        let b = MemberId::new("b");

        ledger.record(&a, &b, dec!(10));
        ledger.record(&b, &a, dec!(10));
        assert!(ledger.is_settled());
        assert!(ledger.to_debts(&roster()).is_empty());
    }

    #[test]
    fn test_pair_ledger_ignores_self_debt() {
        let mut ledger = PairLedger::new();
        let a = MemberId::new("a");
        ledger.record(&a, &a, dec!(10));
        assert!(ledger.is_settled());
    }

    #[test]
    fn test_single_expense_direct_debts() {
        // Alice pays 30 for everyone: Bob and Carol each owe Alice 10.
        let expenses = vec![equal_expense(dec!(30), "a", &["a", "b", "c"])];
        let debts = DirectDebtEngine::calculate_direct_debts(&roster(), &expenses, &[]);
        assert_eq!(
            debts,
            vec![
                Debt::new("Bob", "Alice", dec!(10)),
                Debt::new("Carol", "Alice", dec!(10)),
            ]
        );
    }

    #[test]
    fn test_no_transitive_netting() {
        // Alice covers Bob, Bob covers Carol. Globally Bob is even, but
        // directly he both owes Alice and is owed by Carol.
        let expenses = vec![
            equal_expense(dec!(10), "a", &["b"]),
            equal_expense(dec!(10), "b", &["c"]),
        ];
        let debts = DirectDebtEngine::calculate_direct_debts(&roster(), &expenses, &[]);
        assert_eq!(
            debts,
            vec![
                Debt::new("Bob", "Alice", dec!(10)),
                Debt::new("Carol", "Bob", dec!(10)),
            ]
        );
    }

    #[test]
    fn test_reverse_expenses_cancel() {
        let expenses = vec![
            equal_expense(dec!(10), "a", &["b"]),
            equal_expense(dec!(10), "b", &["a"]),
        ];
        let debts = DirectDebtEngine::calculate_direct_debts(&roster(), &expenses, &[]);
        assert!(debts.is_empty());
    }

    #[test]
    fn test_payment_reduces_pair_debt() {
        let expenses = vec![equal_expense(dec!(10), "a", &["b"])];
        let payments = vec![Payment::new("Bob", "Alice", dec!(4)).unwrap()];
        let debts = DirectDebtEngine::calculate_direct_debts(&roster(), &expenses, &payments);
        assert_eq!(debts, vec![Debt::new("Bob", "Alice", dec!(6))]);
    }

    #[test]
    fn test_overpayment_flips_direction() {
        let expenses = vec![equal_expense(dec!(10), "a", &["b"])];
        let payments = vec![Payment::new("Bob", "Alice", dec!(15)).unwrap()];
        let debts = DirectDebtEngine::calculate_direct_debts(&roster(), &expenses, &payments);
        assert_eq!(debts, vec![Debt::new("Alice", "Bob", dec!(5))]);
    }

    #[test]
    fn test_unmatched_payment_is_ignored() {
        let payments = vec![Payment::new("Mallory", "Alice", dec!(100)).unwrap()];
        let debts = DirectDebtEngine::calculate_direct_debts(&roster(), &[], &payments);
        assert!(debts.is_empty());
    }
}
