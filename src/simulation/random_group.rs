//! Random group generation.
//!
//! Produces groups with a mix of split modes and settlement payments to
//! exercise the engines under realistic shapes and sizes.

use crate::core::expense::{Expense, Split};
use crate::core::group::Group;
use crate::core::member::{Member, MemberId};
use crate::core::payment::Payment;
use rand::seq::SliceRandom;
use rand::Rng;
use rust_decimal::{Decimal, RoundingStrategy};
use std::collections::HashMap;

/// Configuration for generating a random group.
#[derive(Debug, Clone)]
pub struct GroupConfig {
    /// Number of members in the group.
    pub member_count: usize,
    /// Number of expenses to generate.
    pub expense_count: usize,
    /// Number of settlement payments to generate.
    pub payment_count: usize,
    /// Minimum expense amount, in whole currency units.
    pub min_amount: u64,
    /// Maximum expense amount, in whole currency units.
    pub max_amount: u64,
    /// Whether the generated group is private.
    pub private_group: bool,
}

impl Default for GroupConfig {
    fn default() -> Self {
        Self {
            member_count: 5,
            expense_count: 20,
            payment_count: 3,
            min_amount: 5,
            max_amount: 500,
            private_group: false,
        }
    }
}

/// Generate a random group with expenses and payments.
pub fn generate_random_group(config: &GroupConfig) -> (Group, Vec<Expense>, Vec<Payment>) {
    let mut rng = rand::thread_rng();

    let members: Vec<Member> = (0..config.member_count)
        .map(|i| Member::new(format!("u-{:03}", i), format!("Member {:03}", i)))
        .collect();
    let group = Group::new("Generated Group", "GEN0", members.clone())
        .unwrap_or_else(|e| panic!("generated group must be valid: {e}"))
        .with_privacy(config.private_group);

    let mut expenses = Vec::with_capacity(config.expense_count);
    for n in 0..config.expense_count {
        let payer = members.choose(&mut rng).cloned().unwrap_or_else(|| {
            panic!("member pool must not be empty")
        });

        // Random non-empty participant subset.
        let mut participants: Vec<MemberId> = members
            .iter()
            .filter(|_| rng.gen_bool(0.6))
            .map(|m| m.id.clone())
            .collect();
        if participants.is_empty() {
            participants.push(payer.id.clone());
        }

        let amount = Decimal::from(rng.gen_range(config.min_amount..=config.max_amount));
        let split = match rng.gen_range(0..3) {
            0 => Split::Equally,
            1 => {
                let weights: HashMap<MemberId, Decimal> = participants
                    .iter()
                    .map(|id| (id.clone(), Decimal::from(rng.gen_range(1u64..=4))))
                    .collect();
                Split::Shares(weights)
            }
            _ => {
                // Amounts that actually sum to the total: split into
                // equal cents with the remainder on the first entry.
                // Round toward zero so the remainder stays non-negative.
                let count = Decimal::from(participants.len() as u64);
                let base = (amount / count).round_dp_with_strategy(2, RoundingStrategy::ToZero);
                let mut amounts: HashMap<MemberId, Decimal> = participants
                    .iter()
                    .map(|id| (id.clone(), base))
                    .collect();
                if let Some(first) = participants.first() {
                    let assigned: Decimal = base * (count - Decimal::ONE);
                    amounts.insert(first.clone(), amount - assigned);
                }
                Split::Amounts(amounts)
            }
        };

        let expense = Expense::new(
            format!("Expense {:03}", n),
            amount,
            payer.id.clone(),
            participants,
            split,
        )
        .unwrap_or_else(|e| panic!("generated expense must be valid: {e}"));
        expenses.push(expense);
    }

    let mut payments = Vec::with_capacity(config.payment_count);
    for _ in 0..config.payment_count {
        let from = members.choose(&mut rng).cloned();
        let to = members.choose(&mut rng).cloned();
        if let (Some(from), Some(to)) = (from, to) {
            if from.id == to.id {
                continue;
            }
            let amount = Decimal::from(rng.gen_range(1u64..=(config.max_amount / 2).max(1)));
            let payment = Payment::new(from.name, to.name, amount)
                .unwrap_or_else(|e| panic!("generated payment must be valid: {e}"));
            payments.push(payment);
        }
    }

    (group, expenses, payments)
}
