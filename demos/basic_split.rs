//! Basic balance and debt computation for a public group.
//!
//! Demonstrates equal and weighted splits, payment settlement, and the
//! greedy debt simplification.

use rust_decimal_macros::dec;
use split_engine::core::expense::{Expense, Split};
use split_engine::core::member::{Member, MemberId};
use split_engine::core::payment::Payment;
use split_engine::engine::settlement::SettlementEngine;
use std::collections::HashMap;

fn main() {
    println!("=== split-engine: Basic Split Example ===\n");

    let members = vec![
        Member::new("u-alice", "Alice"),
        Member::new("u-bob", "Bob"),
        Member::new("u-carol", "Carol"),
    ];

    // Alice fronts dinner for everyone, split equally.
    let dinner = Expense::new(
        "Dinner",
        dec!(60),
        MemberId::new("u-alice"),
        vec![
            MemberId::new("u-alice"),
            MemberId::new("u-bob"),
            MemberId::new("u-carol"),
        ],
        Split::Equally,
    )
    .expect("valid expense");

    // Bob pays for the taxi, weighted 2:1 toward Carol who rode further.
    let mut weights = HashMap::new();
    weights.insert(MemberId::new("u-carol"), dec!(2));
    let taxi = Expense::new(
        "Taxi",
        dec!(15),
        MemberId::new("u-bob"),
        vec![MemberId::new("u-bob"), MemberId::new("u-carol")],
        Split::Shares(weights),
    )
    .expect("valid expense");

    // Carol has already paid Alice part of what she owes.
    let payment = Payment::new("Carol", "Alice", dec!(10)).expect("valid payment");

    let expenses = vec![dinner, taxi];
    let payments = vec![payment];

    let balances = SettlementEngine::calculate_balances(&members, &expenses, &payments);
    println!("Balances:");
    for balance in &balances {
        println!("  {}", balance);
    }

    let debts = SettlementEngine::simplify_debts(&balances);
    println!("\nSuggested transfers:");
    for debt in &debts {
        println!("  {}", debt);
    }
}
