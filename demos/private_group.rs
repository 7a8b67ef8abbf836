//! Private-group visibility walkthrough.
//!
//! Shows how the same expense set yields different debts depending on
//! the viewer, and why direct debts deliberately differ from the global
//! simplified result.

use rust_decimal_macros::dec;
use split_engine::core::expense::{Expense, Split};
use split_engine::core::group::Group;
use split_engine::core::member::{Member, MemberId};
use split_engine::engine::settlement::SettlementEngine;
use split_engine::view::details::group_details;

fn expense(description: &str, amount: rust_decimal::Decimal, paid_by: &str, participants: &[&str]) -> Expense {
    Expense::new(
        description,
        amount,
        MemberId::new(paid_by),
        participants.iter().map(|p| MemberId::new(*p)).collect(),
        Split::Equally,
    )
    .expect("valid expense")
}

fn main() {
    println!("=== split-engine: Private Group Example ===\n");

    let group = Group::new(
        "Familia",
        "FAM1",
        vec![
            Member::new("u-amatxu", "Amatxu"),
            Member::new("u-joanna", "Joanna"),
            Member::new("u-maikel", "Maikel"),
        ],
    )
    .expect("valid group")
    .with_privacy(true);

    let expenses = vec![
        expense("REGALO", dec!(20), "u-joanna", &["u-joanna", "u-maikel"]),
        expense("MK", dec!(20), "u-maikel", &["u-amatxu", "u-maikel"]),
        expense("Chuches", dec!(30), "u-amatxu", &["u-amatxu", "u-joanna", "u-maikel"]),
    ];

    // The global truth, for comparison.
    let balances = SettlementEngine::calculate_balances(group.members(), &expenses, &[]);
    let global = SettlementEngine::simplify_debts(&balances);
    println!("Global simplified debts (what a public group would show):");
    for debt in &global {
        println!("  {}", debt);
    }

    // Joanna's view. She is not part of "MK", so it does not exist for
    // her — and her debts must not depend on it.
    let joanna = group_details(&group, &expenses, &[], Some("Joanna"));
    println!("\nJoanna sees {} of {} expenses.", joanna.visible_expense_count, expenses.len());
    println!("Joanna's direct debts:");
    for debt in &joanna.debts {
        println!("  {}", debt);
    }
    println!("Joanna's relative balances:");
    for balance in &joanna.balances {
        println!("  {}", balance);
    }

    // Maikel participates in everything, so his pairwise position with
    // Amatxu offsets and disappears.
    let maikel = group_details(&group, &expenses, &[], Some("Maikel"));
    println!("\nMaikel's direct debts:");
    for debt in &maikel.debts {
        println!("  {}", debt);
    }
}
