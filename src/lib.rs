//! # split-engine
//!
//! Balance and debt-resolution engine for shared-expense groups.
//!
//! Given a group's expenses (with flexible split strategies) and recorded
//! settlement payments, this engine computes each member's net position and
//! derives a minimal set of suggested transfers. For private groups it also
//! supports a partial-visibility mode where a viewer only sees transactions
//! they took part in, and debts are derived per transaction pair so that
//! nothing is inferred from activity the viewer cannot see.
//!
//! ## Architecture
//!
//! - **core** — Foundational types: members, groups, expenses, payments, balances
//! - **engine** — Balance aggregation, greedy debt simplification, pairwise direct debts
//! - **view** — Visibility policy and per-viewer group detail assembly
//! - **simulation** — Random group generation for stress testing

pub mod core;
pub mod engine;
pub mod simulation;
pub mod view;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::core::balance::{Balance, Debt};
    pub use crate::core::expense::{Expense, Split};
    pub use crate::core::group::Group;
    pub use crate::core::member::{Member, MemberId};
    pub use crate::core::payment::Payment;
    pub use crate::engine::direct::DirectDebtEngine;
    pub use crate::engine::relative::calculate_relative_balances;
    pub use crate::engine::settlement::SettlementEngine;
    pub use crate::view::details::{group_details, GroupDetails};
}
