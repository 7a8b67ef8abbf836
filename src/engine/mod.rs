//! Balance aggregation and debt derivation.
//!
//! Two independent paths produce debts from the same records:
//!
//! - **settlement** — global netting: fold everything into per-member
//!   balances, then greedily match creditors against debtors. Used for
//!   public groups, where every viewer sees every transaction.
//! - **direct** — pairwise accumulation per expense, no global netting.
//!   Used for private groups, where a viewer's debts must be fully
//!   explained by transactions that viewer can see.

pub mod direct;
pub mod relative;
pub mod settlement;

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

/// Currency-cent tolerance: balances within a cent of zero are settled.
pub const CENT: Decimal = dec!(0.01);

/// Round an amount to whole cents, midpoint away from zero.
pub(crate) fn round_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
