use crate::core::member::MemberId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A member's net financial position over a set of expenses and payments.
///
/// Positive `net_balance` means the member is owed money (net creditor),
/// negative means they owe (net debtor). Balances are derived views,
/// recomputed from the transaction records on every read and never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Balance {
    pub member_id: MemberId,
    pub member_name: String,
    /// Total amount this member has fronted (expenses paid plus payments made).
    pub total_paid: Decimal,
    /// Total amount consumed (expense shares plus payments received).
    pub total_owed: Decimal,
    /// `total_paid - total_owed`.
    pub net_balance: Decimal,
}

impl Balance {
    /// A zeroed balance for a member with no recorded activity.
    pub fn zero(member_id: MemberId, member_name: impl Into<String>) -> Self {
        Self {
            member_id,
            member_name: member_name.into(),
            total_paid: Decimal::ZERO,
            total_owed: Decimal::ZERO,
            net_balance: Decimal::ZERO,
        }
    }
}

impl fmt::Display for Balance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: paid {}, owed {}, net {}",
            self.member_name, self.total_paid, self.total_owed, self.net_balance
        )
    }
}

/// A computed transfer needed to settle balances.
///
/// This is a suggestion (or, in private groups, a direct pairwise
/// obligation) — distinct from [`Payment`](crate::core::payment::Payment),
/// which records a transfer that actually happened. Like payments, debts
/// are expressed in member display names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Debt {
    /// Display name of the member who should pay.
    pub from: String,
    /// Display name of the member who should receive.
    pub to: String,
    /// The suggested amount. Always positive, rounded to cents.
    pub amount: Decimal,
}

impl Debt {
    pub fn new(from: impl Into<String>, to: impl Into<String>, amount: Decimal) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            amount,
        }
    }

    /// Whether `name` is either side of this debt.
    pub fn involves(&self, name: &str) -> bool {
        self.from == name || self.to == name
    }
}

impl fmt::Display for Debt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} pays {} to {}", self.from, self.amount, self.to)
    }
}
