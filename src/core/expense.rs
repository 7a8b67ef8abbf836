use crate::core::member::MemberId;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;
use uuid::Uuid;

/// Errors arising from expense construction.
#[derive(Debug, Error)]
pub enum ExpenseError {
    #[error("expense amount must be positive, got {amount}")]
    NonPositiveAmount { amount: Decimal },
    #[error("expense description must not be empty")]
    EmptyDescription,
    #[error("expense must have at least one participant")]
    NoParticipants,
}

/// How an expense is divided among its participants.
///
/// The split strategy is a tagged variant dispatched once per expense,
/// so share computation is exhaustive over the three modes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "data", rename_all = "snake_case")]
pub enum Split {
    /// Every participant owes `amount / participant_count`.
    Equally,
    /// Weighted split. Each participant's weight comes from the map,
    /// defaulting to 1 when absent. A weight of 0 is legal and yields a
    /// zero share without removing the member from the participant set.
    Shares(HashMap<MemberId, Decimal>),
    /// Explicit absolute amounts per participant, defaulting to 0 when
    /// absent. The engine does not check that the values sum to the
    /// expense amount; that is a boundary concern.
    Amounts(HashMap<MemberId, Decimal>),
}

/// A recorded cost paid by one member on behalf of a set of participants.
///
/// Expenses are immutable once created. The engine consumes collections
/// of expenses to compute balances and debts; per-member shares are
/// derived on demand via [`Expense::share_of`].
///
/// # Examples
///
/// ```
/// use split_engine::core::expense::{Expense, Split};
/// use split_engine::core::member::MemberId;
/// use rust_decimal_macros::dec;
///
/// let dinner = Expense::new(
///     "Dinner",
///     dec!(30),
///     MemberId::new("u-alice"),
///     vec![MemberId::new("u-alice"), MemberId::new("u-bob"), MemberId::new("u-carol")],
///     Split::Equally,
/// )
/// .unwrap();
///
/// assert_eq!(dinner.share_of(&MemberId::new("u-bob")), dec!(10));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    /// Unique identifier for this expense.
    id: Uuid,
    /// What the money was spent on.
    description: String,
    /// Total amount paid. Always positive.
    amount: Decimal,
    /// The member who fronted the money.
    paid_by: MemberId,
    /// Members the cost is divided among. The payer may or may not be one.
    participants: Vec<MemberId>,
    /// How the cost is divided.
    split: Split,
    /// When the expense occurred.
    date: DateTime<Utc>,
}

impl Expense {
    /// Create a new expense.
    ///
    /// Validation here mirrors what the upstream creation boundary
    /// enforces: positive amount, non-empty description, at least one
    /// participant. Everything past this point is total; the engine never
    /// rejects an expense it is handed.
    pub fn new(
        description: impl Into<String>,
        amount: Decimal,
        paid_by: MemberId,
        participants: Vec<MemberId>,
        split: Split,
    ) -> Result<Self, ExpenseError> {
        let description = description.into();
        if amount <= Decimal::ZERO {
            return Err(ExpenseError::NonPositiveAmount { amount });
        }
        if description.trim().is_empty() {
            return Err(ExpenseError::EmptyDescription);
        }
        if participants.is_empty() {
            return Err(ExpenseError::NoParticipants);
        }
        Ok(Self {
            id: Uuid::new_v4(),
            description,
            amount,
            paid_by,
            participants,
            split,
            date: Utc::now(),
        })
    }

    /// Set the expense date.
    pub fn with_date(mut self, date: DateTime<Utc>) -> Self {
        self.date = date;
        self
    }

    /// The share of this expense owed by `member`.
    ///
    /// Total over all inputs: non-participants owe 0, an empty participant
    /// set yields 0 for everyone, and missing split data falls back to a
    /// weight of 1 (shares) or an amount of 0 (amounts).
    pub fn share_of(&self, member: &MemberId) -> Decimal {
        if !self.participants.contains(member) {
            return Decimal::ZERO;
        }
        match &self.split {
            Split::Equally => self.amount / Decimal::from(self.participants.len() as u64),
            Split::Shares(weights) => {
                let weight_of = |id: &MemberId| -> Decimal {
                    weights.get(id).copied().unwrap_or(Decimal::ONE)
                };
                let total: Decimal = self.participants.iter().map(weight_of).sum();
                if total == Decimal::ZERO {
                    return Decimal::ZERO;
                }
                self.amount * weight_of(member) / total
            }
            Split::Amounts(amounts) => amounts.get(member).copied().unwrap_or(Decimal::ZERO),
        }
    }

    // --- Accessors ---

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn paid_by(&self) -> &MemberId {
        &self.paid_by
    }

    pub fn participants(&self) -> &[MemberId] {
        &self.participants
    }

    pub fn split(&self) -> &Split {
        &self.split
    }

    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    /// Whether `member` is the payer or one of the participants.
    /// This is the visibility test for private groups.
    pub fn involves(&self, member: &MemberId) -> bool {
        &self.paid_by == member || self.participants.contains(member)
    }
}
