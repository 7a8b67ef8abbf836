use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Errors arising from payment construction.
#[derive(Debug, Error)]
pub enum PaymentError {
    #[error("payment amount must be positive, got {amount}")]
    NonPositiveAmount { amount: Decimal },
}

/// A recorded real-world settlement transfer between two members.
///
/// Unlike expenses, payments reference members by display name. This is
/// the historical external format; the engine resolves names against the
/// group roster and silently ignores payments whose names do not match
/// any member.
///
/// # Examples
///
/// ```
/// use split_engine::core::payment::Payment;
/// use rust_decimal_macros::dec;
///
/// let payment = Payment::new("Bob", "Alice", dec!(10)).unwrap();
/// assert_eq!(payment.from(), "Bob");
/// assert_eq!(payment.amount(), dec!(10));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    /// Unique identifier for this payment.
    id: Uuid,
    /// Display name of the member who paid.
    from: String,
    /// Display name of the member who received the money.
    to: String,
    /// The amount transferred. Always positive.
    amount: Decimal,
    /// When the payment was made.
    date: DateTime<Utc>,
}

impl Payment {
    /// Record a new payment.
    pub fn new(
        from: impl Into<String>,
        to: impl Into<String>,
        amount: Decimal,
    ) -> Result<Self, PaymentError> {
        if amount <= Decimal::ZERO {
            return Err(PaymentError::NonPositiveAmount { amount });
        }
        Ok(Self {
            id: Uuid::new_v4(),
            from: from.into(),
            to: to.into(),
            amount,
            date: Utc::now(),
        })
    }

    /// Set the payment date.
    pub fn with_date(mut self, date: DateTime<Utc>) -> Self {
        self.date = date;
        self
    }

    // --- Accessors ---

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn from(&self) -> &str {
        &self.from
    }

    pub fn to(&self) -> &str {
        &self.to
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    /// Whether `name` is either side of this payment.
    /// This is the visibility test for private groups.
    pub fn involves(&self, name: &str) -> bool {
        self.from == name || self.to == name
    }
}
