//! Foundational types for the expense-splitting domain.

pub mod balance;
pub mod expense;
pub mod group;
pub mod member;
pub mod payment;
