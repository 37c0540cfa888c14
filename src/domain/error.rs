//! Domain Error Types
//!
//! Pure domain errors that don't depend on infrastructure.

use thiserror::Error;

/// Domain-specific errors
///
/// These errors represent business rule violations. They are independent of
/// the web layer; `AppError` maps them onto HTTP responses.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Withdrawal exceeds the current balance
    #[error("Insufficient funds: requested {requested}, available {available}")]
    InsufficientFunds { requested: i64, available: i64 },

    /// Deposit would push the balance past the representable maximum
    #[error("Balance overflow: deposit would exceed the maximum balance")]
    BalanceOverflow,
}

impl DomainError {
    /// Create an insufficient funds error
    pub fn insufficient_funds(requested: i64, available: i64) -> Self {
        Self::InsufficientFunds {
            requested,
            available,
        }
    }
}
