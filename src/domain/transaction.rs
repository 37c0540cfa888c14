//! Transaction records
//!
//! Immutable entries of the ledger's append-only log.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Amount;

/// Direction of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Deposit,
    Withdrawal,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Deposit => "deposit",
            Self::Withdrawal => "withdrawal",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A successful ledger operation.
///
/// Serializes as `{"amount": 100, "type": "deposit"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub amount: Amount,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
}

impl Transaction {
    pub fn deposit(amount: Amount) -> Self {
        Self {
            amount,
            kind: TransactionKind::Deposit,
        }
    }

    pub fn withdrawal(amount: Amount) -> Self {
        Self {
            amount,
            kind: TransactionKind::Withdrawal,
        }
    }

    /// Effect on the balance: positive for deposits, negative for withdrawals
    pub fn signed_amount(&self) -> i64 {
        match self.kind {
            TransactionKind::Deposit => self.amount.value(),
            TransactionKind::Withdrawal => -self.amount.value(),
        }
    }
}
