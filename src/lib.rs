//! tiny_bank Library
//!
//! A single in-memory balance with an append-only transaction log, shared
//! safely between concurrent request handlers.

pub mod api;
pub mod config;
pub mod domain;
mod error;
pub mod ledger;

pub use config::{Config, LogFormat};
pub use domain::{Amount, AmountError, Balance, DomainError, Transaction, TransactionKind};
pub use error::{AppError, AppResult, ErrorResponse};
pub use ledger::{Ledger, LedgerSnapshot};
