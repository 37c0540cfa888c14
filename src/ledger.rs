//! Ledger
//!
//! The single balance and its append-only transaction log, guarded as one
//! unit so no caller can observe one without the other.

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::domain::{Amount, Balance, DomainError, Transaction};

/// Balance and history read under the same lock
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerSnapshot {
    pub balance: Balance,
    pub transactions: Vec<Transaction>,
}

#[derive(Debug, Default)]
struct LedgerState {
    balance: Balance,
    transactions: Vec<Transaction>,
}

/// Concurrency-safe ledger.
///
/// Every operation, reads included, takes the same exclusive lock. The lock is
/// never held across an `.await` or a call back into the ledger.
#[derive(Debug, Default)]
pub struct Ledger {
    state: Mutex<LedgerState>,
}

impl Ledger {
    /// Create an empty ledger with a zero balance
    pub fn new() -> Self {
        Self::default()
    }

    // A panic while the lock is held cannot leave a half-applied update:
    // the new balance is computed before either field is written.
    fn lock(&self) -> MutexGuard<'_, LedgerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Credit `amount` and record the deposit
    pub fn deposit(&self, amount: Amount) -> Result<(), DomainError> {
        let mut state = self.lock();
        let balance = state
            .balance
            .credit(&amount)
            .map_err(|_| DomainError::BalanceOverflow)?;

        state.balance = balance;
        state.transactions.push(Transaction::deposit(amount));

        tracing::debug!(amount = %amount, balance = %balance, "Deposit applied");
        Ok(())
    }

    /// Debit `amount` and record the withdrawal.
    ///
    /// Fails with `InsufficientFunds`, leaving state untouched, if the
    /// balance does not cover the amount.
    pub fn withdraw(&self, amount: Amount) -> Result<(), DomainError> {
        let mut state = self.lock();

        // `debit` refuses any result below zero, so it is the funds check.
        let balance = match state.balance.debit(&amount) {
            Ok(balance) => balance,
            Err(_) => {
                let available = state.balance.value();
                drop(state);
                tracing::warn!(
                    amount = %amount,
                    available,
                    "Withdrawal rejected: insufficient funds"
                );
                return Err(DomainError::insufficient_funds(amount.value(), available));
            }
        };

        state.balance = balance;
        state.transactions.push(Transaction::withdrawal(amount));

        tracing::debug!(amount = %amount, balance = %balance, "Withdrawal applied");
        Ok(())
    }

    /// Current balance
    pub fn balance(&self) -> Balance {
        self.lock().balance
    }

    /// Copy of the full history in insertion order
    pub fn transactions(&self) -> Vec<Transaction> {
        self.lock().transactions.clone()
    }

    /// Balance and history taken atomically
    pub fn snapshot(&self) -> LedgerSnapshot {
        let state = self.lock();
        LedgerSnapshot {
            balance: state.balance,
            transactions: state.transactions.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TransactionKind;
    use std::sync::Arc;
    use std::thread;

    fn amount(value: i64) -> Amount {
        Amount::new(value).unwrap()
    }

    #[test]
    fn test_new_ledger_is_empty() {
        let ledger = Ledger::new();
        assert_eq!(ledger.balance(), Balance::zero());
        assert!(ledger.transactions().is_empty());
    }

    #[test]
    fn test_deposit() {
        let ledger = Ledger::new();

        ledger.deposit(amount(100)).unwrap();
        assert_eq!(ledger.balance().value(), 100);

        ledger.deposit(amount(50)).unwrap();
        assert_eq!(ledger.balance().value(), 150);

        let transactions = ledger.transactions();
        assert_eq!(transactions.len(), 2);
        assert_eq!(transactions[0], Transaction::deposit(amount(100)));
        assert_eq!(transactions[1], Transaction::deposit(amount(50)));
    }

    #[test]
    fn test_withdraw_success() {
        let ledger = Ledger::new();
        ledger.deposit(amount(200)).unwrap();

        ledger.withdraw(amount(100)).unwrap();
        assert_eq!(ledger.balance().value(), 100);
        assert_eq!(
            ledger.transactions(),
            vec![
                Transaction::deposit(amount(200)),
                Transaction::withdrawal(amount(100)),
            ]
        );
    }

    #[test]
    fn test_withdraw_entire_balance() {
        let ledger = Ledger::new();
        ledger.deposit(amount(40)).unwrap();

        ledger.withdraw(amount(40)).unwrap();
        assert_eq!(ledger.balance(), Balance::zero());
        assert_eq!(ledger.transactions().len(), 2);
    }

    #[test]
    fn test_withdraw_insufficient_funds() {
        let ledger = Ledger::new();
        ledger.deposit(amount(50)).unwrap();

        let err = ledger.withdraw(amount(100)).unwrap_err();
        assert_eq!(err, DomainError::insufficient_funds(100, 50));
        assert_eq!(ledger.balance().value(), 50);
        assert_eq!(ledger.transactions(), vec![Transaction::deposit(amount(50))]);
    }

    #[test]
    fn test_withdraw_from_empty_ledger() {
        let ledger = Ledger::new();
        assert!(matches!(
            ledger.withdraw(amount(1)),
            Err(DomainError::InsufficientFunds { .. })
        ));
        assert!(ledger.transactions().is_empty());
    }

    #[test]
    fn test_deposit_overflow_leaves_state_unchanged() {
        let ledger = Ledger::new();
        ledger.deposit(amount(i64::MAX)).unwrap();

        let err = ledger.deposit(amount(1)).unwrap_err();
        assert_eq!(err, DomainError::BalanceOverflow);
        assert_eq!(ledger.balance().value(), i64::MAX);
        assert_eq!(ledger.transactions().len(), 1);
    }

    #[test]
    fn test_snapshot_is_not_a_view() {
        let ledger = Ledger::new();
        ledger.deposit(amount(10)).unwrap();

        let before = ledger.transactions();
        let snapshot = ledger.snapshot();
        ledger.deposit(amount(20)).unwrap();
        ledger.withdraw(amount(5)).unwrap();

        assert_eq!(before, vec![Transaction::deposit(amount(10))]);
        assert_eq!(snapshot.balance.value(), 10);
        assert_eq!(snapshot.transactions, before);
        assert_eq!(ledger.transactions().len(), 3);
    }

    #[test]
    fn test_concurrent_access() {
        let ledger = Arc::new(Ledger::new());

        let mut handles = Vec::new();
        for _ in 0..10 {
            let ledger = Arc::clone(&ledger);
            handles.push(thread::spawn(move || ledger.deposit(amount(10)).is_ok()));
        }
        for _ in 0..5 {
            let ledger = Arc::clone(&ledger);
            handles.push(thread::spawn(move || ledger.withdraw(amount(10)).is_ok()));
        }

        let succeeded = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|ok| *ok)
            .count();

        let snapshot = ledger.snapshot();
        let signed_sum: i64 = snapshot.transactions.iter().map(|t| t.signed_amount()).sum();

        assert_eq!(snapshot.transactions.len(), succeeded);
        assert_eq!(snapshot.balance.value(), signed_sum);
        assert!(snapshot.balance.value() >= 0);

        let deposits = snapshot
            .transactions
            .iter()
            .filter(|t| t.kind == TransactionKind::Deposit)
            .count();
        assert_eq!(deposits, 10);
    }

    #[test]
    fn test_concurrent_reads_always_agree() {
        let ledger = Arc::new(Ledger::new());

        thread::scope(|s| {
            for _ in 0..4 {
                s.spawn(|| {
                    for i in 0..500 {
                        if i % 3 == 0 {
                            let _ = ledger.withdraw(amount(7));
                        } else {
                            ledger.deposit(amount(5)).unwrap();
                        }
                    }
                });
            }
            s.spawn(|| {
                for _ in 0..500 {
                    let snapshot = ledger.snapshot();
                    let sum: i64 = snapshot.transactions.iter().map(|t| t.signed_amount()).sum();
                    assert_eq!(snapshot.balance.value(), sum);
                }
            });
        });
    }
}
