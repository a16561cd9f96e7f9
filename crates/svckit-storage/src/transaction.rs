//! Transaction management contract
//!
//! [`TransactionManager`] is the boundary services code against: it hands
//! out either the shared database handle or a fresh transaction, and
//! commits or rolls back transactions without translating the
//! collaborator's errors.
//!
//! Transactional operations take a [`TxGuard`] right after beginning:
//!
//! ```rust,ignore
//! let tx = manager.begin()?;
//! let tx = manager.rollback_on_failure(tx);
//! tx.execute("UPDATE accounts SET balance = balance - ?1 WHERE id = ?2", params![amount, from])?;
//! tx.execute("UPDATE accounts SET balance = balance + ?1 WHERE id = ?2", params![amount, to])?;
//! tx.commit()?;
//! ```
//!
//! Any exit that skips `commit` (an early `?`, a panic) rolls the
//! transaction back exactly once. A panic keeps unwinding afterwards with
//! its original payload.

use std::ops::{Deref, DerefMut};
use tracing::{debug, error, warn};

/// Either the shared database handle or a live transaction.
#[derive(Debug)]
pub enum Handle<S, T> {
    Shared(S),
    Transaction(T),
}

impl<S, T> Handle<S, T> {
    pub fn is_transaction(&self) -> bool {
        matches!(self, Handle::Transaction(_))
    }

    pub fn into_shared(self) -> Option<S> {
        match self {
            Handle::Shared(shared) => Some(shared),
            Handle::Transaction(_) => None,
        }
    }

    pub fn into_transaction(self) -> Option<T> {
        match self {
            Handle::Transaction(tx) => Some(tx),
            Handle::Shared(_) => None,
        }
    }
}

/// Begin, commit and roll back transactions on a database.
///
/// Each transaction is single use: `commit` and `rollback` consume it.
pub trait TransactionManager: Send + Sync {
    /// Plain handle shared by all non-transactional callers
    type Shared: Clone;
    /// Live transaction
    type Tx;
    /// Error reported by the database client, passed through unchanged
    type Error: std::error::Error + Send + Sync + 'static;

    /// The shared, non-transactional handle.
    fn shared(&self) -> Self::Shared;

    /// Begin a new transaction.
    fn begin(&self) -> Result<Self::Tx, Self::Error>;

    fn commit(&self, tx: Self::Tx) -> Result<(), Self::Error>;

    fn rollback(&self, tx: Self::Tx) -> Result<(), Self::Error>;

    /// A new transaction when `with_transaction` is set, otherwise the
    /// shared handle.
    fn get_handle(
        &self,
        with_transaction: bool,
    ) -> Result<Handle<Self::Shared, Self::Tx>, Self::Error> {
        if with_transaction {
            self.begin().map(Handle::Transaction)
        } else {
            Ok(Handle::Shared(self.shared()))
        }
    }

    /// Guard `tx` so that it is rolled back unless committed.
    fn rollback_on_failure(&self, tx: Self::Tx) -> TxGuard<'_, Self>
    where
        Self: Sized,
    {
        TxGuard::new(self, tx)
    }

    /// Run `f` in a new transaction, committing on `Ok` and rolling back on
    /// `Err` or panic.
    fn run_in_transaction<T, E, F>(&self, f: F) -> Result<T, E>
    where
        Self: Sized,
        F: FnOnce(&mut Self::Tx) -> Result<T, E>,
        E: From<Self::Error>,
    {
        let mut guard = self.rollback_on_failure(self.begin()?);
        let value = f(&mut *guard)?;
        guard.commit()?;
        Ok(value)
    }
}

/// Scoped transaction that rolls back when dropped uncommitted.
pub struct TxGuard<'m, M: TransactionManager> {
    manager: &'m M,
    tx: Option<M::Tx>,
}

impl<'m, M: TransactionManager> TxGuard<'m, M> {
    pub fn new(manager: &'m M, tx: M::Tx) -> Self {
        Self {
            manager,
            tx: Some(tx),
        }
    }

    pub fn commit(mut self) -> Result<(), M::Error> {
        match self.tx.take() {
            Some(tx) => self.manager.commit(tx),
            None => Ok(()),
        }
    }

    pub fn rollback(mut self) -> Result<(), M::Error> {
        match self.tx.take() {
            Some(tx) => self.manager.rollback(tx),
            None => Ok(()),
        }
    }
}

impl<M: TransactionManager> Deref for TxGuard<'_, M> {
    type Target = M::Tx;

    fn deref(&self) -> &M::Tx {
        self.tx
            .as_ref()
            .expect("transaction is live until the guard is consumed")
    }
}

impl<M: TransactionManager> DerefMut for TxGuard<'_, M> {
    fn deref_mut(&mut self) -> &mut M::Tx {
        self.tx
            .as_mut()
            .expect("transaction is live until the guard is consumed")
    }
}

impl<M: TransactionManager> Drop for TxGuard<'_, M> {
    fn drop(&mut self) {
        let Some(tx) = self.tx.take() else {
            return;
        };

        let unwinding = std::thread::panicking();
        match self.manager.rollback(tx) {
            Ok(()) if unwinding => warn!("[TxGuard] Rolled back transaction during panic"),
            Ok(()) => debug!("[TxGuard] Rolled back uncommitted transaction"),
            // Never panic here: a second panic while unwinding aborts
            Err(e) => error!(unwinding, "[TxGuard] Rollback failed: {}", e),
        }
    }
}
