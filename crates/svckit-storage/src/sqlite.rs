//! SQLite implementation of TransactionManager.

use std::ops::Deref;
use std::sync::Arc;

use rusqlite::Connection;
use tracing::debug;
use uuid::Uuid;

use crate::transaction::TransactionManager;
use crate::Database;

/// A transaction running on its own SQLite session.
///
/// Derefs to the session's [`Connection`] for queries. Dropping it without
/// commit or rollback closes the session, which rolls the transaction back.
pub struct SqliteTransaction {
    id: Uuid,
    conn: Connection,
}

impl SqliteTransaction {
    /// Identifier used in log lines.
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl Deref for SqliteTransaction {
    type Target = Connection;

    fn deref(&self) -> &Connection {
        &self.conn
    }
}

impl std::fmt::Debug for SqliteTransaction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteTransaction")
            .field("id", &self.id)
            .finish()
    }
}

/// SQLite-backed implementation of TransactionManager.
#[derive(Debug, Clone)]
pub struct SqliteTransactionManager {
    db: Arc<Database>,
}

impl SqliteTransactionManager {
    /// Create a new transaction manager over a shared database.
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }
}

impl TransactionManager for SqliteTransactionManager {
    type Shared = Arc<Database>;
    type Tx = SqliteTransaction;
    type Error = rusqlite::Error;

    fn shared(&self) -> Arc<Database> {
        Arc::clone(&self.db)
    }

    fn begin(&self) -> rusqlite::Result<SqliteTransaction> {
        let conn = self.db.open_session()?;
        conn.execute_batch("BEGIN")?;

        let tx = SqliteTransaction {
            id: Uuid::new_v4(),
            conn,
        };
        debug!("[TransactionManager::begin] tx={}", tx.id);
        Ok(tx)
    }

    fn commit(&self, tx: SqliteTransaction) -> rusqlite::Result<()> {
        debug!("[TransactionManager::commit] tx={}", tx.id);
        tx.conn.execute_batch("COMMIT")
    }

    fn rollback(&self, tx: SqliteTransaction) -> rusqlite::Result<()> {
        debug!("[TransactionManager::rollback] tx={}", tx.id);
        tx.conn.execute_batch("ROLLBACK")
    }
}
