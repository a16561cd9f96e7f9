//! svckit Storage Layer
//!
//! Transaction helper for services backed by a relational database.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                 Service code                         │
//! ├──────────────────────────────────────────────────────┤
//! │            TransactionManager trait                  │
//! │   (get_handle, commit, rollback, rollback_on_failure)│
//! ├──────────────────────────────────────────────────────┤
//! │          SqliteTransactionManager                    │
//! │     (one session per transaction)                    │
//! ├──────────────────────────────────────────────────────┤
//! │                   Database                           │
//! │                   (SQLite)                           │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use svckit_storage::{Database, SqliteTransactionManager, TransactionManager};
//!
//! let db = Arc::new(Database::open(&path)?);
//! let manager = SqliteTransactionManager::new(db);
//!
//! let tx = manager.rollback_on_failure(manager.begin()?);
//! tx.execute("INSERT INTO orders (sku) VALUES (?1)", [sku])?;
//! tx.commit()?;
//! ```

mod database;
mod sqlite;
pub mod transaction;

pub use database::{Database, BUSY_TIMEOUT};
pub use sqlite::{SqliteTransaction, SqliteTransactionManager};
pub use transaction::{Handle, TransactionManager, TxGuard};
