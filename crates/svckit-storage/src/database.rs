//! Database manager for SQLite storage.
//!
//! A [`Database`] owns the primary connection, which serves as the shared
//! handle. Transactions run on their own sessions opened with
//! [`Database::open_session`], so a transaction never borrows the shared
//! connection and can be handed around by value.

use anyhow::{Context, Result};
use parking_lot::{Mutex, MutexGuard};
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;
use uuid::Uuid;

/// How long a session waits on a locked database before failing.
pub const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Where the database lives.
#[derive(Debug, Clone)]
enum Location {
    File(PathBuf),
    /// Shared-cache URI, alive while the primary connection is open
    Memory(String),
}

/// SQLite database wrapper.
pub struct Database {
    conn: Mutex<Connection>,
    location: Location,
}

impl Database {
    /// Open a database at the given path.
    ///
    /// If the database doesn't exist, it will be created.
    pub fn open(path: &Path) -> Result<Self> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create database directory: {:?}", parent))?;
        }

        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database at {:?}", path))?;
        Self::configure(&conn)?;

        // Set journal mode to WAL for better concurrency
        conn.pragma_update(None, "journal_mode", "WAL")?;

        debug!("Opened database at {:?}", path);

        Ok(Self {
            conn: Mutex::new(conn),
            location: Location::File(path.to_path_buf()),
        })
    }

    /// Open an in-memory database (for testing).
    ///
    /// Each call creates a separate database; sessions opened from it see
    /// the same data.
    pub fn open_in_memory() -> Result<Self> {
        let uri = format!("file:svckit-{}?mode=memory&cache=shared", Uuid::new_v4());
        let conn = Connection::open(&uri).context("Failed to open in-memory database")?;
        Self::configure(&conn)?;

        debug!("Opened in-memory database {}", uri);

        Ok(Self {
            conn: Mutex::new(conn),
            location: Location::Memory(uri),
        })
    }

    fn configure(conn: &Connection) -> rusqlite::Result<()> {
        conn.pragma_update(None, "foreign_keys", "ON")?;
        conn.busy_timeout(BUSY_TIMEOUT)
    }

    /// Lock the primary connection.
    pub fn connection(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock()
    }

    /// Open an additional connection to the same database.
    pub fn open_session(&self) -> rusqlite::Result<Connection> {
        let conn = match &self.location {
            Location::File(path) => Connection::open(path)?,
            Location::Memory(uri) => Connection::open(uri)?,
        };
        Self::configure(&conn)?;
        Ok(conn)
    }

    /// File path, or `None` for an in-memory database.
    pub fn path(&self) -> Option<&Path> {
        match &self.location {
            Location::File(path) => Some(path),
            Location::Memory(_) => None,
        }
    }

    /// Execute a closure within a transaction on the primary connection.
    ///
    /// The primary connection stays locked until the closure returns, so the
    /// closure must do all its work through the `&Connection` it is given.
    /// Calling [`Database::connection`] from inside it deadlocks. Use
    /// [`Database::open_session`] for work that must run alongside.
    pub fn transaction<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let conn = self.conn.lock();
        let tx = conn.unchecked_transaction()?;
        let result = f(&tx)?;
        tx.commit()?;
        Ok(result)
    }
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database")
            .field("location", &self.location)
            .finish()
    }
}
