//! Shared test utilities and fixtures for svckit integration tests.

pub use svckit_logging::{LogContext, Logger, LoggerConfig};
pub use svckit_storage::{Database, SqliteTransactionManager, TransactionManager};

pub use mocks::{MockDbError, RecordingTransactionManager, TxEvent};

/// Log capture helpers
pub mod log_capture {
    use parking_lot::Mutex;
    use std::io::{self, Write};
    use std::sync::Arc;
    use svckit_logging::{Logger, LoggerConfig};
    use tracing_subscriber::fmt::MakeWriter;

    /// In-memory console writer
    #[derive(Clone, Default)]
    pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl SharedBuffer {
        pub fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock()).into_owned()
        }

        pub fn lines(&self) -> Vec<String> {
            self.contents().lines().map(str::to_string).collect()
        }
    }

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for SharedBuffer {
        type Writer = SharedBuffer;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    /// Config without colors so lines can be compared verbatim
    pub fn plain_config() -> LoggerConfig {
        LoggerConfig::default().with_ansi(false)
    }

    /// Logger whose console output lands in the returned buffer
    pub fn capture_logger(config: LoggerConfig) -> (Logger, SharedBuffer) {
        let buffer = SharedBuffer::default();
        let logger = Logger::builder()
            .config(config)
            .console_writer(buffer.clone())
            .build();
        (logger, buffer)
    }

    /// Text after the `MMDD HHMMSS.mmm ` timestamp prefix
    pub fn strip_timestamp(line: &str) -> &str {
        line.get(16..).unwrap_or("")
    }
}

/// Test fixture utilities
pub mod fixtures {
    use svckit_logging::{request_type, LogContext};

    /// Context with only client IP and session set
    pub fn partial_context() -> LogContext {
        LogContext::new()
            .with_client_ip("10.0.0.1")
            .with_session_id("sess123")
    }

    /// Context with every tag set
    pub fn mobile_context() -> LogContext {
        LogContext::new()
            .with_client_ip("203.0.113.7")
            .with_session_id("2b9KqQ")
            .with_user_id("user-881")
            .with_request_type(request_type::MOBILE)
    }
}

/// Database test helpers
pub mod db {
    use std::path::{Path, PathBuf};
    use std::sync::Arc;
    use svckit_storage::{Database, SqliteTransactionManager};
    use tempfile::TempDir;

    /// Database file name
    const DB_FILE: &str = "svckit.db";

    /// Accounts and transfers; transfer references are checked at commit
    pub const LEDGER_SCHEMA: &str = "
        CREATE TABLE accounts (
            id INTEGER PRIMARY KEY,
            owner TEXT NOT NULL,
            balance INTEGER NOT NULL DEFAULT 0
        );
        CREATE TABLE transfers (
            id INTEGER PRIMARY KEY,
            account_id INTEGER NOT NULL
                REFERENCES accounts(id) DEFERRABLE INITIALLY DEFERRED,
            amount INTEGER NOT NULL
        );
    ";

    /// Create a temporary database for testing
    pub struct TestDatabase {
        pub db: Arc<Database>,
        _temp_dir: TempDir,
        db_path: PathBuf,
    }

    impl TestDatabase {
        /// Create a new file database with the ledger schema
        pub fn new() -> Self {
            let temp_dir = TempDir::new().expect("Failed to create temp dir");
            let db_path = temp_dir.path().join(DB_FILE);
            let db = Database::open(&db_path).expect("Failed to open test database");
            db.connection()
                .execute_batch(LEDGER_SCHEMA)
                .expect("Failed to create ledger schema");
            Self {
                db: Arc::new(db),
                db_path,
                _temp_dir: temp_dir,
            }
        }

        /// Create an in-memory database with the ledger schema
        pub fn in_memory() -> Self {
            let temp_dir = TempDir::new().expect("Failed to create temp dir");
            let db = Database::open_in_memory().expect("Failed to open in-memory database");
            db.connection()
                .execute_batch(LEDGER_SCHEMA)
                .expect("Failed to create ledger schema");
            Self {
                db: Arc::new(db),
                db_path: PathBuf::new(),
                _temp_dir: temp_dir,
            }
        }

        /// Transaction manager over this database
        pub fn manager(&self) -> SqliteTransactionManager {
            SqliteTransactionManager::new(Arc::clone(&self.db))
        }

        /// Row count of a table, read through the shared connection
        pub fn count(&self, table: &str) -> i64 {
            let conn = self.db.connection();
            conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| {
                row.get(0)
            })
            .expect("Failed to count rows")
        }

        /// Get the full database file path
        pub fn db_path(&self) -> &Path {
            &self.db_path
        }
    }

    impl Default for TestDatabase {
        fn default() -> Self {
            Self::new()
        }
    }
}
