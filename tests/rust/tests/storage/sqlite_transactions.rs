//! Commit and rollback against SQLite

use pretty_assertions::assert_eq;
use rusqlite::{params, ErrorCode};
use svckit_storage::TransactionManager;
use tests::db::TestDatabase;

fn open_account(tx: &rusqlite::Connection, owner: &str, balance: i64) -> i64 {
    tx.execute(
        "INSERT INTO accounts (owner, balance) VALUES (?1, ?2)",
        params![owner, balance],
    )
    .unwrap();
    tx.last_insert_rowid()
}

#[test]
fn test_commit_persists_every_statement() {
    let test_db = TestDatabase::new();
    let manager = test_db.manager();

    let tx = manager.begin().unwrap();
    let id = open_account(&tx, "ana", 100);
    tx.execute(
        "INSERT INTO transfers (account_id, amount) VALUES (?1, ?2)",
        params![id, -40],
    )
    .unwrap();
    manager.commit(tx).unwrap();

    assert_eq!(test_db.count("accounts"), 1);
    assert_eq!(test_db.count("transfers"), 1);
}

#[test]
fn test_rollback_discards_every_statement() {
    let test_db = TestDatabase::new();
    let manager = test_db.manager();

    let tx = manager.begin().unwrap();
    let id = open_account(&tx, "ana", 100);
    tx.execute(
        "INSERT INTO transfers (account_id, amount) VALUES (?1, ?2)",
        params![id, -40],
    )
    .unwrap();
    manager.rollback(tx).unwrap();

    assert_eq!(test_db.count("accounts"), 0);
    assert_eq!(test_db.count("transfers"), 0);
}

#[test]
fn test_commit_error_is_passed_through() {
    let test_db = TestDatabase::new();
    let manager = test_db.manager();

    // Dangling reference is only checked at commit
    let tx = manager.begin().unwrap();
    tx.execute("INSERT INTO transfers (account_id, amount) VALUES (999, 5)", [])
        .unwrap();
    let err = manager.commit(tx).unwrap_err();

    assert_eq!(err.sqlite_error_code(), Some(ErrorCode::ConstraintViolation));
    assert_eq!(test_db.count("transfers"), 0);
}

#[test]
fn test_in_memory_database_supports_transactions() {
    let test_db = TestDatabase::in_memory();
    let manager = test_db.manager();

    let tx = manager.begin().unwrap();
    open_account(&tx, "bo", 7);
    manager.commit(tx).unwrap();

    let tx = manager.begin().unwrap();
    open_account(&tx, "cy", 8);
    manager.rollback(tx).unwrap();

    assert_eq!(test_db.count("accounts"), 1);
}

#[test]
fn test_run_in_transaction_with_anyhow() {
    let test_db = TestDatabase::new();
    let manager = test_db.manager();

    let id: anyhow::Result<i64> = manager.run_in_transaction(|tx| Ok(open_account(tx, "ana", 50)));
    let id = id.unwrap();

    let failed: anyhow::Result<()> = manager.run_in_transaction(|tx| {
        tx.execute(
            "UPDATE accounts SET balance = balance - 80 WHERE id = ?1",
            params![id],
        )?;
        anyhow::bail!("insufficient funds")
    });
    assert_eq!(failed.unwrap_err().to_string(), "insufficient funds");

    let balance: i64 = test_db
        .db
        .connection()
        .query_row("SELECT balance FROM accounts WHERE id = ?1", params![id], |row| row.get(0))
        .unwrap();
    assert_eq!(balance, 50);
}

#[test]
fn test_file_database_survives_reopen() {
    let test_db = TestDatabase::new();
    let manager = test_db.manager();

    let tx = manager.begin().unwrap();
    open_account(&tx, "dee", 3);
    manager.commit(tx).unwrap();

    let reopened = svckit_storage::Database::open(test_db.db_path()).unwrap();
    let count: i64 = reopened
        .connection()
        .query_row("SELECT COUNT(*) FROM accounts", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 1);
}
