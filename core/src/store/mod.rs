//! SQLite persistence layer.
//!
//! RULE: Only the store modules talk to the database.
//! Everything else calls `LedgerStore` methods — never SQL directly.

mod account;
mod asset;
mod loan;
mod party;
mod transaction;

use rusqlite::Connection;

use crate::error::LedgerResult;

pub struct LedgerStore {
    conn: Connection,
}

impl LedgerStore {
    /// Open (or create) the ledger database at `path`.
    pub fn open(path: &str) -> LedgerResult<Self> {
        let conn = Connection::open(path)?;
        // WAL only matters for real files; :memory: ignores it.
        let _ = conn.execute_batch("PRAGMA journal_mode=WAL;");
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn })
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> LedgerResult<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn })
    }

    /// Apply all schema migrations in order. Idempotent, run on every
    /// startup.
    pub fn migrate(&self) -> LedgerResult<()> {
        self.conn
            .execute_batch(include_str!("../../../migrations/001_foundation.sql"))?;
        Ok(())
    }
}
