//! redb-based storage layer for the event-sourced ledger.
//!
//! # Tables
//!
//! | Table | Key | Value | Purpose |
//! |-------|-----|-------|---------|
//! | `events` | `sequence` | `LedgerEvent` | Event stream (append-only) |
//! | `state` | `"ledger"` | `LedgerState` | Whole-floor state snapshot |
//! | `processed_commands` | `command_id` | `()` | Idempotency check |
//!
//! # Durability
//!
//! redb commits with `Durability::Immediate`: once `commit()` returns the
//! data survives power loss, and the file is always in a consistent state.
//! Events and the replacement state snapshot for a command go into one
//! write transaction, so readers never observe a half-applied command.

use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition, WriteTransaction};
use shared::{LedgerEvent, LedgerState};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

/// Event stream: key = global sequence, value = JSON-serialized LedgerEvent
const EVENTS_TABLE: TableDefinition<u64, &[u8]> = TableDefinition::new("events");

/// State snapshot: key = STATE_KEY, value = JSON-serialized LedgerState
const STATE_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("state");

/// Processed commands: key = command_id, value = empty (idempotency)
const PROCESSED_COMMANDS_TABLE: TableDefinition<&str, ()> =
    TableDefinition::new("processed_commands");

const STATE_KEY: &str = "ledger";

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("State checksum mismatch")]
    ChecksumMismatch,
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Ledger storage backed by redb
#[derive(Clone)]
pub struct LedgerStorage {
    db: Arc<Database>,
}

impl LedgerStorage {
    /// Open or create the database at the given path.
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let db = Database::create(path)?;
        let storage = Self { db: Arc::new(db) };
        storage.init_tables()?;
        Ok(storage)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> StorageResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;
        let storage = Self { db: Arc::new(db) };
        storage.init_tables()?;
        Ok(storage)
    }

    fn init_tables(&self) -> StorageResult<()> {
        let write_txn = self.db.begin_write()?;
        {
            let _ = write_txn.open_table(EVENTS_TABLE)?;
            let _ = write_txn.open_table(STATE_TABLE)?;
            let _ = write_txn.open_table(PROCESSED_COMMANDS_TABLE)?;
        }
        write_txn.commit()?;
        Ok(())
    }

    /// Begin a write transaction
    pub fn begin_write(&self) -> StorageResult<WriteTransaction> {
        Ok(self.db.begin_write()?)
    }

    // ========== State ==========

    /// Load the persisted state, verifying its checksum.
    ///
    /// Returns a fresh default state when the database is empty (first run).
    pub fn load_state(&self) -> StorageResult<LedgerState> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(STATE_TABLE)?;
        match table.get(STATE_KEY)? {
            Some(guard) => {
                let state: LedgerState = serde_json::from_slice(guard.value())?;
                if !state.verify_checksum() {
                    return Err(StorageError::ChecksumMismatch);
                }
                Ok(state)
            }
            None => Ok(LedgerState::default()),
        }
    }

    /// Load the state from within a write transaction.
    pub fn load_state_txn(&self, txn: &WriteTransaction) -> StorageResult<LedgerState> {
        let table = txn.open_table(STATE_TABLE)?;
        match table.get(STATE_KEY)? {
            Some(guard) => {
                let state: LedgerState = serde_json::from_slice(guard.value())?;
                if !state.verify_checksum() {
                    return Err(StorageError::ChecksumMismatch);
                }
                Ok(state)
            }
            None => Ok(LedgerState::default()),
        }
    }

    /// Replace the state snapshot within a transaction.
    pub fn store_state(&self, txn: &WriteTransaction, state: &LedgerState) -> StorageResult<()> {
        let mut table = txn.open_table(STATE_TABLE)?;
        let bytes = serde_json::to_vec(state)?;
        table.insert(STATE_KEY, bytes.as_slice())?;
        Ok(())
    }

    // ========== Events ==========

    /// Append an event within a transaction, keyed by its sequence.
    pub fn store_event(&self, txn: &WriteTransaction, event: &LedgerEvent) -> StorageResult<()> {
        let mut table = txn.open_table(EVENTS_TABLE)?;
        let bytes = serde_json::to_vec(event)?;
        table.insert(event.sequence, bytes.as_slice())?;
        Ok(())
    }

    /// Events with sequence strictly greater than `after`, in order.
    pub fn get_events_since(&self, after: u64) -> StorageResult<Vec<LedgerEvent>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(EVENTS_TABLE)?;
        let mut events = Vec::new();
        for entry in table.range((after + 1)..)? {
            let (_, value) = entry?;
            events.push(serde_json::from_slice(value.value())?);
        }
        Ok(events)
    }

    // ========== Idempotency ==========

    /// Whether a command id has already been processed (read-only check).
    pub fn is_command_processed(&self, command_id: &Uuid) -> StorageResult<bool> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(PROCESSED_COMMANDS_TABLE)?;
        Ok(table.get(command_id.to_string().as_str())?.is_some())
    }

    /// Same check from within a write transaction.
    pub fn is_command_processed_txn(
        &self,
        txn: &WriteTransaction,
        command_id: &Uuid,
    ) -> StorageResult<bool> {
        let table = txn.open_table(PROCESSED_COMMANDS_TABLE)?;
        Ok(table.get(command_id.to_string().as_str())?.is_some())
    }

    /// Record a command id as processed within a transaction.
    pub fn mark_command_processed(
        &self,
        txn: &WriteTransaction,
        command_id: &Uuid,
    ) -> StorageResult<()> {
        let mut table = txn.open_table(PROCESSED_COMMANDS_TABLE)?;
        table.insert(command_id.to_string().as_str(), ())?;
        Ok(())
    }
}
