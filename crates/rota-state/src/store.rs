//! StateStore: redb-backed row storage for staff, profiles and schedules.
//!
//! Insert-only: each insert is one write transaction that takes the next
//! serial id for the table and writes the row. The store supports both
//! on-disk and in-memory backends (the latter for testing).

use std::path::Path;
use std::sync::Arc;

use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition, WriteTransaction};
use serde::de::DeserializeOwned;
use rota_core::StaffProfile;
use tracing::{debug, info};

use crate::error::{StateError, StateResult};
use crate::tables::*;
use crate::types::*;

/// Convert any `Display` error into a `StateError` variant via a closure factory.
macro_rules! map_err {
    ($variant:ident) => {
        |e| StateError::$variant(e.to_string())
    };
}

/// Thread-safe row store backed by redb.
#[derive(Clone)]
pub struct StateStore {
    db: Arc<Database>,
}

impl StateStore {
    /// Open (or create) a persistent store at the given path.
    pub fn open(path: &Path) -> StateResult<Self> {
        let db = Database::create(path).map_err(map_err!(Open))?;
        let store = Self { db: Arc::new(db) };
        store.ensure_tables()?;
        debug!(?path, "state store opened");
        Ok(store)
    }

    /// Create an ephemeral in-memory store (for testing).
    pub fn open_in_memory() -> StateResult<Self> {
        let backend = redb::backends::InMemoryBackend::new();
        let db = Database::builder()
            .create_with_backend(backend)
            .map_err(map_err!(Open))?;
        let store = Self { db: Arc::new(db) };
        store.ensure_tables()?;
        debug!("in-memory state store opened");
        Ok(store)
    }

    /// Create all tables if they don't exist yet.
    fn ensure_tables(&self) -> StateResult<()> {
        let txn = self.db.begin_write().map_err(map_err!(Transaction))?;
        // Opening a table in a write transaction creates it if absent.
        txn.open_table(STAFF).map_err(map_err!(Table))?;
        txn.open_table(PROFILES).map_err(map_err!(Table))?;
        txn.open_table(SCHEDULES).map_err(map_err!(Table))?;
        txn.open_table(SEQUENCES).map_err(map_err!(Table))?;
        txn.commit().map_err(map_err!(Transaction))?;
        Ok(())
    }

    // ── Staff ──────────────────────────────────────────────────────

    /// Insert a staff row with its profile and return the row.
    pub fn insert_staff(&self, new: NewStaff) -> StateResult<Staff> {
        let txn = self.db.begin_write().map_err(map_err!(Transaction))?;
        let staff = write_staff(&txn, new)?;
        txn.commit().map_err(map_err!(Transaction))?;
        debug!(id = staff.id, role = %staff.role, "staff stored");
        Ok(staff)
    }

    /// Get a staff row by id.
    pub fn get_staff(&self, id: u64) -> StateResult<Option<Staff>> {
        self.get_row(STAFF, id)
    }

    /// Contact profile stored with a staff row.
    pub fn get_profile(&self, id: u64) -> StateResult<Option<StaffProfile>> {
        self.get_row(PROFILES, id)
    }

    /// List all staff rows in id order.
    pub fn list_staff(&self) -> StateResult<Vec<Staff>> {
        self.list_rows(STAFF)
    }

    /// Insert the roster when the staff table is empty. Returns the number
    /// of rows written; a populated table is left untouched.
    pub fn seed_staff(&self, roster: &[NewStaff]) -> StateResult<usize> {
        if !self.list_staff()?.is_empty() {
            return Ok(0);
        }
        let txn = self.db.begin_write().map_err(map_err!(Transaction))?;
        for new in roster {
            write_staff(&txn, new.clone())?;
        }
        txn.commit().map_err(map_err!(Transaction))?;
        info!(count = roster.len(), "staff table seeded");
        Ok(roster.len())
    }

    // ── Schedules ──────────────────────────────────────────────────

    /// Insert one schedule row. The referenced staff row must exist.
    pub fn insert_schedule(&self, new: NewSchedule) -> StateResult<Schedule> {
        let txn = self.db.begin_write().map_err(map_err!(Transaction))?;
        {
            let staff = txn.open_table(STAFF).map_err(map_err!(Table))?;
            if staff.get(new.staff_id).map_err(map_err!(Read))?.is_none() {
                return Err(StateError::MissingStaff(new.staff_id));
            }
        }
        let id = next_id(&txn, "schedules")?;
        let schedule = new.with_id(id);
        write_row(&txn, SCHEDULES, id, &schedule)?;
        txn.commit().map_err(map_err!(Transaction))?;
        debug!(id, staff_id = schedule.staff_id, "schedule stored");
        Ok(schedule)
    }

    /// List all schedule rows in id order.
    pub fn list_schedules(&self) -> StateResult<Vec<Schedule>> {
        self.list_rows(SCHEDULES)
    }

    // ── Helpers ────────────────────────────────────────────────────

    fn get_row<T: DeserializeOwned>(
        &self,
        def: TableDefinition<u64, &[u8]>,
        id: u64,
    ) -> StateResult<Option<T>> {
        let txn = self.db.begin_read().map_err(map_err!(Transaction))?;
        let table = txn.open_table(def).map_err(map_err!(Table))?;
        match table.get(id).map_err(map_err!(Read))? {
            Some(guard) => {
                let row: T = serde_json::from_slice(guard.value()).map_err(map_err!(Deserialize))?;
                Ok(Some(row))
            }
            None => Ok(None),
        }
    }

    fn list_rows<T: DeserializeOwned>(&self, def: TableDefinition<u64, &[u8]>) -> StateResult<Vec<T>> {
        let txn = self.db.begin_read().map_err(map_err!(Transaction))?;
        let table = txn.open_table(def).map_err(map_err!(Table))?;
        let mut results = Vec::new();
        for entry in table.iter().map_err(map_err!(Read))? {
            let (_, value) = entry.map_err(map_err!(Read))?;
            let row: T = serde_json::from_slice(value.value()).map_err(map_err!(Deserialize))?;
            results.push(row);
        }
        Ok(results)
    }
}

fn write_staff(txn: &WriteTransaction, new: NewStaff) -> StateResult<Staff> {
    let id = next_id(txn, "staff")?;
    let (staff, profile) = new.with_id(id);
    write_row(txn, STAFF, id, &staff)?;
    write_row(txn, PROFILES, id, &profile)?;
    Ok(staff)
}

/// Bump and return the serial for `table` inside an open write transaction.
fn next_id(txn: &WriteTransaction, table: &str) -> StateResult<u64> {
    let mut seq = txn.open_table(SEQUENCES).map_err(map_err!(Table))?;
    let next = seq
        .get(table)
        .map_err(map_err!(Read))?
        .map(|guard| guard.value())
        .unwrap_or(0)
        + 1;
    seq.insert(table, next).map_err(map_err!(Write))?;
    Ok(next)
}

fn write_row<T: serde::Serialize>(
    txn: &WriteTransaction,
    def: TableDefinition<u64, &[u8]>,
    id: u64,
    row: &T,
) -> StateResult<()> {
    let value = serde_json::to_vec(row).map_err(map_err!(Serialize))?;
    let mut table = txn.open_table(def).map_err(map_err!(Table))?;
    table
        .insert(id, value.as_slice())
        .map_err(map_err!(Write))?;
    Ok(())
}
