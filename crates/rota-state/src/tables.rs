//! redb table definitions for the rota row store.

use redb::TableDefinition;

/// Staff rows keyed by serial id.
pub const STAFF: TableDefinition<u64, &[u8]> = TableDefinition::new("staff");

/// Schedule rows keyed by serial id.
pub const SCHEDULES: TableDefinition<u64, &[u8]> = TableDefinition::new("schedules");

/// Last id handed out per row table, keyed by table name.
pub const SEQUENCES: TableDefinition<&str, u64> = TableDefinition::new("sequences");

/// Staff contact profiles keyed by staff id.
pub const PROFILES: TableDefinition<u64, &[u8]> = TableDefinition::new("profiles");
