//! rota-state: row store for the rota service.
//!
//! Backed by [redb](https://docs.rs/redb). Two row tables mirror the
//! relational schema the calendar was first built on, and a side table
//! keeps each staff member's contact profile:
//!
//! | Table | Row |
//! |---|---|
//! | `staff` | `{id, name, role, color}` |
//! | `profiles` | `{pronunciation?, pronouns?, phone?, email?}` keyed by staff id |
//! | `schedules` | `{id, staffId, startTime, endTime, dayOfWeek, recurrence}` |
//!
//! Rows are JSON-serialized into `&[u8]` values under serial `u64` keys.
//! Rows are only ever inserted; there is no update or delete path.
//!
//! The `StateStore` is `Clone` + `Send` + `Sync` (backed by `Arc<Database>`)
//! and can be shared across async tasks.

pub mod error;
pub mod store;
pub mod tables;
pub mod types;

pub use error::{StateError, StateResult};
pub use store::StateStore;
pub use types::*;
