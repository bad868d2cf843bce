//! rota-core: staff rota engine.
//!
//! Holds the weekly schedule table, the availability resolver, and the
//! task derivation for the task role. Everything here is pure and
//! synchronous; the table is built once from `rota.toml` and shared.

pub mod availability;
pub mod config;
pub mod error;
pub mod labels;
pub mod schedule;
pub mod tasks;
pub mod types;

pub use config::RotaConfig;
pub use error::{CoreError, CoreResult};
pub use schedule::{DayEntry, TimeRange, WeeklyScheduleTable};
pub use types::*;

/// Loaded engine: the table plus the role that carries task labels.
#[derive(Debug, Clone)]
pub struct Engine {
    pub table: WeeklyScheduleTable,
    pub task_role: Role,
}

impl Engine {
    pub fn from_config(config: &RotaConfig) -> CoreResult<Self> {
        Ok(Self {
            table: WeeklyScheduleTable::from_config(config)?,
            task_role: config.tasks.role,
        })
    }

    pub fn is_available(&self, role: Role, day: DayOfWeek, hour: u8) -> bool {
        availability::is_available(&self.table, role, day, hour)
    }

    /// Hourly task for a role; only the task role ever has one.
    pub fn task_for(&self, role: Role, day: DayOfWeek, hour: u8) -> Option<TaskBlock> {
        if role == self.task_role {
            tasks::task_for_hour(day, hour)
        } else {
            None
        }
    }
}
