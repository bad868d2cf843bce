//! Availability resolver: is a role on shift on a given day and hour?
//!
//! Evaluation order:
//! 1. Blackout window. Listed roles are off in that window, no lookup.
//! 2. Table lookup. No entry for the day means off.
//! 3. Containment. On if any of the day's ranges contains the hour.
//!
//! Unknown or unscheduled cells resolve to `false`; callers that need to
//! reject bad input parse it into [`Role`]/[`DayOfWeek`] first.

use crate::schedule::WeeklyScheduleTable;
use crate::types::{AvailabilityQuery, DayOfWeek, Role};

pub fn is_available(table: &WeeklyScheduleTable, role: Role, day: DayOfWeek, hour: u8) -> bool {
    if table.blackout().applies(role, hour) {
        return false;
    }
    table
        .entry(role, day)
        .is_some_and(|entry| entry.contains(hour))
}

/// Same as [`is_available`]; the query's quarter does not change the answer.
pub fn resolve(table: &WeeklyScheduleTable, query: &AvailabilityQuery) -> bool {
    is_available(table, query.role, query.day, query.hour)
}

/// Whether the role has any entry that day, ignoring hours.
pub fn is_scheduled(table: &WeeklyScheduleTable, role: Role, day: DayOfWeek) -> bool {
    table.entry(role, day).is_some()
}

/// Roles on shift for one cell, in roster order.
pub fn available_roles(table: &WeeklyScheduleTable, day: DayOfWeek, hour: u8) -> Vec<Role> {
    Role::ALL
        .into_iter()
        .filter(|&role| is_available(table, role, day, hour))
        .collect()
}
