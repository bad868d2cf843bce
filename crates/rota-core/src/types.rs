//! Shared types used across rota crates.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ── Roles ──────────────────────────────────────────────────────────

/// Fixed staff category. Primary key of the weekly schedule table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Role {
    Pharmacist1,
    Pharmacist2,
    Technician,
    Assistant1,
    Assistant2,
}

impl Role {
    pub const ALL: [Role; 5] = [
        Role::Pharmacist1,
        Role::Pharmacist2,
        Role::Technician,
        Role::Assistant1,
        Role::Assistant2,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Pharmacist1 => "Pharmacist1",
            Role::Pharmacist2 => "Pharmacist2",
            Role::Technician => "Technician",
            Role::Assistant1 => "Assistant1",
            Role::Assistant2 => "Assistant2",
        }
    }

    /// Two-character marker drawn in grid cells.
    pub fn marker(&self) -> &'static str {
        match self {
            Role::Pharmacist1 => "P1",
            Role::Pharmacist2 => "P2",
            Role::Technician => "T1",
            Role::Assistant1 => "A1",
            Role::Assistant2 => "A2",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| CoreError::UnknownRole(s.to_string()))
    }
}

// ── Days ───────────────────────────────────────────────────────────

/// Day of the week, ordered Sunday first like the calendar columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DayOfWeek {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl DayOfWeek {
    pub const ALL: [DayOfWeek; 7] = [
        DayOfWeek::Sunday,
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
        DayOfWeek::Saturday,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DayOfWeek::Sunday => "Sunday",
            DayOfWeek::Monday => "Monday",
            DayOfWeek::Tuesday => "Tuesday",
            DayOfWeek::Wednesday => "Wednesday",
            DayOfWeek::Thursday => "Thursday",
            DayOfWeek::Friday => "Friday",
            DayOfWeek::Saturday => "Saturday",
        }
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DayOfWeek {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DayOfWeek::ALL
            .into_iter()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| CoreError::UnknownDay(s.to_string()))
    }
}

impl From<chrono::Weekday> for DayOfWeek {
    fn from(w: chrono::Weekday) -> Self {
        DayOfWeek::ALL[w.num_days_from_sunday() as usize]
    }
}

// ── Staff ──────────────────────────────────────────────────────────

/// A staff member as the engine and the views see them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffMember {
    pub id: u64,
    pub name: String,
    pub role: Role,
    /// Presentation color tag (e.g. "bg-blue-100").
    pub color: String,
}

/// Contact details shown in the staff details dialog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StaffProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pronunciation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pronouns: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

// ── Queries ────────────────────────────────────────────────────────

/// Quarter-hour offset within an hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Quarter {
    Q00,
    Q15,
    Q30,
    Q45,
}

impl Quarter {
    pub const ALL: [Quarter; 4] = [Quarter::Q00, Quarter::Q15, Quarter::Q30, Quarter::Q45];

    pub fn minutes(&self) -> u8 {
        match self {
            Quarter::Q00 => 0,
            Quarter::Q15 => 15,
            Quarter::Q30 => 30,
            Quarter::Q45 => 45,
        }
    }

    pub fn from_minutes(minutes: u8) -> Result<Self, CoreError> {
        match minutes {
            0 => Ok(Quarter::Q00),
            15 => Ok(Quarter::Q15),
            30 => Ok(Quarter::Q30),
            45 => Ok(Quarter::Q45),
            other => Err(CoreError::InvalidMinute(other)),
        }
    }
}

/// A quarter-hour slot within a day, as drawn by the staff view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SlotTime {
    pub hour: u8,
    pub quarter: Quarter,
}

impl SlotTime {
    pub fn new(hour: u8, quarter: Quarter) -> Self {
        Self { hour, quarter }
    }

    /// Minutes since midnight.
    pub fn minute_of_day(&self) -> u16 {
        self.hour as u16 * 60 + self.quarter.minutes() as u16
    }

    /// All 96 slots of a day in order.
    pub fn all() -> impl Iterator<Item = SlotTime> {
        (0..24u8).flat_map(|h| Quarter::ALL.into_iter().map(move |q| SlotTime::new(h, q)))
    }
}

/// Input of the availability resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityQuery {
    pub role: Role,
    pub day: DayOfWeek,
    pub hour: u8,
    /// Carried for quarter-hour grids; availability is hour-granular.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quarter: Option<Quarter>,
}

/// Validate an hour coming from outside the engine.
pub fn parse_hour(hour: u8) -> Result<u8, CoreError> {
    if hour <= 23 {
        Ok(hour)
    } else {
        Err(CoreError::InvalidHour(hour))
    }
}

// ── Tasks ──────────────────────────────────────────────────────────

/// Named work block for the task role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskKind {
    Dispensing,
    #[serde(rename = "Flu Shot")]
    FluShot,
    Lunch,
    MedsCheck,
}

impl TaskKind {
    pub fn label(&self) -> &'static str {
        match self {
            TaskKind::Dispensing => "Dispensing",
            TaskKind::FluShot => "Flu Shot",
            TaskKind::Lunch => "Lunch",
            TaskKind::MedsCheck => "MedsCheck",
        }
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Derived task label for a scheduled cell. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskBlock {
    pub task: TaskKind,
    /// Human-readable time, e.g. "9:00am-11:00am".
    pub time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl TaskBlock {
    pub fn new(task: TaskKind, time: &str) -> Self {
        Self {
            task,
            time: time.to_string(),
            details: None,
        }
    }
}

// ── Notifications ──────────────────────────────────────────────────

/// Delivery channel picked in the notify dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotifyMethod {
    #[serde(rename = "SMS")]
    Sms,
    Email,
}

impl NotifyMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotifyMethod::Sms => "SMS",
            NotifyMethod::Email => "Email",
        }
    }
}

// ── Schedules ──────────────────────────────────────────────────────

/// Repeat selector of the add-schedule dialog. Stored with the row and
/// echoed back; no occurrences are generated from it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Recurrence {
    #[default]
    None,
    Daily,
    Weekly,
    Monthly,
}
