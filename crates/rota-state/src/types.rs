//! Row types for the rota store.
//!
//! Staff rows are [`rota_core::StaffMember`]. Schedule rows use the
//! camelCase field names the browser client sends and expects.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use rota_core::{Recurrence, Role, StaffProfile};

pub use rota_core::StaffMember as Staff;

/// Color given to staff added without one.
pub const DEFAULT_STAFF_COLOR: &str = "bg-gray-100";

fn default_color() -> String {
    DEFAULT_STAFF_COLOR.to_string()
}

/// Staff fields before an id is assigned. Also the body of
/// `POST /api/staff`; profile fields sit at the top level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewStaff {
    pub name: String,
    pub role: Role,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(flatten)]
    pub profile: StaffProfile,
}

/// One ad-hoc schedule entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    pub id: u64,
    pub staff_id: u64,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    /// Free text, "Sunday" to "Saturday" by convention; not checked.
    pub day_of_week: String,
    #[serde(default)]
    pub recurrence: Recurrence,
}

/// Body of `POST /api/schedules`. Every field but `recurrence` is required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSchedule {
    pub staff_id: u64,
    #[serde(deserialize_with = "lenient_timestamp")]
    pub start_time: DateTime<Utc>,
    #[serde(deserialize_with = "lenient_timestamp")]
    pub end_time: DateTime<Utc>,
    pub day_of_week: String,
    #[serde(default)]
    pub recurrence: Recurrence,
}

/// Timestamp without an offset, with or without fractional seconds.
const NAIVE_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Parse RFC 3339, a naive date-time, or a bare date. Values without an
/// offset are taken as UTC; a bare date is midnight.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    if let Some(ts) = NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
    {
        return Some(ts.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|ts| ts.and_utc())
}

fn lenient_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {raw:?}")))
}

impl From<&rota_core::config::StaffConfig> for NewStaff {
    fn from(cfg: &rota_core::config::StaffConfig) -> Self {
        Self {
            name: cfg.name.clone(),
            role: cfg.role,
            color: cfg.color.clone(),
            profile: cfg.profile.clone(),
        }
    }
}

impl NewStaff {
    /// Split into the stored row and its profile.
    pub fn with_id(self, id: u64) -> (Staff, StaffProfile) {
        let staff = Staff {
            id,
            name: self.name,
            role: self.role,
            color: self.color,
        };
        (staff, self.profile)
    }
}

impl NewSchedule {
    pub fn with_id(self, id: u64) -> Schedule {
        Schedule {
            id,
            staff_id: self.staff_id,
            start_time: self.start_time,
            end_time: self.end_time,
            day_of_week: self.day_of_week,
            recurrence: self.recurrence,
        }
    }
}
