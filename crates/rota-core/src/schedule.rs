//! Weekly schedule table: role × day → ordered list of working ranges.
//!
//! Range strings are written the way the pharmacy writes them on paper,
//! `"9:00-10:00"` or `"11:00-5:00"`. Only the leading hour of each bound is
//! significant, and an end bound of exactly `"5:00"` is 17:00.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{BlackoutConfig, RangeSpec, RotaConfig};
use crate::error::{CoreError, CoreResult};
use crate::types::{DayOfWeek, Role};

/// End token that always means 5pm.
const FIVE_PM_TOKEN: &str = "5:00";

/// Half-open hour interval `[start_hour, end_hour)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start_hour: u8,
    pub end_hour: u8,
    /// Source text, kept for labels.
    pub raw: String,
}

impl TimeRange {
    /// Parse `"H:MM-H:MM"`.
    pub fn parse(range: &str) -> CoreResult<Self> {
        let invalid = |reason: &str| CoreError::InvalidRange {
            range: range.to_string(),
            reason: reason.to_string(),
        };

        let (start, end) = range.split_once('-').ok_or_else(|| invalid("missing '-'"))?;
        let start_hour = leading_hour(start).ok_or_else(|| invalid("bad start hour"))?;
        // Exact match only: " 5:00" is 05:00.
        let end_hour = if end == FIVE_PM_TOKEN {
            17
        } else {
            leading_hour(end).ok_or_else(|| invalid("bad end hour"))?
        };

        if start_hour > 23 || end_hour > 24 {
            return Err(invalid("hour out of range"));
        }
        if start_hour >= end_hour {
            return Err(invalid("start must be before end"));
        }

        Ok(Self {
            start_hour,
            end_hour,
            raw: range.trim().to_string(),
        })
    }

    pub fn contains(&self, hour: u8) -> bool {
        hour >= self.start_hour && hour < self.end_hour
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

fn leading_hour(token: &str) -> Option<u8> {
    token.trim().split(':').next()?.trim().parse().ok()
}

/// One day of a role's schedule. Never empty; more than one range is a
/// split shift and the gaps between ranges are breaks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayEntry {
    ranges: Vec<TimeRange>,
}

impl DayEntry {
    pub fn new(ranges: Vec<TimeRange>) -> Option<Self> {
        (!ranges.is_empty()).then_some(Self { ranges })
    }

    pub fn ranges(&self) -> &[TimeRange] {
        &self.ranges
    }

    pub fn is_split_shift(&self) -> bool {
        self.ranges.len() > 1
    }

    pub fn contains(&self, hour: u8) -> bool {
        self.ranges.iter().any(|r| r.contains(hour))
    }

    /// Comma-joined source ranges, e.g. `"9:00-10:00, 11:00-5:00"`.
    pub fn label(&self) -> String {
        self.ranges
            .iter()
            .map(|r| r.raw.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Hours in which specific roles never work, whatever the table says.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blackout {
    pub roles: Vec<Role>,
    /// Inclusive.
    pub first_hour: u8,
    /// Inclusive.
    pub last_hour: u8,
}

impl Blackout {
    pub fn applies(&self, role: Role, hour: u8) -> bool {
        (self.first_hour..=self.last_hour).contains(&hour) && self.roles.contains(&role)
    }
}

impl Default for Blackout {
    fn default() -> Self {
        Self::from(&BlackoutConfig::default())
    }
}

impl From<&BlackoutConfig> for Blackout {
    fn from(cfg: &BlackoutConfig) -> Self {
        Self {
            roles: cfg.roles.clone(),
            first_hour: cfg.first_hour,
            last_hour: cfg.last_hour,
        }
    }
}

/// Static weekly schedule, built once at startup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeeklyScheduleTable {
    days: BTreeMap<Role, BTreeMap<DayOfWeek, DayEntry>>,
    blackout: Blackout,
}

impl WeeklyScheduleTable {
    pub fn new(blackout: Blackout) -> Self {
        Self {
            days: BTreeMap::new(),
            blackout,
        }
    }

    /// Build the table from the `[schedule]` and `[blackout]` sections.
    pub fn from_config(config: &RotaConfig) -> CoreResult<Self> {
        let mut table = Self::new(Blackout::from(&config.blackout));
        for (role_key, days) in &config.schedule {
            let role: Role = role_key.parse()?;
            for (day_key, spec) in days {
                let day: DayOfWeek = day_key.parse()?;
                table.insert(role, day, spec)?;
            }
        }
        debug!(
            roles = table.days.len(),
            entries = table.days.values().map(BTreeMap::len).sum::<usize>(),
            "schedule table built"
        );
        Ok(table)
    }

    /// Parse and set one day's ranges, replacing any previous entry.
    pub fn insert(&mut self, role: Role, day: DayOfWeek, spec: &RangeSpec) -> CoreResult<()> {
        let ranges = spec
            .as_slice()
            .iter()
            .map(|s| TimeRange::parse(s))
            .collect::<CoreResult<Vec<_>>>()?;
        let entry = DayEntry::new(ranges).ok_or_else(|| CoreError::EmptyDay {
            role: role.to_string(),
            day: day.to_string(),
        })?;
        self.days.entry(role).or_default().insert(day, entry);
        Ok(())
    }

    pub fn entry(&self, role: Role, day: DayOfWeek) -> Option<&DayEntry> {
        self.days.get(&role)?.get(&day)
    }

    pub fn blackout(&self) -> &Blackout {
        &self.blackout
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn five_pm_end_token() {
        let r = TimeRange::parse("11:00-5:00").unwrap();
        assert_eq!((r.start_hour, r.end_hour), (11, 17));
        assert!(r.contains(16));
        assert!(!r.contains(17));
    }

    #[test]
    fn five_is_only_special_as_end() {
        // "5:00" as a start bound stays 05:00.
        let r = TimeRange::parse("5:00-9:00").unwrap();
        assert_eq!((r.start_hour, r.end_hour), (5, 9));
    }

    #[test]
    fn padded_five_is_not_five_pm() {
        // " 5:00" reads as 05:00, so the range is inverted.
        assert!(TimeRange::parse("9:00- 5:00").is_err());
        assert!(TimeRange::parse("9:00-5:00 ").is_err());
        let r = TimeRange::parse("1:00- 5:00").unwrap();
        assert_eq!((r.start_hour, r.end_hour), (1, 5));
    }

    #[test]
    fn plain_range() {
        let r = TimeRange::parse("9:00-10:00").unwrap();
        assert_eq!((r.start_hour, r.end_hour), (9, 10));
        assert!(r.contains(9));
        assert!(!r.contains(10));
    }

    #[test]
    fn malformed_ranges_rejected() {
        assert!(TimeRange::parse("9:00").is_err());
        assert!(TimeRange::parse("x:00-5:00").is_err());
        assert!(TimeRange::parse("9:00-").is_err());
        assert!(TimeRange::parse("").is_err());
    }

    #[test]
    fn inverted_range_rejected() {
        // Only "5:00" is rewritten; "4:00" is 04:00 and precedes 9.
        assert!(TimeRange::parse("9:00-4:00").is_err());
        assert!(TimeRange::parse("9:00-9:00").is_err());
    }

    #[test]
    fn empty_day_entry_rejected() {
        let mut table = WeeklyScheduleTable::default();
        let err = table
            .insert(Role::Technician, DayOfWeek::Monday, &RangeSpec::Many(vec![]))
            .unwrap_err();
        assert!(matches!(err, CoreError::EmptyDay { .. }));
    }

    #[test]
    fn split_shift_label() {
        let mut table = WeeklyScheduleTable::default();
        table
            .insert(
                Role::Pharmacist1,
                DayOfWeek::Monday,
                &RangeSpec::Many(vec!["9:00-10:00".into(), "11:00-5:00".into()]),
            )
            .unwrap();
        let entry = table.entry(Role::Pharmacist1, DayOfWeek::Monday).unwrap();
        assert!(entry.is_split_shift());
        assert_eq!(entry.label(), "9:00-10:00, 11:00-5:00");
        assert!(table.entry(Role::Pharmacist1, DayOfWeek::Tuesday).is_none());
    }

    #[test]
    fn default_config_builds() {
        let table = WeeklyScheduleTable::from_config(&RotaConfig::default()).unwrap();
        let assistant_days: Vec<DayOfWeek> = DayOfWeek::ALL
            .into_iter()
            .filter(|d| table.entry(Role::Assistant1, *d).is_some())
            .collect();
        assert_eq!(assistant_days, vec![DayOfWeek::Sunday]);
        assert!(table.entry(Role::Pharmacist1, DayOfWeek::Tuesday).is_none());
    }

    #[test]
    fn unknown_keys_rejected() {
        let mut config = RotaConfig::default();
        config
            .schedule
            .entry("Manager".into())
            .or_default()
            .insert("Monday".into(), RangeSpec::One("9:00-5:00".into()));
        assert!(matches!(
            WeeklyScheduleTable::from_config(&config),
            Err(CoreError::UnknownRole(_))
        ));

        let mut config = RotaConfig::default();
        config
            .schedule
            .entry("Technician".into())
            .or_default()
            .insert("Funday".into(), RangeSpec::One("9:00-5:00".into()));
        assert!(matches!(
            WeeklyScheduleTable::from_config(&config),
            Err(CoreError::UnknownDay(_))
        ));
    }
}
