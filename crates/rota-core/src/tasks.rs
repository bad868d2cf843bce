//! Task derivation for the task role (the first pharmacist by default).
//!
//! Two granularities share one vocabulary of windows:
//!
//! - hourly, for the overview grid and the task dialog, and
//! - quarter-hour, for the staff view.
//!
//! Both are ordered rule lists; the first matching rule wins.

use serde::{Deserialize, Serialize};

use crate::labels::minute_label;
use crate::types::{DayOfWeek, SlotTime, TaskBlock, TaskKind};

// ── Hourly ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
enum When {
    Hour(u8),
    Day(DayOfWeek),
    /// `start <= hour < end`.
    Between(u8, u8),
}

impl When {
    fn matches(&self, day: DayOfWeek, hour: u8) -> bool {
        match *self {
            When::Hour(h) => hour == h,
            When::Day(d) => day == d,
            When::Between(start, end) => hour >= start && hour < end,
        }
    }
}

/// Label of the whole-day Dispensing block.
pub const ALL_DAY: &str = "9:00am-5:00pm";

struct HourRule {
    when: When,
    task: TaskKind,
    time: &'static str,
}

/// Precedence order. The hour-16 MedsCheck rule sits above the Saturday
/// all-day block, so Saturday at 16 is MedsCheck at this granularity.
const HOURLY_RULES: [HourRule; 5] = [
    HourRule {
        when: When::Hour(16),
        task: TaskKind::MedsCheck,
        time: "4:00pm-5:00pm",
    },
    HourRule {
        when: When::Day(DayOfWeek::Saturday),
        task: TaskKind::Dispensing,
        time: ALL_DAY,
    },
    HourRule {
        when: When::Hour(9),
        task: TaskKind::Dispensing,
        time: "9:00am-11:00am",
    },
    HourRule {
        when: When::Between(11, 13),
        task: TaskKind::FluShot,
        time: "11:00am to 1:00pm",
    },
    HourRule {
        when: When::Between(14, 16),
        task: TaskKind::Dispensing,
        time: "2:00pm to 4:00pm",
    },
];

/// Task for an hour cell, or `None` for a gap (e.g. 10:00, 13:00).
///
/// Not gated on availability: the grid only asks for cells it draws.
pub fn task_for_hour(day: DayOfWeek, hour: u8) -> Option<TaskBlock> {
    HOURLY_RULES
        .iter()
        .find(|rule| rule.when.matches(day, hour))
        .map(|rule| TaskBlock::new(rule.task, rule.time))
}

/// Whole-day block shown when a scheduled day is opened without an hour.
pub fn all_day_block() -> TaskBlock {
    TaskBlock::new(TaskKind::Dispensing, ALL_DAY)
}

// ── Quarter-hour ───────────────────────────────────────────────────

/// Days on which the staff view draws nothing for the task role.
const QUIET_DAYS: [DayOfWeek; 2] = [DayOfWeek::Sunday, DayOfWeek::Tuesday];

#[derive(Debug, Clone, Copy)]
enum Days {
    Any,
    Saturday,
    NotSaturday,
}

impl Days {
    fn matches(&self, day: DayOfWeek) -> bool {
        match self {
            Days::Any => true,
            Days::Saturday => day == DayOfWeek::Saturday,
            Days::NotSaturday => day != DayOfWeek::Saturday,
        }
    }
}

struct SlotRule {
    days: Days,
    /// First slot, minutes since midnight.
    first: u16,
    /// Last slot (inclusive), minutes since midnight.
    last: u16,
    task: TaskKind,
}

const fn hm(hour: u16, minute: u16) -> u16 {
    hour * 60 + minute
}

const SLOT_RULES: [SlotRule; 6] = [
    SlotRule {
        days: Days::Any,
        first: hm(9, 0),
        last: hm(10, 45),
        task: TaskKind::Dispensing,
    },
    SlotRule {
        days: Days::NotSaturday,
        first: hm(11, 0),
        last: hm(12, 45),
        task: TaskKind::FluShot,
    },
    SlotRule {
        days: Days::NotSaturday,
        first: hm(13, 0),
        last: hm(13, 30),
        task: TaskKind::Lunch,
    },
    SlotRule {
        days: Days::Saturday,
        first: hm(11, 0),
        last: hm(16, 45),
        task: TaskKind::Dispensing,
    },
    SlotRule {
        days: Days::NotSaturday,
        first: hm(13, 45),
        last: hm(15, 45),
        task: TaskKind::Dispensing,
    },
    SlotRule {
        days: Days::NotSaturday,
        first: hm(16, 0),
        last: hm(16, 45),
        task: TaskKind::MedsCheck,
    },
];

/// Task for one quarter-hour slot of the staff view.
pub fn task_for_slot(day: DayOfWeek, slot: SlotTime) -> Option<TaskKind> {
    if QUIET_DAYS.contains(&day) {
        return None;
    }
    let t = slot.minute_of_day();
    SLOT_RULES
        .iter()
        .find(|rule| rule.days.matches(day) && (rule.first..=rule.last).contains(&t))
        .map(|rule| rule.task)
}

/// Consecutive slots with the same task, merged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskSpan {
    pub task: TaskKind,
    pub start: SlotTime,
    /// Last slot covered (inclusive).
    pub last: SlotTime,
    /// e.g. "1:45pm-4:00pm".
    pub time: String,
}

/// A day's staff-view blocks, in time order.
pub fn task_spans(day: DayOfWeek) -> Vec<TaskSpan> {
    let mut spans: Vec<TaskSpan> = Vec::new();
    let mut prev: Option<TaskKind> = None;

    for slot in SlotTime::all() {
        let task = task_for_slot(day, slot);
        if let Some(task) = task {
            if prev == Some(task) {
                if let Some(span) = spans.last_mut() {
                    span.last = slot;
                }
            } else {
                spans.push(TaskSpan {
                    task,
                    start: slot,
                    last: slot,
                    time: String::new(),
                });
            }
        }
        prev = task;
    }

    for span in &mut spans {
        span.time = format!(
            "{}-{}",
            minute_label(span.start.minute_of_day()),
            minute_label(span.last.minute_of_day() + 15)
        );
    }
    spans
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Quarter;

    fn slot(hour: u8, minute: u8) -> SlotTime {
        SlotTime::new(hour, Quarter::from_minutes(minute).unwrap())
    }

    #[test]
    fn meds_check_takes_precedence() {
        for day in DayOfWeek::ALL {
            let block = task_for_hour(day, 16).unwrap();
            assert_eq!(block.task, TaskKind::MedsCheck);
            assert_eq!(block.time, "4:00pm-5:00pm");
        }
    }

    #[test]
    fn saturday_all_day_label() {
        let block = task_for_hour(DayOfWeek::Saturday, 9).unwrap();
        assert_eq!(block, TaskBlock::new(TaskKind::Dispensing, "9:00am-5:00pm"));
        // The Saturday rule also covers hours the weekday rules leave empty.
        assert_eq!(
            task_for_hour(DayOfWeek::Saturday, 10).unwrap().time,
            "9:00am-5:00pm"
        );
    }

    #[test]
    fn weekday_hours() {
        let d = DayOfWeek::Monday;
        assert_eq!(
            task_for_hour(d, 9),
            Some(TaskBlock::new(TaskKind::Dispensing, "9:00am-11:00am"))
        );
        assert_eq!(
            task_for_hour(d, 11),
            Some(TaskBlock::new(TaskKind::FluShot, "11:00am to 1:00pm"))
        );
        assert_eq!(task_for_hour(d, 12).unwrap().task, TaskKind::FluShot);
        assert_eq!(
            task_for_hour(d, 14),
            Some(TaskBlock::new(TaskKind::Dispensing, "2:00pm to 4:00pm"))
        );
        assert_eq!(task_for_hour(d, 15).unwrap().task, TaskKind::Dispensing);
        assert_eq!(task_for_hour(d, 8), None);
        assert_eq!(task_for_hour(d, 17), None);
    }

    #[test]
    fn gap_hours_are_empty_on_weekdays() {
        for day in DayOfWeek::ALL.into_iter().filter(|d| *d != DayOfWeek::Saturday) {
            assert_eq!(task_for_hour(day, 10), None);
            assert_eq!(task_for_hour(day, 13), None);
        }
    }

    #[test]
    fn hourly_is_pure() {
        for day in DayOfWeek::ALL {
            for hour in 0..24 {
                assert_eq!(task_for_hour(day, hour), task_for_hour(day, hour));
            }
        }
    }

    #[test]
    fn quiet_days_render_nothing() {
        for s in SlotTime::all() {
            assert_eq!(task_for_slot(DayOfWeek::Sunday, s), None);
            assert_eq!(task_for_slot(DayOfWeek::Tuesday, s), None);
        }
    }

    #[test]
    fn weekday_slot_boundaries() {
        let d = DayOfWeek::Wednesday;
        assert_eq!(task_for_slot(d, slot(8, 45)), None);
        assert_eq!(task_for_slot(d, slot(9, 0)), Some(TaskKind::Dispensing));
        assert_eq!(task_for_slot(d, slot(10, 45)), Some(TaskKind::Dispensing));
        assert_eq!(task_for_slot(d, slot(11, 0)), Some(TaskKind::FluShot));
        assert_eq!(task_for_slot(d, slot(12, 45)), Some(TaskKind::FluShot));
        assert_eq!(task_for_slot(d, slot(13, 0)), Some(TaskKind::Lunch));
        assert_eq!(task_for_slot(d, slot(13, 30)), Some(TaskKind::Lunch));
        assert_eq!(task_for_slot(d, slot(13, 45)), Some(TaskKind::Dispensing));
        assert_eq!(task_for_slot(d, slot(15, 45)), Some(TaskKind::Dispensing));
        assert_eq!(task_for_slot(d, slot(16, 0)), Some(TaskKind::MedsCheck));
        assert_eq!(task_for_slot(d, slot(16, 45)), Some(TaskKind::MedsCheck));
        assert_eq!(task_for_slot(d, slot(17, 0)), None);
    }

    #[test]
    fn saturday_slots_collapse_to_dispensing() {
        let d = DayOfWeek::Saturday;
        for s in SlotTime::all() {
            let t = s.minute_of_day();
            let expected = (hm(9, 0)..=hm(16, 45))
                .contains(&t)
                .then_some(TaskKind::Dispensing);
            assert_eq!(task_for_slot(d, s), expected, "{s:?}");
        }
        // No MedsCheck on Saturday at quarter resolution, unlike the hourly rule.
        assert_eq!(task_for_slot(d, slot(16, 0)), Some(TaskKind::Dispensing));
        assert_eq!(task_for_hour(d, 16).unwrap().task, TaskKind::MedsCheck);
    }

    #[test]
    fn weekday_spans() {
        let spans = task_spans(DayOfWeek::Monday);
        let summary: Vec<(TaskKind, &str)> =
            spans.iter().map(|s| (s.task, s.time.as_str())).collect();
        assert_eq!(
            summary,
            vec![
                (TaskKind::Dispensing, "9:00am-11:00am"),
                (TaskKind::FluShot, "11:00am-1:00pm"),
                (TaskKind::Lunch, "1:00pm-1:45pm"),
                (TaskKind::Dispensing, "1:45pm-4:00pm"),
                (TaskKind::MedsCheck, "4:00pm-5:00pm"),
            ]
        );
    }

    #[test]
    fn saturday_is_one_span() {
        let spans = task_spans(DayOfWeek::Saturday);
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].task, TaskKind::Dispensing);
        assert_eq!(spans[0].time, "9:00am-5:00pm");
        assert!(task_spans(DayOfWeek::Tuesday).is_empty());
    }
}
