//! View models for the four calendar layouts.
//!
//! These types are purpose-built for the browser grid: they carry
//! pre-formatted labels and computed fields so the client only draws.
//! Every cell is resolved through the engine.

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

use rota_core::availability::{available_roles, is_scheduled};
use rota_core::labels::{hour_label, slot_label};
use rota_core::tasks::{TaskSpan, all_day_block, task_for_slot, task_spans};
use rota_core::{DayOfWeek, Engine, Recurrence, Role, SlotTime, StaffMember, TaskBlock, TaskKind};

use crate::nav::{self, DayHeader, Navigation};

// ── Markers ─────────────────────────────────────────────────────

/// Round staff badge drawn in overview and month cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Marker {
    pub staff_id: u64,
    pub role: Role,
    pub marker: String,
    pub color: String,
}

impl Marker {
    pub fn from_staff(staff: &StaffMember) -> Self {
        Self {
            staff_id: staff.id,
            role: staff.role,
            marker: staff.role.marker().to_string(),
            color: staff.color.clone(),
        }
    }
}

// ── Task detail ─────────────────────────────────────────────────

/// Contents of the "Schedule Details" dialog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDetail {
    pub staff_member: String,
    pub task: Option<TaskBlock>,
}

/// Detail for a marker clicked at (day, hour). Roles other than the
/// task role open the dialog with no task.
pub fn task_detail(engine: &Engine, staff: &StaffMember, day: DayOfWeek, hour: u8) -> TaskDetail {
    TaskDetail {
        staff_member: staff.name.clone(),
        task: engine.task_for(staff.role, day, hour),
    }
}

// ── Overview ────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverviewCell {
    pub day: DayOfWeek,
    pub markers: Vec<OverviewMarker>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverviewMarker {
    #[serde(flatten)]
    pub marker: Marker,
    pub detail: TaskDetail,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverviewRow {
    pub hour: u8,
    pub label: String,
    pub cells: Vec<OverviewCell>,
}

/// 24 hour rows × 7 day columns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverviewView {
    pub title: String,
    pub days: Vec<DayHeader>,
    pub rows: Vec<OverviewRow>,
    pub navigation: Navigation,
}

pub fn build_overview(engine: &Engine, roster: &[StaffMember], date: NaiveDate) -> OverviewView {
    let days = nav::week_headers(date);
    let rows = (0..24u8)
        .map(|hour| OverviewRow {
            hour,
            label: hour_label(hour),
            cells: days
                .iter()
                .map(|h| {
                    let on_shift = available_roles(&engine.table, h.day, hour);
                    OverviewCell {
                        day: h.day,
                        markers: roster
                            .iter()
                            .filter(|s| on_shift.contains(&s.role))
                            .map(|s| OverviewMarker {
                                marker: Marker::from_staff(s),
                                detail: task_detail(engine, s, h.day, hour),
                            })
                            .collect(),
                    }
                })
                .collect(),
        })
        .collect();

    OverviewView {
        title: nav::title(date),
        days,
        rows,
        navigation: Navigation {
            previous: nav::previous_week(date),
            next: nav::next_week(date),
        },
    }
}

// ── Week ────────────────────────────────────────────────────────

/// Pre-filled "add schedule" dialog for an empty week cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddSchedulePrompt {
    pub staff_member: String,
    pub staff_id: u64,
    pub date: String,
    pub time: String,
    pub recurrence: Recurrence,
}

/// Default slot offered by the add-schedule dialog.
const DEFAULT_ADD_TIME: &str = "2pm-4pm";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeekSlot {
    /// Source ranges, e.g. "9:00-10:00, 11:00-5:00".
    pub label: String,
    /// More than one range; the client draws the break.
    pub split_shift: bool,
    pub task: Option<TaskBlock>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeekCell {
    pub day: DayOfWeek,
    pub date: NaiveDate,
    pub slot: Option<WeekSlot>,
    pub add_prompt: Option<AddSchedulePrompt>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeekRow {
    pub staff: StaffMember,
    pub cells: Vec<WeekCell>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeekView {
    pub title: String,
    pub days: Vec<DayHeader>,
    pub rows: Vec<WeekRow>,
    pub navigation: Navigation,
}

pub fn build_week(engine: &Engine, roster: &[StaffMember], date: NaiveDate) -> WeekView {
    let days = nav::week_headers(date);
    let rows = roster
        .iter()
        .map(|staff| WeekRow {
            staff: staff.clone(),
            cells: days.iter().map(|h| week_cell(engine, staff, h)).collect(),
        })
        .collect();

    WeekView {
        title: nav::title(date),
        days,
        rows,
        navigation: Navigation {
            previous: nav::previous_week(date),
            next: nav::next_week(date),
        },
    }
}

fn week_cell(engine: &Engine, staff: &StaffMember, header: &DayHeader) -> WeekCell {
    match engine.table.entry(staff.role, header.day) {
        Some(entry) => WeekCell {
            day: header.day,
            date: header.date,
            slot: Some(WeekSlot {
                label: entry.label(),
                split_shift: entry.is_split_shift(),
                task: (staff.role == engine.task_role).then(all_day_block),
            }),
            add_prompt: None,
        },
        None => WeekCell {
            day: header.day,
            date: header.date,
            slot: None,
            add_prompt: Some(AddSchedulePrompt {
                staff_member: staff.name.clone(),
                staff_id: staff.id,
                date: nav::date_label(header.date),
                time: DEFAULT_ADD_TIME.to_string(),
                recurrence: Recurrence::None,
            }),
        },
    }
}

// ── Month ───────────────────────────────────────────────────────

/// One square of the month grid. Padding squares have no date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthCell {
    pub date: Option<NaiveDate>,
    pub day_of_month: Option<u32>,
    pub markers: Vec<Marker>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthView {
    pub title: String,
    pub days: Vec<DayOfWeek>,
    /// Row-major, always a multiple of seven.
    pub cells: Vec<MonthCell>,
    pub navigation: Navigation,
}

pub fn build_month(engine: &Engine, roster: &[StaffMember], date: NaiveDate) -> MonthView {
    let first = date.with_day(1).unwrap_or(date);
    let grid_start = nav::week_start(first);
    let last = nav::next_month(first) - Days::new(1);
    let grid_end = nav::week_start(last) + Days::new(6);

    let cells = grid_start
        .iter_days()
        .take_while(|d| *d <= grid_end)
        .map(|d| {
            if d.month() != first.month() {
                return MonthCell {
                    date: None,
                    day_of_month: None,
                    markers: Vec::new(),
                };
            }
            let day = DayOfWeek::from(d.weekday());
            MonthCell {
                date: Some(d),
                day_of_month: Some(d.day()),
                markers: roster
                    .iter()
                    .filter(|s| is_scheduled(&engine.table, s.role, day))
                    .map(Marker::from_staff)
                    .collect(),
            }
        })
        .collect();

    MonthView {
        title: nav::title(date),
        days: DayOfWeek::ALL.to_vec(),
        cells,
        navigation: Navigation {
            previous: nav::previous_month(date),
            next: nav::next_month(date),
        },
    }
}

// ── Staff view ──────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffSlotRow {
    pub time: SlotTime,
    pub label: String,
    /// One entry per day column, Sunday first.
    pub cells: Vec<Option<TaskKind>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffDayColumn {
    #[serde(flatten)]
    pub header: DayHeader,
    pub spans: Vec<TaskSpan>,
}

/// 96 quarter-hour rows for the task role.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffView {
    pub title: String,
    pub staff: Option<StaffMember>,
    pub days: Vec<StaffDayColumn>,
    pub rows: Vec<StaffSlotRow>,
    pub navigation: Navigation,
}

pub fn build_staff_view(engine: &Engine, roster: &[StaffMember], date: NaiveDate) -> StaffView {
    let headers = nav::week_headers(date);
    let rows = SlotTime::all()
        .map(|slot| StaffSlotRow {
            time: slot,
            label: slot_label(slot),
            cells: headers.iter().map(|h| task_for_slot(h.day, slot)).collect(),
        })
        .collect();

    StaffView {
        title: nav::title(date),
        staff: roster.iter().find(|s| s.role == engine.task_role).cloned(),
        days: headers
            .into_iter()
            .map(|header| StaffDayColumn {
                spans: task_spans(header.day),
                header,
            })
            .collect(),
        rows,
        navigation: Navigation {
            previous: nav::previous_week(date),
            next: nav::next_week(date),
        },
    }
}
