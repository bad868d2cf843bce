//! rota-calendar: view models for the staff calendar.
//!
//! # Layouts
//!
//! | View | Grid |
//! |---|---|
//! | `overview` | 24 hours × 7 days, markers of staff on shift |
//! | `week` | staff × 7 days, shift label or add-schedule prompt |
//! | `month` | days of the month, markers of staff scheduled that weekday |
//! | `staff` | 96 quarter-hours × 7 days of the task role's blocks |

pub mod nav;
pub mod notify;
pub mod views;

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use rota_core::{Engine, StaffMember};

pub use notify::{NotifyReceipt, NotifyRequest};
pub use views::*;

#[derive(Debug, Error)]
pub enum CalendarError {
    #[error("unknown calendar view: {0}")]
    UnknownView(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalendarView {
    Overview,
    Week,
    Month,
    Staff,
}

impl CalendarView {
    pub fn as_str(&self) -> &'static str {
        match self {
            CalendarView::Overview => "overview",
            CalendarView::Week => "week",
            CalendarView::Month => "month",
            CalendarView::Staff => "staff",
        }
    }
}

impl fmt::Display for CalendarView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CalendarView {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "overview" => Ok(CalendarView::Overview),
            "week" => Ok(CalendarView::Week),
            "month" => Ok(CalendarView::Month),
            "staff" => Ok(CalendarView::Staff),
            other => Err(CalendarError::UnknownView(other.to_string())),
        }
    }
}

/// A built layout, tagged with its view name.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "view", rename_all = "lowercase")]
pub enum CalendarPage {
    Overview(OverviewView),
    Week(WeekView),
    Month(MonthView),
    Staff(StaffView),
}

/// Build the requested layout around `date`.
pub fn build(
    view: CalendarView,
    engine: &Engine,
    roster: &[StaffMember],
    date: NaiveDate,
) -> CalendarPage {
    debug!(%view, %date, staff = roster.len(), "building calendar page");
    match view {
        CalendarView::Overview => CalendarPage::Overview(build_overview(engine, roster, date)),
        CalendarView::Week => CalendarPage::Week(build_week(engine, roster, date)),
        CalendarView::Month => CalendarPage::Month(build_month(engine, roster, date)),
        CalendarView::Staff => CalendarPage::Staff(build_staff_view(engine, roster, date)),
    }
}
