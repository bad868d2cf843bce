//! 12-hour clock labels used by grids and task blocks.

use crate::types::SlotTime;

/// `0 → "12:00am"`, `9 → "9:00am"`, `12 → "12:00pm"`, `16 → "4:00pm"`.
/// Hour 24 wraps to midnight.
pub fn hour_label(hour: u8) -> String {
    clock_label(hour % 24, 0)
}

/// Quarter-slot label: `"9:00am"` on the hour, `"9:15am"` otherwise.
pub fn slot_label(slot: SlotTime) -> String {
    clock_label(slot.hour, slot.quarter.minutes())
}

/// Label for minutes since midnight, e.g. `1020 → "5:00pm"`.
pub fn minute_label(minute_of_day: u16) -> String {
    let hour = ((minute_of_day / 60) % 24) as u8;
    clock_label(hour, (minute_of_day % 60) as u8)
}

fn clock_label(hour: u8, minutes: u8) -> String {
    let suffix = if hour >= 12 { "pm" } else { "am" };
    let h12 = match hour {
        0 | 12 => 12,
        h if h > 12 => h - 12,
        h => h,
    };
    format!("{h12}:{minutes:02}{suffix}")
}
