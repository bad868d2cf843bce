//! Date navigation for the calendar header.

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use rota_core::DayOfWeek;

/// Sunday on or before `date`; weeks are drawn Sunday first.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let back = date.weekday().num_days_from_sunday() as u64;
    date - Days::new(back)
}

pub fn previous_week(date: NaiveDate) -> NaiveDate {
    date - Days::new(7)
}

pub fn next_week(date: NaiveDate) -> NaiveDate {
    date + Days::new(7)
}

/// One calendar month back, clamped to the month's last day.
pub fn previous_month(date: NaiveDate) -> NaiveDate {
    date.checked_sub_months(Months::new(1)).unwrap_or(date)
}

pub fn next_month(date: NaiveDate) -> NaiveDate {
    date.checked_add_months(Months::new(1)).unwrap_or(date)
}

/// Header title, e.g. "December 2024".
pub fn title(date: NaiveDate) -> String {
    date.format("%B %Y").to_string()
}

/// Add-schedule dialog date, e.g. "Monday, Dec 9th".
pub fn date_label(date: NaiveDate) -> String {
    let day = date.day();
    format!(
        "{}, {} {}{}",
        DayOfWeek::from(date.weekday()),
        date.format("%b"),
        day,
        ordinal_suffix(day)
    )
}

fn ordinal_suffix(day: u32) -> &'static str {
    match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}

/// Column header for one day of a week grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayHeader {
    pub day: DayOfWeek,
    pub date: NaiveDate,
    pub day_of_month: u32,
}

/// The seven headers of the week containing `date`.
pub fn week_headers(date: NaiveDate) -> Vec<DayHeader> {
    let start = week_start(date);
    DayOfWeek::ALL
        .into_iter()
        .enumerate()
        .map(|(i, day)| {
            let date = start + Days::new(i as u64);
            DayHeader {
                day,
                date,
                day_of_month: date.day(),
            }
        })
        .collect()
}

/// Previous/next anchors for the header buttons.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Navigation {
    pub previous: NaiveDate,
    pub next: NaiveDate,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn week_starts_on_sunday() {
        // 2024-12-04 is a Wednesday.
        assert_eq!(week_start(d(2024, 12, 4)), d(2024, 12, 1));
        assert_eq!(week_start(d(2024, 12, 1)), d(2024, 12, 1));
        assert_eq!(week_start(d(2024, 12, 7)), d(2024, 12, 1));
        assert_eq!(week_start(d(2025, 1, 2)), d(2024, 12, 29));
    }

    #[test]
    fn week_and_month_steps() {
        assert_eq!(next_week(d(2024, 12, 4)), d(2024, 12, 11));
        assert_eq!(previous_week(d(2024, 12, 4)), d(2024, 11, 27));
        assert_eq!(next_month(d(2024, 1, 31)), d(2024, 2, 29));
        assert_eq!(previous_month(d(2024, 3, 31)), d(2024, 2, 29));
    }

    #[test]
    fn labels() {
        assert_eq!(title(d(2024, 12, 4)), "December 2024");
        assert_eq!(date_label(d(2024, 12, 9)), "Monday, Dec 9th");
        assert_eq!(date_label(d(2024, 12, 1)), "Sunday, Dec 1st");
        assert_eq!(date_label(d(2024, 12, 22)), "Sunday, Dec 22nd");
        assert_eq!(date_label(d(2024, 12, 13)), "Friday, Dec 13th");
    }

    #[test]
    fn headers_span_one_week() {
        let headers = week_headers(d(2024, 12, 4));
        assert_eq!(headers.len(), 7);
        assert_eq!(headers[0].day, DayOfWeek::Sunday);
        assert_eq!(headers[0].day_of_month, 1);
        assert_eq!(headers[6].day, DayOfWeek::Saturday);
        assert_eq!(headers[6].day_of_month, 7);
    }
}
