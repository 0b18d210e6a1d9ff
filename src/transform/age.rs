//! Age derivation from a birth timestamp.

use chrono::{DateTime, Datelike, NaiveDate};

/// Date used when a birth date cannot be parsed: 0001-01-01.
pub fn zero_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(1, 1, 1).unwrap_or(NaiveDate::MIN)
}

/// Parses an RFC 3339 timestamp and returns its calendar date in the
/// timestamp's own offset.
pub fn parse_birth_date(raw: &str) -> Option<NaiveDate> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.date_naive())
}

/// Whole years between `birth` and `today`.
///
/// The count drops by one until this year's birthday has been reached.
/// A 29 February birthday is reached on 28 February in common years.
pub fn age_on(birth: NaiveDate, today: NaiveDate) -> i32 {
    let mut years = today.year() - birth.year();
    if (today.month(), today.day()) < birthday_in(birth, today.year()) {
        years -= 1;
    }
    years
}

fn birthday_in(birth: NaiveDate, year: i32) -> (u32, u32) {
    if birth.month() == 2 && birth.day() == 29 && !is_leap_year(year) {
        (2, 28)
    } else {
        (birth.month(), birth.day())
    }
}

fn is_leap_year(year: i32) -> bool {
    NaiveDate::from_ymd_opt(year, 2, 29).is_some()
}
