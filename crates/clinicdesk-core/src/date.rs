//! Calendar-date normalization.
//!
//! Dates reach the data layer in three shapes: native dates, ISO-8601
//! strings from the backend (`2024-03-05T00:00:00.000Z`, `2024-03-05`) and
//! strings already formatted for display (`05/03/2024`). Everything that
//! compares or searches dates goes through [`normalize_date`] so all three
//! collapse to the same [`CalendarDate`].

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::value::FieldValue;

/// Display format used throughout the clinic views.
const DISPLAY_FORMAT: &str = "%d/%m/%Y";

/// Date-only ISO format sent to the backend.
const ISO_FORMAT: &str = "%Y-%m-%d";

/// Length of the `YYYY-MM-DDTHH:MM:SS` prefix of an ISO date-time.
const ISO_DATETIME_PREFIX_LEN: usize = 19;

/// A year/month/day with no time-of-day component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// `DD/MM/YYYY`
    pub fn display(&self) -> String {
        self.0.format(DISPLAY_FORMAT).to_string()
    }

    /// `YYYY-MM-DD`
    pub fn iso(&self) -> String {
        self.0.format(ISO_FORMAT).to_string()
    }

    /// Parse any of the accepted textual date shapes.
    ///
    /// For date-times the calendar day is taken as written; no timezone
    /// conversion is applied.
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }

        if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
            return Some(Self(dt.date_naive()));
        }

        if let Some(prefix) = input.get(..ISO_DATETIME_PREFIX_LEN) {
            if let Ok(dt) = NaiveDateTime::parse_from_str(prefix, "%Y-%m-%dT%H:%M:%S") {
                return Some(Self(dt.date()));
            }
        }

        NaiveDate::parse_from_str(input, ISO_FORMAT)
            .or_else(|_| NaiveDate::parse_from_str(input, DISPLAY_FORMAT))
            .ok()
            .map(Self)
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

impl From<NaiveDate> for CalendarDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

/// Reduce a field value to its calendar day, or `None` if it holds no date.
pub fn normalize_date(value: &FieldValue) -> Option<CalendarDate> {
    match value {
        FieldValue::Date(d) => Some(CalendarDate(*d)),
        FieldValue::Text(s) => CalendarDate::parse(s),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> CalendarDate {
        CalendarDate::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_iso_datetime_with_zulu() {
        assert_eq!(CalendarDate::parse("2024-03-05T00:00:00.000Z"), Some(day(2024, 3, 5)));
    }

    #[test]
    fn test_parse_keeps_written_day_regardless_of_offset() {
        assert_eq!(CalendarDate::parse("2024-03-05T23:30:00-03:00"), Some(day(2024, 3, 5)));
    }

    #[test]
    fn test_parse_local_datetime_without_zone() {
        assert_eq!(CalendarDate::parse("2024-03-05T14:22:10.123456"), Some(day(2024, 3, 5)));
        assert_eq!(CalendarDate::parse("2024-03-05T14:22:10"), Some(day(2024, 3, 5)));
    }

    #[test]
    fn test_parse_date_only_and_display_forms() {
        assert_eq!(CalendarDate::parse("2024-03-05"), Some(day(2024, 3, 5)));
        assert_eq!(CalendarDate::parse("05/03/2024"), Some(day(2024, 3, 5)));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(CalendarDate::parse(""), None);
        assert_eq!(CalendarDate::parse("Silva"), None);
        assert_eq!(CalendarDate::parse("31/02/2024"), None);
    }

    #[test]
    fn test_renderings() {
        let d = day(2024, 3, 5);
        assert_eq!(d.display(), "05/03/2024");
        assert_eq!(d.iso(), "2024-03-05");
        assert_eq!(d.to_string(), "05/03/2024");
    }

    #[test]
    fn test_normalize_date_from_each_shape() {
        let native = FieldValue::Date(NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
        let iso = FieldValue::text("2024-03-05T00:00:00.000Z");
        let display = FieldValue::text("05/03/2024");

        assert_eq!(normalize_date(&native), normalize_date(&iso));
        assert_eq!(normalize_date(&iso), normalize_date(&display));
        assert_eq!(normalize_date(&FieldValue::Bool(true)), None);
    }
}
