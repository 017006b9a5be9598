use chrono::{DateTime, Datelike, FixedOffset, NaiveDate};

/// Returns the first day of the month of the given date.
pub(crate) fn month_start_date(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1)
        .expect("copying a NaiveDate with overridden day=1 should never fail")
}

/// Calendar day on which the given instant falls, as seen from `offset`.
pub(crate) fn local_calendar_date(instant: DateTime<FixedOffset>, offset: FixedOffset) -> NaiveDate {
    instant.with_timezone(&offset).date_naive()
}
