use std::fmt::Display;

use chrono::{DateTime, Local, TimeZone, Utc};

/// Calendar date in the user's local time zone.
#[must_use]
pub fn format_date(value: DateTime<Utc>) -> String {
    format_date_in(value, &Local)
}

#[must_use]
pub fn format_date_in<Tz>(value: DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    value.with_timezone(tz).format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;
    use study_core::time::fixed_now;

    #[test]
    fn formats_calendar_date() {
        // 2023-11-14T22:13:20Z
        assert_eq!(format_date_in(fixed_now(), &Utc), "2023-11-14");
    }

    #[test]
    fn date_follows_the_offset() {
        let tokyo = FixedOffset::east_opt(9 * 3600).unwrap();
        assert_eq!(format_date_in(fixed_now(), &tokyo), "2023-11-15");
    }
}
