use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::Serialize;
use tracing::warn;

/// The same instant rendered a few ways for display in emails and pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormattedDateTime {
    /// `Jan 5, 2024, 10:00 AM`
    pub date_time: String,
    /// `Fri, 01/05/2024`
    pub date_day: String,
    /// `Jan 5, 2024`
    pub date_only: String,
    /// `10:00 AM`
    pub time_only: String,
}

/// Resolves an IANA zone name, falling back to UTC for anything unknown.
pub fn resolve_time_zone(time_zone: &str) -> Tz {
    time_zone.parse::<Tz>().unwrap_or_else(|_| {
        warn!("Unknown time zone '{}', formatting in UTC", time_zone);
        Tz::UTC
    })
}

pub fn format_date_time(instant: DateTime<Utc>, time_zone: &str) -> FormattedDateTime {
    let local = instant.with_timezone(&resolve_time_zone(time_zone));

    FormattedDateTime {
        date_time: local.format("%b %-d, %Y, %-I:%M %p").to_string(),
        date_day: local.format("%a, %m/%d/%Y").to_string(),
        date_only: local.format("%b %-d, %Y").to_string(),
        time_only: local.format("%-I:%M %p").to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn instant() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 5, 10, 0, 0).unwrap()
    }

    #[test]
    fn formats_in_utc() {
        let formatted = format_date_time(instant(), "UTC");
        assert_eq!(formatted.date_time, "Jan 5, 2024, 10:00 AM");
        assert_eq!(formatted.date_day, "Fri, 01/05/2024");
        assert_eq!(formatted.date_only, "Jan 5, 2024");
        assert_eq!(formatted.time_only, "10:00 AM");
    }

    #[test]
    fn shifts_into_requested_zone() {
        let formatted = format_date_time(instant(), "Africa/Nairobi");
        assert_eq!(formatted.date_time, "Jan 5, 2024, 1:00 PM");
    }

    #[test]
    fn crosses_date_line_backwards() {
        let formatted = format_date_time(instant(), "America/Los_Angeles");
        assert_eq!(formatted.date_time, "Jan 5, 2024, 2:00 AM");

        let early = Utc.with_ymd_and_hms(2024, 1, 5, 3, 30, 0).unwrap();
        assert_eq!(
            format_date_time(early, "America/Los_Angeles").date_time,
            "Jan 4, 2024, 7:30 PM"
        );
    }

    #[test]
    fn unknown_zone_falls_back_to_utc() {
        let formatted = format_date_time(instant(), "Mars/Olympus_Mons");
        assert_eq!(formatted.date_time, "Jan 5, 2024, 10:00 AM");
    }
}
