use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::domain::ScheduleTime;

const DISPLAY_FORMAT: &str = "%d %b %Y %H:%M %Z";

/// Renders a schedule bound in the given timezone. Invalid values are shown
/// as their raw text.
pub fn format_schedule_time(time: &ScheduleTime, tz: Tz) -> String {
    match time {
        ScheduleTime::At(at) => format_instant(*at, tz),
        ScheduleTime::Invalid(raw) => raw.clone(),
    }
}

pub fn format_instant(at: DateTime<Utc>, tz: Tz) -> String {
    at.with_timezone(&tz).format(DISPLAY_FORMAT).to_string()
}

/// Resolves a configured IANA timezone name, falling back to UTC.
pub fn resolve_timezone(name: &str) -> Tz {
    name.parse().unwrap_or_else(|_| {
        tracing::warn!(target: "alerts", timezone = %name, "unknown timezone; using UTC");
        Tz::UTC
    })
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn formats_in_configured_zone() {
        let at = Utc.with_ymd_and_hms(2026, 1, 22, 15, 30, 0).unwrap();
        let rendered = format_schedule_time(&ScheduleTime::At(at), chrono_tz::Asia::Tokyo);
        assert_eq!(rendered, "23 Jan 2026 00:30 JST");
    }

    #[test]
    fn invalid_time_renders_raw_text() {
        let rendered = format_schedule_time(&ScheduleTime::Invalid("later".into()), Tz::UTC);
        assert_eq!(rendered, "later");
    }

    #[test]
    fn unknown_zone_falls_back_to_utc() {
        assert_eq!(resolve_timezone("Mars/Olympus"), Tz::UTC);
        assert_eq!(resolve_timezone("Asia/Bangkok"), chrono_tz::Asia::Bangkok);
    }
}
