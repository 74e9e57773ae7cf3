use chrono::{DateTime, Utc};

use crate::domain::ParsedStatusInfo;

/// Whether `now` falls inside the scheduled window, both ends inclusive.
///
/// A record missing either bound (or carrying an unparseable one) has no
/// window and is always active.
pub fn is_active(info: &ParsedStatusInfo, now: DateTime<Utc>) -> bool {
    match (info.start_instant(), info.end_instant()) {
        (Some(start), Some(end)) => start <= now && now <= end,
        _ => true,
    }
}

/// Whether the scheduled start is still in the future.
pub fn is_upcoming(info: &ParsedStatusInfo, now: DateTime<Utc>) -> bool {
    info.start_instant().is_some_and(|start| now < start)
}

/// Active and not upcoming. A start-only record in the future is reported by
/// both [`is_active`] and [`is_upcoming`]; this excludes it.
pub fn is_current(info: &ParsedStatusInfo, now: DateTime<Utc>) -> bool {
    is_active(info, now) && !is_upcoming(info, now)
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;
    use crate::domain::ScheduleTime;

    fn window(start: Option<DateTime<Utc>>, end: Option<DateTime<Utc>>) -> ParsedStatusInfo {
        ParsedStatusInfo {
            start: start.map(ScheduleTime::At),
            end: end.map(ScheduleTime::At),
            ..Default::default()
        }
    }

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 22, 15, 30, 0).unwrap()
    }

    #[test]
    fn active_inside_window_and_at_both_edges() {
        let start = t0();
        let end = start + Duration::hours(1);
        let info = window(Some(start), Some(end));

        assert!(is_active(&info, start));
        assert!(is_active(&info, start + Duration::minutes(30)));
        assert!(is_active(&info, end));
        assert!(!is_active(&info, start - Duration::seconds(1)));
        assert!(!is_active(&info, end + Duration::seconds(1)));
    }

    #[test]
    fn missing_or_invalid_bound_is_always_active() {
        let now = t0();
        assert!(is_active(&window(None, None), now));
        assert!(is_active(&window(Some(now + Duration::days(1)), None), now));
        assert!(is_active(&window(None, Some(now - Duration::days(1))), now));

        let info = ParsedStatusInfo {
            start: Some(ScheduleTime::At(now + Duration::days(1))),
            end: Some(ScheduleTime::Invalid("soon".into())),
            ..Default::default()
        };
        assert!(is_active(&info, now));
    }

    #[test]
    fn upcoming_requires_future_start() {
        let now = t0();
        assert!(is_upcoming(&window(Some(now + Duration::minutes(1)), None), now));
        assert!(!is_upcoming(&window(Some(now), None), now));
        assert!(!is_upcoming(&window(None, Some(now + Duration::days(1))), now));

        let invalid = ParsedStatusInfo {
            start: Some(ScheduleTime::Invalid("later".into())),
            ..Default::default()
        };
        assert!(!is_upcoming(&invalid, now));
    }

    #[test]
    fn start_only_future_record_is_active_and_upcoming() {
        let now = t0();
        let info = window(Some(now + Duration::hours(2)), None);
        assert!(is_active(&info, now));
        assert!(is_upcoming(&info, now));
        assert!(!is_current(&info, now));
    }
}
