use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::{
    domain::{AlertKind, ParsedStatusInfo, StatusIssue},
    status::{
        affected_services_from_labels, categorize, format_schedule_time, is_active, is_upcoming,
        parse_issue_body,
    },
};

/// Everything a banner needs to render one issue.
#[derive(Debug, Clone, PartialEq)]
pub struct AlertView {
    pub id: u64,
    pub number: u64,
    pub title: String,
    pub url: String,
    pub kind: AlertKind,
    pub info: ParsedStatusInfo,
    pub affected_services: Vec<String>,
    pub is_active: bool,
    pub is_upcoming: bool,
    pub starts: Option<String>,
    pub ends: Option<String>,
}

impl AlertView {
    pub fn present(issue: &StatusIssue, now: DateTime<Utc>, tz: Tz) -> Self {
        let info = parse_issue_body(&issue.body);
        Self {
            id: issue.id,
            number: issue.number,
            title: issue.title.clone(),
            url: issue.html_url.clone(),
            kind: categorize(&issue.labels),
            affected_services: affected_services_from_labels(&issue.labels),
            is_active: is_active(&info, now),
            is_upcoming: is_upcoming(&info, now),
            starts: info.start.as_ref().map(|t| format_schedule_time(t, tz)),
            ends: info.end.as_ref().map(|t| format_schedule_time(t, tz)),
            info,
        }
    }
}
