//! Extraction of schedule metadata embedded in issue bodies.
//!
//! Status issues carry an HTML comment that the rendered issue hides:
//!
//! ```text
//! <!--
//! start: 2026-01-22T22:30:00+07:00
//! end: 2026-01-22T23:30:00+07:00
//! expectedDegraded: base-api, script-license-api
//! -->
//! ```

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::{ParsedStatusInfo, ScheduleTime};

static COMMENT_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<!--\s*(.*?)\s*-->").expect("valid comment block regex"));
static START_FIELD: Lazy<Regex> = Lazy::new(|| field_regex("start"));
static END_FIELD: Lazy<Regex> = Lazy::new(|| field_regex("end"));
static DOWN_FIELD: Lazy<Regex> = Lazy::new(|| field_regex("expectedDown"));
static DEGRADED_FIELD: Lazy<Regex> = Lazy::new(|| field_regex("expectedDegraded"));

fn field_regex(name: &str) -> Regex {
    Regex::new(&format!(r"(?m)^[ \t]*{name}:[ \t]*(.+)$")).expect("valid metadata field regex")
}

// Each field must open a line inside the block, so `<!-- start: a end: b -->`
// yields a start of "a end: b" and no end.

/// A metadata micro-format that can be read out of an issue body.
pub trait MetadataFormat {
    fn parse(&self, body: &str) -> ParsedStatusInfo;
}

/// The `<!-- key: value -->` block format used by status issues.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommentBlockFormat;

impl MetadataFormat for CommentBlockFormat {
    fn parse(&self, body: &str) -> ParsedStatusInfo {
        let Some((block, metadata)) = COMMENT_BLOCK
            .captures(body)
            .and_then(|c| Some((c.get(0)?, c.get(1)?.as_str())))
        else {
            return ParsedStatusInfo {
                description: body.to_string(),
                ..Default::default()
            };
        };

        let rest = body[block.end()..].trim_start();
        let mut description = String::with_capacity(body.len());
        description.push_str(&body[..block.start()]);
        description.push_str(rest);

        ParsedStatusInfo {
            start: field(&START_FIELD, metadata).map(parse_time),
            end: field(&END_FIELD, metadata).map(parse_time),
            expected_down: field(&DOWN_FIELD, metadata).map(split_services),
            expected_degraded: field(&DEGRADED_FIELD, metadata).map(split_services),
            description: description.trim().to_string(),
        }
    }
}

/// Parses an issue body with the default [`CommentBlockFormat`].
pub fn parse_issue_body(body: &str) -> ParsedStatusInfo {
    CommentBlockFormat.parse(body)
}

fn field<'a>(regex: &Regex, metadata: &'a str) -> Option<&'a str> {
    regex
        .captures(metadata)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim())
}

fn parse_time(raw: &str) -> ScheduleTime {
    if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
        return ScheduleTime::At(at.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .map(|naive| ScheduleTime::At(naive.and_utc()))
        .unwrap_or_else(|| ScheduleTime::Invalid(raw.to_string()))
}

// Empty elements are kept: "a,,b" yields three entries.
fn split_services(raw: &str) -> Vec<String> {
    raw.split(',').map(|s| s.trim().to_string()).collect()
}
