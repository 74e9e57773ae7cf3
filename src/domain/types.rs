use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A schedule bound read from issue metadata.
///
/// Unparseable values are kept as `Invalid` so callers can show the raw text,
/// while comparisons treat them as if the bound were absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduleTime {
    At(DateTime<Utc>),
    Invalid(String),
}

impl ScheduleTime {
    pub fn instant(&self) -> Option<DateTime<Utc>> {
        match self {
            ScheduleTime::At(at) => Some(*at),
            ScheduleTime::Invalid(_) => None,
        }
    }
}

/// Structured view of an issue body. Derived on demand, never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedStatusInfo {
    pub start: Option<ScheduleTime>,
    pub end: Option<ScheduleTime>,
    /// Services expected to be completely unavailable.
    pub expected_down: Option<Vec<String>>,
    /// Services expected to be partially affected.
    pub expected_degraded: Option<Vec<String>>,
    pub description: String,
}

impl ParsedStatusInfo {
    pub fn start_instant(&self) -> Option<DateTime<Utc>> {
        self.start.as_ref().and_then(ScheduleTime::instant)
    }

    pub fn end_instant(&self) -> Option<DateTime<Utc>> {
        self.end.as_ref().and_then(ScheduleTime::instant)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    Maintenance,
    Status,
    Info,
}

impl fmt::Display for AlertKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AlertKind::Maintenance => "maintenance",
            AlertKind::Status => "status",
            AlertKind::Info => "info",
        };
        f.write_str(label)
    }
}
