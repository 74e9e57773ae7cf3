pub mod issue;
pub mod types;

pub use issue::{IssueLabel, StatusIssue};
pub use types::{AlertKind, ParsedStatusInfo, ScheduleTime};
