pub mod format;
pub mod labels;
pub mod parser;
pub mod schedule;

pub use format::{format_schedule_time, resolve_timezone};
pub use labels::{affected_services_from_labels, categorize};
pub use parser::{parse_issue_body, CommentBlockFormat, MetadataFormat};
pub use schedule::{is_active, is_current, is_upcoming};
