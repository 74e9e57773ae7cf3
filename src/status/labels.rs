use crate::domain::{AlertKind, IssueLabel};

/// Labels that describe the alert itself rather than an affected service.
const SYSTEM_LABELS: [&str; 6] = [
    "status",
    "maintenance",
    "bug",
    "enhancement",
    "help wanted",
    "question",
];

/// Picks the display category. `maintenance` wins over `status`.
pub fn categorize(labels: &[IssueLabel]) -> AlertKind {
    let has = |name: &str| labels.iter().any(|l| l.name.eq_ignore_ascii_case(name));

    if has("maintenance") {
        AlertKind::Maintenance
    } else if has("status") {
        AlertKind::Status
    } else {
        AlertKind::Info
    }
}

/// Names of the non-system labels, in label order and original casing.
pub fn affected_services_from_labels(labels: &[IssueLabel]) -> Vec<String> {
    labels
        .iter()
        .filter(|label| {
            let lowered = label.name.to_lowercase();
            !SYSTEM_LABELS.contains(&lowered.as_str())
        })
        .map(|label| label.name.clone())
        .collect()
}
