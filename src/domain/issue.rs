use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One status or maintenance entry as returned by the issue search endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusIssue {
    pub id: u64,
    pub number: u64,
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub body: String,
    pub html_url: String,
    pub state: String,
    #[serde(default)]
    pub labels: Vec<IssueLabel>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueLabel {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub color: String,
}

// GitHub sends `"body": null` for issues created without a description.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_search_item_with_null_body() {
        let raw = r#"{
            "id": 42,
            "number": 7,
            "title": "API outage",
            "body": null,
            "html_url": "https://github.com/acme/status/issues/7",
            "state": "open",
            "labels": [{"id": 1, "name": "status", "color": "d73a4a", "default": false}],
            "created_at": "2026-01-22T15:30:00Z",
            "updated_at": "2026-01-22T16:00:00Z",
            "comments": 3
        }"#;
        let issue: StatusIssue = serde_json::from_str(raw).unwrap();
        assert_eq!(issue.id, 42);
        assert_eq!(issue.body, "");
        assert_eq!(issue.labels[0].name, "status");
    }
}
