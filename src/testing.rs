//! Shared fixtures for unit tests.

use std::{io, time::Duration};

use chrono::{TimeZone, Utc};

use crate::{
    config::GitHubConfig,
    domain::{IssueLabel, StatusIssue},
    storage::{KeyValueStore, Result},
};

pub fn github_config(api_url: &str) -> GitHubConfig {
    GitHubConfig {
        api_url: api_url.to_string(),
        username: "acme".into(),
        repo: "status".into(),
        author: "acme-bot".into(),
        state: "open".into(),
        labels: "status,maintenance".into(),
        request_timeout: Duration::from_secs(5),
    }
}

pub fn sample_issue(id: u64, labels: &[&str]) -> StatusIssue {
    sample_issue_with_body(id, labels, &format!("Issue {id}"))
}

pub fn sample_issue_with_body(id: u64, labels: &[&str], body: &str) -> StatusIssue {
    let created = Utc.with_ymd_and_hms(2026, 1, 22, 15, 0, 0).unwrap();
    StatusIssue {
        id,
        number: id,
        title: format!("Status {id}"),
        body: body.to_string(),
        html_url: format!("https://github.com/acme/status/issues/{id}"),
        state: "open".to_string(),
        labels: labels
            .iter()
            .enumerate()
            .map(|(i, name)| IssueLabel {
                id: 100 + i as u64,
                name: name.to_string(),
                color: "fbca04".to_string(),
            })
            .collect(),
        created_at: created,
        updated_at: created,
    }
}

/// Storage that rejects every operation, like a full or disabled backend.
pub struct FailingStore;

impl KeyValueStore for FailingStore {
    fn get(&self, _key: &str) -> Result<Option<String>> {
        Err(io::Error::other("storage disabled").into())
    }

    fn set(&self, _key: &str, _value: &str) -> Result<()> {
        Err(io::Error::other("quota exceeded").into())
    }

    fn remove(&self, _key: &str) -> Result<()> {
        Err(io::Error::other("storage disabled").into())
    }
}
