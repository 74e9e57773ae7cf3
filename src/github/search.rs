use serde::Deserialize;

use crate::{config::GitHubConfig, domain::StatusIssue};

pub const GITHUB_ACCEPT: &str = "application/vnd.github.v3+json";

/// Builds the issue search URL.
///
/// The qualifiers are joined with a literal `+` and passed through verbatim,
/// so the label filter may hold GitHub's own `a,b` syntax.
pub fn build_search_url(config: &GitHubConfig) -> String {
    let query = format!(
        "repo:{}/{}+author:{}+state:{}+label:{}",
        config.username, config.repo, config.author, config.state, config.labels
    );
    format!(
        "{}/search/issues?q={}&sort=created&order=desc",
        config.api_url, query
    )
}

#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub items: Option<Vec<StatusIssue>>,
}

impl SearchResponse {
    pub fn into_items(self) -> Vec<StatusIssue> {
        self.items.unwrap_or_default()
    }
}
