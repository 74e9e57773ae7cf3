use futures::future::BoxFuture;
use reqwest::{header::ACCEPT, Client, StatusCode};

use super::{
    search::{build_search_url, SearchResponse, GITHUB_ACCEPT},
    IssueSource, SourceError,
};
use crate::{config::GitHubConfig, domain::StatusIssue};

#[derive(Clone)]
pub struct GitHubIssueSource {
    http: Client,
    url: String,
}

impl GitHubIssueSource {
    pub fn new(http: Client, config: &GitHubConfig) -> Self {
        Self {
            http,
            url: build_search_url(config),
        }
    }

    pub async fn search(&self) -> Result<Vec<StatusIssue>, SourceError> {
        tracing::debug!(target: "github", url = %self.url, "searching status issues");
        let response = self
            .http
            .get(self.url.as_str())
            .header(ACCEPT, GITHUB_ACCEPT)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::FORBIDDEN {
            return Err(SourceError::RateLimited);
        }
        if !status.is_success() {
            return Err(SourceError::Status(status.as_u16()));
        }

        let parsed = response.json::<SearchResponse>().await.map_err(|err| {
            if err.is_decode() {
                SourceError::Decode(err)
            } else {
                SourceError::Transport(err)
            }
        })?;
        let items = parsed.into_items();
        tracing::debug!(target: "github", count = items.len(), "status issues received");
        Ok(items)
    }
}

impl IssueSource for GitHubIssueSource {
    fn search_status_issues(&self) -> BoxFuture<'_, Result<Vec<StatusIssue>, SourceError>> {
        Box::pin(self.search())
    }
}
