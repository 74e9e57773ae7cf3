use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub github: GitHubConfig,
    pub cache: CacheConfig,
    pub directories: DirectoryConfig,
    pub logging: LoggingConfig,
    pub timezone: String,
    pub scheduler: SchedulerConfig,
}

/// Parameters of the single status-issue search query.
///
/// Values are consumed verbatim by the query builder.
#[derive(Debug, Clone)]
pub struct GitHubConfig {
    pub api_url: String,
    pub username: String,
    pub repo: String,
    pub author: String,
    pub state: String,
    pub labels: String,
    pub request_timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct CacheConfig {
    pub ttl: Duration,
}

#[derive(Debug, Clone)]
pub struct DirectoryConfig {
    pub logs_dir: String,
    pub data_dir: String,
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub to_file: bool,
}

#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    pub cron_specs: Vec<String>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    Missing(&'static str),
    #[error("{key} is not a valid http(s) url: {value}")]
    InvalidUrl { key: &'static str, value: String },
    #[error("{key} has an invalid value: {value}")]
    Invalid { key: &'static str, value: String },
}
