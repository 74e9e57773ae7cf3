use std::{env, time::Duration};

use url::Url;

use super::env::{
    AppConfig, CacheConfig, ConfigError, DirectoryConfig, GitHubConfig, LoggingConfig,
    SchedulerConfig,
};

pub const DEFAULT_CACHE_TTL_MS: u64 = 60_000;

pub fn load_config() -> Result<AppConfig, ConfigError> {
    AppConfig::from_lookup(|key| env::var(key).ok())
}

impl AppConfig {
    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| {
            lookup(key)
                .filter(|v| !v.is_empty())
                .ok_or(ConfigError::Missing(key))
        };

        let api_url = required("GITHUB_API_URL")?;
        match Url::parse(&api_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            _ => {
                return Err(ConfigError::InvalidUrl {
                    key: "GITHUB_API_URL",
                    value: api_url,
                })
            }
        }

        let github = GitHubConfig {
            api_url: api_url.trim_end_matches('/').to_string(),
            username: required("GITHUB_USERNAME")?,
            repo: required("GITHUB_STATUS_REPO")?,
            author: required("GITHUB_STATUS_AUTHOR")?,
            state: required("GITHUB_STATUS_STATE")?,
            labels: required("GITHUB_STATUS_LABELS")?,
            request_timeout: Duration::from_millis(parse_millis(
                &lookup,
                "GITHUB_REQUEST_TIMEOUT_MS",
                10_000,
            )?),
        };

        let cache = CacheConfig {
            ttl: Duration::from_millis(parse_millis(
                &lookup,
                "STATUS_CACHE_TTL_MS",
                DEFAULT_CACHE_TTL_MS,
            )?),
        };

        let directories = DirectoryConfig {
            logs_dir: lookup("LOGS_DIR").unwrap_or_else(|| "logs".to_string()),
            data_dir: lookup("DATA_DIR").unwrap_or_else(|| "data".to_string()),
        };

        let logging = LoggingConfig {
            level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            to_file: match lookup("LOG_TO_FILE") {
                None => true,
                Some(value) => parse_flag("LOG_TO_FILE", value)?,
            },
        };

        let timezone = lookup("STATUS_TIMEZONE").unwrap_or_else(|| "Asia/Bangkok".to_string());

        let scheduler = SchedulerConfig {
            cron_specs: lookup("REFRESH_CRONS")
                .map(|value| {
                    value
                        .split(';')
                        .map(|part| part.trim().to_string())
                        .filter(|part| !part.is_empty())
                        .collect::<Vec<_>>()
                })
                .unwrap_or_else(|| vec!["0 * * * * *".to_string()]),
        };

        Ok(Self {
            github,
            cache,
            directories,
            logging,
            timezone,
            scheduler,
        })
    }
}

fn parse_flag(key: &'static str, value: String) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid { key, value }),
    }
}

fn parse_millis<F>(lookup: &F, key: &'static str, default: u64) -> Result<u64, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse::<u64>()
            .map_err(|_| ConfigError::Invalid { key, value }),
    }
}
