use std::io;

use anyhow::Result;
use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::{config::AppConfig, infrastructure::directories::ResolvedPaths};

static INIT: OnceCell<()> = OnceCell::new();
static GUARD: OnceCell<tracing_appender::non_blocking::WorkerGuard> = OnceCell::new();

/// Console output, plus a daily-rolling file under `logs_dir` unless
/// `LOG_TO_FILE` turned it off. Safe to call more than once.
pub fn init_tracing(config: &AppConfig, paths: &ResolvedPaths) -> Result<()> {
    INIT.get_or_try_init::<_, anyhow::Error>(|| {
        let file_layer = config.logging.to_file.then(|| {
            let appender = tracing_appender::rolling::daily(&paths.logs_dir, "status-alert.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let _ = GUARD.set(guard);
            fmt::layer()
                .with_writer(writer)
                .with_target(true)
                .with_ansi(false)
        });

        tracing_subscriber::registry()
            .with(build_filter(&config.logging.level))
            .with(fmt::layer().with_writer(io::stdout).with_target(true))
            .with(file_layer)
            .try_init()?;

        tracing::info!(
            level = %config.logging.level,
            file = config.logging.to_file,
            logs = %paths.logs_dir.display(),
            "tracing initialized"
        );
        Ok(())
    })?;
    Ok(())
}

/// `RUST_LOG` wins; otherwise the configured level, falling back to `info`.
fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(quiet_http(level)))
        .unwrap_or_else(|_| EnvFilter::new(quiet_http("info")))
}

// Every refresh opens a connection; keep the HTTP stack out of info logs.
fn quiet_http(level: &str) -> String {
    format!("{level},hyper=warn,hyper_util=warn,reqwest=warn")
}
