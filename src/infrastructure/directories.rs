use std::{fs, path::PathBuf};

use anyhow::{Context, Result};

use crate::config::DirectoryConfig;

#[derive(Debug, Clone)]
pub struct ResolvedPaths {
    pub logs_dir: PathBuf,
    /// Root of the persistent key-value store holding the status cache.
    pub cache_dir: PathBuf,
}

pub fn ensure_directories(cfg: &DirectoryConfig) -> Result<ResolvedPaths> {
    let logs_dir = ensure_dir(&cfg.logs_dir)?;
    let cache_dir = ensure_dir(&cfg.data_dir)?.join("cache");
    fs::create_dir_all(&cache_dir)
        .with_context(|| format!("failed to create directory {}", cache_dir.display()))?;

    // The cache is best-effort, but an unwritable data dir is a setup mistake.
    let marker_file = cache_dir.join(".write-test");
    fs::write(&marker_file, b"ok")
        .with_context(|| format!("cache directory {} is not writable", cache_dir.display()))?;
    fs::remove_file(&marker_file)?;

    Ok(ResolvedPaths {
        logs_dir,
        cache_dir,
    })
}

fn ensure_dir(path: &str) -> Result<PathBuf> {
    let dir = PathBuf::from(path);
    if !dir.exists() {
        fs::create_dir_all(&dir).with_context(|| format!("failed to create directory {}", path))?;
    }
    Ok(dir.canonicalize().unwrap_or(dir))
}
