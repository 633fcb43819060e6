use anyhow::{Context, Result};
use std::path::PathBuf;

pub const DB_ENV: &str = "LEDGERLY_DB";
pub const LOG_ENV: &str = "LEDGERLY_LOG";
pub const DEFAULT_LOG_FILTER: &str = "ledgerly=warn";

#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: PathBuf,
    pub log_filter: String,
}

impl Config {
    /// Resolve from the process environment, creating the data directory if needed.
    pub fn from_env() -> Result<Self> {
        Self::resolve(|key| std::env::var(key).ok())
    }

    pub(crate) fn resolve<F>(var: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let db_path = match var(DB_ENV).filter(|v| !v.trim().is_empty()) {
            Some(path) => PathBuf::from(path),
            None => default_db_path()?,
        };
        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create data directory: {}", parent.display())
            })?;
        }

        let log_filter = var(LOG_ENV)
            .or_else(|| var("RUST_LOG"))
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        Ok(Self {
            db_path,
            log_filter,
        })
    }
}

fn default_db_path() -> Result<PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("com", "ledgerly", "Ledgerly")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    Ok(proj_dirs.data_dir().join("ledgerly.db"))
}
