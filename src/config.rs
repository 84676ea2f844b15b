//! Environment-driven service configuration.

use std::path::PathBuf;
use std::str::FromStr;

use anyhow::Context;

/// Service configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP server binds to
    pub bind_addr: String,
    /// Location of the decompression table dataset
    pub table_path: PathBuf,
    /// Depths included in the table-info preview
    pub preview_depths: usize,
    /// Bottom times listed per previewed depth
    pub preview_times: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".to_string(),
            table_path: PathBuf::from("decompression_table.json"),
            preview_depths: 5,
            preview_times: 5,
        }
    }
}

impl Config {
    /// Build from `BIND_ADDR`, `DECO_TABLE_PATH`, `DECO_PREVIEW_DEPTHS` and
    /// `DECO_PREVIEW_TIMES`, falling back to defaults for unset variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Ok(Self {
            bind_addr: lookup("BIND_ADDR").unwrap_or(defaults.bind_addr),
            table_path: lookup("DECO_TABLE_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.table_path),
            preview_depths: parse_or(&lookup, "DECO_PREVIEW_DEPTHS", defaults.preview_depths)?,
            preview_times: parse_or(&lookup, "DECO_PREVIEW_TIMES", defaults.preview_times)?,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> anyhow::Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} has an invalid value: {:?}", key, raw)),
        None => Ok(default),
    }
}
