use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use anyhow::Context;
use serde::Deserialize;
use storage::DEFAULT_STORAGE_KEY;

pub const DEFAULT_CONFIG_FILE: &str = "library.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub data_dir: PathBuf,
    pub storage_key: String,
    pub persist: bool,
    pub seed_samples: bool,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            storage_key: DEFAULT_STORAGE_KEY.into(),
            persist: true,
            seed_samples: true,
            log_filter: "warn".into(),
        }
    }
}

/// Keys accepted in `library.toml`. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileSettings {
    data_dir: Option<PathBuf>,
    storage_key: Option<String>,
    persist: Option<bool>,
    seed_samples: Option<bool>,
    log_filter: Option<String>,
}

/// Defaults, then the config file (if present), then environment variables.
pub fn load_settings(config_path: &Path) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    match fs::read_to_string(config_path) {
        Ok(raw) => apply_file_overrides(&mut settings, &raw)
            .with_context(|| format!("invalid config file '{}'", config_path.display()))?,
        Err(err) if err.kind() == ErrorKind::NotFound => {}
        Err(err) => {
            return Err(err)
                .with_context(|| format!("failed to read config file '{}'", config_path.display()))
        }
    }

    apply_env_overrides(&mut settings, |name| std::env::var(name).ok());
    Ok(settings)
}

fn apply_file_overrides(settings: &mut Settings, raw: &str) -> anyhow::Result<()> {
    let file_cfg: FileSettings = toml::from_str(raw)?;
    if let Some(v) = file_cfg.data_dir {
        settings.data_dir = v;
    }
    if let Some(v) = file_cfg.storage_key {
        settings.storage_key = v;
    }
    if let Some(v) = file_cfg.persist {
        settings.persist = v;
    }
    if let Some(v) = file_cfg.seed_samples {
        settings.seed_samples = v;
    }
    if let Some(v) = file_cfg.log_filter {
        settings.log_filter = v;
    }
    Ok(())
}

fn apply_env_overrides(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = lookup("LIBRARY_DATA_DIR") {
        settings.data_dir = PathBuf::from(v);
    }
    if let Some(v) = lookup("APP__DATA_DIR") {
        settings.data_dir = PathBuf::from(v);
    }

    if let Some(v) = lookup("LIBRARY_STORAGE_KEY") {
        settings.storage_key = v;
    }
    if let Some(v) = lookup("APP__STORAGE_KEY") {
        settings.storage_key = v;
    }

    if let Some(v) = lookup("APP__PERSIST").as_deref().and_then(parse_bool) {
        settings.persist = v;
    }
    if let Some(v) = lookup("APP__SEED_SAMPLES").as_deref().and_then(parse_bool) {
        settings.seed_samples = v;
    }

    if let Some(v) = lookup("APP__LOG_FILTER") {
        settings.log_filter = v;
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|base| base.join("book_library"))
        .unwrap_or_else(|| PathBuf::from("./data"))
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
