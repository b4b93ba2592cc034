//! Persistent builder/filler preferences.

use serde::{Deserialize, Serialize};
use std::{
    env,
    fs::{self, File},
    io::{self, Write},
    path::{Path, PathBuf},
};
use thiserror::Error;

use crate::domain::{FormLayout, FormWidth};

const DEFAULT_DIR_NAME: &str = ".form_core";
const HOME_ENV: &str = "FORM_CORE_HOME";
const CONFIG_FILE: &str = "config.json";
const TMP_SUFFIX: &str = "tmp";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Serialization error: {0}")]
    Serde(String),
}

/// Defaults applied to new forms and fill sessions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default)]
    pub default_layout: FormLayout,
    #[serde(default)]
    pub default_form_width: FormWidth,
    #[serde(default = "Config::default_show_title")]
    pub show_title: bool,
    #[serde(default = "Config::default_submitted_by")]
    pub submitted_by: String,
    #[serde(default = "Config::default_log_filter")]
    pub log_filter: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Root directory for stored forms and submissions. Defaults to the app data dir.
    pub storage_root: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_layout: FormLayout::default(),
            default_form_width: FormWidth::default(),
            show_title: Self::default_show_title(),
            submitted_by: Self::default_submitted_by(),
            log_filter: Self::default_log_filter(),
            storage_root: None,
        }
    }
}

impl Config {
    pub fn default_show_title() -> bool {
        true
    }

    pub fn default_submitted_by() -> String {
        "anonymous".into()
    }

    pub fn default_log_filter() -> String {
        "form_core=info".into()
    }

    pub fn resolve_storage_root(&self) -> PathBuf {
        match &self.storage_root {
            Some(path) => path.clone(),
            None => app_data_dir(),
        }
    }
}

/// Returns the application data directory, `$FORM_CORE_HOME` or `~/.form_core`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV) {
        return PathBuf::from(custom);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

/// Handles persistence for [`Config`].
#[derive(Debug, Clone)]
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self, ConfigError> {
        Self::with_base_dir(app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, ConfigError> {
        fs::create_dir_all(&base)?;
        Ok(Self {
            path: base.join(CONFIG_FILE),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Config, ConfigError> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            serde_json::from_str(&data).map_err(|err| ConfigError::Serde(err.to_string()))
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<(), ConfigError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(config)
            .map_err(|err| ConfigError::Serde(err.to_string()))?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), ConfigError> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        assert_eq!(manager.load().unwrap(), Config::default());
    }

    #[test]
    fn saved_config_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        let config = Config {
            default_layout: FormLayout::Stepped,
            submitted_by: "front-desk".into(),
            storage_root: Some(dir.path().join("store")),
            ..Config::default()
        };
        manager.save(&config).unwrap();
        assert_eq!(manager.load().unwrap(), config);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        fs::write(manager.path(), r#"{"defaultFormWidth":"wide"}"#).unwrap();
        let config = manager.load().unwrap();
        assert_eq!(config.default_form_width, FormWidth::Wide);
        assert_eq!(config.submitted_by, "anonymous");
    }
}
