use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ContactsError, Result};
use crate::storage::StorageFormat;

pub const DEFAULT_TEXT_FILE: &str = "contacts.txt";
pub const DEFAULT_JSON_FILE: &str = "contacts.json";
pub const DEFAULT_BACKUP_FILE: &str = "contacts_backup.json";
pub const DEFAULT_LOG_FILE: &str = "contact_manager.log";
pub const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub log: LogConfig,
}

impl Config {
    /// Defaults, then the global and data-root config files (or only the
    /// explicit file when one is given), then `CONTACTS_*` environment
    /// overrides. Relative paths are resolved against `root`.
    pub fn load(explicit_path: Option<&Path>, root: &Path) -> Result<Self> {
        let mut config = Self::default();

        let explicit = explicit_path
            .map(PathBuf::from)
            .or_else(|| std::env::var("CONTACTS_CONFIG").ok().map(PathBuf::from));

        if let Some(path) = explicit {
            if let Some(patch) = Self::load_patch(&path)? {
                config.merge_patch(patch);
            }
        } else {
            if let Some(global) = Self::load_global()? {
                config.merge_patch(global);
            }
            if let Some(local) = Self::load_patch(&root.join(CONFIG_FILE))? {
                config.merge_patch(local);
            }
        }

        config.apply_env_overrides()?;
        config.resolve_paths(root);

        Ok(config)
    }

    fn load_global() -> Result<Option<ConfigPatch>> {
        match dirs::config_dir() {
            Some(dir) => Self::load_patch(&dir.join("contacts").join(CONFIG_FILE)),
            None => Ok(None),
        }
    }

    fn load_patch(path: &Path) -> Result<Option<ConfigPatch>> {
        if !path.exists() {
            return Ok(None);
        }

        let raw = std::fs::read_to_string(path)
            .map_err(|err| ContactsError::Config(format!("read config {}: {err}", path.display())))?;
        let patch = toml::from_str(&raw).map_err(|err| {
            ContactsError::Config(format!("parse config {}: {err}", path.display()))
        })?;
        Ok(Some(patch))
    }

    fn merge_patch(&mut self, patch: ConfigPatch) {
        if let Some(patch) = patch.storage {
            self.storage.merge(patch);
        }
        if let Some(patch) = patch.log {
            self.log.merge(patch);
        }
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply `CONTACTS_*` overrides read through `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup("CONTACTS_FORMAT") {
            self.storage.format = value.parse()?;
        }
        if let Some(value) = lookup("CONTACTS_TEXT_FILE") {
            self.storage.text_file = PathBuf::from(value);
        }
        if let Some(value) = lookup("CONTACTS_JSON_FILE") {
            self.storage.json_file = PathBuf::from(value);
        }
        if let Some(value) = lookup("CONTACTS_BACKUP_FILE") {
            self.storage.backup_file = PathBuf::from(value);
        }

        if let Some(value) = lookup("CONTACTS_LOG_ENABLED") {
            self.log.enabled = parse_bool(&value);
        }
        if let Some(value) = lookup("CONTACTS_LOG_FILE") {
            self.log.file = PathBuf::from(value);
        }
        if let Some(value) = lookup("CONTACTS_LOG_RETENTION_DAYS") {
            self.log.retention_days = value.trim().parse::<u32>().map_err(|err| {
                ContactsError::Config(format!(
                    "invalid CONTACTS_LOG_RETENTION_DAYS value {value}: {err}"
                ))
            })?;
        }

        Ok(())
    }

    /// Make every relative file path absolute under `root`.
    pub fn resolve_paths(&mut self, root: &Path) {
        for path in [
            &mut self.storage.text_file,
            &mut self.storage.json_file,
            &mut self.storage.backup_file,
            &mut self.log.file,
        ] {
            if path.is_relative() {
                *path = root.join(&*path);
            }
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub format: StorageFormat,
    #[serde(default = "default_text_file")]
    pub text_file: PathBuf,
    #[serde(default = "default_json_file")]
    pub json_file: PathBuf,
    #[serde(default = "default_backup_file")]
    pub backup_file: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            format: StorageFormat::Text,
            text_file: default_text_file(),
            json_file: default_json_file(),
            backup_file: default_backup_file(),
        }
    }
}

impl StorageConfig {
    fn merge(&mut self, patch: StoragePatch) {
        if let Some(value) = patch.format {
            self.format = value;
        }
        if let Some(value) = patch.text_file {
            self.text_file = value;
        }
        if let Some(value) = patch.json_file {
            self.json_file = value;
        }
        if let Some(value) = patch.backup_file {
            self.backup_file = value;
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_log_file")]
    pub file: PathBuf,
    #[serde(default = "default_retention_days")]
    pub retention_days: u32,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            file: default_log_file(),
            retention_days: default_retention_days(),
        }
    }
}

impl LogConfig {
    fn merge(&mut self, patch: LogPatch) {
        if let Some(value) = patch.enabled {
            self.enabled = value;
        }
        if let Some(value) = patch.file {
            self.file = value;
        }
        if let Some(value) = patch.retention_days {
            self.retention_days = value;
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ConfigPatch {
    pub storage: Option<StoragePatch>,
    pub log: Option<LogPatch>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct StoragePatch {
    pub format: Option<StorageFormat>,
    pub text_file: Option<PathBuf>,
    pub json_file: Option<PathBuf>,
    pub backup_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct LogPatch {
    pub enabled: Option<bool>,
    pub file: Option<PathBuf>,
    pub retention_days: Option<u32>,
}

fn default_text_file() -> PathBuf {
    PathBuf::from(DEFAULT_TEXT_FILE)
}

fn default_json_file() -> PathBuf {
    PathBuf::from(DEFAULT_JSON_FILE)
}

fn default_backup_file() -> PathBuf {
    PathBuf::from(DEFAULT_BACKUP_FILE)
}

fn default_log_file() -> PathBuf {
    PathBuf::from(DEFAULT_LOG_FILE)
}

const fn default_retention_days() -> u32 {
    30
}

const fn default_true() -> bool {
    true
}

fn parse_bool(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
