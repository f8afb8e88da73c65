//! Storage layer for contacts
//!
//! Two on-disk formats behind one [`ContactRepository`] trait: a flat
//! delimited text file and a JSON document with metadata and a rolling
//! backup. [`Logged`] wraps either one to write activity-log entries.

use std::fmt;
use std::sync::Arc;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::core::ContactStore;
use crate::error::{ContactsError, Result};
use crate::logging::ActivityLog;

pub mod json;
pub mod logged;
pub mod text;

pub use json::JsonRepository;
pub use logged::Logged;
pub use text::TextRepository;

/// A loaded store plus anything the caller should be told about how it was
/// obtained (skipped lines, migrated ids, backup recovery).
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    pub store: ContactStore,
    pub warnings: Vec<String>,
}

impl LoadReport {
    pub const fn clean(store: ContactStore) -> Self {
        Self {
            store,
            warnings: Vec::new(),
        }
    }
}

pub trait ContactRepository {
    /// Load the store, with notes on anything skipped or recovered.
    fn load_report(&self) -> Result<LoadReport>;

    /// Overwrite persisted state with `store`.
    fn save(&self, store: &ContactStore) -> Result<()>;

    /// Human-readable location, for messages.
    fn describe(&self) -> String;

    fn load(&self) -> Result<ContactStore> {
        self.load_report().map(|report| report.store)
    }
}

impl<R: ContactRepository + ?Sized> ContactRepository for Box<R> {
    fn load_report(&self) -> Result<LoadReport> {
        (**self).load_report()
    }

    fn save(&self, store: &ContactStore) -> Result<()> {
        (**self).save(store)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StorageFormat {
    /// `id;lastName;firstName;email;phone` per line
    #[default]
    Text,
    /// JSON document with metadata and automatic backup
    Json,
}

impl StorageFormat {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for StorageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for StorageFormat {
    type Err = ContactsError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "text" | "txt" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(ContactsError::Config(format!(
                "unknown storage format: {other} (expected text or json)"
            ))),
        }
    }
}

/// Build the configured repository, wrapped so every load and save is
/// recorded in `log`.
pub fn open_repository(config: &Config, log: Arc<ActivityLog>) -> Box<dyn ContactRepository> {
    match config.storage.format {
        StorageFormat::Text => Box::new(Logged::new(
            TextRepository::new(&config.storage.text_file),
            log,
        )),
        StorageFormat::Json => Box::new(Logged::new(json_repository(config), log)),
    }
}

/// JSON repository for the configured primary and backup paths, regardless of
/// the active format.
pub fn json_repository(config: &Config) -> JsonRepository {
    JsonRepository::new(&config.storage.json_file, &config.storage.backup_file)
}
