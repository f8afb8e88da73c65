//! JSON storage with a rolling backup
//!
//! The primary file holds a [`ContactDocument`]. Before each save the current
//! primary is copied over the backup, so the backup is always the previous
//! successful write. A save that fails puts the backup back in place and
//! still reports the failure. A primary that cannot be read or parsed is
//! replaced in memory by the backup's contacts, or by an empty store.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::core::{Contact, ContactStore};
use crate::error::{ContactsError, Result};
use crate::storage::{ContactRepository, LoadReport};

pub const DOCUMENT_VERSION: &str = "2.0";
pub const EXPORT_KIND: &str = "custom export";

/// On-disk document shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactDocument {
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub saved_at: DateTime<Utc>,
    #[serde(default)]
    pub contact_count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_kind: Option<String>,
    pub contacts: Vec<Contact>,
}

fn default_version() -> String {
    DOCUMENT_VERSION.to_string()
}

impl ContactDocument {
    pub fn new(store: &ContactStore) -> Self {
        Self {
            version: DOCUMENT_VERSION.to_string(),
            saved_at: Utc::now(),
            contact_count: store.len(),
            export_kind: None,
            contacts: store.as_slice().to_vec(),
        }
    }

    #[must_use]
    pub fn with_export_kind(mut self, kind: impl Into<String>) -> Self {
        self.export_kind = Some(kind.into());
        self
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|err| ContactsError::Serialization(format!("contact document: {err}")))
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw)
            .map_err(|err| ContactsError::Serialization(format!("contact document: {err}")))
    }

    /// Contacts as a store, with missing ids assigned.
    pub fn into_store(self) -> ContactStore {
        ContactStore::from_contacts(self.contacts)
    }
}

/// What [`JsonRepository::recover_from_backup`] managed to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecoveryOutcome {
    Restored { count: usize },
    NoBackup,
    Unreadable(String),
}

#[derive(Debug, Clone)]
pub struct Recovery {
    pub store: ContactStore,
    pub outcome: RecoveryOutcome,
}

/// Metadata read from a document, for `contacts info`.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentSummary {
    pub version: String,
    pub saved_at: DateTime<Utc>,
    pub contact_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct BackupSummary {
    pub path: PathBuf,
    pub size_bytes: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    pub exists: bool,
    pub size_bytes: Option<u64>,
    pub modified: Option<DateTime<Local>>,
    pub document: Option<DocumentSummary>,
    pub document_error: Option<String>,
    pub backup: Option<BackupSummary>,
}

pub struct JsonRepository {
    path: PathBuf,
    backup_path: PathBuf,
}

impl JsonRepository {
    pub fn new(path: impl Into<PathBuf>, backup_path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            backup_path: backup_path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn backup_path(&self) -> &Path {
        &self.backup_path
    }

    /// Copy the backup over the primary. Returns `false` when there is no
    /// backup to restore.
    pub fn restore_backup(&self) -> Result<bool> {
        if !self.backup_path.exists() {
            return Ok(false);
        }
        fs::copy(&self.backup_path, &self.path)?;
        Ok(true)
    }

    /// Contacts from the backup file. Never fails: anything unusable yields
    /// an empty store and the reason.
    pub fn recover_from_backup(&self) -> Recovery {
        if !self.backup_path.exists() {
            warn!(backup = %self.backup_path.display(), "no backup to recover from");
            return Recovery {
                store: ContactStore::new(),
                outcome: RecoveryOutcome::NoBackup,
            };
        }

        let parsed = fs::read_to_string(&self.backup_path)
            .map_err(ContactsError::from)
            .and_then(|raw| ContactDocument::from_json(&raw));
        match parsed {
            Ok(document) => {
                let store = document.into_store();
                info!(count = store.len(), "recovered contacts from backup");
                Recovery {
                    outcome: RecoveryOutcome::Restored { count: store.len() },
                    store,
                }
            }
            Err(err) => {
                warn!(backup = %self.backup_path.display(), error = %err, "backup unreadable");
                Recovery {
                    store: ContactStore::new(),
                    outcome: RecoveryOutcome::Unreadable(err.to_string()),
                }
            }
        }
    }

    /// File and backup details. Unreadable metadata is reported, not raised.
    pub fn inspect(&self) -> Result<FileReport> {
        let mut report = FileReport {
            path: self.path.clone(),
            exists: self.path.exists(),
            size_bytes: None,
            modified: None,
            document: None,
            document_error: None,
            backup: None,
        };

        if report.exists {
            let meta = fs::metadata(&self.path)?;
            report.size_bytes = Some(meta.len());
            report.modified = meta.modified().ok().map(DateTime::<Local>::from);
            match fs::read_to_string(&self.path)
                .map_err(ContactsError::from)
                .and_then(|raw| ContactDocument::from_json(&raw))
            {
                Ok(doc) => {
                    report.document = Some(DocumentSummary {
                        version: doc.version,
                        saved_at: doc.saved_at,
                        contact_count: doc.contact_count,
                    });
                }
                Err(err) => report.document_error = Some(err.to_string()),
            }
        }

        if self.backup_path.exists() {
            report.backup = Some(BackupSummary {
                path: self.backup_path.clone(),
                size_bytes: fs::metadata(&self.backup_path)?.len(),
            });
        }

        Ok(report)
    }

    fn save_with<F>(&self, store: &ContactStore, write: F) -> Result<()>
    where
        F: FnOnce(&Path, &str) -> io::Result<()>,
    {
        let Err(err) = self.write_with_backup(store, write) else {
            debug!(path = %self.path.display(), count = store.len(), "json store written");
            return Ok(());
        };

        warn!(path = %self.path.display(), error = %err, "json save failed, restoring backup");
        match self.restore_backup() {
            Ok(true) => info!(backup = %self.backup_path.display(), "backup restored"),
            Ok(false) => debug!("no backup to restore"),
            Err(restore_err) => {
                warn!(error = %restore_err, "backup restore failed");
            }
        }
        Err(err)
    }

    fn write_with_backup<F>(&self, store: &ContactStore, write: F) -> Result<()>
    where
        F: FnOnce(&Path, &str) -> io::Result<()>,
    {
        if self.path.exists() {
            fs::copy(&self.path, &self.backup_path)?;
            debug!(backup = %self.backup_path.display(), "backup refreshed");
        }
        let payload = ContactDocument::new(store).to_json()?;
        write(&self.path, &payload)?;
        Ok(())
    }
}

impl ContactRepository for JsonRepository {
    fn load_report(&self) -> Result<LoadReport> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "json store absent, starting empty");
            return Ok(LoadReport::default());
        }

        let parsed = fs::read_to_string(&self.path)
            .map_err(ContactsError::from)
            .and_then(|raw| {
                if raw.trim().is_empty() {
                    Ok(None)
                } else {
                    ContactDocument::from_json(&raw).map(Some)
                }
            });

        match parsed {
            Ok(Some(document)) => {
                debug!(
                    version = %document.version,
                    saved_at = %document.saved_at,
                    count = document.contacts.len(),
                    "json store loaded"
                );
                Ok(LoadReport::clean(document.into_store()))
            }
            Ok(None) => Ok(LoadReport {
                store: ContactStore::new(),
                warnings: vec![format!("{} is empty", self.path.display())],
            }),
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "json store unreadable");
                let recovery = self.recover_from_backup();
                let note = match &recovery.outcome {
                    RecoveryOutcome::Restored { count } => {
                        format!("recovered {count} contacts from backup")
                    }
                    RecoveryOutcome::NoBackup => "no backup available, starting empty".to_string(),
                    RecoveryOutcome::Unreadable(reason) => {
                        format!("backup unreadable ({reason}), starting empty")
                    }
                };
                Ok(LoadReport {
                    store: recovery.store,
                    warnings: vec![format!("{} unreadable: {err}", self.path.display()), note],
                })
            }
        }
    }

    fn save(&self, store: &ContactStore) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        self.save_with(store, |path, payload| fs::write(path, payload))
    }

    fn describe(&self) -> String {
        format!("json file {}", self.path.display())
    }
}

/// Write `store` to an arbitrary path, tagged as an export. No backup.
pub fn export_to(store: &ContactStore, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let payload = ContactDocument::new(store)
        .with_export_kind(EXPORT_KIND)
        .to_json()?;
    fs::write(path, payload)?;
    Ok(())
}

/// Read contacts from an arbitrary document.
pub fn import_from(path: &Path) -> Result<ContactStore> {
    if !path.exists() {
        return Err(ContactsError::NotFound(format!(
            "import file {}",
            path.display()
        )));
    }
    let raw = fs::read_to_string(path)?;
    Ok(ContactDocument::from_json(&raw)?.into_store())
}
