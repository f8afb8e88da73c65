//! Activity-log decorator for any [`ContactRepository`].

use std::sync::Arc;

use crate::core::ContactStore;
use crate::error::Result;
use crate::logging::ActivityLog;
use crate::storage::{ContactRepository, LoadReport};

pub struct Logged<R> {
    inner: R,
    log: Arc<ActivityLog>,
}

impl<R: ContactRepository> Logged<R> {
    pub const fn new(inner: R, log: Arc<ActivityLog>) -> Self {
        Self { inner, log }
    }

    pub const fn inner(&self) -> &R {
        &self.inner
    }
}

impl<R: ContactRepository> ContactRepository for Logged<R> {
    fn load_report(&self) -> Result<LoadReport> {
        let target = self.inner.describe();
        self.log.info("load started", Some(&target));
        match self.inner.load_report() {
            Ok(report) => {
                for warning in &report.warnings {
                    self.log.warning("load", Some(warning));
                }
                self.log.success(
                    "load complete",
                    Some(&format!("{target} | contacts: {}", report.store.len())),
                );
                Ok(report)
            }
            Err(err) => {
                self.log.failure("load", &err);
                Err(err)
            }
        }
    }

    fn save(&self, store: &ContactStore) -> Result<()> {
        let target = self.inner.describe();
        self.log
            .info("save started", Some(&format!("{target} | contacts: {}", store.len())));
        match self.inner.save(store) {
            Ok(()) => {
                self.log.success(
                    "save complete",
                    Some(&format!("{target} | contacts: {}", store.len())),
                );
                Ok(())
            }
            Err(err) => {
                self.log.failure("save", &err);
                Err(err)
            }
        }
    }

    fn describe(&self) -> String {
        self.inner.describe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Contact;
    use crate::storage::TextRepository;
    use tempfile::tempdir;

    #[test]
    fn test_logged_repository_records_load_and_save() {
        let dir = tempdir().unwrap();
        let log = Arc::new(ActivityLog::new(dir.path().join("activity.log")));
        let repo = Logged::new(
            TextRepository::new(dir.path().join("contacts.txt")),
            Arc::clone(&log),
        );

        let mut store = ContactStore::new();
        store.add(Contact::new("Doe", "Jane", "j@x", "1"));
        repo.save(&store).unwrap();
        assert_eq!(repo.load().unwrap(), store);

        let lines = log.recent(10).unwrap();
        assert!(lines.iter().any(|l| l.contains("[SUCCESS] save complete")));
        assert!(lines.iter().any(|l| l.contains("[SUCCESS] load complete")));
        assert!(repo.inner().path().ends_with("contacts.txt"));
    }

    #[test]
    fn test_logged_repository_records_warnings_and_failures() {
        let dir = tempdir().unwrap();
        let log = Arc::new(ActivityLog::new(dir.path().join("activity.log")));
        let text_path = dir.path().join("contacts.txt");
        std::fs::write(&text_path, "broken line\n").unwrap();

        let repo = Logged::new(TextRepository::new(&text_path), Arc::clone(&log));
        assert!(repo.load().unwrap().is_empty());

        // A directory where the file should be makes the write fail.
        let blocked = Logged::new(TextRepository::new(dir.path()), Arc::clone(&log));
        assert!(blocked.save(&ContactStore::new()).is_err());

        let lines = log.recent(20).unwrap();
        assert!(lines.iter().any(|l| l.contains("[WARNING] load")));
        assert!(lines.iter().any(|l| l.contains("[ERROR] failure in save")));
    }
}
