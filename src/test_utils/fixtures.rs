use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::app::AppContext;
use crate::config::{CONFIG_FILE, Config};
use crate::storage::StorageFormat;

/// Isolated data root with helpers for seeding contact files.
pub struct UnitTestFixture {
    pub temp_dir: TempDir,
    pub root: PathBuf,
}

impl Default for UnitTestFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl UnitTestFixture {
    #[must_use]
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let root = temp_dir.path().to_path_buf();

        println!("[FIXTURE] Created data root: {root:?}");

        Self { temp_dir, root }
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Create a file under the data root.
    pub fn create_file(&self, relative_path: &str, content: &str) -> PathBuf {
        let full_path = self.root.join(relative_path);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        std::fs::write(&full_path, content).expect("Failed to write file");
        println!(
            "[FIXTURE] Created file: {:?} ({} bytes)",
            full_path,
            content.len()
        );
        full_path
    }

    /// Default config with every path resolved under the data root.
    #[must_use]
    pub fn config(&self, format: StorageFormat) -> Config {
        let mut config = Config::default();
        config.storage.format = format;
        config.resolve_paths(&self.root);
        config
    }

    #[must_use]
    pub fn context(&self, format: StorageFormat) -> AppContext {
        AppContext::new(
            self.root.clone(),
            self.root.join(CONFIG_FILE),
            self.config(format),
            false,
            0,
        )
    }
}

impl Drop for UnitTestFixture {
    fn drop(&mut self) {
        println!("[FIXTURE] Cleaning up data root: {:?}", self.root);
    }
}
