use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::cli::Cli;
use crate::config::{CONFIG_FILE, Config};
use crate::core::ContactStore;
use crate::error::Result;
use crate::logging::ActivityLog;
use crate::storage::{self, ContactRepository, LoadReport};
use crate::utils::ensure_dir;

pub struct AppContext {
    pub root: PathBuf,
    pub config_path: PathBuf,
    pub config: Config,
    pub log: Arc<ActivityLog>,
    pub repo: Box<dyn ContactRepository>,
    pub robot_mode: bool,
    pub verbosity: u8,
}

impl AppContext {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let root = Self::find_root(cli.root.as_deref())?;
        ensure_dir(&root)?;
        let config_path = cli
            .config
            .clone()
            .unwrap_or_else(|| root.join(CONFIG_FILE));
        let mut config = Config::load(cli.config.as_deref(), &root)?;
        if let Some(format) = cli.format {
            config.storage.format = format;
        }
        Ok(Self::new(root, config_path, config, cli.robot, cli.verbose))
    }

    pub fn new(
        root: PathBuf,
        config_path: PathBuf,
        config: Config,
        robot_mode: bool,
        verbosity: u8,
    ) -> Self {
        let log = Arc::new(if config.log.enabled {
            ActivityLog::new(&config.log.file)
        } else {
            ActivityLog::disabled()
        });
        log.debug(
            "configuration",
            Some(&format!(
                "root: {} | format: {}",
                root.display(),
                config.storage.format
            )),
        );
        let repo = storage::open_repository(&config, Arc::clone(&log));
        Self {
            root,
            config_path,
            config,
            log,
            repo,
            robot_mode,
            verbosity,
        }
    }

    /// Load the store through the configured repository.
    pub fn load(&self) -> Result<LoadReport> {
        self.repo.load_report()
    }

    pub fn save(&self, store: &ContactStore) -> Result<()> {
        self.repo.save(store)
    }

    fn find_root(explicit: Option<&Path>) -> Result<PathBuf> {
        if let Some(root) = explicit {
            return Ok(root.to_path_buf());
        }
        if let Ok(root) = std::env::var("CONTACTS_ROOT") {
            return Ok(PathBuf::from(root));
        }
        Ok(std::env::current_dir()?)
    }
}
