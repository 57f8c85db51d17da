// Rust guideline compliant 2026-10-12

//! Configuration directory resolution and path management.

use crate::error::{AppError, Result};
use flowpath_core::{Config, Error as CoreError, JiraConfig, WorkflowStore};
use std::path::{Path, PathBuf};

/// Name of the default configuration directory under the current directory.
pub const DEFAULT_DIR_NAME: &str = ".flowpath";

/// Environment variable naming the configuration directory.
pub const HOME_ENV: &str = "FLOWPATH_HOME";

/// Resolved configuration directory and the configuration loaded from it.
#[derive(Debug, Clone)]
pub struct Workspace {
    config_dir: PathBuf,
    config: Config,
}

impl Workspace {
    /// Resolves the configuration directory and loads its configuration.
    ///
    /// # Arguments
    ///
    /// * `config_dir` - Explicit directory, taking precedence over `FLOWPATH_HOME`
    ///
    /// # Returns
    ///
    /// A `Workspace` rooted at the first of `config_dir`, `$FLOWPATH_HOME`,
    /// or `./.flowpath`. The directory does not have to exist.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The current directory cannot be resolved
    /// - The configuration cannot be loaded
    pub fn resolve(config_dir: Option<&Path>) -> Result<Self> {
        let dir = match config_dir {
            Some(dir) => dir.to_path_buf(),
            None => match std::env::var_os(HOME_ENV) {
                Some(home) if !home.is_empty() => PathBuf::from(home),
                _ => std::env::current_dir()?.join(DEFAULT_DIR_NAME),
            },
        };
        Self::open_with(dir, |key| std::env::var(key).ok())
    }

    /// Opens a workspace at `config_dir`, reading overrides through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded.
    pub fn open_with<F>(config_dir: impl Into<PathBuf>, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config_dir = config_dir.into();
        let config = Config::load_with(&config_dir, lookup)?;
        Ok(Self { config_dir, config })
    }

    /// Returns the configuration directory.
    #[must_use]
    pub fn config_dir(&self) -> &Path {
        self.config_dir.as_path()
    }

    /// Returns the config TOML path.
    #[must_use]
    pub fn config_path(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    /// Returns the loaded configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the workflow cache path.
    #[must_use]
    pub fn store_path(&self) -> PathBuf {
        self.config.store_path(&self.config_dir)
    }

    /// Opens the workflow cache.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be initialized.
    pub fn open_store(&self) -> Result<WorkflowStore> {
        Ok(WorkflowStore::new(self.store_path())?)
    }

    /// Returns validated Jira connection settings.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotConfigured` listing what is missing.
    pub fn jira_config(&self) -> Result<&JiraConfig> {
        match self.config.jira.validate() {
            Ok(()) => Ok(&self.config.jira),
            Err(CoreError::InvalidConfig(message)) => Err(AppError::NotConfigured(message)),
            Err(other) => Err(other.into()),
        }
    }
}
