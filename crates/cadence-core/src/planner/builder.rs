//! Builder for creating and configuring Planner instances.

use std::path::{Path, PathBuf};

use log::debug;
use tokio::task;

use super::Planner;
use crate::{
    db::Database,
    error::{PlannerError, Result},
    store::{MemoryStore, PlanStore},
};

enum Backend {
    Sqlite(Option<PathBuf>),
    Memory,
    Custom(Box<dyn PlanStore>),
}

/// Builder for creating and configuring Planner instances.
///
/// Without further configuration the planner persists to SQLite at the XDG
/// data location.
pub struct PlannerBuilder {
    backend: Backend,
}

impl PlannerBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            backend: Backend::Sqlite(None),
        }
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_DATA_HOME/cadence/cadence.db` or `~/.local/share/cadence/cadence.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.backend = Backend::Sqlite(Some(path.as_ref().to_path_buf()));
        }
        self
    }

    /// Keeps plans in process memory only.
    pub fn in_memory(mut self) -> Self {
        self.backend = Backend::Memory;
        self
    }

    /// Uses a caller-supplied store.
    pub fn with_store(mut self, store: Box<dyn PlanStore>) -> Self {
        self.backend = Backend::Custom(store);
        self
    }

    /// Builds the configured planner instance.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::FileSystem` if the database path is invalid
    /// Returns `PlannerError::Database` if database initialization fails
    pub async fn build(self) -> Result<Planner> {
        let store: Box<dyn PlanStore> = match self.backend {
            Backend::Memory => Box::new(MemoryStore::new()),
            Backend::Custom(store) => store,
            Backend::Sqlite(path) => {
                let db_path = match path {
                    Some(path) => path,
                    None => Self::default_database_path()?,
                };

                if let Some(parent) = db_path.parent() {
                    std::fs::create_dir_all(parent).map_err(|e| PlannerError::FileSystem {
                        path: parent.to_path_buf(),
                        source: e,
                    })?;
                }

                debug!("Opening plan database at {}", db_path.display());
                let db = task::spawn_blocking(move || Database::new(&db_path))
                    .await
                    .map_err(|e| PlannerError::Configuration {
                        message: format!("Task join error: {e}"),
                    })??;
                Box::new(db)
            }
        };

        Ok(Planner::new(store))
    }

    /// Returns the default database path following XDG Base Directory
    /// specification.
    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("cadence")
            .place_data_file("cadence.db")
            .map_err(|e| PlannerError::XdgDirectory(e.to_string()))
    }
}

impl Default for PlannerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
