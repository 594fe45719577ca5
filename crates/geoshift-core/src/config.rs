//! Session configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Environment variable naming the engine data directory.
pub const DATA_DIR_ENV: &str = "GEOSHIFT_PROJ_DATA";

/// File name of the CRS database inside the data directory.
pub const DATABASE_FILE: &str = "proj.db";

/// Runtime configuration for a [`Session`](crate::Session).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Directory holding the CRS database and grid files. `None` (or an empty
    /// path) leaves the engine's own defaults in place.
    pub data_dir: Option<PathBuf>,
}

impl SessionConfig {
    /// Read the configuration from [`DATA_DIR_ENV`].
    pub fn from_env() -> Self {
        Self {
            data_dir: std::env::var_os(DATA_DIR_ENV)
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
        }
    }

    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: Some(data_dir.into()),
        }
    }

    /// The data directory, ignoring an empty path.
    pub fn data_dir(&self) -> Option<&Path> {
        self.data_dir
            .as_deref()
            .filter(|dir| !dir.as_os_str().is_empty())
    }
}

/// Search paths and database location derived from a data directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataLayout {
    pub search_paths: Vec<PathBuf>,
    pub database: PathBuf,
}

impl DataLayout {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            search_paths: vec![data_dir.to_path_buf()],
            database: data_dir.join(DATABASE_FILE),
        }
    }
}
