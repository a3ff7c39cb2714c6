//! Platform paths for the site's configuration and stored preferences.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/vent/              # Config directory (dirs::config_dir)
//! ├── site.toml                # Site configuration
//! └── preferences/             # FileStore root
//!     ├── theme.json
//!     ├── accessibility-settings.json
//!     └── comparison-list.json
//! ```

use std::path::PathBuf;

use vent_core::error::VentError;

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Platform config directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find platform config directory"),
        }
    }
}

impl std::error::Error for PathError {}

impl From<PathError> for VentError {
    fn from(err: PathError) -> Self {
        VentError::config(err.to_string())
    }
}

pub struct SitePaths;

impl SitePaths {
    const APP_DIR: &'static str = "vent";

    /// Returns the site configuration directory (e.g. `~/.config/vent/`).
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join(Self::APP_DIR))
            .ok_or(PathError::ConfigDirNotFound)
    }

    /// Returns the path to `site.toml`.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("site.toml"))
    }

    /// Returns the default root of the file preference store.
    pub fn preferences_dir() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("preferences"))
    }
}
