//! Unified path management for refdash files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/refdash/           # Config directory (or $REFDASH_HOME)
//! ├── config.toml              # Client settings
//! ├── session.json             # Persisted session (0600)
//! └── logs/                    # Application logs
//!     └── refdash.log.YYYY-MM-DD
//! ```

use std::path::PathBuf;

/// Environment variable overriding the config directory.
pub const HOME_ENV: &str = "REFDASH_HOME";

const APP_DIR: &str = "refdash";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Home directory could not be determined.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
        }
    }
}

impl std::error::Error for PathError {}

impl From<PathError> for refdash_core::RefdashError {
    fn from(err: PathError) -> Self {
        refdash_core::RefdashError::config(err.to_string())
    }
}

/// Resolves every file location from one root directory.
#[derive(Debug, Clone)]
pub struct RefdashPaths {
    root: PathBuf,
}

impl RefdashPaths {
    /// Resolves the root directory.
    ///
    /// Precedence: explicit `base`, then `$REFDASH_HOME`, then the
    /// platform config dir (`~/.config/refdash` on Linux).
    pub fn new(base: Option<PathBuf>) -> Result<Self, PathError> {
        let root = match base {
            Some(base) => base,
            None => match std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
                Some(home) => PathBuf::from(home),
                None => dirs::config_dir()
                    .ok_or(PathError::HomeDirNotFound)?
                    .join(APP_DIR),
            },
        };
        Ok(Self { root })
    }

    /// Returns the refdash configuration directory.
    pub fn config_dir(&self) -> PathBuf {
        self.root.clone()
    }

    /// Returns the path to the client settings file.
    pub fn config_file(&self) -> PathBuf {
        self.root.join("config.toml")
    }

    /// Returns the path to the persisted session.
    ///
    /// # Security Note
    ///
    /// The file holds backend cookies and is written with 0600 permissions.
    pub fn session_file(&self) -> PathBuf {
        self.root.join("session.json")
    }

    /// Returns the logs directory.
    pub fn logs_dir(&self) -> PathBuf {
        self.root.join("logs")
    }
}
