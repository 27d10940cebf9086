//! Client settings loader.
//!
//! Reads `config.toml`, falls back to defaults for anything missing, then
//! applies environment overrides.

use crate::paths::RefdashPaths;
use crate::storage::AtomicFile;
use refdash_core::config::ClientSettings;
use refdash_core::error::{RefdashError, Result};
use std::path::{Path, PathBuf};

/// Overrides `backend_url`.
pub const BACKEND_URL_ENV: &str = "REFDASH_BACKEND_URL";

/// Overrides `github.client_id`.
pub const GITHUB_CLIENT_ID_ENV: &str = "REFDASH_GITHUB_CLIENT_ID";

pub struct SettingsService {
    file: AtomicFile<ClientSettings>,
}

impl SettingsService {
    pub fn new(paths: &RefdashPaths) -> Self {
        Self::with_path(paths.config_file())
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self {
            file: AtomicFile::toml(path),
        }
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Settings from disk, without environment overrides.
    pub fn load_file(&self) -> Result<ClientSettings> {
        Ok(self.file.load()?.unwrap_or_default())
    }

    /// Effective settings: file, then environment.
    pub fn load(&self) -> Result<ClientSettings> {
        let settings = self.load_file()?;
        let settings = apply_overrides(settings, |name| std::env::var(name).ok());
        validate(&settings)?;
        tracing::debug!(
            "[SettingsService] Effective backend_url={} timeout={}s",
            settings.backend_url,
            settings.request_timeout_secs
        );
        Ok(settings)
    }

    /// Writes the default settings if no file exists yet.
    ///
    /// Returns `true` when a file was created.
    pub fn init(&self) -> Result<bool> {
        if self.file.load()?.is_some() {
            return Ok(false);
        }
        self.file.save(&ClientSettings::default())?;
        tracing::info!("[SettingsService] Wrote default settings to {}", self.path().display());
        Ok(true)
    }
}

fn apply_overrides<F>(mut settings: ClientSettings, env: F) -> ClientSettings
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = env(BACKEND_URL_ENV).filter(|v| !v.trim().is_empty()) {
        settings.backend_url = url;
    }
    if let Some(client_id) = env(GITHUB_CLIENT_ID_ENV).filter(|v| !v.trim().is_empty()) {
        settings.github.client_id = Some(client_id);
    }
    settings
}

fn validate(settings: &ClientSettings) -> Result<()> {
    reqwest::Url::parse(&settings.backend_url).map_err(|e| {
        RefdashError::config(format!("invalid backend_url '{}': {}", settings.backend_url, e))
    })?;
    if settings.request_timeout_secs == 0 {
        return Err(RefdashError::config("request_timeout_secs must be positive"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let service = SettingsService::with_path(temp_dir.path().join("config.toml"));
        assert_eq!(service.load_file().unwrap(), ClientSettings::default());
    }

    #[test]
    fn test_init_writes_once() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        let service = SettingsService::with_path(path.clone());

        assert!(service.init().unwrap());
        assert!(path.exists());
        assert!(!service.init().unwrap());
        assert_eq!(service.load_file().unwrap(), ClientSettings::default());
    }

    #[test]
    fn test_env_overrides() {
        let settings = apply_overrides(ClientSettings::default(), |name| match name {
            BACKEND_URL_ENV => Some("https://bot.example.com".to_string()),
            GITHUB_CLIENT_ID_ENV => Some(" ".to_string()),
            _ => None,
        });
        assert_eq!(settings.backend_url, "https://bot.example.com");
        assert_eq!(settings.github.client_id, None);
    }

    #[test]
    fn test_invalid_backend_url_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "backend_url = \"not a url\"\n").unwrap();

        let settings = SettingsService::with_path(path).load_file().unwrap();
        assert!(validate(&settings).unwrap_err().is_config());
    }
}
