pub mod auth;
pub mod config;
pub mod dashboard;
pub mod settings;

use anyhow::{Context, Result, bail};
use refdash_application::{AuthUseCase, Navigation, Navigator, SessionStore};
use refdash_core::backend::AccountBackend;
use refdash_core::config::ClientSettings;
use refdash_infrastructure::{
    FileSessionRepository, HttpAccountBackend, RefdashPaths, SettingsService,
};
use std::sync::Arc;

/// Wired services for commands that talk to the backend.
pub struct AppContext {
    pub settings: ClientSettings,
    pub backend: Arc<dyn AccountBackend>,
    pub store: Arc<SessionStore>,
    pub navigator: Arc<Navigator>,
}

impl AppContext {
    /// Loads settings, restores the persisted session and refreshes it from
    /// the backend.
    pub async fn build(paths: &RefdashPaths) -> Result<Self> {
        let settings = SettingsService::new(paths)
            .load()
            .context("Failed to load settings")?;

        let backend: Arc<dyn AccountBackend> = Arc::new(
            HttpAccountBackend::new(&settings).context("Failed to create backend client")?,
        );
        let repository = Arc::new(FileSessionRepository::new(paths));
        let store = Arc::new(SessionStore::new(repository, backend.clone()));
        let navigator = Arc::new(Navigator::new(store.clone()));

        let session = store.start().await;
        tracing::debug!(
            "[AppContext] Session ready (authenticated={})",
            session.is_authenticated()
        );

        Ok(Self {
            settings,
            backend,
            store,
            navigator,
        })
    }

    /// Fails unless the guard lets `path` render.
    pub fn require(&self, path: &str) -> Result<()> {
        match self.navigator.navigate(path) {
            Navigation::Show(_) => Ok(()),
            Navigation::Redirected { from, .. } => bail!(
                "Not signed in. Run `refdash login --return-to {}` first.",
                from
            ),
            Navigation::NotFound(path) => bail!("No page at {}", path),
        }
    }

    pub fn auth(&self) -> AuthUseCase {
        AuthUseCase::new(
            self.settings.github.clone(),
            self.backend.clone(),
            self.store.clone(),
            self.navigator.clone(),
        )
    }
}
