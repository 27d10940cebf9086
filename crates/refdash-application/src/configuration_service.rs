//! Settings view: load the bot configuration, edit a draft, save it back.

use crate::view::ViewState;
use refdash_core::backend::AccountBackend;
use refdash_core::configuration::{
    BotConfiguration, ConfigurationDraft, ConfigurationError, RepositoryConfig,
    SAVE_FAILURE_MESSAGE, SAVE_SUCCESS_MESSAGE,
};
use refdash_core::error::Result;
use refdash_core::notification::Notification;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum ConfigurationState {
    #[default]
    Loading,
    /// Failed load.
    Empty,
    Ready(BotConfiguration),
}

/// Form state: the loaded configuration and the draft being edited.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigurationForm {
    loaded: BotConfiguration,
    draft: ConfigurationDraft,
}

impl ConfigurationForm {
    pub fn new(loaded: BotConfiguration) -> Self {
        let draft = ConfigurationDraft::from_configuration(&loaded);
        Self { loaded, draft }
    }

    pub fn loaded(&self) -> &BotConfiguration {
        &self.loaded
    }

    pub fn draft(&self) -> &ConfigurationDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut ConfigurationDraft {
        &mut self.draft
    }

    pub fn repository_names(&self) -> Vec<&str> {
        self.loaded.repositories.iter().map(|r| r.name.as_str()).collect()
    }

    /// Branch options of the chosen repository.
    pub fn selected_repository(&self) -> Option<&RepositoryConfig> {
        self.draft
            .repository
            .as_deref()
            .and_then(|name| self.loaded.repository(name))
    }

    pub fn select_repository(&mut self, name: &str) -> std::result::Result<(), ConfigurationError> {
        self.draft.select_repository(&self.loaded, name)
    }

    /// Throws away every edit.
    pub fn discard(&mut self) {
        self.draft = ConfigurationDraft::from_configuration(&self.loaded);
    }
}

pub struct ConfigurationService {
    backend: Arc<dyn AccountBackend>,
    view: ViewState<ConfigurationState>,
}

impl ConfigurationService {
    pub fn new(backend: Arc<dyn AccountBackend>) -> Self {
        Self {
            backend,
            view: ViewState::default(),
        }
    }

    /// Fetches the configuration; failures are logged and shown as empty.
    pub async fn load(&self) -> ConfigurationState {
        let ticket = self.view.begin();

        let state = match self.backend.fetch_configuration().await {
            Ok(configuration) => ConfigurationState::Ready(configuration),
            Err(e) => {
                tracing::error!("[ConfigurationService] Failed to load configuration: {}", e);
                ConfigurationState::Empty
            }
        };

        if !self.view.settle(ticket, state) {
            tracing::debug!("[ConfigurationService] Ignoring stale configuration response");
        }
        self.view.get()
    }

    pub fn state(&self) -> ConfigurationState {
        self.view.get()
    }

    /// Saves the draft and reports the outcome as a notification.
    ///
    /// An invalid draft never reaches the backend.
    pub async fn save(&self, draft: &ConfigurationDraft) -> Notification {
        match self.try_save(draft).await {
            Ok(message) => {
                tracing::info!("[ConfigurationService] Saved configuration: {}", message);
                Notification::success(SAVE_SUCCESS_MESSAGE)
            }
            Err(e) if e.is_validation() => {
                tracing::warn!("[ConfigurationService] Rejected draft: {}", e);
                Notification::failure(SAVE_FAILURE_MESSAGE)
            }
            Err(e) => {
                tracing::error!("[ConfigurationService] Failed to save configuration: {}", e);
                Notification::failure(SAVE_FAILURE_MESSAGE)
            }
        }
    }

    /// Validates, re-reads the current configuration, applies the draft on
    /// top of it and writes it back.
    pub async fn try_save(&self, draft: &ConfigurationDraft) -> Result<String> {
        draft.validate()?;

        let current = self.backend.fetch_configuration().await?;
        let updated = draft.apply_to(current)?;
        let message = self.backend.save_configuration(&updated).await?;

        self.view.replace(ConfigurationState::Ready(updated));
        Ok(message)
    }
}
