//! Observable session store.
//!
//! `SessionStore` owns the authoritative session of the process. Every
//! change is persisted through the [`SessionRepository`] and then published
//! on a `watch` channel, so observers always see whole sessions.

use refdash_core::backend::AccountBackend;
use refdash_core::error::{RefdashError, Result};
use refdash_core::session::{Session, SessionRepository};
use std::sync::Arc;
use tokio::sync::{Mutex, watch};

/// Session state shared by every view and route guard.
///
/// Created once in the composition root and passed around as
/// `Arc<SessionStore>`.
pub struct SessionStore {
    repository: Arc<dyn SessionRepository>,
    backend: Arc<dyn AccountBackend>,
    state: watch::Sender<Session>,
    /// Serializes persist+publish so the last settled write is what both
    /// storage and observers hold.
    commit_lock: Mutex<()>,
}

impl SessionStore {
    /// Creates an Anonymous store. Call [`SessionStore::hydrate`] to load the
    /// persisted session.
    pub fn new(repository: Arc<dyn SessionRepository>, backend: Arc<dyn AccountBackend>) -> Self {
        let (state, _) = watch::channel(Session::Anonymous);
        Self {
            repository,
            backend,
            state,
            commit_lock: Mutex::new(()),
        }
    }

    /// Loads the persisted session and publishes it.
    ///
    /// Persisted cookies are handed to the backend so later requests are
    /// made as the same user.
    pub async fn hydrate(&self) -> Result<Session> {
        let _guard = self.commit_lock.lock().await;
        let session = self.repository.load().await?;

        if let Some(credentials) = session.credentials() {
            self.backend.restore_credentials(credentials);
        }
        tracing::debug!(
            "[SessionStore] Hydrated (authenticated={})",
            session.is_authenticated()
        );
        self.state.send_replace(session.clone());
        Ok(session)
    }

    /// Startup sequence: hydrate from storage, then refresh from the backend.
    ///
    /// Both steps are best effort. A failed hydrate leaves the store
    /// Anonymous; a failed refresh keeps whatever was hydrated.
    pub async fn start(&self) -> Session {
        if let Err(e) = self.hydrate().await {
            tracing::warn!("[SessionStore] Could not restore session: {}", e);
        }
        // refresh() logs its own failure.
        let _ = self.refresh().await;
        self.current()
    }

    /// Persists and publishes a session obtained from the OAuth hand-off.
    ///
    /// Nothing is published if persisting fails.
    pub async fn login(&self, session: Session) -> Result<()> {
        if !session.is_authenticated() {
            return Err(RefdashError::invalid_payload(
                "session",
                "cannot log in with an empty session",
            ));
        }

        self.commit(session).await?;
        tracing::info!("[SessionStore] Logged in as {}", self.user_name());
        Ok(())
    }

    /// Ends the session.
    ///
    /// The backend is asked to invalidate it first; whatever it answers,
    /// cookies, storage and the published state are cleared afterwards and
    /// the store ends Anonymous. Only a local storage failure is returned.
    pub async fn logout(&self) -> Result<()> {
        if let Err(e) = self.backend.logout().await {
            tracing::warn!("[SessionStore] Backend logout failed, clearing locally: {}", e);
        }
        self.backend.clear_credentials();

        let _guard = self.commit_lock.lock().await;
        self.state.send_replace(Session::Anonymous);
        tracing::info!("[SessionStore] Logged out");
        self.repository.clear().await
    }

    /// Re-reads the session from the backend and republishes it.
    ///
    /// On failure the current session is kept and the error returned. An
    /// empty backend session moves the store to Anonymous.
    pub async fn refresh(&self) -> Result<Session> {
        let session = self.backend.fetch_session().await.inspect_err(|e| {
            tracing::warn!("[SessionStore] Refresh failed, keeping current session: {}", e);
        })?;

        self.commit(session.clone()).await?;
        tracing::debug!(
            "[SessionStore] Refreshed (authenticated={})",
            session.is_authenticated()
        );
        Ok(session)
    }

    /// True iff the current session is non-empty.
    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated()
    }

    /// Snapshot of the current session.
    pub fn current(&self) -> Session {
        self.state.borrow().clone()
    }

    /// Receives every published session.
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.state.subscribe()
    }

    async fn commit(&self, session: Session) -> Result<()> {
        let _guard = self.commit_lock.lock().await;
        self.repository.save(&session).await?;
        self.state.send_replace(session);
        Ok(())
    }

    fn user_name(&self) -> String {
        self.state
            .borrow()
            .user()
            .map(|u| u.user.user_name.clone())
            .unwrap_or_default()
    }
}
