//! Guarded navigation with a remembered return path.

use super::store::SessionStore;
use refdash_core::routing::{self, DASHBOARD_HOME_PATH, GuardDecision};
use std::sync::{Arc, Mutex};

/// Result of asking to show a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Show(String),
    Redirected { from: String, to: String },
    NotFound(String),
}

/// Applies the route guard against the live session.
pub struct Navigator {
    store: Arc<SessionStore>,
    remembered: Mutex<Option<String>>,
}

impl Navigator {
    pub fn new(store: Arc<SessionStore>) -> Self {
        Self {
            store,
            remembered: Mutex::new(None),
        }
    }

    pub fn navigate(&self, path: &str) -> Navigation {
        match routing::guard(path, self.store.is_authenticated()) {
            GuardDecision::Render { path } => Navigation::Show(path),
            GuardDecision::Redirect { to, remember } => {
                let from = routing::normalize_path(path);
                if let Some(remember) = remember {
                    tracing::debug!("[Navigator] Remembering {} until sign-in", remember);
                    self.remember(remember);
                }
                Navigation::Redirected { from, to }
            }
            GuardDecision::NotFound { path } => Navigation::NotFound(path),
        }
    }

    /// Sets the page to return to after sign-in.
    pub fn remember(&self, path: impl Into<String>) {
        *self.remembered.lock().unwrap_or_else(|p| p.into_inner()) =
            Some(routing::normalize_path(&path.into()));
    }

    pub fn remembered(&self) -> Option<String> {
        self.remembered.lock().unwrap_or_else(|p| p.into_inner()).clone()
    }

    /// Consumes the remembered path, defaulting to the dashboard home.
    pub fn take_return_path(&self) -> String {
        self.remembered
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .take()
            .unwrap_or_else(|| DASHBOARD_HOME_PATH.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{MockAccountBackend, MockSessionRepository, user_session};

    fn navigator() -> (Arc<SessionStore>, Navigator) {
        let store = Arc::new(SessionStore::new(
            Arc::new(MockSessionRepository::default()),
            Arc::new(MockAccountBackend::default()),
        ));
        let navigator = Navigator::new(store.clone());
        (store, navigator)
    }

    #[tokio::test]
    async fn test_anonymous_protected_path_redirects_and_remembers() {
        let (_store, navigator) = navigator();

        assert_eq!(
            navigator.navigate("/dashboard/settings"),
            Navigation::Redirected {
                from: "/dashboard/settings".into(),
                to: "/".into()
            }
        );
        assert_eq!(navigator.remembered().as_deref(), Some("/dashboard/settings"));
        assert_eq!(navigator.take_return_path(), "/dashboard/settings");
        assert_eq!(navigator.take_return_path(), DASHBOARD_HOME_PATH);
    }

    #[tokio::test]
    async fn test_guard_follows_login() {
        let (store, navigator) = navigator();
        assert_eq!(navigator.navigate("/"), Navigation::Show("/".into()));

        store.login(user_session("octocat")).await.unwrap();

        assert_eq!(
            navigator.navigate("/"),
            Navigation::Redirected {
                from: "/".into(),
                to: DASHBOARD_HOME_PATH.into()
            }
        );
        assert_eq!(navigator.remembered(), None);
        assert_eq!(
            navigator.navigate("/dashboard/home"),
            Navigation::Show("/dashboard/home".into())
        );
        assert_eq!(navigator.navigate("/missing"), Navigation::NotFound("/missing".into()));
    }
}
