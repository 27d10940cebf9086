//! GitHub OAuth hand-off.
//!
//! The user authorizes the GitHub app in a browser, GitHub redirects back
//! with `?code=...`, and the backend exchanges that code for a session.

use crate::session::{Navigator, SessionStore};
use refdash_core::backend::AccountBackend;
use refdash_core::config::GithubSettings;
use refdash_core::error::{RefdashError, Result};
use reqwest::Url;
use std::sync::Arc;

pub struct AuthUseCase {
    github: GithubSettings,
    backend: Arc<dyn AccountBackend>,
    store: Arc<SessionStore>,
    navigator: Arc<Navigator>,
}

impl AuthUseCase {
    pub fn new(
        github: GithubSettings,
        backend: Arc<dyn AccountBackend>,
        store: Arc<SessionStore>,
        navigator: Arc<Navigator>,
    ) -> Self {
        Self {
            github,
            backend,
            store,
            navigator,
        }
    }

    /// The GitHub page that starts the sign-in.
    pub fn authorize_url(&self) -> Result<Url> {
        let client_id = self
            .github
            .client_id
            .as_deref()
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| RefdashError::config("github.client_id is not set"))?;

        Url::parse_with_params(
            &self.github.authorize_url,
            &[("client_id", client_id), ("scope", self.github.scope.as_str())],
        )
        .map_err(|e| {
            RefdashError::config(format!(
                "invalid authorize_url '{}': {}",
                self.github.authorize_url, e
            ))
        })
    }

    /// Exchanges the OAuth `code`, signs in, and returns the page to open.
    ///
    /// The destination is the path remembered by the route guard, or the
    /// dashboard home.
    pub async fn complete_login(&self, code: &str) -> Result<String> {
        let code = code.trim();
        if code.is_empty() {
            return Err(RefdashError::invalid_payload("OAuth callback", "empty code"));
        }

        let message = self.backend.authorize(code).await?;
        tracing::info!("[AuthUseCase] Code exchanged: {}", message);

        let session = self.backend.fetch_session().await?;
        if !session.is_authenticated() {
            return Err(RefdashError::unauthorized(
                "backend did not establish a session",
            ));
        }

        self.store.login(session).await?;
        Ok(self.navigator.take_return_path())
    }
}

/// Pulls the `code` out of a pasted callback URL, query string, or bare code.
pub fn extract_code(callback: &str) -> Result<String> {
    let input = callback.trim();
    let missing = || RefdashError::invalid_payload("OAuth callback", "no code parameter found");

    if let Ok(url) = Url::parse(input) {
        return url
            .query_pairs()
            .find(|(key, _)| key == "code")
            .map(|(_, value)| value.into_owned())
            .filter(|code| !code.is_empty())
            .ok_or_else(missing);
    }

    if let Some((_, rest)) = input.split_once("code=") {
        let code = rest.split(['&', '#']).next().unwrap_or_default();
        return (!code.is_empty()).then(|| code.to_string()).ok_or_else(missing);
    }

    let looks_like_code = !input.is_empty()
        && input
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    looks_like_code.then(|| input.to_string()).ok_or_else(missing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{MockAccountBackend, MockSessionRepository, user_session};
    use refdash_core::session::Session;

    struct Fixture {
        backend: Arc<MockAccountBackend>,
        store: Arc<SessionStore>,
        navigator: Arc<Navigator>,
        auth: AuthUseCase,
    }

    fn fixture(client_id: Option<&str>) -> Fixture {
        let backend = Arc::new(MockAccountBackend::default());
        let store = Arc::new(SessionStore::new(
            Arc::new(MockSessionRepository::default()),
            backend.clone(),
        ));
        let navigator = Arc::new(Navigator::new(store.clone()));
        let github = GithubSettings {
            client_id: client_id.map(str::to_string),
            ..Default::default()
        };
        let auth = AuthUseCase::new(github, backend.clone(), store.clone(), navigator.clone());
        Fixture {
            backend,
            store,
            navigator,
            auth,
        }
    }

    #[test]
    fn test_authorize_url() {
        let f = fixture(Some("Iv1.abc"));
        let url = f.auth.authorize_url().unwrap();
        assert_eq!(
            url.as_str(),
            "https://github.com/login/oauth/authorize?client_id=Iv1.abc&scope=repo"
        );

        let f = fixture(None);
        assert!(f.auth.authorize_url().unwrap_err().is_config());
    }

    #[test]
    fn test_extract_code() {
        assert_eq!(
            extract_code("http://localhost:3000/?code=abc123&state=x").unwrap(),
            "abc123"
        );
        assert_eq!(extract_code("?code=abc123").unwrap(), "abc123");
        assert_eq!(extract_code("  abc-123_x ").unwrap(), "abc-123_x");
        assert!(extract_code("http://localhost:3000/?state=x").is_err());
        assert!(extract_code("").is_err());
        assert!(extract_code("not a code").is_err());
    }

    #[tokio::test]
    async fn test_complete_login_returns_to_remembered_path() {
        let f = fixture(Some("id"));
        f.navigator.navigate("/dashboard/refactorings");
        f.backend.set_session(Ok(user_session("octocat")));

        let destination = f.auth.complete_login("abc").await.unwrap();

        assert_eq!(destination, "/dashboard/refactorings");
        assert!(f.store.is_authenticated());
        assert_eq!(f.backend.calls(), vec!["authorize", "fetch_session"]);
    }

    #[tokio::test]
    async fn test_complete_login_defaults_to_dashboard_home() {
        let f = fixture(Some("id"));
        f.backend.set_session(Ok(user_session("octocat")));
        assert_eq!(f.auth.complete_login("abc").await.unwrap(), "/dashboard/home");
    }

    #[tokio::test]
    async fn test_failed_exchange_stays_anonymous() {
        let f = fixture(Some("id"));
        f.backend.set_authorize(Err(RefdashError::backend(400, "Bad verification code")));

        let err = f.auth.complete_login("abc").await.unwrap_err();
        assert!(err.is_backend());
        assert!(!f.store.is_authenticated());
        assert_eq!(f.backend.calls(), vec!["authorize"]);
    }

    #[tokio::test]
    async fn test_empty_backend_session_is_rejected() {
        let f = fixture(Some("id"));
        f.backend.set_session(Ok(Session::Anonymous));

        let err = f.auth.complete_login("abc").await.unwrap_err();
        assert!(err.is_unauthorized());
        assert!(!f.store.is_authenticated());
    }
}
