//! File-backed session persistence.
//!
//! The session lives in a single JSON document (`session.json`) under the
//! refdash config directory. Anonymous means the file is absent. A file that
//! does not hold a complete session is ignored and loads as Anonymous.

use crate::paths::RefdashPaths;
use crate::storage::{AtomicFile, AtomicFileError};
use async_trait::async_trait;
use refdash_core::error::{RefdashError, Result};
use refdash_core::session::{Session, SessionRepository};
use std::path::PathBuf;
use std::sync::Arc;

/// Session repository backed by an owner-only JSON file.
///
/// # Example
///
/// ```ignore
/// use refdash_infrastructure::FileSessionRepository;
///
/// let repository = FileSessionRepository::new(&paths);
/// let session = repository.load().await?;
/// ```
#[derive(Clone)]
pub struct FileSessionRepository {
    file: Arc<AtomicFile<Session>>,
}

impl FileSessionRepository {
    /// Uses `session.json` in the resolved config directory.
    pub fn new(paths: &RefdashPaths) -> Self {
        Self::with_path(paths.session_file())
    }

    /// Creates a repository at an explicit path (for testing).
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            file: Arc::new(AtomicFile::json(path).private()),
        }
    }

    async fn blocking<R, F>(&self, op: F) -> Result<R>
    where
        R: Send + 'static,
        F: FnOnce(&AtomicFile<Session>) -> Result<R> + Send + 'static,
    {
        let file = self.file.clone();
        tokio::task::spawn_blocking(move || op(file.as_ref()))
            .await
            .map_err(|e| RefdashError::internal(format!("Failed to join task: {}", e)))?
    }
}

#[async_trait]
impl SessionRepository for FileSessionRepository {
    async fn load(&self) -> Result<Session> {
        self.blocking(|file| {
            let session = match file.load() {
                Ok(session) => session.unwrap_or_default(),
                Err(AtomicFileError::JsonError(e)) => {
                    tracing::warn!(
                        "[FileSessionRepository] Ignoring unreadable session in {}: {}",
                        file.path().display(),
                        e
                    );
                    Session::Anonymous
                }
                Err(e) => return Err(e.into()),
            };
            tracing::debug!(
                "[FileSessionRepository] Loaded session from {} (authenticated={})",
                file.path().display(),
                session.is_authenticated()
            );
            Ok(session)
        })
        .await
    }

    async fn save(&self, session: &Session) -> Result<()> {
        if !session.is_authenticated() {
            return self.clear().await;
        }

        let session = session.clone();
        self.blocking(move |file| {
            file.with_lock(|f| f.save(&session))?;
            tracing::debug!("[FileSessionRepository] Saved session to {}", file.path().display());
            Ok(())
        })
        .await
    }

    async fn clear(&self) -> Result<()> {
        self.blocking(|file| {
            file.with_lock(|f| f.remove())?;
            tracing::debug!("[FileSessionRepository] Cleared {}", file.path().display());
            Ok(())
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use refdash_core::session::{SessionCredentials, UserAccount, UserSession};
    use tempfile::TempDir;

    fn authenticated() -> Session {
        let mut credentials = SessionCredentials::default();
        credentials.insert("sessionid", "abc");
        credentials.insert("csrftoken", "tok");
        Session::Authenticated(UserSession {
            user_id: "7".to_string(),
            user: UserAccount {
                user_name: "octocat".to_string(),
                ..Default::default()
            },
            avatar_url: None,
            credentials,
        })
    }

    #[tokio::test]
    async fn test_load_without_file_is_anonymous() {
        let temp_dir = TempDir::new().unwrap();
        let repo = FileSessionRepository::with_path(temp_dir.path().join("session.json"));
        assert_eq!(repo.load().await.unwrap(), Session::Anonymous);
    }

    #[tokio::test]
    async fn test_save_load_clear() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("session.json");
        let repo = FileSessionRepository::with_path(path.clone());

        repo.save(&authenticated()).await.unwrap();
        assert!(path.exists());
        assert_eq!(repo.load().await.unwrap(), authenticated());

        repo.clear().await.unwrap();
        assert!(!path.exists());
        assert_eq!(repo.load().await.unwrap(), Session::Anonymous);
    }

    #[tokio::test]
    async fn test_saving_anonymous_clears() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("session.json");
        let repo = FileSessionRepository::with_path(path.clone());

        repo.save(&authenticated()).await.unwrap();
        repo.save(&Session::Anonymous).await.unwrap();
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_corrupt_file_loads_as_anonymous() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("session.json");
        std::fs::write(&path, "{not json").unwrap();

        let repo = FileSessionRepository::with_path(path);
        assert_eq!(repo.load().await.unwrap(), Session::Anonymous);
    }

    #[tokio::test]
    async fn test_incomplete_session_file_loads_as_anonymous() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("session.json");
        std::fs::write(
            &path,
            r#"{"state":"authenticated","user_id":"","user":{"user_name":""}}"#,
        )
        .unwrap();

        let repo = FileSessionRepository::with_path(path.clone());
        let session = repo.load().await.unwrap();
        assert!(!session.is_authenticated());

        repo.save(&authenticated()).await.unwrap();
        assert_eq!(repo.load().await.unwrap(), authenticated());
    }
}
