//! In-memory doubles for the repository and backend traits.

use async_trait::async_trait;
use refdash_core::backend::AccountBackend;
use refdash_core::configuration::{BotConfiguration, BranchOption, RepositoryConfig};
use refdash_core::dashboard::DashboardData;
use refdash_core::error::{RefdashError, Result};
use refdash_core::session::{Session, SessionCredentials, SessionRepository, UserAccount, UserSession};
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

pub fn user_session(user_name: &str) -> Session {
    let mut credentials = SessionCredentials::default();
    credentials.insert("csrftoken", format!("csrf-{user_name}"));
    credentials.insert("sessionid", format!("sid-{user_name}"));
    Session::Authenticated(UserSession {
        user_id: format!("id-{user_name}"),
        user: UserAccount {
            user_name: user_name.to_string(),
            ..Default::default()
        },
        avatar_url: None,
        credentials,
    })
}

fn branches(names: &[(&str, bool)]) -> Vec<BranchOption> {
    names
        .iter()
        .map(|(name, is_selected)| BranchOption {
            name: name.to_string(),
            is_selected: *is_selected,
        })
        .collect()
}

pub fn sample_configuration() -> BotConfiguration {
    BotConfiguration {
        repositories: vec![RepositoryConfig {
            repo_id: Some(1),
            name: "octo/alpha".to_string(),
            url: Some("https://github.com/octo/alpha".to_string()),
            source_branches: branches(&[("main", true), ("dev", false)]),
            target_branches: branches(&[("main", false), ("release", true)]),
        }],
        commit_interval: Some(30),
        max_lines: Some(5),
    }
}

#[derive(Default)]
pub struct MockSessionRepository {
    stored: Mutex<Session>,
    fail_writes: AtomicBool,
}

impl MockSessionRepository {
    pub fn with_session(session: Session) -> Self {
        Self {
            stored: Mutex::new(session),
            fail_writes: AtomicBool::new(false),
        }
    }

    pub fn stored(&self) -> Session {
        self.stored.lock().unwrap().clone()
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn check_writable(&self) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            Err(RefdashError::storage("disk full"))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl SessionRepository for MockSessionRepository {
    async fn load(&self) -> Result<Session> {
        Ok(self.stored())
    }

    async fn save(&self, session: &Session) -> Result<()> {
        self.check_writable()?;
        *self.stored.lock().unwrap() = session.clone();
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        self.check_writable()?;
        *self.stored.lock().unwrap() = Session::Anonymous;
        Ok(())
    }
}

/// Scripted backend. Unscripted calls succeed with empty data.
pub struct MockAccountBackend {
    session: Mutex<Result<Session>>,
    session_delay: Mutex<Duration>,
    authorize: Mutex<Result<String>>,
    logout: Mutex<Result<()>>,
    configuration: Mutex<Result<BotConfiguration>>,
    save: Mutex<Result<String>>,
    dashboards: Mutex<VecDeque<(Duration, Result<DashboardData>)>>,
    saved: Mutex<Vec<BotConfiguration>>,
    calls: Mutex<Vec<&'static str>>,
    restored: Mutex<Option<SessionCredentials>>,
    cleared: AtomicUsize,
}

impl Default for MockAccountBackend {
    fn default() -> Self {
        Self {
            session: Mutex::new(Ok(Session::Anonymous)),
            session_delay: Mutex::new(Duration::ZERO),
            authorize: Mutex::new(Ok("Authorization Successful!!".to_string())),
            logout: Mutex::new(Ok(())),
            configuration: Mutex::new(Ok(BotConfiguration::default())),
            save: Mutex::new(Ok("Successfully Updated".to_string())),
            dashboards: Mutex::new(VecDeque::new()),
            saved: Mutex::new(Vec::new()),
            calls: Mutex::new(Vec::new()),
            restored: Mutex::new(None),
            cleared: AtomicUsize::new(0),
        }
    }
}

impl MockAccountBackend {
    pub fn set_session(&self, response: Result<Session>) {
        *self.session.lock().unwrap() = response;
    }

    pub fn set_session_delay(&self, delay: Duration) {
        *self.session_delay.lock().unwrap() = delay;
    }

    pub fn set_authorize(&self, response: Result<String>) {
        *self.authorize.lock().unwrap() = response;
    }

    pub fn set_logout(&self, response: Result<()>) {
        *self.logout.lock().unwrap() = response;
    }

    pub fn set_configuration(&self, response: Result<BotConfiguration>) {
        *self.configuration.lock().unwrap() = response;
    }

    pub fn set_save(&self, response: Result<String>) {
        *self.save.lock().unwrap() = response;
    }

    pub fn push_dashboard(&self, delay: Duration, response: Result<DashboardData>) {
        self.dashboards.lock().unwrap().push_back((delay, response));
    }

    pub fn saved(&self) -> Vec<BotConfiguration> {
        self.saved.lock().unwrap().clone()
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    pub fn restored(&self) -> Option<SessionCredentials> {
        self.restored.lock().unwrap().clone()
    }

    pub fn cleared_count(&self) -> usize {
        self.cleared.load(Ordering::SeqCst)
    }

    fn record(&self, call: &'static str) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl AccountBackend for MockAccountBackend {
    async fn fetch_session(&self) -> Result<Session> {
        self.record("fetch_session");
        let delay = *self.session_delay.lock().unwrap();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        self.session.lock().unwrap().clone()
    }

    async fn authorize(&self, _code: &str) -> Result<String> {
        self.record("authorize");
        self.authorize.lock().unwrap().clone()
    }

    async fn logout(&self) -> Result<()> {
        self.record("logout");
        self.logout.lock().unwrap().clone()
    }

    async fn fetch_configuration(&self) -> Result<BotConfiguration> {
        self.record("fetch_configuration");
        self.configuration.lock().unwrap().clone()
    }

    async fn save_configuration(&self, configuration: &BotConfiguration) -> Result<String> {
        self.record("save_configuration");
        let response = self.save.lock().unwrap().clone();
        if response.is_ok() {
            self.saved.lock().unwrap().push(configuration.clone());
        }
        response
    }

    async fn fetch_dashboard(&self) -> Result<DashboardData> {
        self.record("fetch_dashboard");
        let next = self.dashboards.lock().unwrap().pop_front();
        match next {
            Some((delay, response)) => {
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                response
            }
            None => Ok(DashboardData::default()),
        }
    }

    fn restore_credentials(&self, credentials: &SessionCredentials) {
        *self.restored.lock().unwrap() = Some(credentials.clone());
    }

    fn clear_credentials(&self) {
        self.cleared.fetch_add(1, Ordering::SeqCst);
        *self.restored.lock().unwrap() = None;
    }
}
