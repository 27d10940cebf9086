//! Account backend interface.
//!
//! One method per REST endpoint the dashboard uses. Implementations own the
//! cookie jar; the session layer only hands credentials in and out.

use crate::configuration::BotConfiguration;
use crate::dashboard::DashboardData;
use crate::error::Result;
use crate::session::{Session, SessionCredentials};
use async_trait::async_trait;

#[async_trait]
pub trait AccountBackend: Send + Sync {
    /// `GET api/account/session`.
    ///
    /// An authenticated result carries the cookies the backend currently
    /// associates with it.
    async fn fetch_session(&self) -> Result<Session>;

    /// `POST api/account/github/authorize/` with the OAuth `code`.
    ///
    /// Returns the backend's confirmation message.
    async fn authorize(&self, code: &str) -> Result<String>;

    /// `DELETE api/account/logout/`.
    async fn logout(&self) -> Result<()>;

    /// `GET api/account/github/configurations/`.
    async fn fetch_configuration(&self) -> Result<BotConfiguration>;

    /// `POST api/account/github/configurations/`.
    async fn save_configuration(&self, configuration: &BotConfiguration) -> Result<String>;

    /// `POST api/account/dashboard/home/`.
    async fn fetch_dashboard(&self) -> Result<DashboardData>;

    /// Seeds the cookie jar from a persisted session.
    fn restore_credentials(&self, credentials: &SessionCredentials);

    /// Drops every cookie.
    fn clear_credentials(&self);
}
