//! [`AccountBackend`] over the dashboard REST API.

use super::client::{ApiClient, message_of};
use async_trait::async_trait;
use refdash_core::backend::AccountBackend;
use refdash_core::config::ClientSettings;
use refdash_core::configuration::BotConfiguration;
use refdash_core::dashboard::DashboardData;
use refdash_core::error::{RefdashError, Result};
use refdash_core::session::{Session, SessionCredentials};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

pub const SESSION_PATH: &str = "api/account/session";
pub const AUTHORIZE_PATH: &str = "api/account/github/authorize/";
pub const LOGOUT_PATH: &str = "api/account/logout/";
pub const CONFIGURATIONS_PATH: &str = "api/account/github/configurations/";
pub const DASHBOARD_PATH: &str = "api/account/dashboard/home/";

#[derive(Clone)]
pub struct HttpAccountBackend {
    api: ApiClient,
}

impl HttpAccountBackend {
    pub fn new(settings: &ClientSettings) -> Result<Self> {
        Ok(Self {
            api: ApiClient::new(settings)?,
        })
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }
}

fn parse<T: DeserializeOwned>(entity: &str, value: Value) -> Result<T> {
    serde_json::from_value(value).map_err(|e| RefdashError::invalid_payload(entity, e.to_string()))
}

#[async_trait]
impl AccountBackend for HttpAccountBackend {
    async fn fetch_session(&self) -> Result<Session> {
        let payload = self.api.get_json(SESSION_PATH).await?;
        let session = Session::from_payload(&payload)?;
        tracing::debug!(
            "[HttpAccountBackend] Session fetched (authenticated={})",
            session.is_authenticated()
        );
        Ok(session.with_credentials(self.api.jar().snapshot()))
    }

    async fn authorize(&self, code: &str) -> Result<String> {
        let response = self
            .api
            .post_json(AUTHORIZE_PATH, &json!({ "code": code }))
            .await?;
        Ok(message_of(&response))
    }

    async fn logout(&self) -> Result<()> {
        self.api.delete(LOGOUT_PATH).await?;
        Ok(())
    }

    async fn fetch_configuration(&self) -> Result<BotConfiguration> {
        let payload = self.api.get_json(CONFIGURATIONS_PATH).await?;
        parse("configuration", payload)
    }

    async fn save_configuration(&self, configuration: &BotConfiguration) -> Result<String> {
        let response = self.api.post_json(CONFIGURATIONS_PATH, configuration).await?;
        Ok(message_of(&response))
    }

    async fn fetch_dashboard(&self) -> Result<DashboardData> {
        let payload = self.api.post_json(DASHBOARD_PATH, &json!({})).await?;
        parse("dashboard", payload)
    }

    fn restore_credentials(&self, credentials: &SessionCredentials) {
        self.api.jar().restore(credentials);
    }

    fn clear_credentials(&self) {
        self.api.jar().clear();
    }
}
