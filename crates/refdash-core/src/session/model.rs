//! Session domain model.
//!
//! A [`Session`] is either `Anonymous` or a fully parsed [`UserSession`].
//! Backend payloads are parsed at the API boundary by [`Session::from_payload`].
//! Every deserialization of a [`UserSession`], including the persisted file,
//! rejects a record without a user id or login.

use super::credentials::SessionCredentials;
use crate::error::{RefdashError, Result};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Authentication state of the dashboard client.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Session {
    /// No session is established.
    #[default]
    Anonymous,
    /// A session returned by the backend after the OAuth hand-off.
    Authenticated(UserSession),
}

/// The account record the backend attaches to a session.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UserAccount {
    #[serde(default)]
    pub account_id: Option<i64>,
    pub user_name: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub account_type: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// A populated session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "UserSessionRecord")]
pub struct UserSession {
    /// Backend user id. The backend emits it as a number; strings are accepted too.
    pub user_id: String,
    pub user: UserAccount,
    #[serde(default)]
    pub avatar_url: Option<String>,
    /// Cookies needed to keep talking to the backend as this user.
    #[serde(default)]
    pub credentials: SessionCredentials,
}

/// Wire shape of [`UserSession`] before the completeness check.
#[derive(Deserialize)]
struct UserSessionRecord {
    #[serde(deserialize_with = "deserialize_user_id")]
    user_id: String,
    user: UserAccount,
    #[serde(default)]
    avatar_url: Option<String>,
    #[serde(default)]
    credentials: SessionCredentials,
}

impl TryFrom<UserSessionRecord> for UserSession {
    type Error = String;

    fn try_from(record: UserSessionRecord) -> std::result::Result<Self, Self::Error> {
        if record.user_id.trim().is_empty() || record.user.user_name.trim().is_empty() {
            return Err("user_id and user.user_name must be non-empty".to_string());
        }
        Ok(Self {
            user_id: record.user_id,
            user: record.user,
            avatar_url: record.avatar_url,
            credentials: record.credentials,
        })
    }
}

impl UserSession {
    /// Display name, falling back to the GitHub login.
    pub fn display_name(&self) -> &str {
        self.user
            .name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(&self.user.user_name)
    }
}

impl Session {
    /// Parses the JSON body of `GET api/account/session`.
    ///
    /// `null`, `{}` and `{"isLoggedIn": false}` mean Anonymous. Any other
    /// payload must carry a user id and an account record.
    pub fn from_payload(payload: &Value) -> Result<Self> {
        let object = match payload {
            Value::Null => return Ok(Session::Anonymous),
            Value::Object(map) if map.is_empty() => return Ok(Session::Anonymous),
            Value::Object(map) => map,
            other => {
                return Err(RefdashError::invalid_payload(
                    "session",
                    format!("expected an object, got {other}"),
                ));
            }
        };

        if object.get("isLoggedIn").and_then(Value::as_bool) == Some(false) {
            return Ok(Session::Anonymous);
        }

        let user_session: UserSession = serde_json::from_value(payload.clone())
            .map_err(|e| RefdashError::invalid_payload("session", e.to_string()))?;

        Ok(Session::Authenticated(user_session))
    }

    /// True iff the session is non-empty.
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Session::Authenticated(_))
    }

    pub fn user(&self) -> Option<&UserSession> {
        match self {
            Session::Authenticated(user) => Some(user),
            Session::Anonymous => None,
        }
    }

    pub fn credentials(&self) -> Option<&SessionCredentials> {
        self.user().map(|user| &user.credentials)
    }

    /// Returns the session with its credentials replaced.
    ///
    /// Anonymous sessions carry no credentials and are returned unchanged.
    pub fn with_credentials(self, credentials: SessionCredentials) -> Self {
        match self {
            Session::Authenticated(mut user) => {
                user.credentials = credentials;
                Session::Authenticated(user)
            }
            Session::Anonymous => Session::Anonymous,
        }
    }
}

fn deserialize_user_id<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Number(i64),
        Text(String),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Number(id) => id.to_string(),
        RawId::Text(id) => id,
    })
}
