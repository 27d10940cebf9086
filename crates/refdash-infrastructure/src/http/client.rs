//! JSON-over-HTTP client for the dashboard backend.

use super::cookies::SessionCookieJar;
use refdash_core::config::ClientSettings;
use refdash_core::error::{RefdashError, Result};
use refdash_core::session::CSRF_HEADER;
use reqwest::header::{ACCEPT, HeaderValue};
use reqwest::{Client, RequestBuilder, Url};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

/// Sends credentialed requests to the backend.
///
/// Every request carries the shared cookie jar and, when the backend has set
/// a `csrftoken` cookie, the matching `X-CSRFToken` header.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
    jar: Arc<SessionCookieJar>,
}

impl ApiClient {
    pub fn new(settings: &ClientSettings) -> Result<Self> {
        let base_url = parse_base_url(&settings.backend_url)?;
        let jar = Arc::new(SessionCookieJar::new(base_url.clone()));

        let client = Client::builder()
            .cookie_provider(jar.clone())
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .build()
            .map_err(|e| RefdashError::config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url,
            jar,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn jar(&self) -> &Arc<SessionCookieJar> {
        &self.jar
    }

    pub async fn get_json(&self, path: &str) -> Result<Value> {
        let request = self.client.get(self.endpoint(path)?);
        self.send(request).await
    }

    pub async fn post_json<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Value> {
        let request = self.client.post(self.endpoint(path)?).json(body);
        self.send(request).await
    }

    pub async fn delete(&self, path: &str) -> Result<Value> {
        let request = self.client.delete(self.endpoint(path)?);
        self.send(request).await
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| RefdashError::config(format!("Invalid endpoint '{path}': {e}")))
    }

    async fn send(&self, mut request: RequestBuilder) -> Result<Value> {
        request = request.header(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(token) = self.jar.csrf_token() {
            request = request.header(CSRF_HEADER, token);
        }

        let response = request.send().await.map_err(transport_error)?;
        let status = response.status();
        let url = response.url().path().to_string();
        let body = response.text().await.map_err(transport_error)?;

        if !status.is_success() {
            let message = error_message(&body)
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed").to_string());
            tracing::warn!("[ApiClient] {} returned {}: {}", url, status.as_u16(), message);
            return Err(RefdashError::backend(status.as_u16(), message));
        }

        tracing::debug!("[ApiClient] {} returned {}", url, status.as_u16());
        Ok(parse_body(&body))
    }
}

/// Base URL with a trailing slash so relative endpoints join underneath it.
fn parse_base_url(raw: &str) -> Result<Url> {
    let normalized = if raw.ends_with('/') {
        raw.to_string()
    } else {
        format!("{raw}/")
    };
    Url::parse(&normalized)
        .map_err(|e| RefdashError::config(format!("Invalid backend URL '{raw}': {e}")))
}

fn transport_error(err: reqwest::Error) -> RefdashError {
    if err.is_timeout() {
        RefdashError::transport(format!("request timed out: {err}"))
    } else {
        RefdashError::transport(err.to_string())
    }
}

/// Empty bodies become `null`; non-JSON bodies are kept as a string.
fn parse_body(body: &str) -> Value {
    if body.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(body).unwrap_or_else(|_| Value::String(body.trim().to_string()))
}

/// `{"message": ..}` or `{"detail": ..}` from an error body, else the raw text.
fn error_message(body: &str) -> Option<String> {
    match parse_body(body) {
        Value::Null => None,
        Value::String(text) => Some(text),
        Value::Object(map) => {
            let text = map
                .get("message")
                .or_else(|| map.get("detail"))
                .and_then(Value::as_str)
                .map(str::to_string);
            Some(text.unwrap_or_else(|| Value::Object(map).to_string()))
        }
        other => Some(other.to_string()),
    }
}

/// Human-readable confirmation from a success body.
pub(crate) fn message_of(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Object(map) => map
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_base_url_gets_trailing_slash() {
        let url = parse_base_url("http://localhost:8000/backend").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/backend/");
        assert_eq!(
            url.join("api/account/session").unwrap().as_str(),
            "http://localhost:8000/backend/api/account/session"
        );
        assert!(parse_base_url("not a url").unwrap_err().is_config());
    }

    #[test]
    fn test_parse_body() {
        assert_eq!(parse_body(""), Value::Null);
        assert_eq!(parse_body("{}"), json!({}));
        assert_eq!(parse_body("Successfully Updated"), json!("Successfully Updated"));
    }

    #[test]
    fn test_error_message() {
        assert_eq!(error_message(r#"{"message": "Bad code"}"#).as_deref(), Some("Bad code"));
        assert_eq!(
            error_message(r#"{"detail": "CSRF Failed"}"#).as_deref(),
            Some("CSRF Failed")
        );
        assert_eq!(error_message("oops").as_deref(), Some("oops"));
        assert_eq!(error_message(""), None);
    }

    #[test]
    fn test_message_of() {
        assert_eq!(message_of(&json!({"message": "Logged out successfully!!"})), "Logged out successfully!!");
        assert_eq!(message_of(&json!("Successfully Updated")), "Successfully Updated");
        assert_eq!(message_of(&Value::Null), "");
    }
}
