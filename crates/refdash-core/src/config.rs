use serde::{Deserialize, Serialize};

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;
pub const DEFAULT_GITHUB_AUTHORIZE_URL: &str = "https://github.com/login/oauth/authorize";
pub const DEFAULT_GITHUB_SCOPE: &str = "repo";

/// Client settings, read from `config.toml`.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ClientSettings {
    /// Base URL of the dashboard backend.
    pub backend_url: String,
    pub request_timeout_secs: u64,
    pub github: GithubSettings,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            github: GithubSettings::default(),
        }
    }
}

/// The GitHub OAuth app the backend exchanges codes for.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct GithubSettings {
    pub client_id: Option<String>,
    pub scope: String,
    pub authorize_url: String,
}

impl Default for GithubSettings {
    fn default() -> Self {
        Self {
            client_id: None,
            scope: DEFAULT_GITHUB_SCOPE.to_string(),
            authorize_url: DEFAULT_GITHUB_AUTHORIZE_URL.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_uses_defaults() {
        let settings: ClientSettings = toml::from_str(
            r#"
            backend_url = "https://bot.example.com"

            [github]
            client_id = "Iv1.abc"
            "#,
        )
        .unwrap();

        assert_eq!(settings.backend_url, "https://bot.example.com");
        assert_eq!(settings.request_timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(settings.github.client_id.as_deref(), Some("Iv1.abc"));
        assert_eq!(settings.github.scope, "repo");
    }
}
