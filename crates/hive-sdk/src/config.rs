//! Connection settings for the Hive registry.

use serde::{Deserialize, Serialize};

/// Registry endpoint used when none is configured.
pub const DEFAULT_ENDPOINT: &str = "https://app.graphql-hive.com/graphql";

/// Environment variable consulted when no token is configured.
pub const TOKEN_ENV: &str = "HIVE_TOKEN";

/// Configuration for the Hive client.
#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    /// GraphQL endpoint of the registry.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Registry access token, sent as a bearer token.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// Organization slug used to build target selectors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            token: non_empty(std::env::var(TOKEN_ENV).ok()),
            organization: None,
        }
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("endpoint", &self.endpoint)
            .field("token", &self.token.as_ref().map(|_| "***"))
            .field("organization", &self.organization)
            .finish()
    }
}

impl Config {
    /// Build configuration from explicitly declared values.
    ///
    /// Declared values win. The endpoint falls back to [`DEFAULT_ENDPOINT`]
    /// and the token to `HIVE_TOKEN`. Empty strings count as unset.
    pub fn resolve(
        endpoint: Option<String>,
        token: Option<String>,
        organization: Option<String>,
    ) -> Self {
        Self {
            endpoint: non_empty(endpoint).unwrap_or_else(default_endpoint),
            token: non_empty(token).or_else(|| non_empty(std::env::var(TOKEN_ENV).ok())),
            organization: non_empty(organization),
        }
    }

    /// Check if a token is available.
    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// Get a configuration value by key. The token is masked.
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "endpoint" => Some(self.endpoint.clone()),
            "token" => self.token.as_ref().map(|_| "***".to_string()),
            "organization" => self.organization.clone(),
            _ => None,
        }
    }
}
