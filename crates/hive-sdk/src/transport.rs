//! GraphQL over HTTP.
//!
//! A single POST per operation. The [`Transport`] trait is the seam the
//! operation client talks to, so tests can script registry answers without
//! a network.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::config::Config;
use crate::error::{HiveError, HiveResult};

/// Issues one GraphQL operation and returns its `data` object.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, query: &str, variables: Value) -> HiveResult<Value>;
}

#[derive(Debug, Serialize)]
struct GraphqlRequest<'a> {
    query: &'a str,
    variables: &'a Value,
}

#[derive(Debug, Deserialize)]
struct GraphqlResponse {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    errors: Vec<GraphqlError>,
}

#[derive(Debug, Deserialize)]
struct GraphqlError {
    message: String,
}

/// [`Transport`] backed by a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    endpoint: String,
    token: Option<String>,
}

impl HttpTransport {
    /// Build a transport with a fresh HTTP client.
    pub fn new(config: &Config) -> HiveResult<Self> {
        let client = Client::builder()
            .user_agent(concat!("hive-sdk/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| HiveError::transport(format!("failed to build http client: {e}")))?;
        Ok(Self::with_client(client, config))
    }

    /// Build a transport around an existing client (and its connection pool).
    pub fn with_client(client: Client, config: &Config) -> Self {
        Self {
            client,
            endpoint: config.endpoint.clone(),
            token: config.token.clone().filter(|t| !t.is_empty()),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn headers(&self) -> HiveResult<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(token) = &self.token {
            let mut value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|_| HiveError::invalid_input("token contains invalid header characters"))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }
        Ok(headers)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, query: &str, variables: Value) -> HiveResult<Value> {
        let headers = self.headers()?;
        let body = serde_json::to_string(&GraphqlRequest {
            query,
            variables: &variables,
        })
        .map_err(|e| HiveError::transport(format!("failed to marshal payload: {e}")))?;

        debug!(
            target: "hive::transport",
            method = "POST",
            url = %self.endpoint,
            headers = ?redact_headers(&headers),
            body = %body,
            "request"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .headers(headers)
            .body(body)
            .send()
            .await
            .map_err(|e| HiveError::transport(e.to_string()))?;

        let status = response.status();
        let response_headers = redact_headers(response.headers());
        let text = response
            .text()
            .await
            .map_err(|e| HiveError::transport(e.to_string()))?;

        debug!(
            target: "hive::transport",
            status = %status,
            headers = ?response_headers,
            body = %text,
            "response"
        );

        if status != StatusCode::OK {
            return Err(HiveError::HttpStatus {
                status: status.to_string(),
            });
        }

        let envelope: GraphqlResponse = serde_json::from_str(&text)?;
        if !envelope.errors.is_empty() {
            let messages: Vec<&str> = envelope.errors.iter().map(|e| e.message.as_str()).collect();
            return Err(HiveError::operation(messages.join("; ")));
        }

        envelope
            .data
            .filter(|data| !data.is_null())
            .ok_or_else(|| HiveError::decode("response has no data"))
    }
}

/// Render headers for logging with the bearer token hidden.
pub fn redact_headers(headers: &HeaderMap) -> Vec<(String, String)> {
    headers
        .iter()
        .map(|(name, value)| {
            let rendered = if name == AUTHORIZATION {
                match value.to_str() {
                    Ok(v) if v.starts_with("Bearer ") => "Bearer ***".to_string(),
                    _ => "***".to_string(),
                }
            } else {
                value.to_str().unwrap_or("<binary>").to_string()
            };
            (name.as_str().to_string(), rendered)
        })
        .collect()
}

/// Decode an operation-specific shape out of a `data` object.
pub fn decode<T: DeserializeOwned>(data: Value) -> HiveResult<T> {
    serde_json::from_value(data).map_err(|e| HiveError::decode(e.to_string()))
}
