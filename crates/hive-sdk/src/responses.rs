//! Result DTOs for operations.

use serde::{Deserialize, Serialize};

/// Outcome of a schema check.
///
/// `valid == false` is a completed check that found problems, not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaCheckResult {
    /// Check id. Empty for checks delegated to the GitHub app.
    pub id: String,
    pub valid: bool,
    /// Link to the check in the registry UI. Empty for GitHub app checks.
    pub url: String,
}

/// Outcome of a schema publish.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaPublishResult {
    /// Last path segment of `url`. The registry returns no id for publishes.
    pub id: String,
    pub url: String,
    pub valid: bool,
}

/// Deployment returned by app create and app publish.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppDeploymentResult {
    pub id: String,
    pub app_name: String,
    pub app_version: String,
    /// Deployment status as reported by the registry, e.g. `pending` or `active`.
    pub status: String,
}

/// Result of creating an app deployment.
pub type CreateAppResult = AppDeploymentResult;

/// Result of activating an app deployment.
pub type PublishAppResult = AppDeploymentResult;

/// Latest valid schema version of a target.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatestSchemaVersion {
    pub id: String,
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sdl: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supergraph: Option<String>,
}
