//! GraphQL documents sent to the registry and the shapes they return.
//!
//! Union results are closed sum types keyed on `__typename`. Anything the
//! registry adds later lands in `Unknown` and the reducers reject it rather
//! than guess.

use serde::{Deserialize, Serialize};

pub const SCHEMA_CHECK: &str = r#"
mutation SchemaCheck($input: SchemaCheckInput!) {
  schemaCheck(input: $input) {
    __typename
    ... on SchemaCheckSuccess {
      valid
      schemaCheck { id webUrl }
    }
    ... on SchemaCheckError {
      valid
      schemaCheck { id webUrl }
    }
    ... on GitHubSchemaCheckSuccess { message }
    ... on GitHubSchemaCheckError { message }
  }
}
"#;

pub const SCHEMA_PUBLISH: &str = r#"
mutation SchemaPublish($input: SchemaPublishInput!, $usesGitHubApp: Boolean!) {
  schemaPublish(input: $input) {
    __typename
    ... on SchemaPublishSuccess @skip(if: $usesGitHubApp) {
      valid
      linkToWebsite
    }
    ... on SchemaPublishError @skip(if: $usesGitHubApp) {
      valid
      linkToWebsite
    }
    ... on SchemaPublishMissingServiceError @skip(if: $usesGitHubApp) {
      missingServiceError: message
    }
    ... on SchemaPublishMissingUrlError @skip(if: $usesGitHubApp) {
      missingUrlError: message
    }
    ... on GitHubSchemaPublishSuccess @include(if: $usesGitHubApp) { message }
    ... on GitHubSchemaPublishError @include(if: $usesGitHubApp) { message }
  }
}
"#;

pub const CREATE_APP_DEPLOYMENT: &str = r#"
mutation CreateAppDeployment($input: CreateAppDeploymentInput!) {
  createAppDeployment(input: $input) {
    ok {
      createdAppDeployment { id name version status }
    }
    error { message }
  }
}
"#;

pub const ADD_DOCUMENTS_TO_APP_DEPLOYMENT: &str = r#"
mutation AddDocumentsToAppDeployment($input: AddDocumentsToAppDeploymentInput!) {
  addDocumentsToAppDeployment(input: $input) {
    ok {
      appDeployment { id name version status }
    }
    error { message }
  }
}
"#;

pub const ACTIVATE_APP_DEPLOYMENT: &str = r#"
mutation ActivateAppDeployment($input: ActivateAppDeploymentInput!) {
  activateAppDeployment(input: $input) {
    ok {
      activatedAppDeployment { id name version status }
      isSkipped
    }
    error { message }
  }
}
"#;

pub const LATEST_SCHEMA_VERSION: &str = r#"
query LatestSchemaVersion(
  $includeSDL: Boolean!
  $includeSupergraph: Boolean!
  $target: TargetReferenceInput
) {
  latestValidVersion(target: $target) {
    id
    valid
    sdl @include(if: $includeSDL)
    supergraph @include(if: $includeSupergraph)
  }
}
"#;

// =============================================================================
// Variables
// =============================================================================

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TargetSelectorInput {
    pub organization_slug: String,
    pub project_slug: String,
    pub target_slug: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TargetReferenceInput {
    pub by_selector: TargetSelectorInput,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct SchemaCheckMetaInput {
    pub author: String,
    pub commit: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaCheckVariables {
    pub service: String,
    pub sdl: String,
    pub meta: SchemaCheckMetaInput,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub context_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<TargetReferenceInput>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SchemaPublishVariables {
    pub service: String,
    pub sdl: String,
    pub url: String,
    pub author: String,
    pub commit: String,
}

/// One operation of an app deployment, keyed by its hash.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DocumentInput {
    pub hash: String,
    pub body: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppDeploymentVariables {
    pub app_name: String,
    pub app_version: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddDocumentsVariables<'a> {
    pub app_name: &'a str,
    pub app_version: &'a str,
    pub documents: &'a [DocumentInput],
}

// =============================================================================
// Responses
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaCheckData {
    pub schema_check: SchemaCheckPayload,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaCheckRef {
    pub id: String,
    #[serde(default)]
    pub web_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "__typename")]
pub enum SchemaCheckPayload {
    #[serde(rename_all = "camelCase")]
    SchemaCheckSuccess {
        valid: bool,
        #[serde(default)]
        schema_check: Option<SchemaCheckRef>,
    },
    #[serde(rename_all = "camelCase")]
    SchemaCheckError {
        valid: bool,
        #[serde(default)]
        schema_check: Option<SchemaCheckRef>,
    },
    GitHubSchemaCheckSuccess {
        #[serde(default)]
        message: Option<String>,
    },
    GitHubSchemaCheckError {
        #[serde(default)]
        message: Option<String>,
    },
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaPublishData {
    pub schema_publish: SchemaPublishPayload,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "__typename")]
pub enum SchemaPublishPayload {
    #[serde(rename_all = "camelCase")]
    SchemaPublishSuccess {
        valid: bool,
        #[serde(default)]
        link_to_website: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    SchemaPublishError {
        valid: bool,
        #[serde(default)]
        link_to_website: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    SchemaPublishMissingServiceError { missing_service_error: String },
    #[serde(rename_all = "camelCase")]
    SchemaPublishMissingUrlError { missing_url_error: String },
    GitHubSchemaPublishSuccess {
        #[serde(default)]
        message: Option<String>,
    },
    GitHubSchemaPublishError {
        #[serde(default)]
        message: Option<String>,
    },
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppDeployment {
    pub id: String,
    pub name: String,
    pub version: String,
    pub status: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MutationError {
    pub message: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAppDeploymentData {
    pub create_app_deployment: CreateAppDeploymentPayload,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateAppDeploymentPayload {
    #[serde(default)]
    pub ok: Option<CreateAppDeploymentOk>,
    #[serde(default)]
    pub error: Option<MutationError>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAppDeploymentOk {
    pub created_app_deployment: AppDeployment,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddDocumentsData {
    pub add_documents_to_app_deployment: AddDocumentsPayload,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AddDocumentsPayload {
    #[serde(default)]
    pub ok: Option<AddDocumentsOk>,
    #[serde(default)]
    pub error: Option<MutationError>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddDocumentsOk {
    pub app_deployment: AppDeployment,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivateAppDeploymentData {
    pub activate_app_deployment: ActivateAppDeploymentPayload,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ActivateAppDeploymentPayload {
    #[serde(default)]
    pub ok: Option<ActivateAppDeploymentOk>,
    #[serde(default)]
    pub error: Option<MutationError>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivateAppDeploymentOk {
    pub activated_app_deployment: AppDeployment,
    #[serde(default)]
    pub is_skipped: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LatestSchemaVersionData {
    #[serde(default)]
    pub latest_valid_version: Option<SchemaVersion>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SchemaVersion {
    pub id: String,
    pub valid: bool,
    #[serde(default)]
    pub sdl: Option<String>,
    #[serde(default)]
    pub supergraph: Option<String>,
}
