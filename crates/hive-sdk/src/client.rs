//! HiveClient - one method per registry capability.
//!
//! Each method builds variables from a typed input, runs exactly one
//! [`Transport`] call (app creation runs one per document batch too) and
//! reduces the union answer into a flat result or a [`HiveError`].

use std::sync::Arc;

use hive_git::CommitInfoFn;
use serde_json::{json, Value};
use tracing::{debug, info};

use crate::config::Config;
use crate::documents::*;
use crate::error::{HiveError, HiveResult};
use crate::requests::*;
use crate::responses::*;
use crate::transport::{decode, HttpTransport, Transport};
use crate::util::{
    backfill_commit_meta, extract_id_from_url, minify_schema, parse_documents, target_reference,
};

/// Documents uploaded per `addDocumentsToAppDeployment` call.
pub const DOCUMENT_BATCH_SIZE: usize = 100;

/// Batch error the registry returns once a deployment is active. The
/// documents are already part of the deployment, so the batch is skipped.
// TODO: match on an error code instead once the registry exposes one.
pub const DEPLOYMENT_LOCKED_MESSAGE: &str =
    "App deployment has already been activated and is locked for modifications";

/// Client for the Hive registry.
///
/// Cheap to clone; clones share the transport and its connection pool.
#[derive(Clone)]
pub struct HiveClient {
    transport: Arc<dyn Transport>,
    organization: String,
    commit_info: CommitInfoFn,
}

impl std::fmt::Debug for HiveClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HiveClient")
            .field("organization", &self.organization)
            .finish_non_exhaustive()
    }
}

impl HiveClient {
    /// Create a client talking HTTP to the configured endpoint, defaulting
    /// commit metadata from the repository around the working directory.
    pub fn new(config: &Config) -> HiveResult<Self> {
        let transport = HttpTransport::new(config)?;
        Ok(Self::with_transport(Arc::new(transport))
            .with_organization(config.organization.clone().unwrap_or_default()))
    }

    /// Create a client over any transport.
    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            organization: String::new(),
            commit_info: hive_git::from_working_directory(),
        }
    }

    /// Set the organization used for target selectors.
    pub fn with_organization(mut self, organization: impl Into<String>) -> Self {
        self.organization = organization.into();
        self
    }

    /// Replace the commit metadata collaborator.
    pub fn with_commit_info(mut self, commit_info: CommitInfoFn) -> Self {
        self.commit_info = commit_info;
        self
    }

    pub fn organization(&self) -> &str {
        &self.organization
    }

    // =========================================================================
    // Schema Operations
    // =========================================================================

    /// Check a schema against the registry without publishing it.
    ///
    /// An invalid schema is a normal result with `valid == false`.
    pub async fn schema_check(&self, input: &SchemaCheckInput) -> HiveResult<SchemaCheckResult> {
        let mut meta = SchemaCheckMetaInput {
            author: input.author.clone(),
            commit: input.commit.clone(),
        };
        backfill_commit_meta(&mut meta.author, &mut meta.commit, &self.commit_info);

        let variables = SchemaCheckVariables {
            service: input.service.clone(),
            sdl: minify_schema(&input.schema),
            meta,
            context_id: input.context_id.clone(),
            target: target_reference(&self.organization, &input.project, &input.target),
        };

        let data = self
            .transport
            .execute(SCHEMA_CHECK, json!({ "input": variables }))
            .await?;
        let typename = typename_at(&data, "schemaCheck");
        let data: SchemaCheckData = decode(data)?;

        let result = reduce_schema_check(data.schema_check, typename)?;
        info!(service = %input.service, id = %result.id, valid = result.valid, "schema checked");
        Ok(result)
    }

    /// Publish a schema as the new version of a service.
    pub async fn schema_publish(
        &self,
        input: &SchemaPublishInput,
    ) -> HiveResult<SchemaPublishResult> {
        let mut variables = SchemaPublishVariables {
            service: input.service.clone(),
            sdl: minify_schema(&input.schema),
            url: input.url.clone(),
            author: input.author.clone(),
            commit: input.commit.clone(),
        };
        backfill_commit_meta(&mut variables.author, &mut variables.commit, &self.commit_info);

        let data = self
            .transport
            .execute(
                SCHEMA_PUBLISH,
                json!({ "input": variables, "usesGitHubApp": false }),
            )
            .await?;
        let typename = typename_at(&data, "schemaPublish");
        let data: SchemaPublishData = decode(data)?;

        let result = reduce_schema_publish(data.schema_publish, typename)?;
        info!(service = %input.service, id = %result.id, valid = result.valid, "schema published");
        Ok(result)
    }

    /// Latest valid schema version, or `None` if nothing was published yet.
    pub async fn latest_schema_version(
        &self,
        input: &LatestSchemaVersionInput,
    ) -> HiveResult<Option<LatestSchemaVersion>> {
        let variables = json!({
            "includeSDL": input.include_sdl,
            "includeSupergraph": input.include_supergraph,
            "target": target_reference(&self.organization, &input.project, &input.target),
        });

        let data = self.transport.execute(LATEST_SCHEMA_VERSION, variables).await?;
        let data: LatestSchemaVersionData = decode(data)?;

        Ok(data.latest_valid_version.map(|v| LatestSchemaVersion {
            id: v.id,
            valid: v.valid,
            sdl: v.sdl,
            supergraph: v.supergraph,
        }))
    }

    // =========================================================================
    // App Deployment Operations
    // =========================================================================

    /// Create an app deployment and upload its documents in batches.
    ///
    /// Batches run strictly one after another. A failing batch aborts the
    /// call; batches sent before it stay applied.
    pub async fn create_app(&self, input: &CreateAppInput) -> HiveResult<CreateAppResult> {
        let documents = parse_documents(&input.documents)?;
        if documents.is_empty() {
            return Err(HiveError::invalid_input("no operations found in documents"));
        }

        let variables = AppDeploymentVariables {
            app_name: input.name.clone(),
            app_version: input.version.clone(),
        };
        let data = self
            .transport
            .execute(CREATE_APP_DEPLOYMENT, json!({ "input": variables }))
            .await?;
        let data: CreateAppDeploymentData = decode(data)?;
        let deployment = reduce_app_deployment(
            "createAppDeployment",
            "failed to create app",
            data.create_app_deployment.error,
            data.create_app_deployment.ok.map(|ok| ok.created_app_deployment),
        )?;

        for (index, batch) in documents.chunks(DOCUMENT_BATCH_SIZE).enumerate() {
            let variables = AddDocumentsVariables {
                app_name: &input.name,
                app_version: &input.version,
                documents: batch,
            };
            let data = self
                .transport
                .execute(ADD_DOCUMENTS_TO_APP_DEPLOYMENT, json!({ "input": variables }))
                .await?;
            let data: AddDocumentsData = decode(data)?;
            let payload = data.add_documents_to_app_deployment;

            if let Some(error) = payload.error {
                if error.message != DEPLOYMENT_LOCKED_MESSAGE {
                    return Err(HiveError::operation(format!(
                        "failed to add documents: {}",
                        error.message
                    )));
                }
                debug!(
                    app = %input.name,
                    version = %input.version,
                    batch = index,
                    message = %error.message,
                    "skipping document batch for locked deployment"
                );
            } else if payload.ok.is_none() {
                return Err(HiveError::unexpected("addDocumentsToAppDeployment", "null"));
            }
        }

        info!(
            app = %deployment.app_name,
            version = %deployment.app_version,
            documents = documents.len(),
            "app deployment created"
        );
        Ok(deployment)
    }

    /// Activate an app deployment.
    pub async fn publish_app(&self, input: &PublishAppInput) -> HiveResult<PublishAppResult> {
        let variables = AppDeploymentVariables {
            app_name: input.name.clone(),
            app_version: input.version.clone(),
        };
        let data = self
            .transport
            .execute(ACTIVATE_APP_DEPLOYMENT, json!({ "input": variables }))
            .await?;
        let data: ActivateAppDeploymentData = decode(data)?;
        let payload = data.activate_app_deployment;

        if let Some(ok) = &payload.ok {
            if ok.is_skipped {
                debug!(app = %input.name, version = %input.version, "deployment was already active");
            }
        }

        let deployment = reduce_app_deployment(
            "activateAppDeployment",
            "failed to activate app",
            payload.error,
            payload.ok.map(|ok| ok.activated_app_deployment),
        )?;
        info!(app = %deployment.app_name, version = %deployment.app_version, "app deployment activated");
        Ok(deployment)
    }
}

// =============================================================================
// Reducers
// =============================================================================

fn typename_at(data: &Value, field: &str) -> String {
    data.get(field)
        .and_then(|payload| payload.get("__typename"))
        .and_then(Value::as_str)
        .unwrap_or("<missing>")
        .to_string()
}

fn reduce_schema_check(
    payload: SchemaCheckPayload,
    typename: String,
) -> HiveResult<SchemaCheckResult> {
    match payload {
        SchemaCheckPayload::SchemaCheckSuccess {
            valid,
            schema_check,
        }
        | SchemaCheckPayload::SchemaCheckError {
            valid,
            schema_check,
        } => {
            let (id, url) = schema_check
                .map(|check| (check.id, check.web_url.unwrap_or_default()))
                .unwrap_or_default();
            Ok(SchemaCheckResult { id, valid, url })
        }
        SchemaCheckPayload::GitHubSchemaCheckSuccess { .. } => Ok(SchemaCheckResult {
            valid: true,
            ..SchemaCheckResult::default()
        }),
        SchemaCheckPayload::GitHubSchemaCheckError { .. } => Ok(SchemaCheckResult {
            valid: false,
            ..SchemaCheckResult::default()
        }),
        SchemaCheckPayload::Unknown => Err(HiveError::unexpected("schemaCheck", typename)),
    }
}

fn reduce_schema_publish(
    payload: SchemaPublishPayload,
    typename: String,
) -> HiveResult<SchemaPublishResult> {
    match payload {
        SchemaPublishPayload::SchemaPublishSuccess {
            valid,
            link_to_website,
        }
        | SchemaPublishPayload::SchemaPublishError {
            valid,
            link_to_website,
        } => {
            let url = link_to_website.unwrap_or_default();
            Ok(SchemaPublishResult {
                id: extract_id_from_url(&url),
                url,
                valid,
            })
        }
        SchemaPublishPayload::GitHubSchemaPublishSuccess { .. } => Ok(SchemaPublishResult {
            valid: true,
            ..SchemaPublishResult::default()
        }),
        SchemaPublishPayload::SchemaPublishMissingServiceError {
            missing_service_error: message,
        }
        | SchemaPublishPayload::SchemaPublishMissingUrlError {
            missing_url_error: message,
        } => Err(HiveError::operation(format!("hive error: {message}"))),
        SchemaPublishPayload::GitHubSchemaPublishError { message } => Err(HiveError::operation(
            format!("hive error: {}", message.unwrap_or_else(|| "GitHub check failed".into())),
        )),
        SchemaPublishPayload::Unknown => Err(HiveError::unexpected("schemaPublish", typename)),
    }
}

fn reduce_app_deployment(
    operation: &str,
    failure: &str,
    error: Option<MutationError>,
    deployment: Option<AppDeployment>,
) -> HiveResult<AppDeploymentResult> {
    if let Some(error) = error {
        return Err(HiveError::operation(format!("{failure}: {}", error.message)));
    }

    let deployment = deployment.ok_or_else(|| HiveError::unexpected(operation, "null"))?;
    Ok(AppDeploymentResult {
        id: deployment.id,
        app_name: deployment.name,
        app_version: deployment.version,
        status: deployment.status,
    })
}
