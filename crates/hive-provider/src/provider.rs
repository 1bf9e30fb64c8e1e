//! Provider entry point: configuration and the resource registry.

use hive_sdk::{Config, HiveClient};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use crate::data_sources::{SchemaCheckDataSource, SCHEMA_CHECK_TYPE_NAME};
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::resource::{decode_model, DataSource, Resource};
use crate::resources::{
    app_create, app_publish, schema_check, schema_publish, AppCreateResource, AppPublishResource,
    SchemaCheckResource, SchemaPublishResource,
};
use crate::schema::{Attribute, Schema};

/// Provider type name; resource type names start with `hive_`.
pub const PROVIDER_TYPE_NAME: &str = "hive";

/// Declared provider configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderModel {
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub organization: Option<String>,
}

/// Provider name and release version reported to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderMetadata {
    pub type_name: &'static str,
    pub version: String,
}

/// The Hive provider.
///
/// Resources and data sources handed out before [`configure`](Self::configure)
/// succeeds answer every call with an "Unconfigured Hive client" diagnostic.
#[derive(Debug, Clone)]
pub struct HiveProvider {
    version: String,
    client: Option<HiveClient>,
}

impl HiveProvider {
    /// `version` is the release version, `dev` for local builds, `test` in tests.
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            client: None,
        }
    }

    pub fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            type_name: PROVIDER_TYPE_NAME,
            version: self.version.clone(),
        }
    }

    pub fn schema(&self) -> Schema {
        Schema::new("Manage GraphQL Hive schema checks, schema publishes and app deployments")
            .attribute("endpoint", Attribute::optional("The endpoint of the Hive API"))
            .attribute(
                "token",
                Attribute::optional(
                    "The token to authenticate with the registry. Defaults to HIVE_TOKEN",
                )
                .sensitive(),
            )
            .attribute(
                "organization",
                Attribute::optional("Organization slug used to select a project and target"),
            )
    }

    /// Build the shared client from declared provider configuration.
    pub fn configure(&mut self, config: Value) -> Result<(), Diagnostics> {
        let model: ProviderModel = if config.is_null() {
            ProviderModel::default()
        } else {
            decode_model(config)?
        };

        let config = Config::resolve(model.endpoint, model.token, model.organization);
        if !config.has_token() {
            warn!("no Hive token configured, requests are sent without authorization");
        }
        info!(endpoint = %config.endpoint, "configuring Hive provider");

        let client = HiveClient::new(&config)
            .map_err(|e| Diagnostic::error("Unable to create Hive client", e.to_string()))?;
        self.client = Some(client);
        Ok(())
    }

    /// Use an already built client.
    pub fn configure_with_client(&mut self, client: HiveClient) {
        self.client = Some(client);
    }

    pub fn is_configured(&self) -> bool {
        self.client.is_some()
    }

    pub fn resource_types(&self) -> Vec<&'static str> {
        vec![
            schema_check::TYPE_NAME,
            schema_publish::TYPE_NAME,
            app_create::TYPE_NAME,
            app_publish::TYPE_NAME,
        ]
    }

    pub fn data_source_types(&self) -> Vec<&'static str> {
        vec![SCHEMA_CHECK_TYPE_NAME]
    }

    pub fn resource(&self, type_name: &str) -> Option<Box<dyn Resource>> {
        let client = self.client.clone();
        let resource: Box<dyn Resource> = match type_name {
            schema_check::TYPE_NAME => Box::new(SchemaCheckResource::new(client)),
            schema_publish::TYPE_NAME => Box::new(SchemaPublishResource::new(client)),
            app_create::TYPE_NAME => Box::new(AppCreateResource::new(client)),
            app_publish::TYPE_NAME => Box::new(AppPublishResource::new(client)),
            _ => return None,
        };
        Some(resource)
    }

    pub fn data_source(&self, type_name: &str) -> Option<Box<dyn DataSource>> {
        match type_name {
            SCHEMA_CHECK_TYPE_NAME => Some(Box::new(SchemaCheckDataSource::new(
                self.client.clone(),
            ))),
            _ => None,
        }
    }
}
