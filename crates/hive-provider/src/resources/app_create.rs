//! `hive_app_create` - registers an app deployment and its documents.

use async_trait::async_trait;
use hive_sdk::{CreateAppInput, HiveClient};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::resource::{configured, decode_model, encode_state, Resource};
use crate::schema::{Attribute, Schema};

pub const TYPE_NAME: &str = "hive_app_create";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppCreateModel {
    pub name: String,
    pub version: String,
    /// JSON object mapping document hash to document body.
    pub documents: String,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

pub struct AppCreateResource {
    client: Option<HiveClient>,
}

impl AppCreateResource {
    pub fn new(client: Option<HiveClient>) -> Self {
        Self { client }
    }

    async fn execute(&self, plan: Value) -> Result<Value, Diagnostics> {
        let client = configured(&self.client)?;
        let mut model: AppCreateModel = decode_model(plan)?;

        let input = CreateAppInput::new(&model.name, &model.version, &model.documents);
        let result = client
            .create_app(&input)
            .await
            .map_err(|e| Diagnostic::operation_failed("App creation failed", &e))?;

        model.id = Some(result.id);
        model.name = result.app_name;
        model.version = result.app_version;
        model.status = Some(result.status);
        encode_state(&model)
    }
}

#[async_trait]
impl Resource for AppCreateResource {
    fn type_name(&self) -> &'static str {
        TYPE_NAME
    }

    fn schema(&self) -> Schema {
        Schema::new("Resource to create a new app within Hive")
            .attribute("name", Attribute::required("The app name"))
            .attribute("version", Attribute::required("The app version"))
            .attribute(
                "documents",
                Attribute::required("JSON object mapping document hashes to GraphQL operations"),
            )
            .attribute(
                "id",
                Attribute::computed("The resource ID").use_state_for_unknown(),
            )
            .attribute("status", Attribute::computed("The deployment status"))
    }

    async fn create(&self, plan: Value) -> Result<Value, Diagnostics> {
        self.execute(plan).await
    }

    async fn update(&self, plan: Value, _prior_state: Value) -> Result<Value, Diagnostics> {
        self.execute(plan).await
    }
}
