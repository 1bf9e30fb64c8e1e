//! `hive_schema_publish` - publishes a schema as a new service version.

use async_trait::async_trait;
use hive_sdk::{HiveClient, SchemaPublishInput};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::resource::{
    configured, decode_model, encode_state, invalid_schema_detail, value_or_empty, Resource,
};
use crate::schema::{Attribute, Schema};

pub const TYPE_NAME: &str = "hive_schema_publish";

const FAILED: &str = "Schema publish failed";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaPublishModel {
    pub service: String,
    pub schema: String,
    pub url: String,
    #[serde(default)]
    pub commit: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
}

pub struct SchemaPublishResource {
    client: Option<HiveClient>,
}

impl SchemaPublishResource {
    pub fn new(client: Option<HiveClient>) -> Self {
        Self { client }
    }

    async fn execute(&self, plan: Value) -> Result<Value, Diagnostics> {
        let client = configured(&self.client)?;
        let mut model: SchemaPublishModel = decode_model(plan)?;

        let input = SchemaPublishInput::new(&model.service, &model.schema, &model.url)
            .with_meta(value_or_empty(&model.author), value_or_empty(&model.commit));

        let result = client
            .schema_publish(&input)
            .await
            .map_err(|e| Diagnostic::operation_failed(FAILED, &e))?;
        if !result.valid {
            return Err(Diagnostic::error(FAILED, invalid_schema_detail(&result.url)).into());
        }

        model.id = Some(result.id);
        encode_state(&model)
    }
}

#[async_trait]
impl Resource for SchemaPublishResource {
    fn type_name(&self) -> &'static str {
        TYPE_NAME
    }

    fn schema(&self) -> Schema {
        Schema::new("Resource to publish a GraphQL schema to the registry")
            .attribute("service", Attribute::required("The service name"))
            .attribute("schema", Attribute::required("The GraphQL schema content"))
            .attribute("url", Attribute::required("The URL of the service"))
            .attribute("commit", Attribute::optional("The commit or version identifier"))
            .attribute("author", Attribute::optional("The author of the version"))
            .attribute(
                "id",
                Attribute::computed("The resource ID").use_state_for_unknown(),
            )
    }

    async fn create(&self, plan: Value) -> Result<Value, Diagnostics> {
        self.execute(plan).await
    }

    async fn update(&self, plan: Value, _prior_state: Value) -> Result<Value, Diagnostics> {
        self.execute(plan).await
    }
}
