//! `hive_schema_check` - validates a schema against the registry.

use async_trait::async_trait;
use hive_sdk::{HiveClient, SchemaCheckInput};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::resource::{
    configured, decode_model, encode_state, invalid_schema_detail, value_or_empty, Resource,
};
use crate::schema::{Attribute, Schema};

pub const TYPE_NAME: &str = "hive_schema_check";

const FAILED: &str = "Schema check failed";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaCheckModel {
    pub service: String,
    pub schema: String,
    #[serde(default)]
    pub commit: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub context_id: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
}

pub struct SchemaCheckResource {
    client: Option<HiveClient>,
}

impl SchemaCheckResource {
    pub fn new(client: Option<HiveClient>) -> Self {
        Self { client }
    }

    async fn execute(&self, plan: Value) -> Result<Value, Diagnostics> {
        let client = configured(&self.client)?;
        let mut model: SchemaCheckModel = decode_model(plan)?;

        let input = SchemaCheckInput {
            service: model.service.clone(),
            schema: model.schema.clone(),
            author: value_or_empty(&model.author),
            commit: value_or_empty(&model.commit),
            context_id: value_or_empty(&model.context_id),
            ..SchemaCheckInput::default()
        };

        let result = client
            .schema_check(&input)
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
impl Resource for SchemaCheckResource {
    fn type_name(&self) -> &'static str {
        TYPE_NAME
    }

    fn schema(&self) -> Schema {
        Schema::new("Resource to perform a schema check against a GraphQL schema")
            .attribute("service", Attribute::required("The service name").requires_replace())
            .attribute(
                "schema",
                Attribute::required("The GraphQL schema content").requires_replace(),
            )
            .attribute(
                "commit",
                Attribute::optional("The commit or version identifier").requires_replace(),
            )
            .attribute(
                "author",
                Attribute::optional("The author of the version").requires_replace(),
            )
            .attribute(
                "context_id",
                Attribute::optional(
                    "Context ID allows retaining approved breaking changes with the lifecycle",
                )
                .requires_replace(),
            )
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
