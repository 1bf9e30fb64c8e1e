//! Data sources.

use async_trait::async_trait;
use hive_sdk::{HiveClient, SchemaCheckInput};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::resource::{
    configured, decode_model, encode_state, invalid_schema_detail, value_or_empty, DataSource,
};
use crate::schema::{Attribute, Schema};

pub const SCHEMA_CHECK_TYPE_NAME: &str = "hive_schema_check";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaCheckDataModel {
    pub service: String,
    pub schema: String,
    #[serde(default)]
    pub commit: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub project: Option<String>,
    #[serde(default)]
    pub target: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
}

/// `hive_schema_check` data source: runs a check on every read.
pub struct SchemaCheckDataSource {
    client: Option<HiveClient>,
}

impl SchemaCheckDataSource {
    pub fn new(client: Option<HiveClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl DataSource for SchemaCheckDataSource {
    fn type_name(&self) -> &'static str {
        SCHEMA_CHECK_TYPE_NAME
    }

    fn schema(&self) -> Schema {
        Schema::new("Data source to perform a schema check against a GraphQL schema")
            .attribute("service", Attribute::required("The service name"))
            .attribute("schema", Attribute::required("The GraphQL schema content"))
            .attribute("commit", Attribute::optional("The commit or version identifier"))
            .attribute("author", Attribute::optional("The author of the version"))
            .attribute("project", Attribute::optional("The project name"))
            .attribute("target", Attribute::optional("The target name"))
            .attribute("id", Attribute::computed("The resource ID"))
    }

    async fn read(&self, config: Value) -> Result<Value, Diagnostics> {
        let client = configured(&self.client)?;
        let mut model: SchemaCheckDataModel = decode_model(config)?;

        let input = SchemaCheckInput::new(&model.service, &model.schema)
            .with_meta(value_or_empty(&model.author), value_or_empty(&model.commit))
            .with_target(value_or_empty(&model.project), value_or_empty(&model.target));

        let result = client
            .schema_check(&input)
            .await
            .map_err(|e| Diagnostic::operation_failed("Schema check failed", &e))?;
        if !result.valid {
            return Err(
                Diagnostic::error("Schema check failed", invalid_schema_detail(&result.url)).into(),
            );
        }

        model.id = Some(result.id);
        encode_state(&model)
    }
}
