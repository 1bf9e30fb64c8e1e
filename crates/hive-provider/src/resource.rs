//! Resource and data source contracts.
//!
//! State travels as JSON objects with snake_case attribute names. Each
//! implementation decodes it into a typed model with serde.

use async_trait::async_trait;
use hive_sdk::HiveClient;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};

use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::schema::Schema;

/// A managed resource instance lifecycle.
///
/// Read, Delete and ImportState are inert: the registry records are never
/// retracted and stored state is trusted as is.
#[async_trait]
pub trait Resource: Send + Sync {
    /// Full type name, e.g. `hive_schema_check`.
    fn type_name(&self) -> &'static str;

    fn schema(&self) -> Schema;

    /// Run the operation for a newly declared instance.
    async fn create(&self, plan: Value) -> Result<Value, Diagnostics>;

    /// Run the operation again for a changed declaration.
    async fn update(&self, plan: Value, prior_state: Value) -> Result<Value, Diagnostics>;

    /// Refresh: returns the stored state unchanged.
    async fn read(&self, state: Value) -> Result<Value, Diagnostics> {
        Ok(state)
    }

    /// Forget the instance. Nothing is sent to the registry.
    async fn delete(&self, _state: Value) -> Result<(), Diagnostics> {
        Ok(())
    }

    /// Adopt an existing instance by id.
    async fn import_state(&self, id: &str) -> Result<Value, Diagnostics> {
        Ok(json!({ "id": id }))
    }
}

/// A read-only data source.
#[async_trait]
pub trait DataSource: Send + Sync {
    fn type_name(&self) -> &'static str;

    fn schema(&self) -> Schema;

    async fn read(&self, config: Value) -> Result<Value, Diagnostics>;
}

/// Decode declared configuration into a typed model.
pub(crate) fn decode_model<T: DeserializeOwned>(value: Value) -> Result<T, Diagnostics> {
    serde_json::from_value(value)
        .map_err(|e| Diagnostic::error("Invalid configuration", e.to_string()).into())
}

/// Encode a typed model back into state.
pub(crate) fn encode_state<T: Serialize>(model: &T) -> Result<Value, Diagnostics> {
    serde_json::to_value(model)
        .map_err(|e| Diagnostic::error("Unable to store state", e.to_string()).into())
}

/// The shared client, or the diagnostic the host shows before configuration.
pub(crate) fn configured(client: &Option<HiveClient>) -> Result<&HiveClient, Diagnostics> {
    client.as_ref().ok_or_else(|| {
        Diagnostic::error(
            "Unconfigured Hive client",
            "Expected a configured Hive client. Please report this issue to the provider developers.",
        )
        .into()
    })
}

/// Empty string for null optional attributes.
pub(crate) fn value_or_empty(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

/// Detail shown when the registry reports an invalid schema.
pub(crate) fn invalid_schema_detail(url: &str) -> String {
    format!("The schema is not valid, see {url} for more details")
}
