//! Resource adapter for GraphQL Hive.
//!
//! Maps a reconciliation host's declared configuration onto the
//! [`hive_sdk::HiveClient`] operations and turns their outcomes into state
//! or user-facing [`Diagnostics`].
//!
//! ## Types
//!
//! Resources:
//!
//! - `hive_schema_check` - check a schema without publishing it
//! - `hive_schema_publish` - publish a schema version of a service
//! - `hive_app_create` - create an app deployment and upload its documents
//! - `hive_app_publish` - activate an app deployment
//!
//! Data sources:
//!
//! - `hive_schema_check` - run a check on every read
//!
//! ## Usage
//!
//! ```rust,no_run
//! use hive_provider::HiveProvider;
//! use serde_json::json;
//!
//! # async fn run() -> Result<(), hive_provider::Diagnostics> {
//! let mut provider = HiveProvider::new("dev");
//! provider.configure(json!({ "token": "secret" }))?;
//!
//! let resource = provider.resource("hive_schema_check").expect("known type");
//! let state = resource
//!     .create(json!({ "service": "users", "schema": "type Query { me: User }" }))
//!     .await?;
//! println!("check id: {}", state["id"]);
//! # Ok(())
//! # }
//! ```

mod data_sources;
mod diagnostics;
pub mod logging;
mod provider;
mod resource;
pub mod resources;
mod schema;

pub use data_sources::{SchemaCheckDataModel, SchemaCheckDataSource};
pub use diagnostics::{Diagnostic, Diagnostics, Severity};
pub use logging::{init_logging, try_init_logging};
pub use provider::{HiveProvider, ProviderMetadata, ProviderModel, PROVIDER_TYPE_NAME};
pub use resource::{DataSource, Resource};
pub use schema::{Attribute, Schema};
