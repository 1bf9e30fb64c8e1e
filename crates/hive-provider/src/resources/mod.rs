//! Managed resources.

pub mod app_create;
pub mod app_publish;
pub mod schema_check;
pub mod schema_publish;

pub use app_create::{AppCreateModel, AppCreateResource};
pub use app_publish::{AppPublishModel, AppPublishResource};
pub use schema_check::{SchemaCheckModel, SchemaCheckResource};
pub use schema_publish::{SchemaPublishModel, SchemaPublishResource};
