//! GraphQL Hive client
//!
//! Typed access to the schema registry capabilities the provider manages:
//! schema checks, schema publishes and app deployments.
//!
//! ## Architecture
//!
//! - **Transport**: one GraphQL POST per call ([`Transport`], [`HttpTransport`])
//! - **Requests**: typed inputs for each operation
//! - **Responses**: flat results with the registry's unions already reduced
//! - **HiveClient**: builds variables, calls the transport, reduces answers
//!
//! ## Usage
//!
//! ```rust,no_run
//! use hive_sdk::{Config, HiveClient, SchemaCheckInput};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::resolve(None, Some("token".into()), None);
//!     let client = HiveClient::new(&config)?;
//!
//!     let input = SchemaCheckInput::new("users", "type Query { me: User }");
//!     let result = client.schema_check(&input).await?;
//!
//!     println!("valid: {} ({})", result.valid, result.url);
//!     Ok(())
//! }
//! ```

mod client;
mod config;
mod documents;
mod error;
mod requests;
mod responses;
mod transport;
mod util;

// Re-export public API
pub use client::{HiveClient, DEPLOYMENT_LOCKED_MESSAGE, DOCUMENT_BATCH_SIZE};
pub use config::{Config, DEFAULT_ENDPOINT, TOKEN_ENV};
pub use documents::{DocumentInput, TargetReferenceInput, TargetSelectorInput};
pub use error::{HiveError, HiveResult};
pub use hive_git::{CommitInfo, CommitInfoFn};
pub use requests::*;
pub use responses::*;
pub use transport::{decode, redact_headers, HttpTransport, Transport};
pub use util::{extract_id_from_url, minify_schema, parse_documents, target_reference};
