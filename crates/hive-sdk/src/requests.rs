//! Input DTOs for operations.
//!
//! Each input carries everything one registry call needs. Optional string
//! fields use the empty string for "unset", the same way declared
//! configuration arrives from the resource adapter.

use serde::{Deserialize, Serialize};

/// Input for a schema check.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaCheckInput {
    /// Service name (for composite projects).
    pub service: String,

    /// Raw SDL text. Minified before sending.
    pub schema: String,

    /// Author of the change. Defaults to the latest commit author.
    #[serde(default)]
    pub author: String,

    /// Commit of the change. Defaults to the latest commit hash.
    #[serde(default)]
    pub commit: String,

    /// Groups related checks so approved breaking changes carry over.
    #[serde(default)]
    pub context_id: String,

    /// Project slug. Needs `target` and an organization to take effect.
    #[serde(default)]
    pub project: String,

    /// Target slug. Needs `project` and an organization to take effect.
    #[serde(default)]
    pub target: String,
}

impl SchemaCheckInput {
    /// Create a check input for a service and schema.
    pub fn new(service: impl Into<String>, schema: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            schema: schema.into(),
            ..Self::default()
        }
    }

    /// Set author and commit explicitly.
    pub fn with_meta(mut self, author: impl Into<String>, commit: impl Into<String>) -> Self {
        self.author = author.into();
        self.commit = commit.into();
        self
    }

    /// Set the context id.
    pub fn with_context_id(mut self, context_id: impl Into<String>) -> Self {
        self.context_id = context_id.into();
        self
    }

    /// Select a project and target.
    pub fn with_target(mut self, project: impl Into<String>, target: impl Into<String>) -> Self {
        self.project = project.into();
        self.target = target.into();
        self
    }
}

/// Input for a schema publish.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaPublishInput {
    /// Service name.
    pub service: String,

    /// Raw SDL text. Minified before sending.
    pub schema: String,

    /// URL the service is reachable at.
    #[serde(default)]
    pub url: String,

    /// Commit of the change. Defaults to the latest commit hash.
    #[serde(default)]
    pub commit: String,

    /// Author of the change. Defaults to the latest commit author.
    #[serde(default)]
    pub author: String,
}

impl SchemaPublishInput {
    /// Create a publish input for a service, schema and service URL.
    pub fn new(
        service: impl Into<String>,
        schema: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            service: service.into(),
            schema: schema.into(),
            url: url.into(),
            ..Self::default()
        }
    }

    /// Set author and commit explicitly.
    pub fn with_meta(mut self, author: impl Into<String>, commit: impl Into<String>) -> Self {
        self.author = author.into();
        self.commit = commit.into();
        self
    }
}

/// Input for creating an app deployment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateAppInput {
    /// App name.
    pub name: String,

    /// App version.
    pub version: String,

    /// JSON object mapping document hash to document body.
    pub documents: String,
}

impl CreateAppInput {
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        documents: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            documents: documents.into(),
        }
    }
}

/// Input for activating an app deployment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishAppInput {
    pub name: String,
    pub version: String,
}

impl PublishAppInput {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}

/// Input for reading the latest valid schema version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatestSchemaVersionInput {
    /// Project slug; the token's default target is used unless both
    /// project and target are given.
    #[serde(default)]
    pub project: String,

    /// Target slug.
    #[serde(default)]
    pub target: String,

    /// Include the composed SDL.
    #[serde(default = "default_true")]
    pub include_sdl: bool,

    /// Include the supergraph.
    #[serde(default = "default_true")]
    pub include_supergraph: bool,
}

fn default_true() -> bool {
    true
}

impl LatestSchemaVersionInput {
    /// Read the version of the token's default target, including SDL and supergraph.
    pub fn new() -> Self {
        Self {
            project: String::new(),
            target: String::new(),
            include_sdl: true,
            include_supergraph: true,
        }
    }

    /// Select a project and target.
    pub fn with_target(mut self, project: impl Into<String>, target: impl Into<String>) -> Self {
        self.project = project.into();
        self.target = target.into();
        self
    }
}

impl Default for LatestSchemaVersionInput {
    fn default() -> Self {
        Self::new()
    }
}
