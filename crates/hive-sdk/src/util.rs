//! Shared helpers for building variables and reducing responses.

use std::collections::BTreeMap;

use hive_git::CommitInfoFn;
use reqwest::Url;
use tracing::{debug, warn};

use crate::documents::{DocumentInput, TargetReferenceInput, TargetSelectorInput};
use crate::error::{HiveError, HiveResult};

/// Collapse every run of whitespace to one space and trim the ends.
///
/// Whitespace here is the ASCII set (space, tab, newline, form feed, carriage
/// return). The registry compares minified SDL, so re-applying an unchanged
/// schema must produce the same bytes.
pub fn minify_schema(schema: &str) -> String {
    schema.split_ascii_whitespace().collect::<Vec<_>>().join(" ")
}

/// Last non-empty path segment of `value`, or an empty string when `value`
/// is not an absolute URL.
///
/// Schema publishes return a link to the check but no id, so the id is cut
/// from the link.
pub fn extract_id_from_url(value: &str) -> String {
    let Ok(url) = Url::parse(value) else {
        return String::new();
    };

    url.path_segments()
        .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
        .map(str::to_string)
        .unwrap_or_default()
}

/// Target selector, only when organization, project and target are all set.
/// Otherwise the registry resolves the target from the token.
pub fn target_reference(
    organization: &str,
    project: &str,
    target: &str,
) -> Option<TargetReferenceInput> {
    if organization.is_empty() || project.is_empty() || target.is_empty() {
        return None;
    }

    Some(TargetReferenceInput {
        by_selector: TargetSelectorInput {
            organization_slug: organization.to_string(),
            project_slug: project.to_string(),
            target_slug: target.to_string(),
        },
    })
}

/// Parse a JSON object of `hash -> body` into upload documents, sorted by hash.
pub fn parse_documents(documents: &str) -> HiveResult<Vec<DocumentInput>> {
    let operations: BTreeMap<String, String> = serde_json::from_str(documents)
        .map_err(|e| HiveError::invalid_input(format!("failed to unmarshal documents: {e}")))?;

    Ok(operations
        .into_iter()
        .map(|(hash, body)| DocumentInput { hash, body })
        .collect())
}

/// Fill whichever of `author` / `commit` is empty from the commit collaborator.
///
/// The collaborator is not consulted when both are set. Its failures are
/// logged and otherwise ignored.
pub fn backfill_commit_meta(author: &mut String, commit: &mut String, commit_info: &CommitInfoFn) {
    if !author.is_empty() && !commit.is_empty() {
        return;
    }

    match commit_info() {
        Ok(info) => {
            if author.is_empty() {
                *author = info.author;
            }
            if commit.is_empty() {
                *commit = info.hash;
            }
            debug!(author = %author, commit = %commit, "defaulted schema metadata from git");
        }
        Err(err) => {
            warn!(error = %err, "could not read latest commit, sending metadata as given");
        }
    }
}
