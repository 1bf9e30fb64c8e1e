//! Operation client tests against a scripted transport.
//!
//! Run with: `cargo test --package hive-sdk --test operations`

mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use serde_json::json;

use common::*;
use hive_sdk::{
    CreateAppInput, HiveError, LatestSchemaVersionInput, PublishAppInput, SchemaCheckInput,
    SchemaPublishInput, DEPLOYMENT_LOCKED_MESSAGE,
};

// =============================================================================
// Schema check
// =============================================================================

fn check_answer(typename: &str, valid: bool) -> serde_json::Value {
    json!({
        "schemaCheck": {
            "__typename": typename,
            "valid": valid,
            "schemaCheck": { "id": "chk-1", "webUrl": "https://app.example.com/acme/shop/prod/checks/chk-1" }
        }
    })
}

#[tokio::test]
async fn check_success_returns_id_and_url() {
    let transport = ScriptedTransport::new();
    transport.answer(check_answer("SchemaCheckSuccess", true));

    let result = client(&transport)
        .schema_check(&SchemaCheckInput::new("users", "type Query {\n  me: User\n}\n"))
        .await
        .unwrap();

    assert!(result.valid);
    assert_eq!(result.id, "chk-1");
    assert_eq!(result.url, "https://app.example.com/acme/shop/prod/checks/chk-1");

    let calls = transport.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].variables["input"]["sdl"], "type Query { me: User }");
    assert_eq!(calls[0].variables["input"]["service"], "users");
}

#[tokio::test]
async fn invalid_schema_is_a_result_not_an_error() {
    let transport = ScriptedTransport::new();
    transport.answer(check_answer("SchemaCheckError", false));

    let result = client(&transport)
        .schema_check(&SchemaCheckInput::new("users", "type Query { me: Nope }"))
        .await
        .unwrap();

    assert!(!result.valid);
    assert_eq!(result.id, "chk-1");
}

#[tokio::test]
async fn github_variants_collapse_to_validity() {
    let transport = ScriptedTransport::new();
    transport
        .answer(json!({ "schemaCheck": { "__typename": "GitHubSchemaCheckSuccess", "message": "ok" } }))
        .answer(json!({ "schemaCheck": { "__typename": "GitHubSchemaCheckError", "message": "nope" } }));
    let client = client(&transport);
    let input = SchemaCheckInput::new("users", "type Query { a: Int }");

    let success = client.schema_check(&input).await.unwrap();
    let failure = client.schema_check(&input).await.unwrap();

    assert!(success.valid);
    assert!(success.id.is_empty() && success.url.is_empty());
    assert!(!failure.valid);
    assert!(failure.id.is_empty() && failure.url.is_empty());
}

#[tokio::test]
async fn unknown_check_variant_is_rejected() {
    let transport = ScriptedTransport::new();
    transport.answer(json!({ "schemaCheck": { "__typename": "SchemaCheckPending" } }));

    let err = client(&transport)
        .schema_check(&SchemaCheckInput::new("users", "type Query { a: Int }"))
        .await
        .unwrap_err();

    match err {
        HiveError::UnexpectedResponseShape { operation, typename } => {
            assert_eq!(operation, "schemaCheck");
            assert_eq!(typename, "SchemaCheckPending");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn empty_meta_is_filled_from_git() {
    let transport = ScriptedTransport::new();
    transport.answer(check_answer("SchemaCheckSuccess", true));

    client(&transport)
        .schema_check(&SchemaCheckInput::new("users", "type Query { a: Int }"))
        .await
        .unwrap();

    let meta = &transport.calls()[0].variables["input"]["meta"];
    assert_eq!(meta["author"], "A <a@x>");
    assert_eq!(meta["commit"], "deadbeef");
}

#[tokio::test]
async fn explicit_meta_is_not_overridden() {
    let transport = ScriptedTransport::new();
    transport.answer(check_answer("SchemaCheckSuccess", true));
    let asked = Arc::new(AtomicUsize::new(0));

    client(&transport)
        .with_commit_info(counting_commit_info(asked.clone()))
        .schema_check(
            &SchemaCheckInput::new("users", "type Query { a: Int }").with_meta("Me <me@x>", "cafe"),
        )
        .await
        .unwrap();

    let meta = &transport.calls()[0].variables["input"]["meta"];
    assert_eq!(meta["author"], "Me <me@x>");
    assert_eq!(meta["commit"], "cafe");
    assert_eq!(asked.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn git_failure_is_not_fatal() {
    let transport = ScriptedTransport::new();
    transport.answer(check_answer("SchemaCheckSuccess", true));

    let result = client(&transport)
        .with_commit_info(hive_git::unavailable())
        .schema_check(&SchemaCheckInput::new("users", "type Query { a: Int }"))
        .await;

    assert!(result.is_ok());
    let meta = &transport.calls()[0].variables["input"]["meta"];
    assert_eq!(meta["author"], "");
    assert_eq!(meta["commit"], "");
}

#[tokio::test]
async fn target_selector_needs_organization_project_and_target() {
    let transport = ScriptedTransport::new();
    transport
        .answer(check_answer("SchemaCheckSuccess", true))
        .answer(check_answer("SchemaCheckSuccess", true));
    let input = SchemaCheckInput::new("users", "type Query { a: Int }")
        .with_target("shop", "production")
        .with_context_id("pr-42");

    client(&transport).schema_check(&input).await.unwrap();
    client(&transport)
        .with_organization("acme")
        .schema_check(&input)
        .await
        .unwrap();

    let calls = transport.calls();
    assert!(calls[0].variables["input"].get("target").is_none());
    assert_eq!(
        calls[1].variables["input"]["target"],
        json!({ "bySelector": { "organizationSlug": "acme", "projectSlug": "shop", "targetSlug": "production" } })
    );
    assert_eq!(calls[1].variables["input"]["contextId"], "pr-42");
}

#[tokio::test]
async fn transport_errors_propagate() {
    let transport = ScriptedTransport::new();
    transport.fail(HiveError::HttpStatus {
        status: "503 Service Unavailable".into(),
    });

    let err = client(&transport)
        .schema_check(&SchemaCheckInput::new("users", "type Query { a: Int }"))
        .await
        .unwrap_err();

    assert!(matches!(err, HiveError::HttpStatus { .. }));
}

// =============================================================================
// Schema publish
// =============================================================================

#[tokio::test]
async fn publish_derives_id_from_link() {
    let transport = ScriptedTransport::new();
    transport.answer(json!({
        "schemaPublish": {
            "__typename": "SchemaPublishSuccess",
            "valid": true,
            "linkToWebsite": "https://app.example.com/acme/shop/prod/history/v-77"
        }
    }));

    let result = client(&transport)
        .schema_publish(&SchemaPublishInput::new(
            "users",
            "type Query {\n  me: User\n}",
            "https://users.internal/graphql",
        ))
        .await
        .unwrap();

    assert!(result.valid);
    assert_eq!(result.id, "v-77");
    assert_eq!(result.url, "https://app.example.com/acme/shop/prod/history/v-77");

    let call = &transport.calls()[0];
    assert_eq!(call.variables["usesGitHubApp"], false);
    assert_eq!(call.variables["input"]["sdl"], "type Query { me: User }");
    assert_eq!(call.variables["input"]["url"], "https://users.internal/graphql");
    assert_eq!(call.variables["input"]["author"], "A <a@x>");
    assert_eq!(call.variables["input"]["commit"], "deadbeef");
}

#[tokio::test]
async fn publish_validation_error_is_a_result() {
    let transport = ScriptedTransport::new();
    transport.answer(json!({
        "schemaPublish": {
            "__typename": "SchemaPublishError",
            "valid": false,
            "linkToWebsite": "not a url"
        }
    }));

    let result = client(&transport)
        .schema_publish(&SchemaPublishInput::new("users", "type Query { a: Int }", ""))
        .await
        .unwrap();

    assert!(!result.valid);
    assert_eq!(result.id, "");
}

#[tokio::test]
async fn publish_missing_service_and_url_are_fatal() {
    let transport = ScriptedTransport::new();
    transport
        .answer(json!({ "schemaPublish": {
            "__typename": "SchemaPublishMissingServiceError",
            "missingServiceError": "Missing service name"
        }}))
        .answer(json!({ "schemaPublish": {
            "__typename": "SchemaPublishMissingUrlError",
            "missingUrlError": "Missing service url"
        }}))
        .answer(json!({ "schemaPublish": {
            "__typename": "GitHubSchemaPublishError",
            "message": "check run failed"
        }}));
    let client = client(&transport);
    let input = SchemaPublishInput::new("", "type Query { a: Int }", "");

    let messages: Vec<String> = [
        client.schema_publish(&input).await,
        client.schema_publish(&input).await,
        client.schema_publish(&input).await,
    ]
    .into_iter()
    .map(|r| match r.unwrap_err() {
        HiveError::Operation { message } => message,
        other => panic!("unexpected error: {other:?}"),
    })
    .collect();

    assert_eq!(
        messages,
        vec![
            "hive error: Missing service name",
            "hive error: Missing service url",
            "hive error: check run failed"
        ]
    );
}

#[tokio::test]
async fn publish_github_success_has_no_id() {
    let transport = ScriptedTransport::new();
    transport.answer(json!({ "schemaPublish": { "__typename": "GitHubSchemaPublishSuccess" } }));

    let result = client(&transport)
        .schema_publish(&SchemaPublishInput::new("users", "type Query { a: Int }", ""))
        .await
        .unwrap();

    assert!(result.valid);
    assert!(result.id.is_empty() && result.url.is_empty());
}

// =============================================================================
// App create
// =============================================================================

#[tokio::test]
async fn empty_document_set_is_invalid_input() {
    let transport = ScriptedTransport::new();

    for (name, version) in [("storefront", "1.0.0"), ("", "")] {
        let err = client(&transport)
            .create_app(&CreateAppInput::new(name, version, "{}"))
            .await
            .unwrap_err();
        assert!(matches!(err, HiveError::InvalidInput { .. }));
    }
    assert!(transport.calls().is_empty());
}

#[tokio::test]
async fn unparseable_documents_never_reach_the_wire() {
    let transport = ScriptedTransport::new();

    let err = client(&transport)
        .create_app(&CreateAppInput::new("storefront", "1.0.0", "{not json"))
        .await
        .unwrap_err();

    assert!(matches!(err, HiveError::InvalidInput { .. }));
    assert!(err.to_string().starts_with("failed to unmarshal documents"));
    assert!(transport.calls().is_empty());
}

#[tokio::test]
async fn documents_upload_in_batches_of_one_hundred() {
    let transport = ScriptedTransport::new();
    transport
        .answer(created_deployment())
        .answer(batch_ok())
        .answer(batch_ok())
        .answer(batch_ok());

    let result = client(&transport)
        .create_app(&CreateAppInput::new("storefront", "1.2.0", documents(250)))
        .await
        .unwrap();

    assert_eq!(result.id, "dep-1");
    assert_eq!(result.app_name, "storefront");
    assert_eq!(result.app_version, "1.2.0");
    assert_eq!(result.status, "pending");

    let uploads = transport.calls_to("AddDocumentsToAppDeployment");
    let sizes: Vec<usize> = uploads
        .iter()
        .map(|call| call.variables["input"]["documents"].as_array().unwrap().len())
        .collect();
    assert_eq!(sizes, vec![100, 100, 50]);
    assert_eq!(uploads[0].variables["input"]["appName"], "storefront");
    assert_eq!(uploads[0].variables["input"]["documents"][0]["hash"], "h000");
    assert_eq!(transport.calls_to("CreateAppDeployment").len(), 1);
}

#[tokio::test]
async fn locked_deployment_batches_are_skipped() {
    let transport = ScriptedTransport::new();
    transport
        .answer(created_deployment())
        .answer(batch_error(DEPLOYMENT_LOCKED_MESSAGE))
        .answer(batch_ok())
        .answer(batch_error(DEPLOYMENT_LOCKED_MESSAGE));

    let result = client(&transport)
        .create_app(&CreateAppInput::new("storefront", "1.2.0", documents(201)))
        .await;

    assert!(result.is_ok());
    assert_eq!(transport.calls_to("AddDocumentsToAppDeployment").len(), 3);
}

#[tokio::test]
async fn batch_without_ok_or_error_is_rejected() {
    let transport = ScriptedTransport::new();
    transport
        .answer(created_deployment())
        .answer(json!({ "addDocumentsToAppDeployment": { "ok": null, "error": null } }));

    let err = client(&transport)
        .create_app(&CreateAppInput::new("storefront", "1.2.0", documents(5)))
        .await
        .unwrap_err();

    match err {
        HiveError::UnexpectedResponseShape { operation, typename } => {
            assert_eq!(operation, "addDocumentsToAppDeployment");
            assert_eq!(typename, "null");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(transport.calls_to("AddDocumentsToAppDeployment").len(), 1);
}

#[tokio::test]
async fn other_batch_errors_abort_immediately() {
    let transport = ScriptedTransport::new();
    transport
        .answer(created_deployment())
        .answer(batch_ok())
        .answer(batch_error("Document h150 is invalid"));

    let err = client(&transport)
        .create_app(&CreateAppInput::new("storefront", "1.2.0", documents(250)))
        .await
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "failed to add documents: Document h150 is invalid"
    );
    assert_eq!(transport.calls_to("AddDocumentsToAppDeployment").len(), 2);
}

#[tokio::test]
async fn create_error_stops_before_uploads() {
    let transport = ScriptedTransport::new();
    transport.answer(json!({
        "createAppDeployment": { "ok": null, "error": { "message": "App deployment already exists" } }
    }));

    let err = client(&transport)
        .create_app(&CreateAppInput::new("storefront", "1.2.0", documents(3)))
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "failed to create app: App deployment already exists");
    assert!(transport.calls_to("AddDocumentsToAppDeployment").is_empty());
}

// =============================================================================
// App publish / latest version
// =============================================================================

#[tokio::test]
async fn publish_app_returns_activated_deployment() {
    let transport = ScriptedTransport::new();
    transport.answer(json!({
        "activateAppDeployment": {
            "ok": { "activatedAppDeployment": deployment("active"), "isSkipped": false },
            "error": null
        }
    }));

    let result = client(&transport)
        .publish_app(&PublishAppInput::new("storefront", "1.2.0"))
        .await
        .unwrap();

    assert_eq!(result.status, "active");
    assert_eq!(result.id, "dep-1");
    let input = &transport.calls()[0].variables["input"];
    assert_eq!(input["appName"], "storefront");
    assert_eq!(input["appVersion"], "1.2.0");
}

#[tokio::test]
async fn publish_app_error_carries_server_message() {
    let transport = ScriptedTransport::new();
    transport.answer(json!({
        "activateAppDeployment": { "ok": null, "error": { "message": "App deployment not found" } }
    }));

    let err = client(&transport)
        .publish_app(&PublishAppInput::new("storefront", "9.9.9"))
        .await
        .unwrap_err();

    assert!(matches!(err, HiveError::Operation { .. }));
    assert!(err.to_string().ends_with("App deployment not found"));
}

#[tokio::test]
async fn latest_version_may_be_absent() {
    let transport = ScriptedTransport::new();
    transport
        .answer(json!({ "latestValidVersion": null }))
        .answer(json!({ "latestValidVersion": {
            "id": "v-3", "valid": true, "sdl": "type Query { a: Int }", "supergraph": null
        }}));
    let client = client(&transport);

    assert_eq!(
        client
            .latest_schema_version(&LatestSchemaVersionInput::new())
            .await
            .unwrap(),
        None
    );
    let version = client
        .latest_schema_version(&LatestSchemaVersionInput::new())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(version.id, "v-3");
    assert_eq!(version.sdl.as_deref(), Some("type Query { a: Int }"));
    assert!(version.supergraph.is_none());
    assert_eq!(transport.calls()[0].variables["target"], json!(null));
}
