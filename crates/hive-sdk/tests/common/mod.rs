//! Shared helpers for hive-sdk integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};

use hive_sdk::{CommitInfo, CommitInfoFn, HiveClient, HiveResult, Transport};

/// One recorded transport call.
#[derive(Debug, Clone)]
pub struct Call {
    pub query: String,
    pub variables: Value,
}

impl Call {
    /// Name of the top-level operation, e.g. `AddDocumentsToAppDeployment`.
    pub fn operation(&self) -> &str {
        self.query
            .split_whitespace()
            .nth(1)
            .and_then(|name| name.split('(').next())
            .unwrap_or_default()
    }
}

/// Transport that replays queued answers and records every call.
#[derive(Default)]
pub struct ScriptedTransport {
    answers: Mutex<VecDeque<HiveResult<Value>>>,
    calls: Mutex<Vec<Call>>,
}

impl ScriptedTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn answer(&self, data: Value) -> &Self {
        self.answers.lock().unwrap().push_back(Ok(data));
        self
    }

    pub fn fail(&self, err: hive_sdk::HiveError) -> &Self {
        self.answers.lock().unwrap().push_back(Err(err));
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, operation: &str) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|call| call.operation() == operation)
            .collect()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn execute(&self, query: &str, variables: Value) -> HiveResult<Value> {
        self.calls.lock().unwrap().push(Call {
            query: query.to_string(),
            variables,
        });
        self.answers
            .lock()
            .unwrap()
            .pop_front()
            .expect("transport called more often than scripted")
    }
}

/// Client over a scripted transport with a fixed commit collaborator.
pub fn client(transport: &Arc<ScriptedTransport>) -> HiveClient {
    HiveClient::with_transport(transport.clone())
        .with_commit_info(hive_git::fixed(CommitInfo::new("A <a@x>", "deadbeef")))
}

/// Collaborator that counts how often it is asked.
pub fn counting_commit_info(counter: Arc<AtomicUsize>) -> CommitInfoFn {
    Arc::new(move || {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(CommitInfo::new("A <a@x>", "deadbeef"))
    })
}

/// JSON object with `count` documents `h000 -> query Q000 { f }`.
pub fn documents(count: usize) -> String {
    let map: serde_json::Map<String, Value> = (0..count)
        .map(|i| (format!("h{i:03}"), json!(format!("query Q{i:03} {{ f }}"))))
        .collect();
    Value::Object(map).to_string()
}

pub fn deployment(status: &str) -> Value {
    json!({ "id": "dep-1", "name": "storefront", "version": "1.2.0", "status": status })
}

pub fn created_deployment() -> Value {
    json!({
        "createAppDeployment": {
            "ok": { "createdAppDeployment": deployment("pending") },
            "error": null
        }
    })
}

pub fn batch_ok() -> Value {
    json!({
        "addDocumentsToAppDeployment": {
            "ok": { "appDeployment": deployment("pending") },
            "error": null
        }
    })
}

pub fn batch_error(message: &str) -> Value {
    json!({
        "addDocumentsToAppDeployment": {
            "ok": null,
            "error": { "message": message }
        }
    })
}
