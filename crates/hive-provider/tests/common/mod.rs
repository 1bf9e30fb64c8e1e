//! Shared helpers for hive-provider integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use hive_provider::HiveProvider;
use hive_sdk::{CommitInfo, HiveClient, HiveResult, Transport};

/// Transport that replays queued `data` objects and records variables.
#[derive(Default)]
pub struct ScriptedTransport {
    answers: Mutex<VecDeque<HiveResult<Value>>>,
    variables: Mutex<Vec<Value>>,
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

    pub fn call_count(&self) -> usize {
        self.variables.lock().unwrap().len()
    }

    pub fn variables(&self) -> Vec<Value> {
        self.variables.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn execute(&self, _query: &str, variables: Value) -> HiveResult<Value> {
        self.variables.lock().unwrap().push(variables);
        self.answers
            .lock()
            .unwrap()
            .pop_front()
            .expect("transport called more often than scripted")
    }
}

/// Provider configured with a client over `transport`.
pub fn provider(transport: &Arc<ScriptedTransport>) -> HiveProvider {
    let client = HiveClient::with_transport(transport.clone())
        .with_organization("acme")
        .with_commit_info(hive_git::fixed(CommitInfo::new("A <a@x>", "deadbeef")));
    let mut provider = HiveProvider::new("test");
    provider.configure_with_client(client);
    provider
}
