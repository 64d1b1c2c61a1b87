//! In-memory data store for tests.
//!
//! Keeps the ledger, validators, indexes and loaded documents in maps and
//! records every call, so tests can assert on the exact call sequence.

use crate::error::{DbError, DbResult};
use crate::traits::DataStore;
use async_trait::async_trait;
use msm_core::{EnumeratorCatalog, IndexDefinition, LedgerEntry, INITIAL_VERSION};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Mutex, MutexGuard};

/// One recorded data store call.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreCall {
    Connect,
    Disconnect,
    GetVersion(String),
    SetVersion { collection: String, version: String },
    GetVersionData,
    ClearSchemaValidation(String),
    ApplySchemaValidation { collection: String, validator: Value },
    DropIndexes { collection: String, names: Vec<String> },
    AddIndexes { collection: String, names: Vec<String> },
    ExecuteAggregations { collection: String, pipelines: usize },
    BulkLoad { collection: String, documents: usize },
    UpsertEnumerators { revisions: usize },
}

impl StoreCall {
    /// Method name of the call, as accepted by [`InMemoryStore::fail_on`].
    pub fn operation(&self) -> &'static str {
        match self {
            StoreCall::Connect => "connect",
            StoreCall::Disconnect => "disconnect",
            StoreCall::GetVersion(_) => "get_version",
            StoreCall::SetVersion { .. } => "set_version",
            StoreCall::GetVersionData => "get_version_data",
            StoreCall::ClearSchemaValidation(_) => "clear_schema_validation",
            StoreCall::ApplySchemaValidation { .. } => "apply_schema_validation",
            StoreCall::DropIndexes { .. } => "drop_indexes",
            StoreCall::AddIndexes { .. } => "add_indexes",
            StoreCall::ExecuteAggregations { .. } => "execute_aggregations",
            StoreCall::BulkLoad { .. } => "bulk_load",
            StoreCall::UpsertEnumerators { .. } => "upsert_enumerators",
        }
    }
}

#[derive(Debug, Default)]
struct State {
    connected: bool,
    calls: Vec<StoreCall>,
    failing: HashSet<String>,
    ledger: BTreeMap<String, String>,
    validators: HashMap<String, Value>,
    indexes: HashMap<String, Vec<String>>,
    documents: HashMap<String, Vec<Value>>,
    enumerators: Option<EnumeratorCatalog>,
}

/// Recording in-memory [`DataStore`].
#[derive(Debug, Default)]
pub struct InMemoryStore {
    state: Mutex<State>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the ledger with an applied version.
    pub fn with_version(self, collection: &str, version: &str) -> Self {
        if let Ok(mut state) = self.state.lock() {
            state
                .ledger
                .insert(collection.to_string(), version.to_string());
        }
        self
    }

    /// Seed an existing index so it can be dropped.
    pub fn with_index(self, collection: &str, name: &str) -> Self {
        if let Ok(mut state) = self.state.lock() {
            state
                .indexes
                .entry(collection.to_string())
                .or_default()
                .push(name.to_string());
        }
        self
    }

    /// Make every future call of `operation` fail after being recorded.
    pub fn fail_on(&self, operation: &str) {
        if let Ok(mut state) = self.state.lock() {
            state.failing.insert(operation.to_string());
        }
    }

    /// Every call so far, in order.
    pub fn calls(&self) -> Vec<StoreCall> {
        self.state
            .lock()
            .map(|s| s.calls.clone())
            .unwrap_or_default()
    }

    /// Recorded calls that touch `collection`, as operation names.
    pub fn operations_on(&self, collection: &str) -> Vec<&'static str> {
        self.calls()
            .iter()
            .filter(|call| call_collection(call) == Some(collection))
            .map(StoreCall::operation)
            .collect()
    }

    /// Ledger version of a collection, if recorded.
    pub fn version(&self, collection: &str) -> Option<String> {
        self.state
            .lock()
            .ok()
            .and_then(|s| s.ledger.get(collection).cloned())
    }

    pub fn validator(&self, collection: &str) -> Option<Value> {
        self.state
            .lock()
            .ok()
            .and_then(|s| s.validators.get(collection).cloned())
    }

    pub fn indexes(&self, collection: &str) -> Vec<String> {
        self.state
            .lock()
            .ok()
            .and_then(|s| s.indexes.get(collection).cloned())
            .unwrap_or_default()
    }

    pub fn documents(&self, collection: &str) -> Vec<Value> {
        self.state
            .lock()
            .ok()
            .and_then(|s| s.documents.get(collection).cloned())
            .unwrap_or_default()
    }

    pub fn enumerators(&self) -> Option<EnumeratorCatalog> {
        self.state.lock().ok().and_then(|s| s.enumerators.clone())
    }

    pub fn is_connected(&self) -> bool {
        self.state.lock().map(|s| s.connected).unwrap_or(false)
    }

    fn lock(&self) -> DbResult<MutexGuard<'_, State>> {
        self.state
            .lock()
            .map_err(|e| DbError::MutexPoisoned(e.to_string()))
    }

    /// Record `call`, then apply the failure and connection rules.
    fn record(&self, call: StoreCall) -> DbResult<MutexGuard<'_, State>> {
        let mut state = self.lock()?;
        let operation = call.operation();
        let collection = call_collection(&call).unwrap_or_default().to_string();
        state.calls.push(call);

        if state.failing.contains(operation) {
            return Err(DbError::Operation {
                operation,
                collection,
                message: "injected failure".to_string(),
            });
        }
        let needs_connection = !matches!(operation, "connect" | "disconnect");
        if needs_connection && !state.connected {
            return Err(DbError::NotConnected);
        }
        Ok(state)
    }
}

fn call_collection(call: &StoreCall) -> Option<&str> {
    match call {
        StoreCall::GetVersion(c) | StoreCall::ClearSchemaValidation(c) => Some(c),
        StoreCall::SetVersion { collection, .. }
        | StoreCall::ApplySchemaValidation { collection, .. }
        | StoreCall::DropIndexes { collection, .. }
        | StoreCall::AddIndexes { collection, .. }
        | StoreCall::ExecuteAggregations { collection, .. }
        | StoreCall::BulkLoad { collection, .. } => Some(collection),
        _ => None,
    }
}

/// Name MongoDB assigns an index created without an explicit name.
fn index_name(index: &IndexDefinition) -> String {
    match index.name() {
        Some(name) => name.to_string(),
        None => index
            .keys
            .iter()
            .map(|(field, direction)| format!("{field}_{direction}"))
            .collect::<Vec<_>>()
            .join("_"),
    }
}

#[async_trait]
impl DataStore for InMemoryStore {
    async fn connect(&self) -> DbResult<()> {
        self.record(StoreCall::Connect)?.connected = true;
        Ok(())
    }

    async fn disconnect(&self) -> DbResult<()> {
        self.record(StoreCall::Disconnect)?.connected = false;
        Ok(())
    }

    async fn get_version(&self, collection: &str) -> DbResult<String> {
        let state = self.record(StoreCall::GetVersion(collection.to_string()))?;
        Ok(state
            .ledger
            .get(collection)
            .cloned()
            .unwrap_or_else(|| INITIAL_VERSION.to_string()))
    }

    async fn set_version(&self, collection: &str, version: &str) -> DbResult<()> {
        let mut state = self.record(StoreCall::SetVersion {
            collection: collection.to_string(),
            version: version.to_string(),
        })?;
        state
            .ledger
            .insert(collection.to_string(), version.to_string());
        Ok(())
    }

    async fn get_version_data(&self) -> DbResult<Vec<LedgerEntry>> {
        let state = self.record(StoreCall::GetVersionData)?;
        Ok(state
            .ledger
            .iter()
            .map(|(collection, version)| LedgerEntry::new(collection.as_str(), version.as_str()))
            .collect())
    }

    async fn clear_schema_validation(&self, collection: &str) -> DbResult<()> {
        let mut state = self.record(StoreCall::ClearSchemaValidation(collection.to_string()))?;
        state.validators.remove(collection);
        Ok(())
    }

    async fn apply_schema_validation(&self, collection: &str, validator: &Value) -> DbResult<()> {
        let mut state = self.record(StoreCall::ApplySchemaValidation {
            collection: collection.to_string(),
            validator: validator.clone(),
        })?;
        state
            .validators
            .insert(collection.to_string(), validator.clone());
        Ok(())
    }

    async fn drop_indexes(&self, collection: &str, names: &[String]) -> DbResult<()> {
        let mut state = self.record(StoreCall::DropIndexes {
            collection: collection.to_string(),
            names: names.to_vec(),
        })?;
        let existing = state.indexes.entry(collection.to_string()).or_default();
        for name in names {
            let Some(position) = existing.iter().position(|n| n == name) else {
                return Err(DbError::operation(
                    "dropIndex",
                    collection,
                    format!("index not found with name [{name}]"),
                ));
            };
            existing.remove(position);
        }
        Ok(())
    }

    async fn add_indexes(&self, collection: &str, indexes: &[IndexDefinition]) -> DbResult<()> {
        let names: Vec<String> = indexes.iter().map(index_name).collect();
        let mut state = self.record(StoreCall::AddIndexes {
            collection: collection.to_string(),
            names: names.clone(),
        })?;
        state
            .indexes
            .entry(collection.to_string())
            .or_default()
            .extend(names);
        Ok(())
    }

    async fn execute_aggregations(
        &self,
        collection: &str,
        pipelines: &[Vec<Value>],
    ) -> DbResult<()> {
        drop(self.record(StoreCall::ExecuteAggregations {
            collection: collection.to_string(),
            pipelines: pipelines.len(),
        })?);
        Ok(())
    }

    async fn bulk_load(&self, collection: &str, documents: &[Value]) -> DbResult<()> {
        let mut state = self.record(StoreCall::BulkLoad {
            collection: collection.to_string(),
            documents: documents.len(),
        })?;
        state
            .documents
            .entry(collection.to_string())
            .or_default()
            .extend(documents.iter().cloned());
        Ok(())
    }

    async fn upsert_enumerators(&self, catalog: &EnumeratorCatalog) -> DbResult<()> {
        let mut state = self.record(StoreCall::UpsertEnumerators {
            revisions: catalog.len(),
        })?;
        state.enumerators = Some(catalog.clone());
        Ok(())
    }

    fn db_type(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
#[path = "memory_test.rs"]
mod tests;
