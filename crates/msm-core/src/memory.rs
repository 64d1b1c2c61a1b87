//! In-memory sources and artifacts for tests.

use crate::definition::LedgerEntry;
use crate::error::{CoreError, CoreResult};
use crate::source::{ArtifactStore, SchemaCatalog, TypeProvider};
use crate::version_number::VersionNumber;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;

/// Schemas, types and test data held in maps; written artifacts are recorded.
#[derive(Debug, Default)]
pub struct InMemorySources {
    types: HashMap<String, Value>,
    schemas: HashMap<String, Value>,
    test_data: HashMap<String, Vec<Value>>,
    api_documents: Mutex<Vec<(String, String, Value)>>,
    version_index: Mutex<Option<Vec<LedgerEntry>>>,
}

impl InMemorySources {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_type(mut self, name: &str, definition: Value) -> Self {
        self.types.insert(name.to_string(), definition);
        self
    }

    /// Register a schema under `collection` and `major.minor.patch`.
    pub fn with_schema(mut self, collection: &str, short_version: &str, schema: Value) -> Self {
        self.schemas
            .insert(format!("{collection}-{short_version}"), schema);
        self
    }

    pub fn with_test_data(mut self, name: &str, documents: Vec<Value>) -> Self {
        self.test_data.insert(name.to_string(), documents);
        self
    }

    /// Saved API documents as `(collection, version, document)`.
    pub fn api_documents(&self) -> Vec<(String, String, Value)> {
        self.api_documents
            .lock()
            .map(|docs| docs.clone())
            .unwrap_or_default()
    }

    /// The last published version index, if any.
    pub fn version_index(&self) -> Option<Vec<LedgerEntry>> {
        self.version_index
            .lock()
            .ok()
            .and_then(|index| index.clone())
    }
}

impl TypeProvider for InMemorySources {
    fn type_definition(&self, name: &str) -> CoreResult<Value> {
        self.types
            .get(name)
            .cloned()
            .ok_or_else(|| CoreError::TypeNotFound {
                name: name.to_string(),
            })
    }
}

impl SchemaCatalog for InMemorySources {
    fn schema_source(&self, collection: &str, version: &VersionNumber) -> CoreResult<Value> {
        let key = format!("{collection}-{}", version.short_string());
        self.schemas
            .get(&key)
            .cloned()
            .ok_or_else(|| CoreError::IoWithPath {
                path: format!("{key}.json"),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "schema not registered"),
            })
    }
}

impl ArtifactStore for InMemorySources {
    fn test_data(&self, name: &str) -> CoreResult<Vec<Value>> {
        self.test_data
            .get(name)
            .cloned()
            .ok_or_else(|| CoreError::IoWithPath {
                path: format!("{name}.json"),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "test data not registered"),
            })
    }

    fn save_api_document(
        &self,
        collection: &str,
        version: &VersionNumber,
        document: &Value,
    ) -> CoreResult<()> {
        if let Ok(mut docs) = self.api_documents.lock() {
            docs.push((collection.to_string(), version.to_string(), document.clone()));
        }
        Ok(())
    }

    fn publish_version_index(&self, versions: &[LedgerEntry]) -> CoreResult<()> {
        if let Ok(mut index) = self.version_index.lock() {
            *index = Some(versions.to_vec());
        }
        Ok(())
    }
}
