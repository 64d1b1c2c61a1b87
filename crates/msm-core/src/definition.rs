//! Collection definition files and the version ledger record.
//!
//! A collection file declares the collection name and an ordered list of
//! versions. Declaration order is execution order; versions are never
//! re-sorted.

use crate::collection_name::CollectionName;
use crate::error::{CoreError, CoreResult};
use crate::version_number::VersionNumber;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;

/// One index to create: key specification plus optional index options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexDefinition {
    /// Key document, e.g. `{"userName": 1}`
    pub keys: Map<String, Value>,

    /// Options document, e.g. `{"name": "nameIndex", "unique": true}`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Map<String, Value>>,
}

impl IndexDefinition {
    /// Index name from the options, if one was given.
    pub fn name(&self) -> Option<&str> {
        self.options
            .as_ref()
            .and_then(|o| o.get("name"))
            .and_then(Value::as_str)
    }
}

/// A version as declared in a collection file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionDefinition {
    /// Target version, `major.minor.patch.enums`
    pub version: VersionNumber,

    /// Names of indexes to drop before data migration
    #[serde(default)]
    pub drop_indexes: Vec<String>,

    /// Indexes to create after data migration
    #[serde(default)]
    pub add_indexes: Vec<IndexDefinition>,

    /// Aggregation pipelines, each a list of stage documents, run in order
    #[serde(default)]
    pub aggregations: Vec<Vec<Value>>,

    /// Name of the test data file to bulk load when test data is enabled
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_data: Option<String>,
}

impl VersionDefinition {
    /// A definition with nothing but a version.
    pub fn new(version: VersionNumber) -> Self {
        Self {
            version,
            drop_indexes: Vec::new(),
            add_indexes: Vec::new(),
            aggregations: Vec::new(),
            test_data: None,
        }
    }
}

/// A parsed collection file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionDefinition {
    /// Collection name
    pub name: CollectionName,

    /// Versions in declaration order
    #[serde(default)]
    pub versions: Vec<VersionDefinition>,
}

impl CollectionDefinition {
    /// Parse a collection definition from JSON text.
    pub fn from_json_str(content: &str) -> CoreResult<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Load a collection definition from a file.
    pub fn load(path: &Path) -> CoreResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        serde_json::from_str(&content).map_err(|e| CoreError::JsonWithPath {
            path: path.display().to_string(),
            source: e,
        })
    }
}

/// Persisted record of the last fully applied version of a collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerEntry {
    pub collection_name: String,
    pub current_version: String,
}

impl LedgerEntry {
    pub fn new(collection_name: impl Into<String>, current_version: impl Into<String>) -> Self {
        Self {
            collection_name: collection_name.into(),
            current_version: current_version.into(),
        }
    }
}

#[cfg(test)]
#[path = "definition_test.rs"]
mod tests;
