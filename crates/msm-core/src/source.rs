//! Seams between the migration engine and where its inputs and artifacts live.
//!
//! [`ConfigFiles`](crate::files::ConfigFiles) implements these against the
//! configuration folder; tests use in-memory implementations.

use crate::definition::LedgerEntry;
use crate::error::CoreResult;
use crate::version_number::VersionNumber;
use serde_json::Value;

/// Lookup of named custom type definitions (`msmType` targets).
pub trait TypeProvider: Send + Sync {
    /// Return the raw (unresolved) definition of a custom type.
    fn type_definition(&self, name: &str) -> CoreResult<Value>;
}

/// Raw schema sources, keyed by collection and `major.minor.patch`.
pub trait SchemaCatalog: TypeProvider {
    /// Return the directive-bearing schema for a collection at a version.
    fn schema_source(&self, collection: &str, version: &VersionNumber) -> CoreResult<Value>;
}

/// Inputs and outputs that live beside the database: fixture data and
/// generated documentation.
pub trait ArtifactStore: Send + Sync {
    /// Load the documents of a named test data set.
    fn test_data(&self, name: &str) -> CoreResult<Vec<Value>>;

    /// Persist the API document generated for a collection version.
    fn save_api_document(
        &self,
        collection: &str,
        version: &VersionNumber,
        document: &Value,
    ) -> CoreResult<()>;

    /// Regenerate the version index consumed by the API document viewer.
    fn publish_version_index(&self, versions: &[LedgerEntry]) -> CoreResult<()>;
}
