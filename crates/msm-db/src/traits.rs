//! Data store trait definition

use crate::error::DbResult;
use async_trait::async_trait;
use msm_core::{EnumeratorCatalog, IndexDefinition, LedgerEntry};
use serde_json::Value;

/// Collection that records each collection's applied version.
pub const VERSION_COLLECTION: &str = "msmCurrentVersions";

/// Collection that holds the published enumerator catalog.
pub const ENUMERATORS_COLLECTION: &str = "msmEnumerations";

/// Document store abstraction for mongo-schema-manager
///
/// Implementations must be Send + Sync for async operation. Every method
/// except `connect`, `disconnect` and `db_type` fails with
/// [`DbError::NotConnected`](crate::DbError::NotConnected) until `connect`
/// has succeeded.
#[async_trait]
pub trait DataStore: Send + Sync {
    /// Open the connection
    async fn connect(&self) -> DbResult<()>;

    /// Close the connection. Calling it while disconnected is a no-op.
    async fn disconnect(&self) -> DbResult<()>;

    /// Last applied version of a collection, `"0.0.0.0"` if none recorded
    async fn get_version(&self, collection: &str) -> DbResult<String>;

    /// Record the applied version of a collection (upsert)
    async fn set_version(&self, collection: &str, version: &str) -> DbResult<()>;

    /// Every ledger entry
    async fn get_version_data(&self) -> DbResult<Vec<LedgerEntry>>;

    /// Remove any validator from the collection
    async fn clear_schema_validation(&self, collection: &str) -> DbResult<()>;

    /// Install `validator` as the collection's `$jsonSchema` validator
    async fn apply_schema_validation(&self, collection: &str, validator: &Value) -> DbResult<()>;

    /// Drop indexes by name, in order. No-op for an empty list.
    async fn drop_indexes(&self, collection: &str, names: &[String]) -> DbResult<()>;

    /// Create indexes. No-op for an empty list.
    async fn add_indexes(&self, collection: &str, indexes: &[IndexDefinition]) -> DbResult<()>;

    /// Run aggregation pipelines in order, each to completion
    async fn execute_aggregations(&self, collection: &str, pipelines: &[Vec<Value>])
        -> DbResult<()>;

    /// Insert documents; extended JSON (`{"$oid": ...}`, `{"$date": ...}`) is honored
    async fn bulk_load(&self, collection: &str, documents: &[Value]) -> DbResult<()>;

    /// Publish the enumerator catalog, one record per revision
    async fn upsert_enumerators(&self, catalog: &EnumeratorCatalog) -> DbResult<()>;

    /// Database type identifier for logging
    fn db_type(&self) -> &'static str;
}
