//! Read-only inputs shared by every migrator in a run.

use msm_core::{ArtifactStore, EnumeratorCatalog, SchemaCatalog};

/// Everything a version needs besides the data store, built once at startup.
#[derive(Clone, Copy)]
pub struct MigrationContext<'a> {
    /// Schema sources and custom types
    pub schemas: &'a dyn SchemaCatalog,
    /// Enumerator catalog used for enum directives
    pub enumerators: &'a EnumeratorCatalog,
    /// Test data and generated documents
    pub artifacts: &'a dyn ArtifactStore,
    /// Bulk load each version's test data after installing its validator
    pub load_test_data: bool,
}
