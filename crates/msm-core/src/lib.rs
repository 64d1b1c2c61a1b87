//! msm-core - Core library for mongo-schema-manager
//!
//! This crate provides version numbers, the enumerator catalog, collection
//! definitions, schema directive resolution, OpenAPI generation, runtime
//! configuration, and the file-backed sources the migration engine reads.

pub mod collection_name;
pub mod config;
pub mod definition;
pub mod enumerators;
pub mod error;
pub mod files;
#[cfg(any(test, feature = "test-support"))]
pub mod memory;
pub mod schema;
pub mod source;
pub mod version_number;

pub use collection_name::CollectionName;
pub use config::{ConfigItem, ConfigOrigin, MsmConfig};
pub use definition::{CollectionDefinition, IndexDefinition, LedgerEntry, VersionDefinition};
pub use enumerators::{EnumeratorCatalog, EnumeratorRevision, EnumeratorValues};
pub use error::{CoreError, CoreResult};
pub use files::ConfigFiles;
#[cfg(any(test, feature = "test-support"))]
pub use memory::InMemorySources;
pub use schema::{build_api_document, ResolvedSchema, SchemaResolver};
pub use source::{ArtifactStore, SchemaCatalog, TypeProvider};
pub use version_number::{VersionNumber, INITIAL_VERSION};
