//! Schema directive resolution and API document generation.

pub mod api_document;
pub mod node;
pub mod resolver;

pub use api_document::{build_api_document, openapi_type, to_openapi_schema, OPENAPI_VERSION};
pub use node::{SchemaNode, BSON_TYPE, ENUMS_DIRECTIVE, ENUM_LIST_DIRECTIVE, TYPE_DIRECTIVE};
pub use resolver::SchemaResolver;

use crate::enumerators::EnumeratorCatalog;
use crate::error::CoreResult;
use crate::source::SchemaCatalog;
use crate::version_number::VersionNumber;
use serde_json::Value;

/// The install-ready artifacts built from one schema source.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSchema {
    /// Directive-free `$jsonSchema` validator
    pub validator: Value,
    /// OpenAPI document describing the validator
    pub api_document: Value,
}

impl ResolvedSchema {
    /// Load, resolve, and document the schema of `collection` at `version`.
    pub fn load<C: SchemaCatalog + ?Sized>(
        catalog: &C,
        enumerators: &EnumeratorCatalog,
        collection: &str,
        version: &VersionNumber,
    ) -> CoreResult<Self> {
        let source = catalog.schema_source(collection, version)?;
        let validator = SchemaResolver::new(catalog, enumerators, version).resolve(source)?;
        let api_document = build_api_document(collection, version, &validator);

        log::info!(
            "Schema for collection {collection} version {version}: {}",
            validator
        );
        Ok(Self {
            validator,
            api_document,
        })
    }
}
