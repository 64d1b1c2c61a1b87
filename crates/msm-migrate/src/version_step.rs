//! One declared version of a collection and the fixed sequence that applies it.

use crate::context::MigrationContext;
use crate::error::{MigrateError, MigrateResult};
use msm_core::{CollectionName, ResolvedSchema, VersionDefinition, VersionNumber};
use msm_db::DataStore;

/// A declared version with its schema already resolved.
#[derive(Debug, Clone)]
pub struct VersionStep {
    collection: CollectionName,
    definition: VersionDefinition,
    schema: ResolvedSchema,
}

impl VersionStep {
    /// Resolve the version's schema. Any directive error fails here, before
    /// the data store is touched.
    pub fn new(
        collection: &CollectionName,
        definition: VersionDefinition,
        ctx: &MigrationContext<'_>,
    ) -> MigrateResult<Self> {
        let schema = ResolvedSchema::load(
            ctx.schemas,
            ctx.enumerators,
            collection.as_str(),
            &definition.version,
        )
        .map_err(|source| MigrateError::InvalidDefinition {
            collection: collection.to_string(),
            version: definition.version.to_string(),
            source,
        })?;

        Ok(Self {
            collection: collection.clone(),
            definition,
            schema,
        })
    }

    pub fn version(&self) -> &VersionNumber {
        &self.definition.version
    }

    pub fn definition(&self) -> &VersionDefinition {
        &self.definition
    }

    pub fn schema(&self) -> &ResolvedSchema {
        &self.schema
    }

    /// Apply this version.
    ///
    /// Steps run in a fixed order and stop at the first failure. The ledger is
    /// written only after the validator (and any test data) is in place.
    /// Steps are not transactional: a failure part way leaves earlier effects.
    pub async fn apply(
        &self,
        store: &dyn DataStore,
        ctx: &MigrationContext<'_>,
    ) -> MigrateResult<()> {
        let collection = self.collection.as_str();
        let version = &self.definition.version;

        store.clear_schema_validation(collection).await?;

        if self.definition.drop_indexes.is_empty() {
            log::debug!("{collection} {version}: no indexes to drop");
        }
        store
            .drop_indexes(collection, &self.definition.drop_indexes)
            .await?;

        if self.definition.aggregations.is_empty() {
            log::debug!("{collection} {version}: no aggregations to run");
        }
        store
            .execute_aggregations(collection, &self.definition.aggregations)
            .await?;

        if self.definition.add_indexes.is_empty() {
            log::debug!("{collection} {version}: no indexes to add");
        }
        store
            .add_indexes(collection, &self.definition.add_indexes)
            .await?;

        store
            .apply_schema_validation(collection, &self.schema.validator)
            .await?;

        match (&self.definition.test_data, ctx.load_test_data) {
            (Some(name), true) => {
                let documents = ctx.artifacts.test_data(name)?;
                store.bulk_load(collection, &documents).await?;
                log::info!(
                    "{collection} {version}: loaded {} test documents from {name}",
                    documents.len()
                );
            }
            (Some(name), false) => {
                log::debug!("{collection} {version}: test data {name} not loaded");
            }
            (None, _) => {}
        }

        store.set_version(collection, &version.to_string()).await?;

        ctx.artifacts
            .save_api_document(collection, version, &self.schema.api_document)?;

        Ok(())
    }
}

#[cfg(test)]
#[path = "version_step_test.rs"]
mod tests;
