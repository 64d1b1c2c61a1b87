//! One migration run across every defined collection.

use crate::collection_migrator::CollectionMigrator;
use crate::context::MigrationContext;
use crate::error::MigrateResult;
use msm_core::{CollectionDefinition, VersionNumber};
use msm_db::DataStore;

/// Versions applied to one collection during a run.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionReport {
    pub collection: String,
    pub applied: Vec<VersionNumber>,
}

/// Outcome of a successful run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MigrationReport {
    pub collections: Vec<CollectionReport>,
}

impl MigrationReport {
    pub fn total_applied(&self) -> usize {
        self.collections.iter().map(|c| c.applied.len()).sum()
    }
}

/// Drives a whole run against one data store.
pub struct MigrationOrchestrator<'a> {
    ctx: MigrationContext<'a>,
    migrators: Vec<CollectionMigrator>,
}

impl<'a> MigrationOrchestrator<'a> {
    /// Build a migrator for every collection. Every schema is resolved here,
    /// so a bad definition anywhere fails before anything is connected.
    pub fn new(
        ctx: MigrationContext<'a>,
        definitions: Vec<CollectionDefinition>,
    ) -> MigrateResult<Self> {
        let migrators = definitions
            .into_iter()
            .map(|definition| CollectionMigrator::new(definition, &ctx))
            .collect::<MigrateResult<Vec<_>>>()?;
        Ok(Self { ctx, migrators })
    }

    pub fn migrators(&self) -> &[CollectionMigrator] {
        &self.migrators
    }

    /// Connect, migrate every collection in order, publish the enumerator
    /// catalog and version index, then disconnect.
    ///
    /// Disconnect is attempted whether or not the run succeeded. A
    /// disconnect failure after a failed run is logged and the run's own
    /// error is returned.
    pub async fn run(&self, store: &dyn DataStore) -> MigrateResult<MigrationReport> {
        let result = self.run_connected(store).await;
        let disconnected = store.disconnect().await;

        match (result, disconnected) {
            (Ok(report), Ok(())) => Ok(report),
            (Ok(_), Err(e)) => Err(e.into()),
            (Err(e), Ok(())) => Err(e),
            (Err(e), Err(disconnect_error)) => {
                log::warn!("Disconnect after failed run also failed: {disconnect_error}");
                Err(e)
            }
        }
    }

    async fn run_connected(&self, store: &dyn DataStore) -> MigrateResult<MigrationReport> {
        store.connect().await?;
        log::info!(
            "Connected to {} store, {} collections to process",
            store.db_type(),
            self.migrators.len()
        );

        let mut report = MigrationReport::default();
        for migrator in &self.migrators {
            let applied = migrator.run(store, &self.ctx).await?;
            report.collections.push(CollectionReport {
                collection: migrator.name().to_string(),
                applied,
            });
        }

        store.upsert_enumerators(self.ctx.enumerators).await?;

        let versions = store.get_version_data().await?;
        self.ctx.artifacts.publish_version_index(&versions)?;

        log::info!(
            "Migration complete, {} versions applied",
            report.total_applied()
        );
        Ok(report)
    }
}

#[cfg(test)]
#[path = "orchestrator_test.rs"]
mod tests;
