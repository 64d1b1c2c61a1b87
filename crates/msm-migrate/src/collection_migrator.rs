//! Resumable application of one collection's declared versions.

use crate::context::MigrationContext;
use crate::error::{MigrateError, MigrateResult};
use crate::version_step::VersionStep;
use msm_core::{CollectionDefinition, CollectionName, VersionNumber};
use msm_db::DataStore;

/// All of a collection's versions, built and ready to apply.
#[derive(Debug, Clone)]
pub struct CollectionMigrator {
    name: CollectionName,
    steps: Vec<VersionStep>,
}

impl CollectionMigrator {
    /// Build a step for every declared version, in declaration order.
    pub fn new(definition: CollectionDefinition, ctx: &MigrationContext<'_>) -> MigrateResult<Self> {
        let CollectionDefinition { name, versions } = definition;
        let steps = versions
            .into_iter()
            .map(|version| VersionStep::new(&name, version, ctx))
            .collect::<MigrateResult<Vec<_>>>()?;
        log::debug!("Built {} version steps for {name}", steps.len());
        Ok(Self { name, steps })
    }

    pub fn name(&self) -> &CollectionName {
        &self.name
    }

    pub fn steps(&self) -> &[VersionStep] {
        &self.steps
    }

    /// Apply every declared version newer than the ledger's, in order.
    ///
    /// The ledger is re-read after each applied version and that value, not
    /// the version just written, decides what runs next. Returns the
    /// versions applied.
    pub async fn run(
        &self,
        store: &dyn DataStore,
        ctx: &MigrationContext<'_>,
    ) -> MigrateResult<Vec<VersionNumber>> {
        let mut current = self.current_version(store).await?;
        log::info!("Processing {} at version {current}", self.name);

        let mut applied = Vec::new();
        for step in &self.steps {
            let version = step.version();
            if !version.is_newer_than(&current) {
                log::debug!(
                    "Skipping {} version {version}, ledger is at {current}",
                    self.name
                );
                continue;
            }

            log::info!("Applying {} version {version}", self.name);
            step.apply(store, ctx)
                .await
                .map_err(|source| MigrateError::VersionFailed {
                    collection: self.name.to_string(),
                    version: version.to_string(),
                    source: Box::new(source),
                })?;
            applied.push(*version);

            current = self.current_version(store).await?;
        }

        log::info!(
            "Finished {} at version {current}, {} applied",
            self.name,
            applied.len()
        );
        Ok(applied)
    }

    async fn current_version(&self, store: &dyn DataStore) -> MigrateResult<VersionNumber> {
        let raw = store.get_version(self.name.as_str()).await?;
        VersionNumber::parse(&raw).map_err(|source| MigrateError::InvalidLedgerVersion {
            collection: self.name.to_string(),
            source,
        })
    }
}

#[cfg(test)]
#[path = "collection_migrator_test.rs"]
mod tests;
