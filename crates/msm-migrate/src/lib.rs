//! msm-migrate - Migration engine for mongo-schema-manager
//!
//! Builds a step for every declared collection version up front, then
//! applies the outstanding ones against a [`msm_db::DataStore`], advancing
//! the per-collection version ledger one fully applied version at a time.

pub mod collection_migrator;
pub mod context;
pub mod error;
pub mod orchestrator;
pub mod version_step;

#[cfg(test)]
mod test_fixtures;

pub use collection_migrator::CollectionMigrator;
pub use context::MigrationContext;
pub use error::{MigrateError, MigrateResult};
pub use orchestrator::{CollectionReport, MigrationOrchestrator, MigrationReport};
pub use version_step::VersionStep;
