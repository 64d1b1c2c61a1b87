//! Error types for msm-migrate

use msm_core::CoreError;
use msm_db::DbError;
use thiserror::Error;

/// Migration errors
#[derive(Error, Debug)]
pub enum MigrateError {
    /// Configuration error from loading or resolving definitions (G001)
    #[error("[G001] Configuration error: {0}")]
    Core(#[from] CoreError),

    /// Data store error (G002)
    #[error("[G002] Data store error: {0}")]
    Db(#[from] DbError),

    /// A declared version could not be built (G003)
    #[error("[G003] Invalid definition for {collection} version {version}: {source}")]
    InvalidDefinition {
        collection: String,
        version: String,
        source: CoreError,
    },

    /// The ledger holds something that is not a version number (G004)
    #[error("[G004] Ledger version of {collection} is unreadable: {source}")]
    InvalidLedgerVersion {
        collection: String,
        source: CoreError,
    },

    /// Applying a version stopped part way; the ledger was not advanced (G005)
    #[error("[G005] Applying {collection} version {version} failed: {source}")]
    VersionFailed {
        collection: String,
        version: String,
        source: Box<MigrateError>,
    },
}

/// Result type alias for MigrateError
pub type MigrateResult<T> = Result<T, MigrateError>;
