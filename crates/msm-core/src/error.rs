//! Error types for msm-core

use thiserror::Error;

/// Core error type for mongo-schema-manager
#[derive(Error, Debug)]
pub enum CoreError {
    /// C001: Version string is not four dot-separated integers
    #[error("[C001] Invalid version number '{value}': {reason}")]
    InvalidVersion { value: String, reason: String },

    /// C002: Custom type referenced by `msmType` could not be found
    #[error("[C002] Type not found: {name}")]
    TypeNotFound { name: String },

    /// C003: Enumerator referenced by `msmEnums`/`msmEnumList` does not exist
    #[error("[C003] Enumerator does not exist: {name} (revision {revision})")]
    EnumeratorNotFound { name: String, revision: u32 },

    /// C004: Enumerator catalog revisions are out of sequence
    #[error("[C004] Invalid enumerators file, bad revision sequence: entry {index} declares revision {declared}")]
    EnumeratorRevisionMismatch { index: u32, declared: u32 },

    /// C005: Requested enumerator revision is not in the catalog
    #[error("[C005] Enumerator revision {revision} not found ({available} revisions available)")]
    EnumeratorRevisionMissing { revision: u32, available: usize },

    /// C006: Custom types reference each other in a loop
    #[error("[C006] Circular type reference: {chain}")]
    TypeCycle { chain: String },

    /// C007: A directive key carries something other than a type/enumerator name
    #[error("[C007] Invalid '{directive}' directive: {reason}")]
    InvalidDirective { directive: String, reason: String },

    /// C008: Schema or type definition is not a JSON object
    #[error("[C008] Invalid schema for {context}: {reason}")]
    InvalidSchema { context: String, reason: String },

    /// C009: Invalid configuration value
    #[error("[C009] Invalid config: {message}")]
    ConfigInvalid { message: String },

    /// C010: Required configuration folder is missing
    #[error("[C010] Folder does not exist: {path}")]
    FolderMissing { path: String },

    /// C011: Enumerators file is missing
    #[error("[C011] Enumerators file does not exist: {path}")]
    EnumeratorsFileMissing { path: String },

    /// C012: IO error with file path context
    #[error("[C012] Failed to access '{path}': {source}")]
    IoWithPath {
        path: String,
        source: std::io::Error,
    },

    /// C013: JSON parse error with file path context
    #[error("[C013] Failed to parse '{path}': {source}")]
    JsonWithPath {
        path: String,
        source: serde_json::Error,
    },

    /// C014: JSON serialization/deserialization error
    #[error("[C014] JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// C015: YAML serialization error
    #[error("[C015] YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;
