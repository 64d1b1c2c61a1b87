//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand, ValueEnum};
use msm_core::config::{
    CONFIG_FOLDER, CONNECTION_STRING, DB_NAME, LOAD_TEST_DATA, MSM_ROOT, MSM_TYPES,
};
use std::collections::HashMap;

/// mongo-schema-manager - versioned schema migrations for MongoDB collections
#[derive(Parser, Debug)]
#[command(name = "msm")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
///
/// Each setting given here takes precedence over the environment variable
/// and configuration folder file of the same name.
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration folder (CONFIG_FOLDER)
    #[arg(short, long, global = true)]
    pub config_folder: Option<String>,

    /// Install root holding the API viewer app (MSM_ROOT)
    #[arg(long, global = true)]
    pub msm_root: Option<String>,

    /// Shared custom type library (MSM_TYPES)
    #[arg(long, global = true)]
    pub msm_types: Option<String>,

    /// MongoDB connection string (CONNECTION_STRING)
    #[arg(long, global = true)]
    pub connection_string: Option<String>,

    /// Database name (DB_NAME)
    #[arg(short, long, global = true)]
    pub db_name: Option<String>,

    /// Bulk load test data after each applied version (LOAD_TEST_DATA)
    #[arg(long, global = true)]
    pub load_test_data: bool,
}

impl GlobalArgs {
    /// Settings given on the command line, keyed by setting name.
    pub fn overrides(&self) -> HashMap<String, String> {
        let mut overrides = HashMap::new();
        let settings = [
            (CONFIG_FOLDER, &self.config_folder),
            (MSM_ROOT, &self.msm_root),
            (MSM_TYPES, &self.msm_types),
            (CONNECTION_STRING, &self.connection_string),
            (DB_NAME, &self.db_name),
        ];
        for (name, value) in settings {
            if let Some(value) = value {
                overrides.insert(name.to_string(), value.clone());
            }
        }
        if self.load_test_data {
            overrides.insert(LOAD_TEST_DATA.to_string(), "true".to_string());
        }
        overrides
    }
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Apply every outstanding collection version to the database
    Migrate,

    /// Load and resolve every collection version without touching the database
    Check,

    /// Print the resolved schema of one collection version
    Render(RenderArgs),
}

/// Arguments for the render command
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Collection name
    pub collection: String,

    /// Version, major.minor.patch.enums
    #[arg(value_name = "VERSION")]
    pub schema_version: String,

    /// Print the generated API document instead of the validator
    #[arg(long)]
    pub api: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    pub output: RenderFormat,
}

/// Render output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderFormat {
    /// Pretty-printed JSON
    Json,
    /// YAML
    Yaml,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
