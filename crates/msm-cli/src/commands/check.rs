//! Check command implementation

use anyhow::Result;
use msm_migrate::{MigrationContext, MigrationOrchestrator};

use crate::cli::GlobalArgs;
use crate::commands::common::load_files;

/// Execute the check command
///
/// Builds every version step, resolving every schema, without connecting.
pub(crate) async fn execute(global: &GlobalArgs) -> Result<()> {
    let (config, files) = load_files(global)?;
    let definitions = files.collection_definitions()?;

    let ctx = MigrationContext {
        schemas: &files,
        enumerators: files.enumerators(),
        artifacts: &files,
        load_test_data: config.should_load_test_data(),
    };
    let orchestrator = MigrationOrchestrator::new(ctx, definitions)?;

    for migrator in orchestrator.migrators() {
        let versions: Vec<String> = migrator
            .steps()
            .iter()
            .map(|step| step.version().to_string())
            .collect();
        println!(
            "{}: {} version(s) [{}]",
            migrator.name(),
            versions.len(),
            versions.join(", ")
        );
    }
    println!("All collection definitions are valid");
    Ok(())
}
