//! Migrate command implementation

use anyhow::Result;
use msm_db::MongoBackend;
use msm_migrate::{MigrationContext, MigrationOrchestrator};

use crate::cli::GlobalArgs;
use crate::commands::common::load_files;

/// Execute the migrate command
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

    let store = MongoBackend::new(&config.connection_string, &config.db_name);
    let report = orchestrator.run(&store).await?;

    for collection in &report.collections {
        match collection.applied.last() {
            Some(last) => println!(
                "{}: applied {} version(s), now at {}",
                collection.collection,
                collection.applied.len(),
                last
            ),
            None => println!("{}: up to date", collection.collection),
        }
    }
    println!(
        "Migration complete: {} version(s) applied across {} collection(s)",
        report.total_applied(),
        report.collections.len()
    );
    Ok(())
}
