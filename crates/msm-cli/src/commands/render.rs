//! Render command implementation

use anyhow::{Context, Result};
use msm_core::{ResolvedSchema, VersionNumber};

use crate::cli::{GlobalArgs, RenderArgs, RenderFormat};
use crate::commands::common::load_files;

/// Execute the render command
pub(crate) async fn execute(args: &RenderArgs, global: &GlobalArgs) -> Result<()> {
    let version = VersionNumber::parse(&args.schema_version)?;
    let (_, files) = load_files(global)?;

    let resolved = ResolvedSchema::load(&files, files.enumerators(), &args.collection, &version)
        .with_context(|| format!("Failed to resolve {} {}", args.collection, version))?;
    let document = if args.api {
        &resolved.api_document
    } else {
        &resolved.validator
    };

    let output = match args.output {
        RenderFormat::Json => serde_json::to_string_pretty(document)?,
        RenderFormat::Yaml => serde_yaml::to_string(document)?,
    };
    println!("{output}");
    Ok(())
}
