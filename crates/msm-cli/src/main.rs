//! mongo-schema-manager CLI - versioned schema migrations for MongoDB collections

use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;

mod cli;
mod commands;
mod logging;

use cli::{Cli, Commands};
use commands::{check, migrate, render};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.global.verbose);

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Migrate => migrate::execute(&cli.global).await,
        Commands::Check => check::execute(&cli.global).await,
        Commands::Render(args) => render::execute(args, &cli.global).await,
    }
}
