//! Main entry point for the tablemap cli tool

mod cli;
mod columns;
mod migrate;
mod setup;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use env_logger::{Env, Target};

fn main() -> Result<()> {
    human_panic::setup_panic!();

    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or("info"));
    builder.target(Target::Stderr).init();

    match Cli::parse() {
        Cli::Setup(args) => setup::handle_setup(&args)?,
        Cli::Migrate(args) => migrate::handle_migration_command(&args)?,
        Cli::Columns(args) => columns::handle_columns_command(&args)?,
    }
    Ok(())
}
