//! Defines the CLI application

use std::path::PathBuf;

use clap::{Args, Parser};

#[derive(Parser)]
#[command(version)]
pub enum Cli {
    /// Write a starter config file
    Setup(SetupArgs),

    /// Create the tables declared on the config file and add their missing columns
    Migrate(MigrateArgs),

    /// List the columns a table currently has on the database
    Columns(ColumnsArgs),
}

#[derive(Args)]
pub struct SetupArgs {
    /// Config file location
    #[arg(short, long, default_value = "./tablemap.toml")]
    pub config: PathBuf,

    /// Database path, relative to the config file
    #[arg(short, long, default_value = "./tablemap.db")]
    pub db_path: String,

    /// Overwrite an existing config file
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Args)]
pub struct MigrateArgs {
    /// Config file location
    #[arg(short, long, default_value = "./tablemap.toml")]
    pub config: PathBuf,
}

#[derive(Args)]
pub struct ColumnsArgs {
    /// Table name
    pub table: String,

    /// Config file location
    #[arg(short, long, default_value = "./tablemap.toml")]
    pub config: PathBuf,
}
