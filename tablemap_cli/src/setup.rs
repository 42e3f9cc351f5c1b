//! Submodule for handling setup commands
//!
//! Setup writes a config file pointing at the database, plus a commented
//! table declaration to start from. Tables declared there are created and
//! kept up to date by `tablemap migrate`.

use anyhow::{bail, Context, Result};
use std::fs;
use tablemap_core::config::Config;

use crate::cli::SetupArgs;

const TABLE_EXAMPLE: &str = r#"
# Declare one [[tables]] entry per table, exactly one column must be the primary key.
# Column types: bool, integer, bigint, float, double, decimal, text, bytes, datetime, uuid, json
#
# [[tables]]
# name = "persons"
# columns = [
#     { name = "id", type = "integer", primary_key = true },
#     { name = "name", type = "text", not_null = true, default = "''" },
#     { name = "city", type = "text" },
# ]
"#;

pub fn handle_setup(args: &SetupArgs) -> Result<()> {
    if args.config.exists() && !args.force {
        bail!(
            "{} already exists, use --force to overwrite it",
            args.config.display()
        );
    }

    let config = Config::new().set_db_path(&args.db_path);
    let mut content = toml::to_string(&config)?;
    content.push_str(TABLE_EXAMPLE);

    fs::write(&args.config, content)
        .with_context(|| format!("could not write {}", args.config.display()))?;
    log::info!("wrote {}", args.config.display());
    Ok(())
}
