use anyhow::{bail, Context, Result};
use tablemap_core::config::Config;
use tablemap_core::LiveColumns;

use crate::cli::ColumnsArgs;

pub fn handle_columns_command(args: &ColumnsArgs) -> Result<()> {
    let config = Config::from_file_location(&args.config)
        .with_context(|| format!("could not parse the config file {}", args.config.display()))?;
    let mut conn = config.connect()?;

    let columns = conn
        .live_columns(&args.table)
        .with_context(|| format!("could not read the columns of {}", args.table))?;
    if columns.is_empty() {
        bail!("table {} does not exist", args.table);
    }

    for column in columns {
        println!("{}", column);
    }
    Ok(())
}
