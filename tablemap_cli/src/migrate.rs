use anyhow::{anyhow, Context, Result};
use tablemap_core::config::Config;
use tablemap_core::error::Kind;
use tablemap_core::{Report, TableMapper};

use crate::cli::MigrateArgs;

pub fn handle_migration_command(args: &MigrateArgs) -> Result<()> {
    let config = Config::from_file_location(&args.config)
        .with_context(|| format!("could not parse the config file {}", args.config.display()))?;

    if config.tables().is_empty() {
        log::warn!("no tables declared on {}", args.config.display());
    }

    let mut mapper = TableMapper::new();
    config
        .register(&mut mapper)
        .context("invalid table declaration")?;

    let mut conn = config.connect()?;
    match mapper.commit(&mut conn) {
        Ok(report) => {
            print_report(&report);
            Ok(())
        }
        Err(err) => {
            if let Some(report) = err.report() {
                print_report(report);
            }
            match err.kind() {
                Kind::PartialCommit(failed) => {
                    Err(anyhow!("{} table(s) failed to commit", failed.len()))
                }
                _ => Err(err.into()),
            }
        }
    }
}

fn print_report(report: &Report) {
    for outcome in report.outcomes() {
        println!("{}", outcome);
    }
    for failure in report.failures() {
        eprintln!("error: {}", failure);
    }
    if report.is_empty() && report.failures().is_empty() {
        println!("all tables are up to date");
    }
}
