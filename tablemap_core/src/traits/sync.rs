use crate::error::{Kind, WrapCommitError};
use crate::report::CommitOutcome;
use crate::table::{ColumnDescriptor, TableDescriptor};
use crate::{Error, Report};

/// Result of issuing a `CREATE TABLE IF NOT EXISTS` statement
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CreateStatus {
    Created,
    AlreadyExists,
}

pub trait Execute {
    type Error: std::error::Error + Send + Sync + 'static;

    fn execute(&mut self, statement: &str) -> Result<usize, Self::Error>;

    /// Run a create table `statement` for `table_name`, telling apart a new table from one that was already there
    fn create_table(
        &mut self,
        table_name: &str,
        statement: &str,
    ) -> Result<CreateStatus, Self::Error>;
}

pub trait LiveColumns: Execute {
    /// The names of the columns `table_name` currently has on the database
    fn live_columns(&mut self, table_name: &str) -> Result<Vec<String>, Self::Error>;
}

/// The columns of `table` missing from `live`, in declaration order
pub(crate) fn new_columns<'a>(
    table: &'a TableDescriptor,
    live: &[String],
    identifiers_match: impl Fn(&str, &str) -> bool,
) -> Vec<&'a ColumnDescriptor> {
    table
        .columns()
        .iter()
        .filter(|column| {
            !live
                .iter()
                .any(|live| identifiers_match(column.name(), live.as_str()))
        })
        .collect()
}

pub trait Migrate: LiveColumns
where
    Self: Sized,
{
    /// How the database compares identifiers, exact by default
    fn identifiers_match(declared: &str, live: &str) -> bool {
        declared == live
    }

    /// Create `table`, or add the columns it's missing if it already exists.
    /// Returns `None` when the table was already up to date.
    fn commit_table(&mut self, table: &TableDescriptor) -> Result<Option<CommitOutcome>, Error> {
        let statement = table.create_table_statement();
        log::debug!("executing: {}", statement);

        match self
            .create_table(table.name(), &statement)
            .commit_err(table.name())?
        {
            CreateStatus::Created => {
                log::info!("created table {}", table.name());
                return Ok(Some(CommitOutcome::created(table.name())));
            }
            CreateStatus::AlreadyExists => {
                log::debug!("table {} already exists, checking columns", table.name());
            }
        }

        let live = self
            .live_columns(table.name())
            .commit_err(table.name())?;
        let new_columns = new_columns(table, &live, Self::identifiers_match);

        if new_columns.is_empty() {
            log::debug!("table {} is up to date", table.name());
            return Ok(None);
        }

        let mut columns_added = Vec::with_capacity(new_columns.len());
        for column in new_columns {
            let statement = table.add_column_statement(column);
            log::debug!("executing: {}", statement);
            if let Err(err) = self.execute(&statement).commit_err(table.name()) {
                if !columns_added.is_empty() {
                    log::error!(
                        "table {} was left with columns {} added",
                        table.name(),
                        columns_added.join(", ")
                    );
                }
                return Err(err);
            }
            log::info!("added column {} to {}", column.name(), table.name());
            columns_added.push(column.name().to_string());
        }

        Ok(Some(CommitOutcome::altered(table.name(), columns_added)))
    }

    /// Commit every table in order. A failing table doesn't stop the following ones,
    /// the failures are returned in the [`Report`] of a [`Kind::PartialCommit`] error.
    fn commit_tables(&mut self, tables: Vec<TableDescriptor>) -> Result<Report, Error> {
        if tables.is_empty() {
            log::info!("no tables to commit");
        }

        let mut outcomes = Vec::new();
        let mut failures = Vec::new();

        for table in tables.iter() {
            match self.commit_table(table) {
                Ok(Some(outcome)) => outcomes.push(outcome),
                Ok(None) => {}
                Err(err) => {
                    log::error!("table {} failed to commit: {}", table.name(), err);
                    failures.push(err);
                }
            }
        }

        if failures.is_empty() {
            return Ok(Report::new(outcomes, failures));
        }

        let failed = failures
            .iter()
            .filter_map(|err| match err.kind() {
                Kind::SchemaCommitFailed { table, .. } => Some(table.clone()),
                _ => None,
            })
            .collect();
        Err(Error::new(
            Kind::PartialCommit(failed),
            Some(Report::new(outcomes, failures)),
        ))
    }
}
