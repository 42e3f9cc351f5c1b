use crate::Error;
use std::fmt;

/// What a commit did to a single table.
///
/// Only tables that were created or altered get one, tables already up to date are left out.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommitOutcome {
    table_name: String,
    was_table_created: bool,
    columns_added: Vec<String>,
}

impl CommitOutcome {
    pub(crate) fn created(table_name: &str) -> CommitOutcome {
        CommitOutcome {
            table_name: table_name.to_string(),
            was_table_created: true,
            columns_added: Vec::new(),
        }
    }

    pub(crate) fn altered(table_name: &str, columns_added: Vec<String>) -> CommitOutcome {
        CommitOutcome {
            table_name: table_name.to_string(),
            was_table_created: false,
            columns_added,
        }
    }

    /// Name of the table created or altered
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// True if the table didn't exist and was created
    pub fn was_table_created(&self) -> bool {
        self.was_table_created
    }

    /// The columns added to an existing table, in declaration order. Empty for created tables
    pub fn columns_added(&self) -> &[String] {
        &self.columns_added
    }
}

impl fmt::Display for CommitOutcome {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.was_table_created {
            write!(fmt, "created table {}", self.table_name)
        } else {
            write!(
                fmt,
                "added columns {} to {}",
                self.columns_added.join(", "),
                self.table_name
            )
        }
    }
}

/// Struct that represents the report of a commit.
/// A `Report` is returned by [`TableMapper::commit`]. If some table failed to commit,
/// the `Report` of the tables that didn't is available through [`Error::report`].
///
/// [`TableMapper::commit`]: crate::TableMapper::commit
#[derive(Debug, Default)]
pub struct Report {
    outcomes: Vec<CommitOutcome>,
    failures: Vec<Error>,
}

impl Report {
    pub(crate) fn new(outcomes: Vec<CommitOutcome>, failures: Vec<Error>) -> Report {
        Report { outcomes, failures }
    }

    /// The tables created or altered, in registration order
    pub fn outcomes(&self) -> &[CommitOutcome] {
        &self.outcomes
    }

    /// The errors of the tables that failed, one per table
    pub fn failures(&self) -> &[Error] {
        &self.failures
    }

    /// True when nothing was created or altered
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}
