use crate::Report;
use std::fmt;
use thiserror::Error as TError;

/// An Error occurred while registering or committing tables
#[derive(Debug)]
pub struct Error {
    kind: Box<Kind>,
    report: Option<Report>,
}

impl Error {
    /// Instantiate a new Error
    pub(crate) fn new(kind: Kind, report: Option<Report>) -> Error {
        Error {
            kind: Box::new(kind),
            report,
        }
    }

    /// Return the Report of the commit if any
    pub fn report(&self) -> Option<&Report> {
        self.report.as_ref()
    }

    /// Return the kind of error occurred
    pub fn kind(&self) -> &Kind {
        &self.kind
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.kind.source()
    }
}

/// Enum listing possible errors from tablemap.
#[derive(Debug, TError)]
pub enum Kind {
    /// A table shape that can't be turned into a valid table, e.g. zero or several primary keys
    #[error("invalid schema definition for table `{0}`: {1}")]
    InvalidSchemaDefinition(String, String),
    /// Customization was requested but there is no pending table to customize
    #[error("no table registered to configure")]
    NoTableRegistered,
    /// A statement failed while creating, inspecting or altering a table
    #[error("could not commit table `{table}`, {source}")]
    SchemaCommitFailed {
        table: String,
        #[source]
        source: Box<dyn std::error::Error + Sync + Send>,
    },
    /// One or more tables of a commit failed, see [`Report::failures`]
    #[error("failed to commit tables: {}", .0.join(", "))]
    PartialCommit(Vec<String>),
    /// An Error parsing a tablemap Config
    #[error("Error parsing config: {0}")]
    ConfigError(String),
    /// An Error from an underlying database connection Error
    #[error("`{0}`, `{1}`")]
    Connection(String, #[source] Box<dyn std::error::Error + Sync + Send>),
}

impl Kind {
    pub(crate) fn invalid(table: &str, reason: impl Into<String>) -> Kind {
        Kind::InvalidSchemaDefinition(table.to_string(), reason.into())
    }
}

// Helper trait for turning driver errors into tablemap errors.
pub trait WrapCommitError<T, E> {
    fn commit_err(self, table: &str) -> Result<T, Error>;

    fn connection_err(self, msg: &str) -> Result<T, Error>;
}

impl<T, E> WrapCommitError<T, E> for Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn commit_err(self, table: &str) -> Result<T, Error> {
        self.map_err(|err| {
            Error::new(
                Kind::SchemaCommitFailed {
                    table: table.to_string(),
                    source: Box::new(err),
                },
                None,
            )
        })
    }

    fn connection_err(self, msg: &str) -> Result<T, Error> {
        self.map_err(|err| Error::new(Kind::Connection(msg.into(), Box::new(err)), None))
    }
}
