use crate::config::Config;
use crate::error::{Kind, WrapCommitError};
use crate::Error;

impl Config {
    /// Open the configured database, creating the file if it doesn't exist yet
    pub fn connect(&self) -> Result<rusqlite::Connection, Error> {
        let path = self.db_path().ok_or_else(|| {
            Error::new(
                Kind::ConfigError("field db_path must be present".into()),
                None,
            )
        })?;
        log::debug!("opening database {}", path.display());
        rusqlite::Connection::open(path).connection_err("could not open database")
    }
}
