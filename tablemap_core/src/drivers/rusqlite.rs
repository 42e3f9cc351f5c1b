use crate::traits::sync::{CreateStatus, Execute, LiveColumns, Migrate};
use crate::traits::{LIVE_COLUMNS_QUERY, TABLE_EXISTS_QUERY};

use rusqlite::{Connection as RqlConnection, Error as RqlError};

fn table_exists(conn: &RqlConnection, table_name: &str) -> Result<bool, RqlError> {
    let count: i64 = conn.query_row(TABLE_EXISTS_QUERY, [table_name], |row| row.get(0))?;
    Ok(count > 0)
}

impl Execute for RqlConnection {
    type Error = RqlError;

    fn execute(&mut self, statement: &str) -> Result<usize, Self::Error> {
        self.execute_batch(statement)?;
        Ok(self.changes() as usize)
    }

    fn create_table(
        &mut self,
        table_name: &str,
        statement: &str,
    ) -> Result<CreateStatus, Self::Error> {
        // a savepoint nests inside a transaction the caller may have open
        let savepoint = self.savepoint()?;
        if table_exists(&savepoint, table_name)? {
            return Ok(CreateStatus::AlreadyExists);
        }
        savepoint.execute_batch(statement)?;
        savepoint.commit()?;
        Ok(CreateStatus::Created)
    }
}

impl LiveColumns for RqlConnection {
    fn live_columns(&mut self, table_name: &str) -> Result<Vec<String>, Self::Error> {
        let mut stmt = self.prepare(LIVE_COLUMNS_QUERY)?;
        let mut rows = stmt.query([table_name])?;
        let mut columns = Vec::new();
        while let Some(row) = rows.next()? {
            columns.push(row.get(0)?);
        }
        Ok(columns)
    }
}

impl Migrate for RqlConnection {
    fn identifiers_match(declared: &str, live: &str) -> bool {
        declared.eq_ignore_ascii_case(live)
    }
}
