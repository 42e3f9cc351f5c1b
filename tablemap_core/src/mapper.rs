use crate::error::Kind;
use crate::table::{Field, Table, TableDescriptor};
use crate::traits::sync::Migrate;
use crate::types::{SqliteTypeMap, TypeMap};
use crate::{Error, Report};

/// Refers to a table registered on a [`TableMapper`], returned by [`TableMapper::add`].
/// A handle is only valid until the next commit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TableHandle {
    batch: u64,
    index: usize,
}

/// Struct that represents the entrypoint to create and update tables.
///
/// Tables are registered with [`add`](TableMapper::add), optionally customized, and then
/// committed together, creating the missing tables and adding the missing columns
/// of the existing ones. Columns are never dropped, renamed or retyped.
///
/// ```
/// use tablemap_core::{ColumnDescriptor, DataType, Field, SqlType, TableMapper};
///
/// let mut mapper = TableMapper::new();
/// let cars = mapper
///     .add_fields(
///         "cars",
///         vec![
///             Field::new("id", DataType::Integer).primary_key(),
///             Field::new("brand", DataType::Text),
///         ],
///     )
///     .unwrap();
/// mapper
///     .configure(cars, |t| {
///         t.add_column(ColumnDescriptor::new("year", SqlType::Integer));
///     })
///     .unwrap();
/// assert_eq!(3, mapper.pending()[0].columns().len());
/// ```
pub struct TableMapper {
    tables: Vec<TableDescriptor>,
    type_map: Box<dyn TypeMap>,
    batch: u64,
}

impl Default for TableMapper {
    fn default() -> TableMapper {
        TableMapper::new()
    }
}

impl TableMapper {
    /// instantiate a new TableMapper mapping types with [`SqliteTypeMap`]
    pub fn new() -> TableMapper {
        TableMapper::with_type_map(Box::new(SqliteTypeMap))
    }

    pub fn with_type_map(type_map: Box<dyn TypeMap>) -> TableMapper {
        TableMapper {
            tables: Vec::new(),
            type_map,
            batch: 0,
        }
    }

    /// Register the table of `T`
    pub fn add<T: Table>(&mut self) -> Result<TableHandle, Error> {
        let table = TableDescriptor::from_type::<T>(self.type_map.as_ref())?;
        self.push(table)
    }

    /// Register a table from an explicit list of fields
    pub fn add_fields(
        &mut self,
        name: impl Into<String>,
        fields: Vec<Field>,
    ) -> Result<TableHandle, Error> {
        let table = TableDescriptor::build(name, fields, self.type_map.as_ref())?;
        self.push(table)
    }

    /// Register several tables from explicit field lists. Either all of them are registered
    /// or, on the first invalid one, none are.
    pub fn add_all<I>(&mut self, tables: I) -> Result<Vec<TableHandle>, Error>
    where
        I: IntoIterator<Item = (String, Vec<Field>)>,
    {
        let registered = self.tables.len();
        let mut handles = Vec::new();
        for (name, fields) in tables {
            match self.add_fields(name, fields) {
                Ok(handle) => handles.push(handle),
                Err(err) => {
                    self.tables.truncate(registered);
                    return Err(err);
                }
            }
        }
        Ok(handles)
    }

    fn push(&mut self, table: TableDescriptor) -> Result<TableHandle, Error> {
        self.check_unique_name(&table, None)?;
        log::debug!("registered table {}", table.name());
        self.tables.push(table);
        Ok(TableHandle {
            batch: self.batch,
            index: self.tables.len() - 1,
        })
    }

    fn check_unique_name(&self, table: &TableDescriptor, skip: Option<usize>) -> Result<(), Error> {
        let repeated = self
            .tables
            .iter()
            .enumerate()
            .filter(|(i, _)| Some(*i) != skip)
            .any(|(_, t)| t.name().eq_ignore_ascii_case(table.name()));
        if repeated {
            return Err(Error::new(
                Kind::invalid(table.name(), "table is already registered"),
                None,
            ));
        }
        Ok(())
    }

    /// Customize the table `handle` refers to before it's committed.
    /// The table is validated again once `options` returns.
    pub fn configure<F>(&mut self, handle: TableHandle, options: F) -> Result<(), Error>
    where
        F: FnOnce(&mut TableDescriptor),
    {
        if handle.batch != self.batch || handle.index >= self.tables.len() {
            return Err(Error::new(Kind::NoTableRegistered, None));
        }
        self.configure_at(handle.index, options)
    }

    /// Customize the last registered table
    pub fn configure_last<F>(&mut self, options: F) -> Result<(), Error>
    where
        F: FnOnce(&mut TableDescriptor),
    {
        match self.tables.len() {
            0 => Err(Error::new(Kind::NoTableRegistered, None)),
            len => self.configure_at(len - 1, options),
        }
    }

    fn configure_at<F>(&mut self, index: usize, options: F) -> Result<(), Error>
    where
        F: FnOnce(&mut TableDescriptor),
    {
        let mut table = self.tables[index].clone();
        options(&mut table);
        table.validate()?;
        self.check_unique_name(&table, Some(index))?;
        self.tables[index] = table;
        Ok(())
    }

    /// The tables waiting to be committed, in registration order
    pub fn pending(&self) -> &[TableDescriptor] {
        &self.tables
    }

    /// Commit all pending tables in the supplied database connection.
    ///
    /// Pending tables are cleared even if some of them fail, those errors are available through
    /// [`Report::failures`] on the report of the returned [`Error`].
    pub fn commit<C>(&mut self, connection: &mut C) -> Result<Report, Error>
    where
        C: Migrate,
    {
        let tables = std::mem::take(&mut self.tables);
        self.batch += 1;
        Migrate::commit_tables(connection, tables)
    }
}

#[cfg(test)]
mod tests {
    use super::TableMapper;
    use crate::error::Kind;
    use crate::table::{ColumnDescriptor, Field, Table};
    use crate::types::{DataType, SqlType};

    struct Person;

    impl Table for Person {
        fn table_name() -> &'static str {
            "persons"
        }

        fn fields() -> Vec<Field> {
            vec![
                Field::new("id", DataType::Integer).primary_key(),
                Field::new("name", DataType::Text),
            ]
        }
    }

    struct TwoKeys;

    impl Table for TwoKeys {
        fn table_name() -> &'static str {
            "two_keys"
        }

        fn fields() -> Vec<Field> {
            vec![
                Field::new("a", DataType::Integer).primary_key(),
                Field::new("b", DataType::Integer).primary_key(),
            ]
        }
    }

    #[test]
    fn registers_tables_in_order() {
        let mut mapper = TableMapper::new();
        mapper.add::<Person>().unwrap();
        mapper
            .add_fields("cars", vec![Field::new("id", DataType::Integer).primary_key()])
            .unwrap();
        let names: Vec<&str> = mapper.pending().iter().map(|t| t.name()).collect();
        assert_eq!(vec!["persons", "cars"], names);
    }

    #[test]
    fn add_all_registers_nothing_on_invalid_table() {
        let mut mapper = TableMapper::new();
        mapper.add::<Person>().unwrap();
        let err = mapper
            .add_all(vec![
                (
                    "cars".to_string(),
                    vec![Field::new("id", DataType::Integer).primary_key()],
                ),
                ("no_key".to_string(), vec![Field::new("id", DataType::Integer)]),
            ])
            .unwrap_err();
        assert!(matches!(err.kind(), Kind::InvalidSchemaDefinition(..)));
        let names: Vec<&str> = mapper.pending().iter().map(|t| t.name()).collect();
        assert_eq!(vec!["persons"], names);

        let handles = mapper
            .add_all(vec![(
                "cars".to_string(),
                vec![Field::new("id", DataType::Integer).primary_key()],
            )])
            .unwrap();
        assert_eq!(1, handles.len());
        assert_eq!(2, mapper.pending().len());
    }

    #[test]
    fn rejects_two_primary_keys() {
        let mut mapper = TableMapper::new();
        let err = mapper.add::<TwoKeys>().unwrap_err();
        assert!(matches!(err.kind(), Kind::InvalidSchemaDefinition(..)));
        assert!(mapper.pending().is_empty());
    }

    #[test]
    fn rejects_repeated_table() {
        let mut mapper = TableMapper::new();
        mapper.add::<Person>().unwrap();
        let err = mapper.add::<Person>().unwrap_err();
        match err.kind() {
            Kind::InvalidSchemaDefinition(table, reason) => {
                assert_eq!("persons", table);
                assert!(reason.contains("already registered"));
            }
            _ => panic!("test failed"),
        }
    }

    #[test]
    fn configure_last_fails_without_tables() {
        let mut mapper = TableMapper::new();
        let err = mapper.configure_last(|t| {
            t.set_name("never");
        });
        assert!(matches!(err.unwrap_err().kind(), Kind::NoTableRegistered));
    }

    #[test]
    fn configure_last_edits_last_table() {
        let mut mapper = TableMapper::new();
        mapper
            .add_fields("cars", vec![Field::new("id", DataType::Integer).primary_key()])
            .unwrap();
        mapper.add::<Person>().unwrap();
        mapper
            .configure_last(|t| {
                t.set_name("people");
                t.add_column(ColumnDescriptor::new("city", SqlType::Text));
            })
            .unwrap();
        assert_eq!("cars", mapper.pending()[0].name());
        assert_eq!("people", mapper.pending()[1].name());
        assert_eq!(3, mapper.pending()[1].columns().len());
    }

    #[test]
    fn configure_by_handle() {
        let mut mapper = TableMapper::new();
        let persons = mapper.add::<Person>().unwrap();
        mapper
            .add_fields("cars", vec![Field::new("id", DataType::Integer).primary_key()])
            .unwrap();
        mapper
            .configure(persons, |t| {
                t.column_mut("name").unwrap().set_not_null(true);
            })
            .unwrap();
        assert!(mapper.pending()[0].column("name").unwrap().is_not_null());
    }

    #[test]
    fn invalid_configuration_is_discarded() {
        let mut mapper = TableMapper::new();
        let persons = mapper.add::<Person>().unwrap();
        let err = mapper
            .configure(persons, |t| {
                t.add_column(ColumnDescriptor::new("NAME", SqlType::Text));
            })
            .unwrap_err();
        assert!(matches!(err.kind(), Kind::InvalidSchemaDefinition(..)));
        assert_eq!(2, mapper.pending()[0].columns().len());
    }

    #[test]
    fn rename_to_pending_table_fails() {
        let mut mapper = TableMapper::new();
        mapper.add::<Person>().unwrap();
        mapper
            .add_fields("cars", vec![Field::new("id", DataType::Integer).primary_key()])
            .unwrap();
        let err = mapper
            .configure_last(|t| {
                t.set_name("PERSONS");
            })
            .unwrap_err();
        assert!(matches!(err.kind(), Kind::InvalidSchemaDefinition(..)));
    }

    #[test]
    fn uses_custom_type_map() {
        let mut mapper = TableMapper::with_type_map(Box::new(|data_type: DataType| match data_type {
            DataType::Bool => SqlType::Custom("BOOLEAN".into()),
            _ => SqlType::Text,
        }));
        mapper
            .add_fields(
                "flags",
                vec![
                    Field::new("id", DataType::Integer).primary_key(),
                    Field::new("enabled", DataType::Bool),
                ],
            )
            .unwrap();
        assert_eq!(
            "CREATE TABLE IF NOT EXISTS flags (id TEXT, enabled BOOLEAN, PRIMARY KEY(id))",
            mapper.pending()[0].create_table_statement()
        );
    }
}
