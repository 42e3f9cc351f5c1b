use crate::error::Kind;
use crate::types::{DataType, SqlType, TypeMap};
use crate::Error;
use std::fmt;

/// Types that map onto a table.
///
/// Usually implemented with `#[derive(Table)]`, but nothing stops a manual implementation:
///
/// ```
/// use tablemap_core::{DataType, Field, Table};
///
/// struct Car;
///
/// impl Table for Car {
///     fn table_name() -> &'static str {
///         "cars"
///     }
///
///     fn fields() -> Vec<Field> {
///         vec![
///             Field::new("id", DataType::Integer).primary_key(),
///             Field::new("brand", DataType::Text),
///         ]
///     }
/// }
/// ```
pub trait Table {
    fn table_name() -> &'static str;

    fn fields() -> Vec<Field>;
}

/// A field of a record type, the input [`TableDescriptor::build`] turns into a column.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Field {
    name: String,
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    data_type: DataType,
    #[cfg_attr(feature = "serde", serde(default))]
    primary_key: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    not_null: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    unique: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    default: Option<String>,
}

impl Field {
    pub fn new(name: impl Into<String>, data_type: DataType) -> Field {
        Field {
            name: name.into(),
            data_type,
            primary_key: false,
            not_null: false,
            unique: false,
            default: None,
        }
    }

    /// Mark this field as the primary key of its table
    pub fn primary_key(self) -> Field {
        Field {
            primary_key: true,
            ..self
        }
    }

    pub fn not_null(self) -> Field {
        Field {
            not_null: true,
            ..self
        }
    }

    pub fn unique(self) -> Field {
        Field {
            unique: true,
            ..self
        }
    }

    /// Set the column default, `default` is copied to the DDL as is so string literals must be quoted
    pub fn default_value(self, default: impl Into<String>) -> Field {
        Field {
            default: Some(default.into()),
            ..self
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    pub fn is_primary_key(&self) -> bool {
        self.primary_key
    }
}

/// A column of a [`TableDescriptor`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColumnDescriptor {
    name: String,
    sql_type: SqlType,
    primary_key: bool,
    not_null: bool,
    unique: bool,
    default: Option<String>,
}

impl ColumnDescriptor {
    pub fn new(name: impl Into<String>, sql_type: SqlType) -> ColumnDescriptor {
        ColumnDescriptor {
            name: name.into(),
            sql_type,
            primary_key: false,
            not_null: false,
            unique: false,
            default: None,
        }
    }

    fn from_field(field: Field, type_map: &dyn TypeMap) -> ColumnDescriptor {
        ColumnDescriptor {
            sql_type: type_map.sql_type(field.data_type),
            name: field.name,
            primary_key: field.primary_key,
            not_null: field.not_null,
            unique: field.unique,
            default: field.default,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sql_type(&self) -> &SqlType {
        &self.sql_type
    }

    pub fn is_primary_key(&self) -> bool {
        self.primary_key
    }

    pub fn is_not_null(&self) -> bool {
        self.not_null
    }

    pub fn is_unique(&self) -> bool {
        self.unique
    }

    pub fn default_value(&self) -> Option<&str> {
        self.default.as_deref()
    }

    pub fn set_sql_type(&mut self, sql_type: SqlType) -> &mut Self {
        self.sql_type = sql_type;
        self
    }

    pub fn set_not_null(&mut self, not_null: bool) -> &mut Self {
        self.not_null = not_null;
        self
    }

    pub fn set_unique(&mut self, unique: bool) -> &mut Self {
        self.unique = unique;
        self
    }

    pub fn set_default_value(&mut self, default: Option<&str>) -> &mut Self {
        self.default = default.map(String::from);
        self
    }

    /// The column definition as used in both `CREATE TABLE` and `ADD COLUMN`.
    /// The primary key is declared by the table constraint, never here.
    pub fn definition(&self) -> String {
        let mut definition = format!("{} {}", self.name, self.sql_type);
        if self.not_null {
            definition.push_str(" NOT NULL");
        }
        if self.unique {
            definition.push_str(" UNIQUE");
        }
        if let Some(default) = &self.default {
            definition.push_str(" DEFAULT ");
            definition.push_str(default);
        }
        definition
    }
}

impl fmt::Display for ColumnDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.definition())
    }
}

// SQLite compares identifiers ignoring ASCII case
fn same_identifier(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b)
}

/// A table that should exist on the database, with its columns in declaration order
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableDescriptor {
    name: String,
    columns: Vec<ColumnDescriptor>,
}

impl TableDescriptor {
    /// Build a table from the fields of a record type, resolving each column type with `type_map`.
    /// Exactly one field must be the primary key.
    pub fn build(
        name: impl Into<String>,
        fields: Vec<Field>,
        type_map: &dyn TypeMap,
    ) -> Result<TableDescriptor, Error> {
        let table = TableDescriptor {
            name: name.into(),
            columns: fields
                .into_iter()
                .map(|field| ColumnDescriptor::from_field(field, type_map))
                .collect(),
        };
        table.validate()?;
        Ok(table)
    }

    /// Build a table from a [`Table`] implementor
    pub fn from_type<T: Table>(type_map: &dyn TypeMap) -> Result<TableDescriptor, Error> {
        TableDescriptor::build(T::table_name(), T::fields(), type_map)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn columns(&self) -> &[ColumnDescriptor] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&ColumnDescriptor> {
        self.columns.iter().find(|c| same_identifier(&c.name, name))
    }

    pub fn column_mut(&mut self, name: &str) -> Option<&mut ColumnDescriptor> {
        self.columns
            .iter_mut()
            .find(|c| same_identifier(&c.name, name))
    }

    /// The primary key column, always present on a validated table
    pub fn primary_key(&self) -> Option<&ColumnDescriptor> {
        self.columns.iter().find(|c| c.primary_key)
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.name = name.into();
        self
    }

    /// Append a column, it's added to existing tables on the next commit
    pub fn add_column(&mut self, column: ColumnDescriptor) -> &mut Self {
        self.columns.push(column);
        self
    }

    /// Remove a column that isn't the primary key. Only affects tables not yet created,
    /// existing columns are never dropped.
    pub fn remove_column(&mut self, name: &str) -> Option<ColumnDescriptor> {
        let position = self
            .columns
            .iter()
            .position(|c| !c.primary_key && same_identifier(&c.name, name))?;
        Some(self.columns.remove(position))
    }

    /// Move the primary key to the column named `name`, returns false if there is no such column
    pub fn set_primary_key(&mut self, name: &str) -> bool {
        if self.column(name).is_none() {
            return false;
        }
        for column in self.columns.iter_mut() {
            column.primary_key = same_identifier(&column.name, name);
        }
        true
    }

    /// Check the table has a name, uniquely named columns and exactly one primary key
    pub fn validate(&self) -> Result<(), Error> {
        if self.name.trim().is_empty() {
            return Err(Error::new(
                Kind::invalid(&self.name, "table name must not be empty"),
                None,
            ));
        }

        for (i, column) in self.columns.iter().enumerate() {
            if column.name.trim().is_empty() {
                return Err(Error::new(
                    Kind::invalid(&self.name, format!("column {} has an empty name", i)),
                    None,
                ));
            }
            if self.columns[..i]
                .iter()
                .any(|c| same_identifier(&c.name, &column.name))
            {
                return Err(Error::new(
                    Kind::invalid(&self.name, format!("column {} is repeated", column.name)),
                    None,
                ));
            }
        }

        match self.columns.iter().filter(|c| c.primary_key).count() {
            1 => Ok(()),
            0 => Err(Error::new(
                Kind::invalid(&self.name, "no primary key declared"),
                None,
            )),
            n => Err(Error::new(
                Kind::invalid(
                    &self.name,
                    format!("{} primary keys declared, expected exactly one", n),
                ),
                None,
            )),
        }
    }

    pub fn create_table_statement(&self) -> String {
        let mut definitions: Vec<String> = self.columns.iter().map(|c| c.definition()).collect();
        if let Some(primary_key) = self.primary_key() {
            definitions.push(format!("PRIMARY KEY({})", primary_key.name));
        }
        format!(
            "CREATE TABLE IF NOT EXISTS {} ({})",
            self.name,
            definitions.join(", ")
        )
    }

    pub fn add_column_statement(&self, column: &ColumnDescriptor) -> String {
        format!("ALTER TABLE {} ADD COLUMN {}", self.name, column.definition())
    }
}
