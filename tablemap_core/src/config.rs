use crate::error::Kind;
use crate::table::Field;
use crate::{Error, TableMapper};

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

// tablemap config file, holding the database location and the tables declared outside of Rust code.
// Config can either be instanced with [`Config::new`] or retrieved from a config file with [`Config::from_file_location`]
#[derive(Serialize, Deserialize, Debug)]
pub struct Config {
    main: Main,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    tables: Vec<TableConfig>,
}

/// A table declared on the config file
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct TableConfig {
    pub name: String,
    pub columns: Vec<Field>,
}

impl Config {
    /// create a new config instance
    pub fn new() -> Config {
        Config {
            main: Main { db_path: None },
            tables: Vec::new(),
        }
    }

    /// create a new Config instance from a config file located on the file system
    pub fn from_file_location<T: AsRef<Path>>(location: T) -> Result<Config, Error> {
        let file = std::fs::read_to_string(&location).map_err(|err| {
            Error::new(
                Kind::ConfigError(format!("could not open config file, {}", err)),
                None,
            )
        })?;

        let mut config: Config = toml::from_str(&file).map_err(|err| {
            Error::new(
                Kind::ConfigError(format!("could not parse config file, {}", err)),
                None,
            )
        })?;

        //replace relative path with canonical path
        let mut config_db_path = config.main.db_path.ok_or_else(|| {
            Error::new(
                Kind::ConfigError("field db_path must be present".into()),
                None,
            )
        })?;

        if config_db_path.is_relative() {
            let config_db_dir = match location.as_ref().parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
                _ => std::env::current_dir().map_err(|err| {
                    Error::new(
                        Kind::ConfigError(format!("could not read current directory, {}", err)),
                        None,
                    )
                })?,
            };

            let config_db_dir = fs::canonicalize(config_db_dir).map_err(|err| {
                Error::new(
                    Kind::ConfigError(format!("invalid config directory, {}", err)),
                    None,
                )
            })?;
            config_db_path = config_db_dir.join(&config_db_path)
        }

        config.main.db_path = Some(config_db_path);

        Ok(config)
    }

    pub fn db_path(&self) -> Option<&Path> {
        self.main.db_path.as_deref()
    }

    pub fn set_db_path(self, db_path: &str) -> Config {
        Config {
            main: Main {
                db_path: Some(db_path.into()),
            },
            ..self
        }
    }

    pub fn tables(&self) -> &[TableConfig] {
        &self.tables
    }

    pub fn add_table(mut self, name: &str, columns: Vec<Field>) -> Config {
        self.tables.push(TableConfig {
            name: name.to_string(),
            columns,
        });
        self
    }

    /// Register the declared tables on `mapper`. If any of them is invalid none is registered
    pub fn register(&self, mapper: &mut TableMapper) -> Result<(), Error> {
        mapper.add_all(
            self.tables
                .iter()
                .map(|table| (table.name.clone(), table.columns.clone())),
        )?;
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Config {
        Config::new()
    }
}

#[derive(Serialize, Deserialize, Debug)]
struct Main {
    db_path: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::{Config, Error, Kind};
    use crate::table::Field;
    use crate::types::DataType;
    use crate::TableMapper;
    use std::io::Write;

    #[test]
    fn returns_config_error_from_invalid_config_location() {
        let config = Config::from_file_location("invalid_path").unwrap_err();
        match config.kind() {
            Kind::ConfigError(msg) => assert!(msg.contains("could not open config file")),
            _ => panic!("test failed"),
        }
    }

    #[test]
    fn returns_config_error_from_invalid_toml_file() {
        let config = "[<$%
                     db_path = \"db.sql\" \n";

        let mut config_file = tempfile::NamedTempFile::new_in(".").unwrap();
        config_file.write_all(config.as_bytes()).unwrap();
        let config: Error = Config::from_file_location(config_file.path()).unwrap_err();
        match config.kind() {
            Kind::ConfigError(msg) => assert!(msg.contains("could not parse config file")),
            _ => panic!("test failed"),
        }
    }

    #[test]
    fn returns_config_error_without_db_path() {
        let config = "[main] \n";

        let mut config_file = tempfile::NamedTempFile::new_in(".").unwrap();
        config_file.write_all(config.as_bytes()).unwrap();
        let config: Error = Config::from_file_location(config_file.path()).unwrap_err();
        match config.kind() {
            Kind::ConfigError(msg) => assert!(msg.contains("db_path must be present")),
            _ => panic!("test failed"),
        }
    }

    #[test]
    fn resolves_db_path_relative_to_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let location = dir.path().join("tablemap.toml");
        std::fs::write(&location, "[main]\ndb_path = \"app.db\"\n").unwrap();

        let config = Config::from_file_location(&location).unwrap();
        assert_eq!(
            dir.path().canonicalize().unwrap().join("app.db"),
            config.db_path().unwrap()
        );
    }

    #[test]
    fn parses_declared_tables() {
        let config = r#"
            [main]
            db_path = "/tmp/app.db"

            [[tables]]
            name = "SimpleModel"
            columns = [
                { name = "Id", type = "integer", primary_key = true },
                { name = "Name", type = "text", not_null = true, default = "''" },
                { name = "Value", type = "float" },
            ]
        "#;

        let mut config_file = tempfile::NamedTempFile::new_in(".").unwrap();
        config_file.write_all(config.as_bytes()).unwrap();
        let config = Config::from_file_location(config_file.path()).unwrap();

        let tables = config.tables();
        assert_eq!(1, tables.len());
        assert_eq!("SimpleModel", tables[0].name);
        assert_eq!(
            Field::new("Name", DataType::Text)
                .not_null()
                .default_value("''"),
            tables[0].columns[1]
        );

        let mut mapper = TableMapper::new();
        config.register(&mut mapper).unwrap();
        assert_eq!(
            "CREATE TABLE IF NOT EXISTS SimpleModel (Id INTEGER, Name TEXT NOT NULL DEFAULT '', Value REAL, PRIMARY KEY(Id))",
            mapper.pending()[0].create_table_statement()
        );
    }

    #[test]
    fn registers_no_table_when_one_is_invalid() {
        let config = Config::new()
            .set_db_path("app.db")
            .add_table("cars", vec![Field::new("id", DataType::Integer).primary_key()])
            .add_table("motos", vec![Field::new("id", DataType::Integer)]);

        let mut mapper = TableMapper::new();
        let err = config.register(&mut mapper).unwrap_err();
        match err.kind() {
            Kind::InvalidSchemaDefinition(table, _) => assert_eq!("motos", table),
            _ => panic!("test failed"),
        }
        assert!(mapper.pending().is_empty());
    }

    #[test]
    fn serializes_built_config() {
        let config = Config::new()
            .set_db_path("app.db")
            .add_table("cars", vec![Field::new("id", DataType::Integer).primary_key()]);
        let serialized = toml::to_string(&config).unwrap();
        assert!(serialized.contains("db_path = \"app.db\""));
        assert!(serialized.contains("name = \"cars\""));
    }
}
