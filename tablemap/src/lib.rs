/*!
Map Rust structs to SQLite tables, with additive schema migrations.

`tablemap` creates the tables your record types describe and keeps them up to date:
on every commit, tables that don't exist yet are created, and tables that already exist get the columns
they are missing with `ALTER TABLE ... ADD COLUMN`. Existing columns are never dropped, renamed or retyped.

## Usage

- Derive [`Table`](derive.Table.html) for each record type, marking exactly one field as `#[table(primary_key)]`,
  or register an explicit list of [`Field`]s with [`TableMapper::add_fields`].
- Register the tables on a [`TableMapper`], optionally customize them with [`TableMapper::configure`],
  and [`commit`](TableMapper::commit) them on a [`rusqlite::Connection`].
- The returned [`Report`] lists the created and altered tables, tables already up to date are left out.

### Example
```rust
use tablemap::rusqlite::Connection;
use tablemap::{Table, TableMapper};

#[derive(Table)]
struct SimpleModel {
    #[table(primary_key)]
    id: i32,
    name: String,
    value: f32,
}

let mut conn = Connection::open_in_memory().unwrap();
let mut mapper = TableMapper::new();
mapper.add::<SimpleModel>().unwrap();
let report = mapper.commit(&mut conn).unwrap();
assert!(report.outcomes()[0].was_table_created());
```
*/

pub use tablemap_core::config;
pub use tablemap_core::error::Kind;
pub use tablemap_core::traits;
pub use tablemap_core::{
    ColumnDescriptor, CommitOutcome, CreateStatus, DataType, Error, Execute, Field, FieldType,
    LiveColumns, Migrate, Report, SqlType, SqliteTypeMap, Table, TableDescriptor, TableHandle,
    TableMapper, TypeMap,
};
pub use tablemap_macros::Table;

#[cfg(feature = "rusqlite")]
pub use tablemap_core::rusqlite;
