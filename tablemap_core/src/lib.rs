#[cfg(feature = "config")]
pub mod config;
mod drivers;
pub mod error;
mod mapper;
mod report;
mod table;
pub mod traits;
mod types;

pub use crate::error::Error;
pub use crate::mapper::{TableHandle, TableMapper};
pub use crate::report::{CommitOutcome, Report};
pub use crate::table::{ColumnDescriptor, Field, Table, TableDescriptor};
pub use crate::traits::sync::{CreateStatus, Execute, LiveColumns, Migrate};
pub use crate::types::{DataType, FieldType, SqlType, SqliteTypeMap, TypeMap};

#[cfg(feature = "rusqlite")]
pub use rusqlite;
