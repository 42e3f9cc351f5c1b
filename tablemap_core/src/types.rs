use std::fmt;

/// The data type of a record field, as seen from Rust.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DataType {
    Bool,
    Integer,
    BigInt,
    Float,
    Double,
    Decimal,
    Text,
    Bytes,
    DateTime,
    Uuid,
    Json,
}

/// The column type a [`DataType`] is stored as.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum SqlType {
    Integer,
    Real,
    Numeric,
    Text,
    Blob,
    /// Written to the DDL verbatim
    Custom(String),
}

impl fmt::Display for SqlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sql_type = match self {
            SqlType::Integer => "INTEGER",
            SqlType::Real => "REAL",
            SqlType::Numeric => "NUMERIC",
            SqlType::Text => "TEXT",
            SqlType::Blob => "BLOB",
            SqlType::Custom(custom) => custom,
        };
        write!(f, "{}", sql_type)
    }
}

/// Maps field data types to column types.
///
/// [`TableMapper`](crate::TableMapper) uses [`SqliteTypeMap`] unless told otherwise, implement this
/// trait to store some data type differently, e.g. dates as unix timestamps.
pub trait TypeMap {
    fn sql_type(&self, data_type: DataType) -> SqlType;
}

/// SQLite type affinities
#[derive(Clone, Copy, Debug, Default)]
pub struct SqliteTypeMap;

impl TypeMap for SqliteTypeMap {
    fn sql_type(&self, data_type: DataType) -> SqlType {
        match data_type {
            DataType::Bool | DataType::Integer | DataType::BigInt => SqlType::Integer,
            DataType::Float | DataType::Double => SqlType::Real,
            DataType::Decimal => SqlType::Numeric,
            DataType::Text | DataType::DateTime | DataType::Uuid | DataType::Json => SqlType::Text,
            DataType::Bytes => SqlType::Blob,
        }
    }
}

impl<F> TypeMap for F
where
    F: Fn(DataType) -> SqlType,
{
    fn sql_type(&self, data_type: DataType) -> SqlType {
        self(data_type)
    }
}

/// Rust types that can be stored in a column.
///
/// Used by `#[derive(Table)]` to find the [`DataType`] of each field.
pub trait FieldType {
    const DATA_TYPE: DataType;
}

macro_rules! impl_field_type {
    ($data_type:ident: $($ty:ty),+) => {
        $(
            impl FieldType for $ty {
                const DATA_TYPE: DataType = DataType::$data_type;
            }
        )+
    };
}

impl_field_type!(Bool: bool);
impl_field_type!(Integer: i8, i16, i32, u8, u16, u32);
impl_field_type!(BigInt: i64, u64, isize, usize);
impl_field_type!(Float: f32);
impl_field_type!(Double: f64);
impl_field_type!(Text: String, char);
impl_field_type!(Bytes: Vec<u8>);

impl<T: FieldType> FieldType for Option<T> {
    const DATA_TYPE: DataType = T::DATA_TYPE;
}

#[cfg(test)]
mod tests {
    use super::{DataType, FieldType, SqlType, SqliteTypeMap, TypeMap};

    #[test]
    fn sqlite_maps_to_affinities() {
        let map = SqliteTypeMap;
        assert_eq!(SqlType::Integer, map.sql_type(DataType::Bool));
        assert_eq!(SqlType::Integer, map.sql_type(DataType::BigInt));
        assert_eq!(SqlType::Real, map.sql_type(DataType::Float));
        assert_eq!(SqlType::Numeric, map.sql_type(DataType::Decimal));
        assert_eq!(SqlType::Text, map.sql_type(DataType::DateTime));
        assert_eq!(SqlType::Blob, map.sql_type(DataType::Bytes));
    }

    #[test]
    fn closures_are_type_maps() {
        let map = |data_type: DataType| match data_type {
            DataType::DateTime => SqlType::Custom("DATETIME".into()),
            other => SqliteTypeMap.sql_type(other),
        };
        assert_eq!("DATETIME", map.sql_type(DataType::DateTime).to_string());
        assert_eq!("TEXT", map.sql_type(DataType::Text).to_string());
    }

    #[test]
    fn option_has_inner_data_type() {
        assert_eq!(DataType::Integer, <Option<i32> as FieldType>::DATA_TYPE);
        assert_eq!(DataType::Bytes, <Option<Vec<u8>> as FieldType>::DATA_TYPE);
        assert_eq!(DataType::Double, <f64 as FieldType>::DATA_TYPE);
    }
}
