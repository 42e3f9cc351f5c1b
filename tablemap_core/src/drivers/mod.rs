#[cfg(feature = "rusqlite")]
pub mod rusqlite;

#[cfg(feature = "rusqlite")]
mod config;
