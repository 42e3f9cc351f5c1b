pub mod sync;

// SQLite catalog queries, both bind the table name as their only parameter.
// Views share the table namespace and make CREATE TABLE IF NOT EXISTS a silent no-op, so they count as existing
#[cfg(feature = "rusqlite")]
pub(crate) const TABLE_EXISTS_QUERY: &str = "SELECT COUNT(*) FROM sqlite_master \
    WHERE type IN ('table', 'view') AND name = ?1 COLLATE NOCASE";

// table_xinfo, unlike table_info, also lists generated columns
#[cfg(feature = "rusqlite")]
pub(crate) const LIVE_COLUMNS_QUERY: &str =
    "SELECT name FROM pragma_table_xinfo(?1) ORDER BY cid";
