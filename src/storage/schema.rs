//! Database schema definitions
//!
//! The crawler is the only writer and creates the table on first run. The
//! presenter side never touches the schema.

/// SQL schema for the database
pub const SCHEMA_SQL: &str = r#"
-- One row per quotation; quote text is the natural key
CREATE TABLE IF NOT EXISTS quotes (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    quote TEXT UNIQUE,
    author TEXT,
    tags TEXT,
    author_profile TEXT
);
"#;

/// Initializes the database schema
///
/// # Arguments
///
/// * `conn` - The database connection
///
/// # Returns
///
/// * `Ok(())` - Schema initialized successfully
/// * `Err(rusqlite::Error)` - Failed to initialize schema
pub fn initialize_schema(conn: &rusqlite::Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}
