//! SQL schema generation with customizable table prefixes.
//!
//! Pages and their options live in two tables:
//!
//! - `{prefix}pages`: one row per source path with the parsed text fields
//!   and a SHA-256 checksum of the normalized document
//! - `{prefix}options`: ordered options belonging to a page
//!
//! Prefixes must contain only alphanumeric characters and underscores, so
//! several isolated page sets can share one database file.

use crate::error::{Result, SqliteError};

/// Validates that a table prefix contains only alphanumeric characters and underscores.
pub(crate) fn validate_prefix(prefix: &str) -> Result<()> {
    if prefix.is_empty() {
        return Err(SqliteError::InvalidPrefix(prefix.to_string()));
    }
    if !prefix.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(SqliteError::InvalidPrefix(prefix.to_string()));
    }
    Ok(())
}

/// Generates the complete SQL schema for both tables with the given prefix.
///
/// # Errors
///
/// Returns [`SqliteError::InvalidPrefix`] if the prefix is empty or contains
/// characters other than alphanumerics and underscores.
pub fn generate_schema_sql(prefix: &str) -> Result<String> {
    validate_prefix(prefix)?;

    let sql = format!(
        r#"
CREATE TABLE IF NOT EXISTS {prefix}pages (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    path TEXT NOT NULL UNIQUE,
    name TEXT NOT NULL,
    description TEXT NOT NULL,
    synopsis TEXT NOT NULL,
    checksum TEXT NOT NULL,
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE TABLE IF NOT EXISTS {prefix}options (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    page_id INTEGER NOT NULL,
    position INTEGER NOT NULL,
    token TEXT NOT NULL,
    description TEXT NOT NULL,
    UNIQUE (page_id, position),
    FOREIGN KEY (page_id) REFERENCES {prefix}pages(id) ON DELETE CASCADE
);

CREATE INDEX IF NOT EXISTS idx_{prefix}pages_name ON {prefix}pages(name);
CREATE INDEX IF NOT EXISTS idx_{prefix}options_token ON {prefix}options(token);
"#,
        prefix = prefix
    );

    Ok(sql)
}

/// Generates SQL to drop both tables in reverse dependency order.
///
/// # Errors
///
/// Returns [`SqliteError::InvalidPrefix`] if the prefix is invalid.
pub fn generate_drop_sql(prefix: &str) -> Result<String> {
    validate_prefix(prefix)?;

    let sql = format!(
        r#"
DROP TABLE IF EXISTS {prefix}options;
DROP TABLE IF EXISTS {prefix}pages;
"#,
        prefix = prefix
    );

    Ok(sql)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_prefix() {
        assert!(validate_prefix("mp_").is_ok());
        assert!(validate_prefix("test123").is_ok());
        assert!(validate_prefix("A_B_C").is_ok());
    }

    #[test]
    fn test_invalid_prefix_empty() {
        assert!(validate_prefix("").is_err());
    }

    #[test]
    fn test_invalid_prefix_special_chars() {
        assert!(validate_prefix("drop;--").is_err());
        assert!(validate_prefix("hello world").is_err());
        assert!(validate_prefix("test-prefix").is_err());
        assert!(validate_prefix("päge_").is_err());
    }

    #[test]
    fn test_generate_schema_sql_contains_tables_and_indexes() {
        let sql = generate_schema_sql("mp_").unwrap();
        assert!(sql.contains("mp_pages"));
        assert!(sql.contains("mp_options"));
        assert!(sql.contains("idx_mp_pages_name"));
        assert!(sql.contains("idx_mp_options_token"));
    }

    #[test]
    fn test_generate_drop_sql_contains_all_tables() {
        let sql = generate_drop_sql("mp_").unwrap();
        assert!(sql.contains("DROP TABLE IF EXISTS mp_options"));
        assert!(sql.contains("DROP TABLE IF EXISTS mp_pages"));
        assert!(generate_drop_sql("").is_err());
    }

    #[test]
    fn test_options_cascade_with_page() {
        let sql = generate_schema_sql("t_").unwrap();
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        conn.execute_batch("PRAGMA foreign_keys = ON;").unwrap();
        conn.execute_batch(&sql).unwrap();

        conn.execute(
            "INSERT INTO t_pages (path, name, description, synopsis, checksum) \
             VALUES ('a.1.gz', 'a', 'd', 's', 'c')",
            [],
        )
        .unwrap();
        let page_id = conn.last_insert_rowid();
        conn.execute(
            "INSERT INTO t_options (page_id, position, token, description) VALUES (?1, 0, '-a', 'all')",
            [page_id],
        )
        .unwrap();

        // Same position twice on one page is rejected
        assert!(conn
            .execute(
                "INSERT INTO t_options (page_id, position, token, description) VALUES (?1, 0, '-b', 'b')",
                [page_id],
            )
            .is_err());

        conn.execute("DELETE FROM t_pages WHERE id = ?1", [page_id])
            .unwrap();
        let remaining: i64 = conn
            .query_row("SELECT COUNT(*) FROM t_options", [], |row| row.get(0))
            .unwrap();
        assert_eq!(remaining, 0);
    }
}
