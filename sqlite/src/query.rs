//! Runtime page access via SQLite queries.
//!
//! Provides [`PageQuery`] for upserting, loading and deleting parsed pages.
//! Mutations run inside a transaction, and the cascading foreign key on the
//! options table handles cleanup when a page is deleted.
//!
//! # Example
//!
//! ```no_run
//! use manpage_sqlite::{Migration, PageQuery};
//! use rusqlite::Connection;
//!
//! let conn = Connection::open("pages.db").unwrap();
//! let mut migration = Migration::new(conn, "mp_").unwrap();
//! migration.up().unwrap();
//! let conn = migration.into_connection();
//!
//! let query = PageQuery::new(&conn, "mp_").unwrap();
//! let page = manpage_parser::parse("/usr/share/man/man1/ls.1.gz").unwrap();
//! query.upsert_page(&page).unwrap();
//!
//! let stored = query.get_page(&page.path).unwrap();
//! assert!(stored.is_some());
//! ```

use std::path::{Path, PathBuf};

use manpage_core::ManPage;
use rusqlite::{Connection, params};
use tracing::debug;

use crate::convert;
use crate::error::{Result, SqliteError};
use crate::schema::validate_prefix;

/// What an upsert did to the stored page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// No row existed for the path; one was created.
    Inserted { page_id: i64, options: usize },
    /// The stored row had a different checksum and was replaced.
    Updated { page_id: i64, options: usize },
    /// The stored checksum matched; nothing was written.
    Unchanged { page_id: i64 },
}

/// Query interface for reading and writing pages in SQLite.
///
/// Wraps a connection and table prefix. Tables must already exist (see
/// [`Migration::up`](crate::Migration::up)).
pub struct PageQuery<'a> {
    conn: &'a Connection,
    prefix: String,
}

impl<'a> PageQuery<'a> {
    /// Creates a new query interface for the given connection and table prefix.
    ///
    /// # Errors
    ///
    /// Returns [`SqliteError::InvalidPrefix`] if the prefix is invalid.
    pub fn new(conn: &'a Connection, prefix: impl Into<String>) -> Result<Self> {
        let prefix = prefix.into();
        validate_prefix(&prefix)?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Ok(Self { conn, prefix })
    }

    /// Inserts or replaces the page stored under `page.path`.
    ///
    /// The page row and its options are written in one transaction. When the
    /// checksum over the document and record fields equals the stored one the
    /// page is left untouched, so edits to a page loaded back from the
    /// database (which has an empty document) are always written.
    pub fn upsert_page(&self, page: &ManPage) -> Result<UpsertOutcome> {
        let checksum = convert::page_checksum(page);
        let tx = self.conn.unchecked_transaction()?;

        let outcome = match convert::find_page_row(&tx, &self.prefix, &page.path)? {
            Some(row) if row.checksum == checksum => UpsertOutcome::Unchanged { page_id: row.id },
            Some(row) => {
                convert::update_page(&tx, &self.prefix, row.id, page, &checksum)?;
                convert::delete_options(&tx, &self.prefix, row.id)?;
                let options = convert::insert_options(&tx, &self.prefix, row.id, &page.options)?;
                UpsertOutcome::Updated {
                    page_id: row.id,
                    options,
                }
            }
            None => {
                let page_id = convert::insert_page(&tx, &self.prefix, page, &checksum)?;
                let options = convert::insert_options(&tx, &self.prefix, page_id, &page.options)?;
                UpsertOutcome::Inserted { page_id, options }
            }
        };

        tx.commit()?;
        debug!(path = %page.path.display(), outcome = ?outcome, "Upserted man page");
        Ok(outcome)
    }

    /// Loads the page stored under `path`, or `None` if absent.
    pub fn get_page(&self, path: impl AsRef<Path>) -> Result<Option<ManPage>> {
        convert::load_page(self.conn, &self.prefix, path.as_ref())
    }

    /// Loads every page whose name equals `name`, ordered by path.
    ///
    /// Several paths can share a name (e.g. `printf.1.gz` and `printf.3.gz`).
    pub fn find_by_name(&self, name: &str) -> Result<Vec<ManPage>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT path FROM {}pages WHERE name = ?1 ORDER BY path",
            self.prefix
        ))?;

        let paths: Vec<String> = stmt
            .query_map(params![name], |row| row.get::<_, String>(0))?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let mut pages = Vec::with_capacity(paths.len());
        for path in &paths {
            if let Some(page) = self.get_page(path)? {
                pages.push(page);
            }
        }
        Ok(pages)
    }

    /// Lists the source paths of all stored pages, sorted.
    pub fn list_paths(&self) -> Result<Vec<PathBuf>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT path FROM {}pages ORDER BY path", self.prefix))?;

        let paths = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .map(|row| row.map(PathBuf::from))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(paths)
    }

    /// Deletes the page stored under `path` together with its options.
    ///
    /// # Errors
    ///
    /// Returns [`SqliteError::PageNotFound`] if no page has that path.
    pub fn delete_page(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let rows = self.conn.execute(
            &format!("DELETE FROM {}pages WHERE path = ?1", self.prefix),
            params![convert::path_to_string(path)],
        )?;

        if rows == 0 {
            return Err(SqliteError::PageNotFound(path.display().to_string()));
        }

        Ok(())
    }

    /// Returns a reference to the underlying connection.
    pub fn connection(&self) -> &Connection {
        self.conn
    }
}
