//! Conversion between [`ManPage`] records and SQLite rows.
//!
//! Pages are keyed by their source path. Options are stored with an explicit
//! `position` so document order survives the round trip; duplicates are kept
//! as separate rows. The normalized document itself is not stored, only its
//! checksum, so loaded pages carry an empty [`Document`].
//!
//! These functions take a plain [`Connection`] so they work equally inside a
//! transaction (which derefs to `Connection`) or outside one.

use std::path::{Path, PathBuf};

use manpage_core::{Document, ManOption, ManPage};
use rusqlite::{Connection, OptionalExtension, params};
use sha2::{Digest, Sha256};

use crate::error::{Result, SqliteError};

/// Stored identity of a page row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRow {
    pub id: i64,
    pub checksum: String,
}

/// SHA-256 hex digest of a page: its normalized document plus every stored field.
///
/// Each part is length-prefixed so adjacent fields cannot run together. Pages
/// loaded from the database carry an empty document, so their edits are still
/// detected through the field values.
pub fn page_checksum(page: &ManPage) -> String {
    let mut hasher = Sha256::new();
    let mut feed = |part: &str| {
        hasher.update((part.len() as u64).to_le_bytes());
        hasher.update(part.as_bytes());
    };

    feed(page.document.as_str());
    feed(&page.name);
    feed(&page.description);
    feed(&page.synopsis);
    for opt in &page.options {
        feed(&opt.token);
        feed(&opt.description);
    }

    format!("{:x}", hasher.finalize())
}

pub(crate) fn path_to_string(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

fn sqlite_timestamp() -> String {
    chrono::Utc::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Looks up the row for `path`, if any.
pub fn find_page_row(conn: &Connection, prefix: &str, path: &Path) -> Result<Option<PageRow>> {
    let row = conn
        .query_row(
            &format!("SELECT id, checksum FROM {prefix}pages WHERE path = ?1"),
            params![path_to_string(path)],
            |row| {
                Ok(PageRow {
                    id: row.get(0)?,
                    checksum: row.get(1)?,
                })
            },
        )
        .optional()?;
    Ok(row)
}

/// Inserts a page row and returns its ID.
pub fn insert_page(conn: &Connection, prefix: &str, page: &ManPage, checksum: &str) -> Result<i64> {
    conn.execute(
        &format!(
            "INSERT INTO {prefix}pages (path, name, description, synopsis, checksum) \
             VALUES (?1, ?2, ?3, ?4, ?5)"
        ),
        params![
            path_to_string(&page.path),
            page.name,
            page.description,
            page.synopsis,
            checksum,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Overwrites the text fields and checksum of an existing page row.
pub fn update_page(
    conn: &Connection,
    prefix: &str,
    page_id: i64,
    page: &ManPage,
    checksum: &str,
) -> Result<()> {
    conn.execute(
        &format!(
            "UPDATE {prefix}pages \
             SET name = ?1, description = ?2, synopsis = ?3, checksum = ?4, updated_at = ?5 \
             WHERE id = ?6"
        ),
        params![
            page.name,
            page.description,
            page.synopsis,
            checksum,
            sqlite_timestamp(),
            page_id,
        ],
    )?;
    Ok(())
}

/// Inserts `options` for a page in order and returns how many were written.
pub fn insert_options(
    conn: &Connection,
    prefix: &str,
    page_id: i64,
    options: &[ManOption],
) -> Result<usize> {
    let mut stmt = conn.prepare(&format!(
        "INSERT INTO {prefix}options (page_id, position, token, description) \
         VALUES (?1, ?2, ?3, ?4)"
    ))?;

    for (position, opt) in options.iter().enumerate() {
        let position = i64::try_from(position)
            .map_err(|_| SqliteError::ConversionError(format!("option position {position} overflows")))?;
        stmt.execute(params![page_id, position, opt.token, opt.description])?;
    }

    Ok(options.len())
}

/// Removes every option belonging to a page.
pub fn delete_options(conn: &Connection, prefix: &str, page_id: i64) -> Result<usize> {
    let rows = conn.execute(
        &format!("DELETE FROM {prefix}options WHERE page_id = ?1"),
        params![page_id],
    )?;
    Ok(rows)
}

/// Loads a page and its options by source path.
///
/// Returns `None` when no row exists for `path`.
pub fn load_page(conn: &Connection, prefix: &str, path: &Path) -> Result<Option<ManPage>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT id, path, name, description, synopsis FROM {prefix}pages WHERE path = ?1"
    ))?;

    let mut rows = stmt.query(params![path_to_string(path)])?;
    let row = match rows.next()? {
        Some(row) => row,
        None => return Ok(None),
    };

    let page_id: i64 = row.get(0)?;
    let stored_path: String = row.get(1)?;
    let name: String = row.get(2)?;
    let description: String = row.get(3)?;
    let synopsis: String = row.get(4)?;

    let options = load_options(conn, prefix, page_id)?;

    Ok(Some(ManPage {
        name,
        description,
        synopsis,
        options,
        path: PathBuf::from(stored_path),
        document: Document::default(),
    }))
}

/// Loads the options of a page in stored order.
pub fn load_options(conn: &Connection, prefix: &str, page_id: i64) -> Result<Vec<ManOption>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT token, description FROM {prefix}options WHERE page_id = ?1 ORDER BY position"
    ))?;

    let options = stmt
        .query_map(params![page_id], |row| {
            Ok(ManOption {
                token: row.get(0)?,
                description: row.get(1)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(options)
}
