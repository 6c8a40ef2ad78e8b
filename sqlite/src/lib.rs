//! SQLite storage backend for parsed man pages.
//!
//! Stores [`ManPage`](manpage_core::ManPage) records in two prefixed tables,
//! pages and options, keyed by source path.
//!
//! # Architecture
//!
//! - **`schema`**: SQL generation with customizable table prefixes
//! - **`migration`**: Lifecycle operations (up/down/status)
//! - **`convert`**: `ManPage` ↔ SQL row transformations
//! - **`query`**: Upsert, lookup, listing and deletion
//!
//! # Quick start
//!
//! ```no_run
//! use manpage_sqlite::{Migration, PageQuery, UpsertOutcome};
//! use rusqlite::Connection;
//!
//! let conn = Connection::open("pages.db").unwrap();
//! let mut migration = Migration::new(conn, "mp_").unwrap();
//! migration.up().unwrap();
//! let conn = migration.into_connection();
//!
//! let query = PageQuery::new(&conn, "mp_").unwrap();
//! let page = manpage_parser::parse("/usr/share/man/man1/tar.1.gz").unwrap();
//! match query.upsert_page(&page).unwrap() {
//!     UpsertOutcome::Unchanged { .. } => println!("already up to date"),
//!     outcome => println!("{outcome:?}"),
//! }
//!
//! for stored in query.find_by_name("tar").unwrap() {
//!     println!("{} has {} options", stored.path.display(), stored.options.len());
//! }
//! ```

mod convert;
mod error;
mod migration;
mod query;
mod schema;

pub use convert::page_checksum;
pub use error::{Result, SqliteError};
pub use migration::{Migration, MigrationStatus};
pub use query::{PageQuery, UpsertOutcome};
pub use schema::{generate_drop_sql, generate_schema_sql};
