//! Man page metadata extraction.
//!
//! This crate turns gzip-compressed roff man pages into [`ManPage`] records:
//! the program name, the DESCRIPTION and SYNOPSIS bodies, and the options
//! documented under OPTIONS/SWITCHES (or inline in DESCRIPTION).
//!
//! # Main entry points
//!
//! - [`parse`]: load, decompress and parse one page from disk.
//! - [`parse_document`]: parse text that is already decoded.
//! - [`batch::parse_all`]: parse many pages on a bounded thread pool.
//!
//! The roff engine underneath ([`roff`], [`fields`], [`options`]) is a set of
//! pure functions over borrowed text and byte offsets. It is not a roff
//! interpreter: macro arguments, fonts and conditionals are left as-is.
//!
//! # Example
//!
//! ```
//! use manpage_parser::parse_document;
//!
//! let source = "\
//! .TH FOOBAR 1
//! .SH NAME
//! foobar \\- do foo things
//! .SH SYNOPSIS
//! foobar [-q]
//! .SH OPTIONS
//! .TP
//! .B -q
//! run quietly
//! ";
//!
//! let page = parse_document(source, "foobar.1.gz");
//! assert_eq!(page.name, "foobar");
//! assert_eq!(page.synopsis, "foobar [-q]");
//! assert_eq!(page.description, "N/A");
//! assert_eq!(page.options[0].token, "-q");
//! ```
//!
//! [`ManPage`]: manpage_core::ManPage

pub mod batch;
pub mod error;
pub mod fields;
pub mod loader;
pub mod options;
pub mod output;
pub mod roff;

use std::path::{Path, PathBuf};

use manpage_core::{Document, ManPage};
use tracing::debug;

pub use error::{BatchError, LoadError};

/// Loads the gzip-compressed page at `path` and parses it.
///
/// # Errors
///
/// Returns [`LoadError`] when the file is missing, unreadable or not valid
/// gzip data. Markup that lacks the expected sections is not an error.
///
/// # Examples
///
/// ```no_run
/// let page = manpage_parser::parse("/usr/share/man/man1/ls.1.gz").unwrap();
/// println!("{page}");
/// ```
pub fn parse(path: impl AsRef<Path>) -> Result<ManPage, LoadError> {
    let path = path.as_ref();
    let text = loader::load(path)?;
    Ok(parse_document(text, path))
}

/// Normalizes `text` and parses it as the page found at `path`.
///
/// Fields are extracted in a fixed order (name, description, synopsis,
/// options); each falls back to the sentinel or an empty list on its own.
pub fn parse_document(text: impl AsRef<str>, path: impl Into<PathBuf>) -> ManPage {
    let document = Document::new(text);
    let doc = document.as_str();

    let name = fields::parse_name(doc);
    let description = fields::parse_description(doc);
    let synopsis = fields::parse_synopsis(doc);
    let options = options::parse_options(doc);

    let page = ManPage {
        name,
        description,
        synopsis,
        options,
        path: path.into(),
        document,
    };

    debug!(
        path = %page.path.display(),
        name = %page.name,
        options = page.options.len(),
        "Parsed man page"
    );
    page
}
