//! Core types for structured man page metadata.
//!
//! This crate defines the data model shared by the parser, the storage
//! backend and the command-line tool:
//!
//! - [`Document`]: the normalized roff source of one page (carriage returns
//!   removed).
//! - [`ManPage`]: the parsed record: name, description, synopsis and the
//!   ordered list of options, plus the source path and document.
//! - [`ManOption`]: a single command-line option (`token` + `description`).
//!
//! Fields whose section could not be located hold the [`NOT_AVAILABLE`]
//! sentinel. Validation ([`validate_page`]) reports such gaps along with
//! suspicious option tokens.
//!
//! # Example
//!
//! ```
//! use manpage_core::*;
//!
//! let mut page = ManPage::new("/usr/share/man/man1/foobar.1.gz", Document::new(""));
//! page.name = "foobar".to_string();
//! page.options.push(ManOption::new("-q", "q is an option"));
//!
//! assert_eq!(page.find_option("-q").unwrap().description, "q is an option");
//! assert!(page.to_string().contains("-q: q is an option"));
//! ```

mod types;
mod validate;

pub use types::*;
pub use validate::{ValidationIssue, validate_page};
