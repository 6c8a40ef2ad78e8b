//! Man page record definitions.
//!
//! The types here are plain data: the parser fills them in once and every
//! other consumer (storage, output formatting, the CLI) only reads them. All
//! types serialize with [`serde`]; the raw [`Document`] is skipped so JSON and
//! YAML renderings stay small.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Placeholder for a text field whose section could not be located.
pub const NOT_AVAILABLE: &str = "N/A";

/// Normalized roff source of a single man page.
///
/// Carriage returns are removed on construction, so byte offsets computed by
/// the parser are stable for the life of the value. The text is never
/// mutated afterwards.
///
/// # Examples
///
/// ```
/// use manpage_core::Document;
///
/// let doc = Document::new(".SH NAME\r\nls \\- list\r\n");
/// assert_eq!(doc.as_str(), ".SH NAME\nls \\- list\n");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Document(String);

impl Document {
    /// Builds a document from decoded text, stripping every `\r`.
    pub fn new(raw: impl AsRef<str>) -> Self {
        Self(raw.as_ref().replace('\r', ""))
    }

    /// Returns the normalized text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length of the normalized text in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when the document holds no text.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<str> for Document {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A command-line option documented by a man page.
///
/// Options usually come from the OPTIONS or SWITCHES section and start with
/// a `-` character.
///
/// # Examples
///
/// ```
/// use manpage_core::ManOption;
///
/// let opt = ManOption::new("-v", "verbose output");
/// assert_eq!(opt.to_string(), "-v: verbose output");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ManOption {
    /// Option token as written in the page (e.g. `-v`, `--all`).
    pub token: String,
    /// Free-text description following the token.
    pub description: String,
}

impl ManOption {
    /// Creates an option from its token and description.
    pub fn new(token: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            description: description.into(),
        }
    }
}

impl fmt::Display for ManOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.token, self.description)
    }
}

/// Parsed metadata for one man page.
///
/// Text fields have had macro lines stripped and surrounding whitespace
/// trimmed. A field whose section is missing from the page holds
/// [`NOT_AVAILABLE`]; a page without an options section has an empty
/// `options` list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManPage {
    /// Program or feature name from the NAME section.
    pub name: String,
    /// Body of the DESCRIPTION section.
    pub description: String,
    /// Body of the SYNOPSIS section.
    pub synopsis: String,
    /// Options in document order; duplicates are kept.
    pub options: Vec<ManOption>,
    /// Path the page was loaded from.
    pub path: PathBuf,
    /// Normalized source the fields were derived from.
    #[serde(skip)]
    pub document: Document,
}

impl ManPage {
    /// Creates a record for `path` with every text field set to
    /// [`NOT_AVAILABLE`] and no options.
    pub fn new(path: impl Into<PathBuf>, document: Document) -> Self {
        Self {
            name: NOT_AVAILABLE.to_string(),
            description: NOT_AVAILABLE.to_string(),
            synopsis: NOT_AVAILABLE.to_string(),
            options: Vec::new(),
            path: path.into(),
            document,
        }
    }

    /// Returns the source path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Finds the first option with the given token.
    pub fn find_option(&self, token: &str) -> Option<&ManOption> {
        self.options.iter().find(|opt| opt.token == token)
    }

    /// Returns `true` when the NAME section was located.
    pub fn has_name(&self) -> bool {
        self.name != NOT_AVAILABLE
    }
}

impl fmt::Display for ManPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Name: {}", self.name)?;
        writeln!(f, "Desc:     {}", self.description)?;
        writeln!(f, "Synopsis: {}", self.synopsis)?;
        writeln!(f, "Options:")?;
        for opt in &self.options {
            writeln!(f, "{opt}")?;
        }
        Ok(())
    }
}
