//! Heuristic option extraction.
//!
//! Options are read from the OPTIONS or SWITCHES section, falling back to
//! DESCRIPTION for pages that document flags inline. Each `.B`/`.IP` entry
//! is flattened into one line and split at the first dash-led word:
//!
//! ```text
//! .B -q
//! q is an option      ->  ManOption { token: "-q", description: "q is an option" }
//! ```
//!
//! The first macro that is neither `.B` nor `.IP` ends the run, as does the
//! next `.SH` heading.

use manpage_core::ManOption;
use tracing::debug;

use crate::roff::{MacroKind, Macros, find_section};

/// Section names searched for options, in order of preference.
const OPTIONS_SECTION: &str = "(OPTIONS|SWITCHES)";
const FALLBACK_SECTION: &str = "DESCRIPTION";

/// Extracts the options documented in `doc`, in document order.
///
/// Returns an empty list when neither an options section nor DESCRIPTION
/// exists. Entries without a dash-led token are skipped.
///
/// # Examples
///
/// ```
/// use manpage_parser::options::parse_options;
///
/// let doc = ".SH OPTIONS\n.TP\n.B -v\nverbose output\n.TP\n.B -n\ndry run\n";
/// let opts = parse_options(doc);
/// assert_eq!(opts.len(), 2);
/// assert_eq!(opts[0].token, "-v");
/// assert_eq!(opts[1].description, "dry run");
/// ```
pub fn parse_options(doc: &str) -> Vec<ManOption> {
    let start = match find_section(doc, OPTIONS_SECTION)
        .or_else(|_| find_section(doc, FALLBACK_SECTION))
    {
        Ok(start) => start,
        Err(_) => return Vec::new(),
    };

    let mut options = Vec::new();
    for mac in Macros::new(doc, start) {
        match mac.kind {
            MacroKind::Bold | MacroKind::IndentedParagraph => {}
            MacroKind::SectionHeading => break,
            other => {
                debug!(kind = ?other, offset = mac.start, "Option run ended by macro");
                break;
            }
        }

        let entry = collect_entry(&doc[mac.end..]);
        if let Some(opt) = split_entry(&entry) {
            options.push(opt);
        }
    }

    options
}

/// Joins the lines following a macro up to the next blank or dot line.
///
/// The first line is the remainder of the macro line itself.
fn collect_entry(text: &str) -> String {
    let mut entry = String::new();
    for line in text.split('\n') {
        if line.is_empty() || line.starts_with('.') {
            break;
        }
        entry.push(' ');
        entry.push_str(line);
    }
    entry
}

/// Splits a flattened entry into token and description.
///
/// The token runs from the first `-` to the next whitespace; an entry with
/// no dash, or with nothing after the token, yields `None`.
fn split_entry(entry: &str) -> Option<ManOption> {
    let entry = entry.trim_start();
    let dash = entry.find('-')?;
    let rest = &entry[dash..];
    let token_len = rest.find(char::is_whitespace)?;
    let (token, description) = rest.split_at(token_len);
    Some(ManOption::new(token, description.trim()))
}
