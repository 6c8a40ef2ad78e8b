//! Locating and extracting top-level `.SH` sections.

use std::sync::LazyLock;

use manpage_core::NOT_AVAILABLE;
use regex::Regex;
use thiserror::Error;
use tracing::debug;

use super::scanner::{MacroKind, Macros};

static MACRO_LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\.[A-Z]+.*(?:\n|$)").expect("static regex must compile")
});

/// No `.SH` heading matched the requested name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("section not found: {0}")]
pub struct SectionNotFound(pub String);

/// Finds the heading `.SH <name>` and returns the offset just past that line.
///
/// `name` is a regular expression fragment, so alternatives such as
/// `(OPTIONS|SWITCHES)` are accepted. The heading must start a line; any
/// number of spaces may separate `.SH` from the name. A name that is not a
/// valid pattern is treated as not found.
///
/// # Examples
///
/// ```
/// use manpage_parser::roff::find_section;
///
/// let doc = ".SH NAME\nfoo\n.SH SWITCHES\n.B -x\n";
/// assert_eq!(find_section(doc, "NAME"), Ok(9));
/// assert_eq!(find_section(doc, "(OPTIONS|SWITCHES)"), Ok(26));
/// assert!(find_section(doc, "EXAMPLES").is_err());
/// ```
pub fn find_section(doc: &str, name: &str) -> Result<usize, SectionNotFound> {
    let pattern = format!(r"(?m)^\.SH *{name}");
    let re = match Regex::new(&pattern) {
        Ok(re) => re,
        Err(err) => {
            debug!(section = name, error = %err, "Invalid section pattern");
            return Err(SectionNotFound(name.to_string()));
        }
    };

    let Some(found) = re.find(doc) else {
        debug!(section = name, "Section heading not found");
        return Err(SectionNotFound(name.to_string()));
    };

    let line_end = doc[found.end()..]
        .find('\n')
        .map_or(doc.len(), |idx| found.end() + idx + 1);
    Ok(line_end)
}

/// Returns the body of the section that starts at `start`.
///
/// The body runs up to the next `.SH` macro (or the end of the document).
/// Lines that begin with a macro invocation are dropped whole, and the
/// result is trimmed. A `start` past the end yields an empty body; one that
/// falls inside a multi-byte character moves forward to the next character.
pub fn extract_section(doc: &str, start: usize) -> String {
    let mut start = start.min(doc.len());
    while !doc.is_char_boundary(start) {
        start += 1;
    }
    let end = Macros::new(doc, start)
        .find(|mac| mac.kind == MacroKind::SectionHeading)
        .map_or(doc.len(), |mac| mac.start);

    strip_macro_lines(&doc[start..end]).trim().to_string()
}

/// Locates `name` and extracts its body, or returns [`NOT_AVAILABLE`].
///
/// # Examples
///
/// ```
/// use manpage_parser::roff::get_section;
///
/// let doc = ".SH NAME\nfoo \\- frobnicate\n.SH DESCRIPTION\n.PP\nDoes things.\n";
/// assert_eq!(get_section(doc, "NAME"), "foo \\- frobnicate");
/// assert_eq!(get_section(doc, "DESCRIPTION"), "Does things.");
/// assert_eq!(get_section(doc, "SYNOPSIS"), "N/A");
/// ```
pub fn get_section(doc: &str, name: &str) -> String {
    match find_section(doc, name) {
        Ok(start) => extract_section(doc, start),
        Err(_) => NOT_AVAILABLE.to_string(),
    }
}

/// Removes every line that starts with a macro invocation.
pub fn strip_macro_lines(text: &str) -> String {
    MACRO_LINE_RE.replace_all(text, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = "\
.TH FOO 1
.SH NAME
foo \\- frobnicate things
.SH SYNOPSIS
.B foo
[\\-q]
.SH DESCRIPTION
.PP
First paragraph.
.SS Details
More text.
.SH SEE ALSO
bar(1)
";

    #[test]
    fn test_find_section_allows_spaces_after_sh() {
        let doc = ".SH    NAME\nfoo\n";
        assert_eq!(find_section(doc, "NAME"), Ok(12));
    }

    #[test]
    fn test_find_section_requires_line_start() {
        let doc = "text .SH NAME\n";
        assert_eq!(
            find_section(doc, "NAME"),
            Err(SectionNotFound("NAME".to_string()))
        );
    }

    #[test]
    fn test_find_section_at_end_without_newline() {
        let doc = "x\n.SH NAME";
        assert_eq!(find_section(doc, "NAME"), Ok(doc.len()));
        assert_eq!(get_section(doc, "NAME"), "");
    }

    #[test]
    fn test_invalid_pattern_is_not_found() {
        assert!(find_section(PAGE, "(OPTIONS").is_err());
    }

    #[test]
    fn test_extract_section_stops_at_next_heading() {
        assert_eq!(get_section(PAGE, "NAME"), "foo \\- frobnicate things");
    }

    #[test]
    fn test_extract_section_offset_inside_character() {
        let doc = ".SH NAME\nnaïve tool\n.SH SYNOPSIS\nx\n";
        let inside = doc.find('ï').unwrap() + 1;
        assert!(!doc.is_char_boundary(inside));
        assert_eq!(extract_section(doc, inside), "ve tool");
        assert_eq!(extract_section(doc, doc.len() + 10), "");
    }

    #[test]
    fn test_extract_section_strips_macro_lines() {
        assert_eq!(get_section(PAGE, "SYNOPSIS"), "[\\-q]");
    }

    #[test]
    fn test_subsection_does_not_end_section() {
        assert_eq!(
            get_section(PAGE, "DESCRIPTION"),
            "First paragraph.\nMore text."
        );
    }

    #[test]
    fn test_last_section_runs_to_end() {
        assert_eq!(get_section(PAGE, "SEE ALSO"), "bar(1)");
    }

    #[test]
    fn test_sentinel_iff_not_found() {
        for name in ["NAME", "SYNOPSIS", "DESCRIPTION", "SEE ALSO", "OPTIONS", "BUGS"] {
            let found = find_section(PAGE, name).is_ok();
            assert_eq!(get_section(PAGE, name) == NOT_AVAILABLE, !found, "{name}");
        }
    }

    #[test]
    fn test_strip_macro_lines_keeps_text() {
        let text = ".B bold\nplain\n.TP\n.\\\" comment\nend";
        assert_eq!(strip_macro_lines(text), "plain\n.\\\" comment\nend");
    }
}
