//! Single-field extractors for NAME, DESCRIPTION and SYNOPSIS.
//!
//! Each extractor is independent; a missing section yields the sentinel
//! without affecting the others.

use crate::roff::get_section;

/// Extracts the program name from the NAME section.
///
/// Only the first word is kept; aliases after a comma and trailing roff
/// escape artifacts (`\`, `,`, spaces) are dropped.
///
/// # Examples
///
/// ```
/// use manpage_parser::fields::parse_name;
///
/// assert_eq!(parse_name(".SH NAME\nfoobar \\- summary\n"), "foobar");
/// assert_eq!(parse_name(".SH NAME\nfoo\\,bar\n"), "foo");
/// assert_eq!(parse_name(".SH DESCRIPTION\nno name here\n"), "N/A");
/// ```
pub fn parse_name(doc: &str) -> String {
    let section = get_section(doc, "NAME");
    let first = section.split_whitespace().next().unwrap_or_default();
    let head = first.split(',').next().unwrap_or_default();
    head.trim_end_matches([' ', '\\', ',']).to_string()
}

/// Returns the DESCRIPTION section body.
pub fn parse_description(doc: &str) -> String {
    get_section(doc, "DESCRIPTION")
}

/// Returns the SYNOPSIS section body.
pub fn parse_synopsis(doc: &str) -> String {
    get_section(doc, "SYNOPSIS")
}

#[cfg(test)]
mod tests {
    use manpage_core::NOT_AVAILABLE;

    use super::*;

    #[test]
    fn test_name_drops_aliases() {
        assert_eq!(parse_name(".SH NAME\nls, dir, vdir \\- list\n"), "ls");
    }

    #[test]
    fn test_name_trims_escape_artifacts() {
        assert_eq!(parse_name(".SH NAME\nfoo\\, \\- bar\n"), "foo");
        assert_eq!(parse_name(".SH NAME\nbaz\\\n"), "baz");
    }

    #[test]
    fn test_name_keeps_escaped_hyphen_inside_word() {
        assert_eq!(parse_name(".SH NAME\ngit\\-log \\- show logs\n"), "git\\-log");
    }

    #[test]
    fn test_empty_name_section() {
        assert_eq!(parse_name(".SH NAME\n.SH SYNOPSIS\nfoo\n"), "");
    }

    #[test]
    fn test_missing_sections_are_independent() {
        let doc = ".SH SYNOPSIS\nfoo [-q]\n";
        assert_eq!(parse_synopsis(doc), "foo [-q]");
        assert_eq!(parse_description(doc), NOT_AVAILABLE);
        assert_eq!(parse_name(doc), NOT_AVAILABLE);
    }
}
