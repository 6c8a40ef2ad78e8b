//! Macro scanning over normalized roff text.
//!
//! A macro invocation is a line that starts with `.`, one or more uppercase
//! ASCII letters and a space (`.SH NAME`, `.B -v`). Scanning is forward-only
//! and driven purely by byte offsets, so a [`Macros`] iterator can be
//! recreated from any position without keeping state between calls.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

static MACRO_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\.[A-Z]+ ").expect("static regex must compile"));

/// Macro names the engine distinguishes, paired with their kind.
const MACRO_TABLE: &[(&str, MacroKind)] = &[
    ("B", MacroKind::Bold),
    ("IP", MacroKind::IndentedParagraph),
    ("PP", MacroKind::Paragraph),
    ("SH", MacroKind::SectionHeading),
    ("TP", MacroKind::TaggedParagraph),
];

/// Classification of a located macro.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MacroKind {
    /// `.B` bold text.
    Bold,
    /// `.IP` indented paragraph.
    IndentedParagraph,
    /// `.PP` paragraph break.
    Paragraph,
    /// `.SH` top-level section heading.
    SectionHeading,
    /// `.TP` tagged paragraph.
    TaggedParagraph,
    /// Any macro name not listed above (`.SS`, `.BR`, `.TH`, ...).
    Other,
}

impl MacroKind {
    /// Looks up the kind for a macro name such as `SH`.
    ///
    /// # Examples
    ///
    /// ```
    /// use manpage_parser::roff::MacroKind;
    ///
    /// assert_eq!(MacroKind::from_name("SH"), MacroKind::SectionHeading);
    /// assert_eq!(MacroKind::from_name("SS"), MacroKind::Other);
    /// ```
    pub fn from_name(name: &str) -> Self {
        MACRO_TABLE
            .iter()
            .find(|(candidate, _)| *candidate == name)
            .map_or(MacroKind::Other, |(_, kind)| *kind)
    }
}

/// A macro invocation located in a document.
///
/// `start` is the offset of the leading `.`; `end` is the offset just past
/// the space that follows the macro name, i.e. where the macro's arguments
/// begin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Macro {
    pub start: usize,
    pub end: usize,
    pub kind: MacroKind,
}

impl Macro {
    /// Byte range `[start, end)` of the invocation prefix.
    pub fn span(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Macro name without the leading dot and trailing space.
    pub fn name<'a>(&self, doc: &'a str) -> &'a str {
        &doc[self.start + 1..self.end - 1]
    }
}

/// Finds the first macro line at or after `offset`.
///
/// Matches never begin in the middle of a line: an `offset` that points
/// inside a line skips to the next line start. Returns `None` when no macro
/// remains or `offset` is past the end of `doc`.
///
/// # Examples
///
/// ```
/// use manpage_parser::roff::{MacroKind, next_macro};
///
/// let doc = "text\n.SH NAME\nfoo\n";
/// let mac = next_macro(doc, 0).unwrap();
/// assert_eq!(mac.kind, MacroKind::SectionHeading);
/// assert_eq!(mac.start, 5);
/// assert!(next_macro(doc, mac.end).is_none());
/// ```
pub fn next_macro(doc: &str, offset: usize) -> Option<Macro> {
    if offset > doc.len() {
        return None;
    }
    let found = MACRO_RE.find_at(doc, offset)?;
    let name = &doc[found.start() + 1..found.end() - 1];
    Some(Macro {
        start: found.start(),
        end: found.end(),
        kind: MacroKind::from_name(name),
    })
}

/// Returns the macro following `mac`, scanning from its end.
pub fn macro_after(doc: &str, mac: &Macro) -> Option<Macro> {
    next_macro(doc, mac.end)
}

/// Lazy, forward-only sequence of macros starting at an offset.
///
/// Each step resumes from the previous macro's end, so offsets are strictly
/// increasing and the sequence always terminates.
///
/// # Examples
///
/// ```
/// use manpage_parser::roff::{MacroKind, Macros};
///
/// let doc = ".SH OPTIONS\n.B -q\nquiet\n.PP \nprose\n";
/// let kinds: Vec<_> = Macros::new(doc, 0).map(|m| m.kind).collect();
/// assert_eq!(
///     kinds,
///     vec![MacroKind::SectionHeading, MacroKind::Bold, MacroKind::Paragraph]
/// );
/// ```
#[derive(Debug, Clone)]
pub struct Macros<'a> {
    doc: &'a str,
    offset: usize,
}

impl<'a> Macros<'a> {
    pub fn new(doc: &'a str, offset: usize) -> Self {
        Self { doc, offset }
    }
}

impl Iterator for Macros<'_> {
    type Item = Macro;

    fn next(&mut self) -> Option<Macro> {
        let mac = next_macro(self.doc, self.offset)?;
        self.offset = mac.end;
        Some(mac)
    }
}

impl std::iter::FusedIterator for Macros<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_macro_requires_line_start() {
        let doc = "see .SH NAME inline\n.B bold\n";
        let mac = next_macro(doc, 0).unwrap();
        assert_eq!(mac.kind, MacroKind::Bold);
        assert_eq!(mac.name(doc), "B");
    }

    #[test]
    fn test_next_macro_requires_trailing_space() {
        let doc = ".TP\n.B -q\n";
        let mac = next_macro(doc, 0).unwrap();
        assert_eq!(mac.kind, MacroKind::Bold);
        assert_eq!(mac.span(), 4..7);
    }

    #[test]
    fn test_next_macro_ignores_lowercase_and_comments() {
        let doc = ".\\\" comment\n.br \n.ig \ntext\n";
        assert!(next_macro(doc, 0).is_none());
    }

    #[test]
    fn test_offset_inside_line_does_not_anchor() {
        let doc = "x.SH NAME\n";
        assert!(next_macro(doc, 1).is_none());
    }

    #[test]
    fn test_offset_past_end_is_none() {
        assert!(next_macro(".SH NAME\n", 100).is_none());
    }

    #[test]
    fn test_unrecognized_macro_is_other() {
        let doc = ".SS Subsection\n";
        let mac = next_macro(doc, 0).unwrap();
        assert_eq!(mac.kind, MacroKind::Other);
        assert_eq!(mac.name(doc), "SS");
        assert_ne!(mac.kind, MacroKind::SectionHeading);
    }

    #[test]
    fn test_macro_after_is_monotonic() {
        let doc = ".TH FOO 1\n.SH NAME\nfoo\n.SH DESCRIPTION\n.PP \ntext\n.IP -a\n";
        let mut prev = next_macro(doc, 0).unwrap();
        let mut count = 1;
        while let Some(next) = macro_after(doc, &prev) {
            assert!(next.start >= prev.end);
            assert!(next.start > prev.start);
            prev = next;
            count += 1;
        }
        assert_eq!(count, 5);
    }

    #[test]
    fn test_iterator_restarts_from_any_offset() {
        let doc = ".SH A\n.SH B\n.SH C\n";
        let all: Vec<_> = Macros::new(doc, 0).collect();
        let tail: Vec<_> = Macros::new(doc, all[1].start).collect();
        assert_eq!(tail, all[1..].to_vec());
    }
}
