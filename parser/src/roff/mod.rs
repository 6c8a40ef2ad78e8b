//! Roff scanning primitives: macro iteration and `.SH` section extraction.
//!
//! Everything here operates on borrowed, already-normalized text and plain
//! byte offsets. Nothing is cached between calls.

mod scanner;
mod section;

pub use scanner::{Macro, MacroKind, Macros, macro_after, next_macro};
pub use section::{SectionNotFound, extract_section, find_section, get_section, strip_macro_lines};
