//! Record-level checks for parsed man pages.
//!
//! Parsing never fails on markup shape, so gaps show up as sentinel fields
//! and odd option tokens rather than errors. [`validate_page`] lists those
//! gaps so callers can warn about pages that extracted poorly.
//!
//! # Examples
//!
//! ```
//! use manpage_core::*;
//!
//! let mut page = ManPage::new("ls.1.gz", Document::default());
//! page.name = "ls".to_string();
//! page.description = "list directory contents".to_string();
//! page.synopsis = "ls [OPTION]... [FILE]...".to_string();
//! page.options.push(ManOption::new("-a", "do not ignore entries starting with ."));
//! assert!(validate_page(&page).is_empty());
//!
//! page.options.push(ManOption::new("-a", "again"));
//! assert_eq!(
//!     validate_page(&page),
//!     vec![ValidationIssue::DuplicateOption("-a".to_string())]
//! );
//! ```

use std::collections::HashSet;

use thiserror::Error;

use crate::{ManPage, NOT_AVAILABLE};

/// A gap or inconsistency found in a parsed page.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationIssue {
    /// NAME section was not found.
    #[error("NAME section not found")]
    MissingName,
    /// DESCRIPTION section was not found.
    #[error("DESCRIPTION section not found")]
    MissingDescription,
    /// SYNOPSIS section was not found.
    #[error("SYNOPSIS section not found")]
    MissingSynopsis,
    /// Option token does not start with `-` or is just a dash.
    #[error("invalid option token: {0}")]
    InvalidOptionToken(String),
    /// Option token documented more than once.
    #[error("duplicate option: {0}")]
    DuplicateOption(String),
    /// Option has no description text.
    #[error("option has empty description: {0}")]
    EmptyOptionDescription(String),
}

/// Checks a parsed page and returns every issue found, in field order.
pub fn validate_page(page: &ManPage) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    if page.name == NOT_AVAILABLE {
        issues.push(ValidationIssue::MissingName);
    }
    if page.description == NOT_AVAILABLE {
        issues.push(ValidationIssue::MissingDescription);
    }
    if page.synopsis == NOT_AVAILABLE {
        issues.push(ValidationIssue::MissingSynopsis);
    }

    let mut seen: HashSet<&str> = HashSet::new();
    for opt in &page.options {
        let token = opt.token.as_str();
        if !token.starts_with('-') || token.len() < 2 {
            issues.push(ValidationIssue::InvalidOptionToken(token.to_string()));
        }
        if !seen.insert(token) {
            issues.push(ValidationIssue::DuplicateOption(token.to_string()));
        }
        if opt.description.is_empty() {
            issues.push(ValidationIssue::EmptyOptionDescription(token.to_string()));
        }
    }

    issues
}
