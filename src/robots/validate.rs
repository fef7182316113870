//! Content gate and syntax linting for policy documents

use crate::robots::directive::{significant_lines, Directive};
use serde::Serialize;
use std::fmt;

/// A non-fatal syntax problem found by [`lint`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    /// 1-based line number
    pub line: usize,
    pub message: String,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Line {}: {}", self.line, self.message)
    }
}

/// Checks whether text is plausibly a policy document
///
/// Only the first significant line is inspected: it must be a recognized directive.
/// Empty and comment-only documents are rejected, as are HTML pages and other text.
pub fn is_policy_document(content: &str) -> bool {
    significant_lines(content)
        .next()
        .is_some_and(|(_, line)| Directive::recognize(line).is_some())
}

/// Reports every significant line that is not a recognized directive
pub fn lint(content: &str) -> Vec<ValidationIssue> {
    significant_lines(content)
        .filter(|(_, line)| Directive::recognize(line).is_none())
        .map(|(line_number, line)| ValidationIssue {
            line: line_number,
            message: format!("Unrecognized directive '{}'", line),
        })
        .collect()
}
