//! Recognition of documentation already attached to a declaration.

use crate::syntax::{Trivia, TriviaKind};

/// Doc comment fragments in `leading` that carry text.
///
/// Any non-blank `///` or `/** */` comment counts, whatever its content, so a
/// free-text line, a tag block and an inheritance marker are all recognized.
/// Ordinary line and block comments are ignored.
pub fn doc_comments(leading: &[Trivia]) -> impl Iterator<Item = &Trivia> {
    leading
        .iter()
        .filter(|t| t.kind == TriviaKind::DocComment && !doc_body(&t.text).trim().is_empty())
}

/// Whether `leading` already carries documentation.
pub fn is_documented(leading: &[Trivia]) -> bool {
    doc_comments(leading).next().is_some()
}

/// Comment text without its `///` or `/** */` delimiters.
fn doc_body(text: &str) -> &str {
    if let Some(rest) = text.strip_prefix("///") {
        rest
    } else if let Some(rest) = text.strip_prefix("/**") {
        rest.strip_suffix("*/").unwrap_or(rest)
    } else {
        text
    }
}
