//! Identifier escaping.
//!
//! Every identifier that reaches rendered SQL (tables, columns, select fields,
//! VALUES/SET keys) passes through [`escape_identifier`]. The policy is
//! permissive: anything that cannot be escaped safely renders as an empty
//! string, and the owning clause drops empty entries instead of failing.
//!
//! - The input is split on spaces; an `as` token (any case) becomes `AS`.
//! - Each token is split on `.` and every segment is handled on its own.
//! - Segments matching `[A-Za-z0-9_$]*` are wrapped in backticks.
//! - Segments limited to `[A-Za-z0-9_$*/+\-()]` pass through unchanged, so
//!   expressions such as `COUNT(*)` survive.
//! - Any other segment is dropped.
//!
//! # Example
//! ```
//! use sqlqb::ident::escape_identifier;
//!
//! assert_eq!(escape_identifier("users.id"), "`users`.`id`");
//! assert_eq!(escape_identifier("name as n"), "`name` AS `n`");
//! assert_eq!(escape_identifier("COUNT(*)"), "COUNT(*)");
//! assert_eq!(escape_identifier("a;b"), "");
//! ```

use regex::Regex;
use std::sync::LazyLock;

/// Default quote character wrapped around escaped identifiers.
pub const QUOTE: char = '`';

static PLAIN_SEGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_$]*$").expect("invalid built-in identifier regex"));

static PASSTHROUGH_SEGMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_$*/+\-()]*$").expect("invalid built-in expression regex")
});

static NUMERIC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*[+-]?(\d+(\.\d*)?|\.\d+)([eE][+-]?\d+)?\s*$")
        .expect("invalid built-in numeric regex")
});

/// Escape an identifier with backticks.
pub fn escape_identifier(word: &str) -> String {
    escape_identifier_with(word, QUOTE)
}

/// Escape an identifier with a custom quote character.
pub fn escape_identifier_with(word: &str, quote: char) -> String {
    if is_numeric(word) {
        return String::new();
    }

    let mut out = String::with_capacity(word.len() + 4);
    for (i, token) in word.split(' ').enumerate() {
        if i > 0 {
            out.push(' ');
        }
        if token.eq_ignore_ascii_case("as") {
            out.push_str("AS");
            continue;
        }
        for (j, segment) in token.split('.').enumerate() {
            if j > 0 {
                out.push('.');
            }
            if PLAIN_SEGMENT.is_match(segment) {
                out.push(quote);
                out.push_str(segment);
                out.push(quote);
            } else if PASSTHROUGH_SEGMENT.is_match(segment) {
                out.push_str(segment);
            }
        }
    }
    out
}

/// Whether `s` reads as a number (`12`, ` 1.5`, `-3e2`, `.5`).
///
/// Numbers are never valid identifiers.
pub fn is_numeric(s: &str) -> bool {
    NUMERIC.is_match(s)
}
