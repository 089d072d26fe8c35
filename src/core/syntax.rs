//! Classification of a single INI line.
//!
//! ```text
//! line      := ws* (comment | section | keyvalue | ws*)
//! comment   := (';' | '#') any*
//! section   := '[' ws* name ws* ']' any*
//! keyvalue  := key ws* '=' ws* value
//! ```

use crate::io::text::{find_byte, is_comment_char, skip_whitespace, trim_end};
use std::ops::Range;

/// What a line contains, with byte ranges into the line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    /// Empty or whitespace only.
    Blank,
    /// Starts with `;` or `#`.
    Comment,
    /// Starts with `[`. The name is `None` when the closing `]` is missing.
    Section {
        /// Trimmed header name.
        name: Option<Range<usize>>,
    },
    /// A `key = value` pair.
    Entry {
        /// Trimmed key.
        key: Range<usize>,
        /// Trimmed value with any trailing comment cut off.
        value: Range<usize>,
    },
    /// Anything else, e.g. a line without `=`.
    Malformed,
}

/// Classifies `line`, which must not contain its newline.
///
/// # Examples
///
/// ```
/// use ini_seek::core::{LineKind, classify};
///
/// let line = b"  port = 8080 ; http";
/// let LineKind::Entry { key, value } = classify(line) else {
///     unreachable!()
/// };
/// assert_eq!(&line[key], b"port");
/// assert_eq!(&line[value], b"8080");
/// ```
#[must_use]
pub fn classify(line: &[u8]) -> LineKind {
    let start = skip_whitespace(line, 0);
    let Some(&first) = line.get(start) else {
        return LineKind::Blank;
    };

    if is_comment_char(first) {
        return LineKind::Comment;
    }

    if first == b'[' {
        let name_start = skip_whitespace(line, start + 1);
        let name = find_byte(line, name_start, line.len(), b']')
            .map(|close| name_start..trim_end(line, name_start, close));
        return LineKind::Section { name };
    }

    let Some(eq) = find_byte(line, start, line.len(), b'=') else {
        return LineKind::Malformed;
    };
    let key = start..trim_end(line, start, eq);

    let value_start = skip_whitespace(line, eq + 1);
    let value_end = line[value_start..]
        .iter()
        .position(|&b| is_comment_char(b))
        .map_or(line.len(), |i| value_start + i);
    let value = value_start..trim_end(line, value_start, value_end);

    LineKind::Entry { key, value }
}
