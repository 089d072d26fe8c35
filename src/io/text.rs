//! Byte-level helpers for scanning INI lines.
//!
//! Lines are handled as raw bytes; only ASCII whitespace and the two comment
//! markers carry meaning to the scanners.

/// Returns `true` for `;` and `#`.
#[must_use]
pub const fn is_comment_char(b: u8) -> bool {
    b == b';' || b == b'#'
}

/// Returns `true` for space, tab, newline, vertical tab, form feed and CR.
#[must_use]
pub const fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | 0x0b | 0x0c | b'\r')
}

/// Returns the index of the first non-whitespace byte at or after `pos`.
///
/// # Examples
///
/// ```
/// use ini_seek::io::skip_whitespace;
///
/// assert_eq!(skip_whitespace(b"  \tkey", 0), 3);
/// assert_eq!(skip_whitespace(b"   ", 1), 3);
/// ```
#[must_use]
pub const fn skip_whitespace(bytes: &[u8], pos: usize) -> usize {
    let mut i = pos;
    while i < bytes.len() && is_space(bytes[i]) {
        i += 1;
    }
    i
}

/// Returns the end of `bytes[start..end]` with trailing whitespace removed.
///
/// The result is never smaller than `start`.
#[must_use]
pub const fn trim_end(bytes: &[u8], start: usize, end: usize) -> usize {
    let mut e = end;
    while e > start && is_space(bytes[e - 1]) {
        e -= 1;
    }
    e
}

/// Finds the first occurrence of `needle` in `bytes[start..end]`.
#[must_use]
pub fn find_byte(bytes: &[u8], start: usize, end: usize, needle: u8) -> Option<usize> {
    bytes[start..end]
        .iter()
        .position(|&b| b == needle)
        .map(|i| start + i)
}
