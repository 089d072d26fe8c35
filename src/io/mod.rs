//! I/O layer for ini-seek.
//!
//! Provides the stream contract with file, cursor and memory-map adapters,
//! the bounded line reader, and byte helpers used by the scanners.

pub mod line;
pub mod stream;
pub mod text;

pub use line::{LineSpan, read_line};
pub use stream::{MmapStream, SeekableStream, Stream};
pub use text::{is_comment_char, is_space, skip_whitespace, trim_end};
