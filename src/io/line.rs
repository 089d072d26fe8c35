//! Bounded-memory line reading.
//!
//! A line is read by seeking to its offset and filling the caller's buffer,
//! so memory use never exceeds the buffer no matter how large the document
//! is. Streams may return fewer bytes than asked for; reads repeat until the
//! buffer is full or the stream is exhausted.

use crate::config::MIN_BUFFER_CAPACITY;
use crate::error::{Error, Result};
use crate::io::stream::Stream;

/// Location of a line inside the line buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineSpan {
    /// Length of the line content, newline excluded.
    pub len: usize,
    /// Bytes consumed from the stream, newline included.
    pub consumed: usize,
}

impl LineSpan {
    /// Returns the stream offset of the line that follows this one.
    #[must_use]
    pub const fn next_offset(&self, offset: u64) -> u64 {
        offset + self.consumed as u64
    }
}

/// Reads the line starting at `offset` into `buffer`.
///
/// CR, LF, CRLF and LFCR all end a line. A final line without a newline is
/// accepted once the stream reports no remaining data. The line content is
/// `buffer[..span.len]`.
///
/// # Errors
///
/// - [`Error::BufferTooSmall`] if `buffer` is shorter than three bytes or
///   the line does not fit
/// - [`Error::NotOpen`] if the stream is closed
/// - [`Error::Seek`] if `offset` cannot be reached
/// - [`Error::EndOfFile`] if no bytes remain at `offset`
///
/// # Examples
///
/// ```
/// use ini_seek::io::{SeekableStream, read_line};
/// use std::io::Cursor;
///
/// let mut stream = SeekableStream::new(Cursor::new(b"one\r\ntwo".to_vec())).unwrap();
/// let mut buffer = [0u8; 16];
///
/// let span = read_line(&mut stream, &mut buffer, 0).unwrap();
/// assert_eq!(&buffer[..span.len], b"one");
/// assert_eq!(span.consumed, 5);
///
/// let span = read_line(&mut stream, &mut buffer, 5).unwrap();
/// assert_eq!(&buffer[..span.len], b"two");
/// ```
pub fn read_line<S: Stream + ?Sized>(
    stream: &mut S,
    buffer: &mut [u8],
    offset: u64,
) -> Result<LineSpan> {
    let capacity = buffer.len();
    if capacity < MIN_BUFFER_CAPACITY {
        return Err(Error::BufferTooSmall { offset, capacity });
    }
    if !stream.is_open() {
        return Err(Error::NotOpen);
    }
    stream.seek_to(offset)?;

    let bytes_read = fill(stream, buffer)?;
    if bytes_read == 0 {
        return Err(Error::EndOfFile);
    }

    if let Some(i) = buffer[..bytes_read]
        .iter()
        .position(|&b| b == b'\n' || b == b'\r')
    {
        let other = if buffer[i] == b'\n' { b'\r' } else { b'\n' };
        let consumed = if i + 1 < bytes_read && buffer[i + 1] == other {
            i + 2
        } else {
            i + 1
        };
        tracing::trace!(offset, len = i, consumed, "line read");
        return Ok(LineSpan { len: i, consumed });
    }

    if !stream.has_remaining()? {
        tracing::trace!(offset, len = bytes_read, "final unterminated line read");
        return Ok(LineSpan {
            len: bytes_read,
            consumed: bytes_read,
        });
    }

    Err(Error::BufferTooSmall { offset, capacity })
}

/// Reads until `buffer` is full or the stream returns no more bytes.
fn fill<S: Stream + ?Sized>(stream: &mut S, buffer: &mut [u8]) -> Result<usize> {
    let mut filled = 0;
    while filled < buffer.len() {
        let n = stream.read_into(&mut buffer[filled..])?;
        if n == 0 {
            break;
        }
        filled += n;
    }
    Ok(filled)
}
