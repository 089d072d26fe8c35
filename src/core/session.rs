//! Lookup session over one open document.
//!
//! A [`Session`] borrows the caller's stream and line buffer and carries the
//! state shared by section and key lookups: the cursor, the last recorded
//! error, and the name comparison policy.

use crate::config::{CaseSensitivity, SessionConfig};
use crate::core::value::Value;
use crate::error::{Error, ErrorKind, Result};
use crate::io::line::{LineSpan, read_line};
use crate::io::stream::Stream;

/// Search context for one document.
///
/// The buffer is overwritten by every line read. A [`Value`] returned by
/// [`Session::locate_key`] borrows the session, so it has to be consumed
/// before the next lookup.
///
/// # Examples
///
/// ```
/// use ini_seek::{CaseSensitivity, SeekableStream, Session};
/// use std::io::Cursor;
///
/// let text = b"[server]\nport = 8080\n".to_vec();
/// let mut stream = SeekableStream::new(Cursor::new(text)).unwrap();
/// let mut buffer = [0u8; 64];
/// let mut session = Session::new(&mut stream, &mut buffer, CaseSensitivity::Insensitive);
///
/// session.locate_section("server").unwrap();
/// let port: u16 = session.locate_key("port", true).unwrap().get_int().unwrap();
/// assert_eq!(port, 8080);
/// ```
pub struct Session<'a, S: Stream + ?Sized> {
    /// Document source.
    stream: &'a mut S,
    /// Caller-owned line buffer.
    buffer: &'a mut [u8],
    /// Offset where the located section body begins.
    pub(crate) cursor: u64,
    /// Outcome of the last locate call, `None` on success.
    pub(crate) last_error: Option<Error>,
    case_sensitivity: CaseSensitivity,
}

impl<'a, S: Stream + ?Sized> Session<'a, S> {
    /// Creates a session positioned at the start of the document.
    pub fn new(stream: &'a mut S, buffer: &'a mut [u8], case_sensitivity: CaseSensitivity) -> Self {
        Self {
            stream,
            buffer,
            cursor: 0,
            last_error: None,
            case_sensitivity,
        }
    }

    /// Creates a session using the policy from `config`.
    ///
    /// The buffer is supplied by the caller; see
    /// [`SessionConfig::allocate_buffer`].
    pub fn with_config(stream: &'a mut S, buffer: &'a mut [u8], config: &SessionConfig) -> Self {
        Self::new(stream, buffer, config.case_sensitivity)
    }
}

impl<S: Stream + ?Sized> Session<'_, S> {
    /// Returns the offset where the located section body begins.
    #[must_use]
    pub const fn cursor(&self) -> u64 {
        self.cursor
    }

    /// Returns the kind of the last locate outcome.
    #[must_use]
    pub fn last_error(&self) -> ErrorKind {
        self.last_error.as_ref().map_or(ErrorKind::NoError, Error::kind)
    }

    /// Forgets the last locate outcome.
    pub fn clear_error(&mut self) {
        self.last_error = None;
    }

    /// Returns the name comparison policy.
    #[must_use]
    pub const fn case_sensitivity(&self) -> CaseSensitivity {
        self.case_sensitivity
    }

    /// Returns the line buffer capacity.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    /// Checks that every line of the document fits the buffer.
    ///
    /// # Errors
    ///
    /// Returns the first fatal condition met, typically
    /// [`Error::BufferTooSmall`] for an over-long line.
    pub fn validate(&mut self) -> Result<()> {
        let mut offset = 0;
        let result = loop {
            match self.read_line_at(offset) {
                Ok(span) => offset = span.next_offset(offset),
                Err(Error::EndOfFile) => break Ok(()),
                Err(e) => break Err(e),
            }
        };
        self.record(result)
    }

    /// Locates `section` and then `key` inside it.
    ///
    /// An empty section name looks up a sectionless key at the start of the
    /// document.
    ///
    /// # Errors
    ///
    /// Returns the error of whichever lookup failed.
    pub fn get(&mut self, section: &str, key: &str) -> Result<Value<'_>> {
        self.locate_section(section)?;
        self.locate_key(key, true)
    }

    /// Reads the line at `offset` into the shared buffer.
    pub(crate) fn read_line_at(&mut self, offset: u64) -> Result<LineSpan> {
        read_line(&mut *self.stream, &mut *self.buffer, offset)
    }

    /// Returns the content of the line last read.
    pub(crate) fn line(&self, span: LineSpan) -> &[u8] {
        &self.buffer[..span.len]
    }

    /// Returns a sub-range of the shared buffer.
    pub(crate) fn buffer_range(&self, range: std::ops::Range<usize>) -> &[u8] {
        &self.buffer[range]
    }

    /// Stores the outcome of a locate call and passes it through.
    pub(crate) fn record<T>(&mut self, result: Result<T>) -> Result<T> {
        match &result {
            Ok(_) => self.last_error = None,
            Err(e) => {
                if e.is_fatal() {
                    tracing::debug!(error = %e, "search aborted");
                }
                self.last_error = Some(e.clone());
            }
        }
        result
    }
}
