//! Key search from the session cursor.

use crate::core::session::Session;
use crate::core::syntax::{LineKind, classify};
use crate::core::value::Value;
use crate::error::{Error, ErrorKind, Result};
use crate::io::stream::Stream;
use std::ops::Range;

impl<S: Stream + ?Sized> Session<'_, S> {
    /// Finds `key` scanning forward from the cursor.
    ///
    /// Comment, blank and malformed lines are skipped. When
    /// `within_section_only` is set the search stops at the next section
    /// header; otherwise headers are stepped over and the scan runs to the end
    /// of the document. The cursor itself is left in place, so several keys
    /// of one section can be looked up in any order.
    ///
    /// The returned [`Value`] borrows the line buffer and has to be consumed
    /// before the session is used again.
    ///
    /// # Errors
    ///
    /// - [`Error::KeyNotFound`] if `key` is empty or absent from the range
    /// - the previous error unchanged if the last section lookup failed
    /// - [`Error::BufferTooSmall`], [`Error::Seek`], [`Error::NotOpen`] or
    ///   [`Error::Io`] if reading fails; the search is abandoned
    pub fn locate_key(&mut self, key: &str, within_section_only: bool) -> Result<Value<'_>> {
        if let Some(previous) = &self.last_error
            && previous.kind() != ErrorKind::KeyNotFound
        {
            return Err(previous.clone());
        }

        let result = if key.is_empty() {
            Err(Error::KeyNotFound {
                name: String::new(),
            })
        } else {
            self.scan_for_key(key, within_section_only)
        };

        let range = self.record(result)?;
        tracing::debug!(key, section_offset = self.cursor, "key located");
        Ok(Value::new(self.buffer_range(range)))
    }

    /// Returns the value range of the matching line, left in the buffer.
    fn scan_for_key(&mut self, key: &str, within_section_only: bool) -> Result<Range<usize>> {
        let not_found = || Error::KeyNotFound {
            name: key.to_string(),
        };

        let mut offset = self.cursor;
        loop {
            let span = match self.read_line_at(offset) {
                Ok(span) => span,
                Err(Error::EndOfFile) => return Err(not_found()),
                Err(e) => return Err(e),
            };
            offset = span.next_offset(offset);

            let line = self.line(span);
            match classify(line) {
                LineKind::Section { .. } if within_section_only => return Err(not_found()),
                LineKind::Entry { key: k, value }
                    if self.case_sensitivity().matches(&line[k.clone()], key.as_bytes()) =>
                {
                    return Ok(value);
                }
                _ => {}
            }
        }
    }
}
