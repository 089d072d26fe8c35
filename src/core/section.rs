//! Section header search.

use crate::core::session::Session;
use crate::core::syntax::{LineKind, classify};
use crate::error::{Error, Result};
use crate::io::stream::Stream;

impl<S: Stream + ?Sized> Session<'_, S> {
    /// Positions the cursor at the body of section `name`.
    ///
    /// The search always starts at the beginning of the document. Header
    /// names are compared as whole strings under the session's
    /// [`CaseSensitivity`](crate::CaseSensitivity). An empty name succeeds
    /// at offset 0, where sectionless keys live.
    ///
    /// # Errors
    ///
    /// - [`Error::SectionNotFound`] if the document has no such header
    /// - [`Error::BufferTooSmall`], [`Error::Seek`], [`Error::NotOpen`] or
    ///   [`Error::Io`] if reading fails; the search is abandoned
    pub fn locate_section(&mut self, name: &str) -> Result<()> {
        self.cursor = 0;
        if name.is_empty() {
            return self.record(Ok(()));
        }

        let result = self.scan_for_header(name);
        if let Ok(body) = result {
            self.cursor = body;
            tracing::debug!(section = name, offset = body, "section located");
        }
        self.record(result.map(|_| ()))
    }

    /// Returns the offset just past the matching header line.
    fn scan_for_header(&mut self, name: &str) -> Result<u64> {
        let mut offset = 0;
        loop {
            let span = match self.read_line_at(offset) {
                Ok(span) => span,
                Err(Error::EndOfFile) => {
                    return Err(Error::SectionNotFound {
                        name: name.to_string(),
                    });
                }
                Err(e) => return Err(e),
            };
            offset = span.next_offset(offset);

            let line = self.line(span);
            if let LineKind::Section { name: Some(header) } = classify(line)
                && self.case_sensitivity().matches(&line[header], name.as_bytes())
            {
                return Ok(offset);
            }
        }
    }
}
