//! Seekable byte streams the line reader pulls from.
//!
//! [`Stream`] is the collaborator contract; [`SeekableStream`] adapts any
//! `Read + Seek` source (files, `std::io::Cursor`) and [`MmapStream`] serves
//! reads from a read-only memory map.

// Memory mapping requires unsafe but is well-documented and safe for read-only access
#![allow(unsafe_code)]

use crate::error::{Error, Result};
use memmap2::Mmap;
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

/// A random-access byte source.
///
/// A closed stream and a failed seek are distinct conditions: the former is
/// reported through [`Stream::is_open`], the latter through
/// [`Stream::seek_to`].
pub trait Stream {
    /// Returns whether the stream can be read.
    fn is_open(&self) -> bool {
        true
    }

    /// Moves the read position to an absolute offset.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Seek`] if the offset cannot be reached.
    fn seek_to(&mut self, offset: u64) -> Result<()>;

    /// Reads up to `buf.len()` bytes from the current position.
    ///
    /// Returns the number of bytes read, zero at end of stream. A short read
    /// is allowed anywhere; callers read again until zero is returned.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying read fails.
    fn read_into(&mut self, buf: &mut [u8]) -> Result<usize>;

    /// Returns whether bytes remain after the current position.
    ///
    /// # Errors
    ///
    /// Returns an error if the stream cannot report its state.
    fn has_remaining(&mut self) -> Result<bool>;
}

/// Stream over any `Read + Seek` source.
///
/// # Examples
///
/// ```
/// use ini_seek::io::{SeekableStream, Stream};
/// use std::io::Cursor;
///
/// let mut stream = SeekableStream::new(Cursor::new(b"a=1\n".to_vec())).unwrap();
/// assert_eq!(stream.len(), 4);
/// assert!(stream.has_remaining().unwrap());
/// ```
#[derive(Debug)]
pub struct SeekableStream<R> {
    /// Underlying source, `None` once closed.
    inner: Option<R>,
    /// Total length in bytes.
    len: u64,
    /// Current read position.
    pos: u64,
}

impl<R: Read + Seek> SeekableStream<R> {
    /// Wraps a source, measuring its length.
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot be seeked to measure it.
    pub fn new(mut inner: R) -> Result<Self> {
        let len = inner.seek(SeekFrom::End(0))?;
        inner.seek(SeekFrom::Start(0))?;
        Ok(Self {
            inner: Some(inner),
            len,
            pos: 0,
        })
    }

    /// Returns the stream length in bytes.
    #[must_use]
    pub const fn len(&self) -> u64 {
        self.len
    }

    /// Returns `true` if the stream holds no bytes.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Closes the stream; later operations report [`Error::NotOpen`].
    ///
    /// Returns the underlying source if it was still open.
    pub fn close(&mut self) -> Option<R> {
        self.inner.take()
    }

    fn source(&mut self) -> Result<&mut R> {
        self.inner.as_mut().ok_or(Error::NotOpen)
    }
}

impl SeekableStream<File> {
    /// Opens a file for reading.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist or cannot be opened.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();
        let file = File::open(path_ref).map_err(|e| {
            Error::Io(format!(
                "failed to open {}: {e}",
                path_ref.to_string_lossy()
            ))
        })?;
        Self::new(file)
    }
}

impl<R: Read + Seek> Stream for SeekableStream<R> {
    fn is_open(&self) -> bool {
        self.inner.is_some()
    }

    fn seek_to(&mut self, offset: u64) -> Result<()> {
        let source = self.source()?;
        let reached = source
            .seek(SeekFrom::Start(offset))
            .map_err(|e| Error::Seek {
                offset,
                reason: e.to_string(),
            })?;
        self.pos = reached;
        Ok(())
    }

    fn read_into(&mut self, buf: &mut [u8]) -> Result<usize> {
        let source = self.source()?;
        let mut filled = 0;
        // Short reads are legal for `Read`; keep pulling until full or exhausted.
        while filled < buf.len() {
            match source.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => {}
                Err(e) => return Err(e.into()),
            }
        }
        self.pos += filled as u64;
        Ok(filled)
    }

    fn has_remaining(&mut self) -> Result<bool> {
        self.source()?;
        Ok(self.pos < self.len)
    }
}

/// Stream served from a read-only memory map of a file.
pub struct MmapStream {
    /// Mapped file contents, `None` for an empty file or once closed.
    map: Option<Mmap>,
    /// Whether the stream is still open.
    open: bool,
    /// Current read position.
    pos: u64,
    /// File path for error messages.
    path: String,
}

impl MmapStream {
    /// Maps a file for reading.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or mapped.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();
        let path_str = path_ref.to_string_lossy().to_string();

        let file = File::open(path_ref)
            .map_err(|e| Error::Io(format!("failed to open {path_str}: {e}")))?;
        let size = file
            .metadata()
            .map_err(|e| Error::Io(format!("failed to stat {path_str}: {e}")))?
            .len();

        // Mapping a zero-length file fails on some platforms.
        let map = if size == 0 {
            None
        } else {
            // Safety: We're only reading from the file
            let map = unsafe {
                Mmap::map(&file)
                    .map_err(|e| Error::Io(format!("memory mapping failed: {path_str}: {e}")))?
            };
            Some(map)
        };

        Ok(Self {
            map,
            open: true,
            pos: 0,
            path: path_str,
        })
    }

    /// Returns the mapped file path.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the mapped length in bytes.
    #[must_use]
    pub fn len(&self) -> u64 {
        self.bytes().len() as u64
    }

    /// Returns `true` if the mapping holds no bytes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes().is_empty()
    }

    /// Unmaps the file; later operations report [`Error::NotOpen`].
    pub fn close(&mut self) {
        self.map = None;
        self.open = false;
    }

    fn bytes(&self) -> &[u8] {
        self.map.as_deref().unwrap_or_default()
    }
}

impl Stream for MmapStream {
    fn is_open(&self) -> bool {
        self.open
    }

    fn seek_to(&mut self, offset: u64) -> Result<()> {
        if !self.open {
            return Err(Error::NotOpen);
        }
        if offset > self.len() {
            return Err(Error::Seek {
                offset,
                reason: format!("beyond end of {} ({} bytes)", self.path, self.len()),
            });
        }
        self.pos = offset;
        Ok(())
    }

    #[allow(clippy::cast_possible_truncation)]
    fn read_into(&mut self, buf: &mut [u8]) -> Result<usize> {
        if !self.open {
            return Err(Error::NotOpen);
        }
        let pos = self.pos as usize;
        let available = &self.bytes()[pos..];
        let n = available.len().min(buf.len());
        buf[..n].copy_from_slice(&available[..n]);
        self.pos += n as u64;
        Ok(n)
    }

    fn has_remaining(&mut self) -> Result<bool> {
        if !self.open {
            return Err(Error::NotOpen);
        }
        Ok(self.pos < self.len())
    }
}
