//! Error types for ini-seek operations.
//!
//! This module provides the error hierarchy using `thiserror` for stream
//! access, section/key lookup, and value conversion, together with the
//! [`ErrorKind`] code table a session records after each locate call.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for ini-seek operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for INI lookup and conversion.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The stream has been closed or was never opened.
    #[error("stream is not open")]
    NotOpen,

    /// A line does not fit into the line buffer.
    #[error("line at offset {offset} does not fit in a {capacity} byte buffer")]
    BufferTooSmall {
        /// Stream offset where the line starts.
        offset: u64,
        /// Capacity of the line buffer.
        capacity: usize,
    },

    /// Seeking the stream to an offset failed.
    #[error("failed to seek to offset {offset}: {reason}")]
    Seek {
        /// Requested absolute offset.
        offset: u64,
        /// Reason for failure.
        reason: String,
    },

    /// No header with the requested section name exists.
    #[error("section not found: {name}")]
    SectionNotFound {
        /// Requested section name.
        name: String,
    },

    /// The key does not exist in the searched range.
    #[error("key not found: {name}")]
    KeyNotFound {
        /// Requested key name.
        name: String,
    },

    /// The stream has no more data at the requested offset.
    #[error("end of file")]
    EndOfFile,

    /// A parsed number does not fit the requested width.
    ///
    /// `narrowed` holds the wrapped value that was produced anyway.
    #[error("value {wide} truncated to {narrowed}")]
    ValueTruncated {
        /// The value as parsed at 64-bit width.
        wide: i128,
        /// The value after narrowing to the target width.
        narrowed: i128,
    },

    /// The value text is not valid for the requested type.
    #[error("invalid value format: {0}")]
    Format(String),

    /// Any other stream failure.
    #[error("I/O error: {0}")]
    Io(String),
}

impl Error {
    /// Returns the code-table kind of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NotOpen => ErrorKind::NotOpen,
            Self::BufferTooSmall { .. } => ErrorKind::BufferTooSmall,
            Self::Seek { .. } => ErrorKind::SeekError,
            Self::SectionNotFound { .. } => ErrorKind::SectionNotFound,
            Self::KeyNotFound { .. } => ErrorKind::KeyNotFound,
            Self::EndOfFile => ErrorKind::EndOfFile,
            Self::ValueTruncated { .. } => ErrorKind::ValueTruncated,
            Self::Format(_) => ErrorKind::FormatError,
            Self::Io(_) => ErrorKind::UnknownError,
        }
    }

    /// Returns `true` for conditions that abort a search.
    ///
    /// The caller has to grow the buffer or reopen the stream before retrying.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::NotOpen | Self::BufferTooSmall { .. } | Self::Seek { .. } | Self::Io(_)
        )
    }
}

/// Flat error code recorded by a session after each locate call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The last operation succeeded.
    #[default]
    NoError,
    /// Stream not open.
    NotOpen,
    /// Line longer than the buffer.
    BufferTooSmall,
    /// Seek failed.
    SeekError,
    /// Section header not present.
    SectionNotFound,
    /// Key not present.
    KeyNotFound,
    /// Stream exhausted.
    EndOfFile,
    /// Number narrowed with loss.
    ValueTruncated,
    /// Unparsable value.
    FormatError,
    /// Anything else.
    UnknownError,
}

/// Byte-array extraction failure with the number of elements written.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{source} after filling {filled} byte(s)")]
pub struct PartialFill {
    /// Elements written to the output slice before the failure was reported.
    pub filled: usize,
    /// The underlying conversion error.
    #[source]
    pub source: Error,
}

impl From<PartialFill> for Error {
    fn from(err: PartialFill) -> Self {
        err.source
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<std::str::Utf8Error> for Error {
    fn from(err: std::str::Utf8Error) -> Self {
        Self::Format(format!("invalid UTF-8 at byte offset {}", err.valid_up_to()))
    }
}
