//! # ini-seek
//!
//! Bounded-memory INI lookup over seekable streams.
//!
//! ini-seek finds a `[section]` and a `key = value` line inside it by reading
//! the document one line at a time into a caller-supplied buffer, so a
//! document of any size is searched without loading it into memory. Located
//! values convert to integers (with truncation detection), floats, booleans,
//! strings, and byte arrays.
//!
//! ## Features
//!
//! - **Fixed memory**: every line is read into one reusable buffer
//! - **Streams**: files, in-memory cursors and memory maps, or your own [`Stream`]
//! - **Case policy**: case-sensitive or case-insensitive name matching
//! - **Typed values**: `0x`/octal integers, booleans, floats, dotted/colon byte groups
//!
//! ```
//! use ini_seek::{CaseSensitivity, SeekableStream, Session};
//! use std::io::Cursor;
//!
//! let text = b"[network]\nip = 192.168.0.1 ; static\ndhcp = no\n".to_vec();
//! let mut stream = SeekableStream::new(Cursor::new(text)).unwrap();
//! let mut buffer = [0u8; 80];
//! let mut session = Session::new(&mut stream, &mut buffer, CaseSensitivity::Insensitive);
//!
//! session.locate_section("Network").unwrap();
//! let mut ip = [0u8; 4];
//! session.locate_key("ip", true).unwrap().get_numeric_byte_array(&mut ip, ".").unwrap();
//! assert_eq!(ip, [192, 168, 0, 1]);
//! assert!(!session.locate_key("dhcp", true).unwrap().get_bool().unwrap());
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
// Note: unsafe is needed for memory-mapped I/O (memmap2)
#![warn(unsafe_code)]

pub mod config;
pub mod core;
pub mod error;
pub mod io;

// Re-export commonly used types at crate root
pub use error::{Error, ErrorKind, PartialFill, Result};

// Re-export configuration types
pub use config::{CaseSensitivity, DEFAULT_BUFFER_CAPACITY, SessionConfig};

// Re-export core types
pub use crate::core::{IniInteger, Session, Value};

// Re-export I/O types
pub use io::{MmapStream, SeekableStream, Stream, read_line};
