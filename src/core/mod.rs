//! Section and key search engine for ini-seek.
//!
//! This module contains the [`Session`] lookup context, the section and key
//! scanners built on it, line classification, and typed value conversion.

pub mod convert;
pub mod key;
pub mod section;
pub mod session;
pub mod syntax;
pub mod value;

pub use convert::IniInteger;
pub use session::Session;
pub use syntax::{LineKind, classify};
pub use value::Value;
