//! Typed access to a located value.

use crate::core::convert::{
    IniInteger, parse_bool, parse_byte_array, parse_float, parse_narrow,
};
use crate::error::{PartialFill, Result};

/// The trimmed, comment-stripped text after `=` of a matched key.
///
/// A `Value` borrows the session's line buffer, which the next lookup
/// overwrites. Copy out what you need with [`Value::to_string_lossy`] or one
/// of the typed getters before calling the session again.
///
/// # Examples
///
/// ```
/// use ini_seek::Value;
///
/// let value = Value::new(b"0x1F");
/// assert_eq!(value.get_u8().unwrap(), 31);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Value<'a> {
    bytes: &'a [u8],
}

impl<'a> Value<'a> {
    /// Wraps raw value text.
    #[must_use]
    pub const fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    /// Returns the raw bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// Returns the value as a string slice.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Format`](crate::Error::Format) if the bytes are not
    /// valid UTF-8.
    pub fn as_str(&self) -> Result<&'a str> {
        Ok(std::str::from_utf8(self.bytes)?)
    }

    /// Copies the value into an owned string, replacing invalid UTF-8.
    #[must_use]
    pub fn to_string_lossy(&self) -> String {
        String::from_utf8_lossy(self.bytes).into_owned()
    }

    /// Returns the value length in bytes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns `true` for an empty value such as `key =`.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Parses the whole value as an integer of type `T`.
    ///
    /// `0x`/`0X` selects hex and a leading `0` octal; a sign is optional for
    /// signed targets. The text is parsed at 64-bit width first.
    ///
    /// # Errors
    ///
    /// - [`Error::Format`](crate::Error::Format) if any character is left
    ///   unparsed
    /// - [`Error::ValueTruncated`](crate::Error::ValueTruncated) if the number
    ///   does not fit `T`; the error carries the wrapped value
    pub fn get_int<T: IniInteger>(&self) -> Result<T> {
        parse_narrow(self.bytes)
    }

    /// Parses the value as `i8`.
    pub fn get_i8(&self) -> Result<i8> {
        self.get_int()
    }

    /// Parses the value as `i16`.
    pub fn get_i16(&self) -> Result<i16> {
        self.get_int()
    }

    /// Parses the value as `i32`.
    pub fn get_i32(&self) -> Result<i32> {
        self.get_int()
    }

    /// Parses the value as `i64`.
    pub fn get_i64(&self) -> Result<i64> {
        self.get_int()
    }

    /// Parses the value as `u8`.
    pub fn get_u8(&self) -> Result<u8> {
        self.get_int()
    }

    /// Parses the value as `u16`.
    pub fn get_u16(&self) -> Result<u16> {
        self.get_int()
    }

    /// Parses the value as `u32`.
    pub fn get_u32(&self) -> Result<u32> {
        self.get_int()
    }

    /// Parses the value as `u64`.
    pub fn get_u64(&self) -> Result<u64> {
        self.get_int()
    }

    /// Parses `true`/`yes`/`1` or `false`/`no`/`0`, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Format`](crate::Error::Format) for anything else.
    pub fn get_bool(&self) -> Result<bool> {
        parse_bool(self.bytes)
    }

    /// Parses the value as `f32`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Format`](crate::Error::Format) if the text is not a
    /// complete number.
    pub fn get_f32(&self) -> Result<f32> {
        parse_float(self.bytes)
    }

    /// Parses the value as `f64`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Format`](crate::Error::Format) if the text is not a
    /// complete number.
    pub fn get_f64(&self) -> Result<f64> {
        parse_float(self.bytes)
    }

    /// Parses decimal byte groups such as `192.168.0.1` into `out`.
    ///
    /// `separators` lists every byte that splits groups. Parsing stops once
    /// `out` is full; remaining groups are ignored. Returns the number of
    /// bytes written.
    ///
    /// # Errors
    ///
    /// Returns a [`PartialFill`] with the number of bytes written when a
    /// group is not a number (the bad group is not counted) or exceeds 255
    /// (its low byte is stored and counted).
    ///
    /// # Examples
    ///
    /// ```
    /// use ini_seek::Value;
    ///
    /// let mut ip = [0u8; 4];
    /// let filled = Value::new(b"192.168.0.1").get_numeric_byte_array(&mut ip, ".").unwrap();
    /// assert_eq!(filled, 4);
    /// assert_eq!(ip, [192, 168, 0, 1]);
    /// ```
    pub fn get_numeric_byte_array(
        &self,
        out: &mut [u8],
        separators: &str,
    ) -> std::result::Result<usize, PartialFill> {
        parse_byte_array(self.bytes, out, separators.as_bytes(), 10)
    }

    /// Parses hex byte groups such as `12:34:56:78:9a:bc` into `out`.
    ///
    /// Groups may carry an optional `0x` prefix. Otherwise behaves like
    /// [`Value::get_numeric_byte_array`].
    ///
    /// # Errors
    ///
    /// Returns a [`PartialFill`] as described for
    /// [`Value::get_numeric_byte_array`].
    pub fn get_hex_byte_array(
        &self,
        out: &mut [u8],
        separators: &str,
    ) -> std::result::Result<usize, PartialFill> {
        parse_byte_array(self.bytes, out, separators.as_bytes(), 16)
    }
}
