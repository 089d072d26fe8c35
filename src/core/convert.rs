//! Numeric text conversion.
//!
//! Integers are parsed at 64-bit width first and narrowed afterwards, so a
//! value that does not fit its target is still produced and reported as
//! truncated instead of rejected.

use crate::error::{Error, PartialFill, Result};

/// Integer types a [`Value`](crate::Value) can be converted to.
pub trait IniInteger: Copy {
    /// Whether the 64-bit parse is signed.
    const SIGNED: bool;

    /// Narrows a 64-bit value, wrapping on overflow.
    fn wrap(wide: i128) -> Self;

    /// Widens back for comparison.
    fn widen(self) -> i128;
}

macro_rules! ini_integer {
    ($($t:ty => $signed:expr),* $(,)?) => {
        $(
            impl IniInteger for $t {
                const SIGNED: bool = $signed;

                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                fn wrap(wide: i128) -> Self {
                    wide as Self
                }

                fn widen(self) -> i128 {
                    i128::from(self)
                }
            }
        )*
    };
}

ini_integer! {
    i8 => true,
    i16 => true,
    i32 => true,
    i64 => true,
    u8 => false,
    u16 => false,
    u32 => false,
    u64 => false,
}

/// Accumulates `digits` in `radix`, saturating far above the 64-bit range.
///
/// Returns `None` if `digits` is empty or holds a non-digit.
fn accumulate(digits: &[u8], radix: u32) -> Option<u128> {
    if digits.is_empty() {
        return None;
    }
    digits.iter().try_fold(0u128, |acc, &b| {
        let digit = char::from(b).to_digit(radix)?;
        Some(
            acc.saturating_mul(u128::from(radix))
                .saturating_add(u128::from(digit)),
        )
    })
}

fn format_error(text: &[u8], expected: &str) -> Error {
    Error::Format(format!(
        "'{}' is not {expected}",
        String::from_utf8_lossy(text)
    ))
}

/// Parses a whole integer with `0x` hex and leading-`0` octal detection.
///
/// Returns the 64-bit value widened to `i128` and whether it had to be
/// clamped to the 64-bit range.
pub(crate) fn parse_integer(text: &[u8], signed: bool) -> Result<(i128, bool)> {
    let (negative, rest) = match text {
        [b'-', rest @ ..] => (true, rest),
        [b'+', rest @ ..] => (false, rest),
        _ => (false, text),
    };

    let (radix, digits) = match rest {
        [b'0', b'x' | b'X', hex @ ..] if !hex.is_empty() => (16, hex),
        [b'0', octal @ ..] if !octal.is_empty() => (8, octal),
        _ => (10, rest),
    };

    let magnitude = accumulate(digits, radix).ok_or_else(|| format_error(text, "an integer"))?;

    if signed {
        let limit = if negative {
            i64::MIN.unsigned_abs()
        } else {
            i64::MAX.unsigned_abs()
        };
        if magnitude > u128::from(limit) {
            let clamped = if negative { i64::MIN } else { i64::MAX };
            return Ok((i128::from(clamped), true));
        }
        #[allow(clippy::cast_possible_wrap)]
        let value = magnitude as i128;
        Ok((if negative { -value } else { value }, false))
    } else {
        if negative {
            return Err(format_error(text, "an unsigned integer"));
        }
        if magnitude > u128::from(u64::MAX) {
            return Ok((i128::from(u64::MAX), true));
        }
        #[allow(clippy::cast_possible_wrap)]
        let value = magnitude as i128;
        Ok((value, false))
    }
}

/// Parses and narrows an integer to `T`.
pub(crate) fn parse_narrow<T: IniInteger>(text: &[u8]) -> Result<T> {
    let (wide, clamped) = parse_integer(text, T::SIGNED)?;
    let narrowed = T::wrap(wide);
    if clamped || narrowed.widen() != wide {
        return Err(Error::ValueTruncated {
            wide,
            narrowed: narrowed.widen(),
        });
    }
    Ok(narrowed)
}

/// Parses `true`/`yes`/`1` and `false`/`no`/`0`, ignoring case.
pub(crate) fn parse_bool(text: &[u8]) -> Result<bool> {
    const TRUE: [&[u8]; 3] = [b"true", b"yes", b"1"];
    const FALSE: [&[u8]; 3] = [b"false", b"no", b"0"];

    if TRUE.iter().any(|t| t.eq_ignore_ascii_case(text)) {
        Ok(true)
    } else if FALSE.iter().any(|f| f.eq_ignore_ascii_case(text)) {
        Ok(false)
    } else {
        Err(format_error(text, "a boolean"))
    }
}

/// Parses a decimal or exponential floating point number.
pub(crate) fn parse_float<F: std::str::FromStr>(text: &[u8]) -> Result<F> {
    std::str::from_utf8(text)
        .ok()
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| format_error(text, "a number"))
}

/// Splits `text` on `separators` and parses each token into `out`.
///
/// Runs of separators count as one. Parsing stops once `out` is full.
pub(crate) fn parse_byte_array(
    text: &[u8],
    out: &mut [u8],
    separators: &[u8],
    radix: u32,
) -> std::result::Result<usize, PartialFill> {
    let mut filled = 0;
    let tokens = text
        .split(|b| separators.contains(b))
        .filter(|token| !token.is_empty());

    for token in tokens {
        if filled == out.len() {
            break;
        }

        let digits = match token {
            [b'0', b'x' | b'X', hex @ ..] if radix == 16 && !hex.is_empty() => hex,
            _ => token,
        };
        let Some(value) = accumulate(digits, radix) else {
            return Err(PartialFill {
                filled,
                source: format_error(token, "a byte"),
            });
        };

        #[allow(clippy::cast_possible_truncation)]
        let byte = value as u8;
        out[filled] = byte;
        filled += 1;

        if value > u128::from(u8::MAX) {
            return Err(PartialFill {
                filled,
                source: Error::ValueTruncated {
                    wide: i128::try_from(value).unwrap_or(i128::MAX),
                    narrowed: i128::from(byte),
                },
            });
        }
    }

    Ok(filled)
}
