//! Session configuration.
//!
//! [`SessionConfig`] derives `serde` traits so a host application can embed
//! it in its own configuration file.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Default line buffer capacity in bytes.
pub const DEFAULT_BUFFER_CAPACITY: usize = 256;

/// Smallest usable line buffer.
pub const MIN_BUFFER_CAPACITY: usize = 3;

/// How section and key names are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseSensitivity {
    /// ASCII letters compare equal regardless of case.
    #[default]
    Insensitive,
    /// Names must match byte for byte.
    Sensitive,
}

impl CaseSensitivity {
    /// Compares two names as whole strings under this policy.
    #[must_use]
    pub fn matches(self, a: &[u8], b: &[u8]) -> bool {
        match self {
            Self::Sensitive => a == b,
            Self::Insensitive => a.eq_ignore_ascii_case(b),
        }
    }
}

/// Options applied to a [`Session`](crate::Session) for its whole lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Name comparison policy for sections and keys.
    pub case_sensitivity: CaseSensitivity,

    /// Capacity used by [`SessionConfig::allocate_buffer`].
    pub buffer_capacity: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            case_sensitivity: CaseSensitivity::default(),
            buffer_capacity: DEFAULT_BUFFER_CAPACITY,
        }
    }
}

impl SessionConfig {
    /// Creates a configuration with the given comparison policy.
    #[must_use]
    pub fn with_case_sensitivity(case_sensitivity: CaseSensitivity) -> Self {
        Self {
            case_sensitivity,
            ..Self::default()
        }
    }

    /// Checks that the configured buffer can hold a line.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BufferTooSmall`] if the capacity is below three bytes.
    pub fn validate(&self) -> Result<()> {
        if self.buffer_capacity < MIN_BUFFER_CAPACITY {
            return Err(Error::BufferTooSmall {
                offset: 0,
                capacity: self.buffer_capacity,
            });
        }
        Ok(())
    }

    /// Allocates a zeroed line buffer of the configured capacity.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration does not validate.
    pub fn allocate_buffer(&self) -> Result<Vec<u8>> {
        self.validate()?;
        Ok(vec![0; self.buffer_capacity])
    }
}
