//! Signing security levels.

use serde::{Deserialize, Serialize};

use crate::error::TrytesError;

/// The number of 2187-tryte key fragments backing a signature.
///
/// Higher levels sign more of the normalized bundle hash and are safer
/// against repeated use of the same address.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum SecurityLevel {
    /// One fragment; signs the first third of the hash.
    One = 1,
    /// Two fragments; the network default.
    Two = 2,
    /// Three fragments; signs the whole hash.
    Three = 3,
}

impl SecurityLevel {
    /// Number of key fragments at this level.
    pub fn fragments(self) -> usize {
        self as usize
    }
}

impl Default for SecurityLevel {
    fn default() -> Self {
        SecurityLevel::Two
    }
}

impl From<SecurityLevel> for u8 {
    fn from(level: SecurityLevel) -> u8 {
        level as u8
    }
}

impl TryFrom<u8> for SecurityLevel {
    type Error = TrytesError;

    fn try_from(raw: u8) -> Result<Self, TrytesError> {
        match raw {
            1 => Ok(SecurityLevel::One),
            2 => Ok(SecurityLevel::Two),
            3 => Ok(SecurityLevel::Three),
            other => Err(TrytesError::InvalidSecurityLevel(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_u8() {
        for raw in 1u8..=3 {
            assert_eq!(u8::from(SecurityLevel::try_from(raw).unwrap()), raw);
        }
    }

    #[test]
    fn rejects_out_of_range() {
        assert!(SecurityLevel::try_from(0).is_err());
        assert!(SecurityLevel::try_from(4).is_err());
    }

    #[test]
    fn default_is_two() {
        assert_eq!(SecurityLevel::default(), SecurityLevel::Two);
    }
}
