//! Error type shared by the ternary codecs and value types.

use thiserror::Error;

/// Errors raised while constructing or converting tryte sequences.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrytesError {
    #[error("invalid character {ch:?} at position {position} (expected A-Z or 9)")]
    InvalidChar { ch: char, position: usize },

    #[error("{kind} values must be {expected} trytes long (got {actual})")]
    WrongLength {
        kind: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("address values must be 81 trytes (no checksum) or 90 trytes (with checksum), got {actual}")]
    BadAddressLength { actual: usize },

    #[error("cannot decode trytes to bytes; sequence has odd length")]
    OddLength,

    #[error("tryte pair {pair:?} at position {position} does not decode to a byte")]
    ByteOutOfRange { pair: [char; 2], position: usize },

    #[error("decoded bytes are not valid UTF-8")]
    InvalidUtf8,

    #[error("trit sequence encodes an integer outside the representable range")]
    IntOverflow,

    #[error("security level must be 1, 2, or 3 (got {0})")]
    InvalidSecurityLevel(u8),
}
