//! Seeds, the root secret for key derivation.

use std::fmt;

use rand::rngs::OsRng;
use rand::Rng;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::TrytesError;
use crate::trits::{Trit, TRYTE_ALPHABET};
use crate::trytes::{IntoTrytes, TryteSeq};
use crate::HASH_TRYTES;

/// The secret tryte sequence all of an account's keys derive from.
///
/// Seeds are wiped from memory on drop and render redacted in debug
/// output. Any length is accepted, but 81 trytes is the standard.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Seed(TryteSeq);

impl Seed {
    /// Validates an existing tryte sequence as a seed.
    pub fn from_trytes(input: impl IntoTrytes) -> Result<Self, TrytesError> {
        Ok(Self(input.into_trytes()?))
    }

    /// Generates a standard 81-tryte seed from the operating system's
    /// entropy source.
    pub fn random() -> Self {
        Self::random_with_len(HASH_TRYTES)
    }

    /// Generates a seed of `len` trytes from the operating system's
    /// entropy source.
    pub fn random_with_len(len: usize) -> Self {
        let mut ascii = Vec::with_capacity(len);
        for _ in 0..len {
            ascii.push(TRYTE_ALPHABET[OsRng.gen_range(0..TRYTE_ALPHABET.len())]);
        }

        // Every generated character is drawn from the alphabet.
        Self(TryteSeq::from_ascii(&ascii).unwrap_or_default())
    }

    pub fn as_trytes(&self) -> &TryteSeq {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn trits(&self) -> Vec<Trit> {
        self.0.trits()
    }
}

impl fmt::Debug for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Seed(<{} trytes>)", self.0.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_seed_has_standard_length() {
        let seed = Seed::random();
        assert_eq!(seed.len(), 81);
    }

    #[test]
    fn random_seeds_differ() {
        assert_ne!(Seed::random(), Seed::random());
    }

    #[test]
    fn debug_output_is_redacted() {
        let seed = Seed::from_trytes("SECRET9SEED").unwrap();
        assert_eq!(format!("{seed:?}"), "Seed(<11 trytes>)");
    }

    #[test]
    fn accepts_any_valid_trytes() {
        assert!(Seed::from_trytes("TESTVALUE9DONTUSEINPRODUCTION").is_ok());
        assert!(Seed::from_trytes("lowercase").is_err());
    }
}
