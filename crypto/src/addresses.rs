//! Deterministic address derivation.

use tangle_types::{Address, Curl, SecurityLevel, Seed, Trit, HASH_TRITS};

use crate::error::CryptoError;
use crate::keys::{Digest, KeyGenerator, KeySource};

/// Hashes a key digest down to its address.
///
/// The derived address carries the digest's key index and security level
/// so wallet flows can find the signing key again.
pub fn address_from_digest(digest: &Digest) -> Address {
    let mut sponge = Curl::new();
    sponge.absorb(&digest.trits());

    let mut address_trits = [0 as Trit; HASH_TRITS];
    sponge.squeeze(&mut address_trits);

    Address::from_trit_array(&address_trits)
        .with_key_index(digest.key_index())
        .with_security_level(digest.security_level())
}

/// Derives addresses from a seed, one per key index.
pub struct AddressGenerator {
    keys: KeyGenerator,
    security_level: SecurityLevel,
}

impl AddressGenerator {
    pub fn new(seed: Seed, security_level: SecurityLevel) -> Self {
        Self {
            keys: KeyGenerator::new(seed),
            security_level,
        }
    }

    /// Derives the address at `index`.
    pub fn address(&self, index: usize) -> Result<Address, CryptoError> {
        let key = self.keys.key(index, self.security_level)?;
        Ok(address_from_digest(&key.digest()))
    }

    /// Derives the addresses for `count` consecutive indexes starting at
    /// `start`.
    pub fn addresses(&self, start: usize, count: usize) -> Result<Vec<Address>, CryptoError> {
        (start..start + count).map(|index| self.address(index)).collect()
    }
}
