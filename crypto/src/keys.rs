//! One-time private keys and their public digests.

use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

use tangle_types::{
    add_trits, trits_from_int, Curl, SecurityLevel, Seed, Trit, TryteSeq, FRAGMENT_TRYTES,
    HASH_TRITS, HASH_TRYTES, TRITS_PER_TRYTE,
};

use crate::error::CryptoError;

/// Number of trits in one key fragment.
pub const FRAGMENT_TRITS: usize = FRAGMENT_TRYTES * TRITS_PER_TRYTE;

/// Number of 243-trit blocks in one fragment.
pub const HASHES_PER_FRAGMENT: usize = FRAGMENT_TRYTES / HASH_TRYTES;

/// A one-time private key: one 2187-tryte fragment per security level.
///
/// Signing with the same key twice leaks key material, so a key must never
/// outlive its single signature. Key material is wiped on drop and debug
/// output is redacted.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct PrivateKey {
    trytes: TryteSeq,
    #[zeroize(skip)]
    key_index: usize,
    #[zeroize(skip)]
    security_level: SecurityLevel,
}

impl PrivateKey {
    pub fn as_trytes(&self) -> &TryteSeq {
        &self.trytes
    }

    pub fn trits(&self) -> Vec<Trit> {
        self.trytes.trits()
    }

    /// The key index this key was derived at.
    pub fn key_index(&self) -> usize {
        self.key_index
    }

    pub fn security_level(&self) -> SecurityLevel {
        self.security_level
    }

    /// Collapses the key to its public digest.
    ///
    /// Each 243-trit block of each fragment is re-hashed 26 times, then the
    /// whole processed fragment is hashed once more into an 81-tryte digest
    /// chunk. Verifying a signature re-derives exactly this value.
    pub fn digest(&self) -> Digest {
        let key_trits = self.trytes.trits();
        let mut digest_trits = vec![0 as Trit; HASH_TRITS * self.security_level.fragments()];

        for (fragment_seq, fragment) in key_trits.chunks(FRAGMENT_TRITS).enumerate() {
            let mut processed = fragment.to_vec();

            for block in processed.chunks_mut(HASH_TRITS) {
                for _ in 0..26 {
                    let mut sponge = Curl::new();
                    sponge.absorb(block);
                    sponge.squeeze(block);
                }
            }

            let mut sponge = Curl::new();
            sponge.absorb(&processed);
            let start = fragment_seq * HASH_TRITS;
            sponge.squeeze(&mut digest_trits[start..start + HASH_TRITS]);
        }

        Digest {
            trytes: TryteSeq::from_trits(&digest_trits),
            key_index: self.key_index,
            security_level: self.security_level,
        }
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PrivateKey(<{} trytes, index {}, level {:?}>)",
            self.trytes.len(),
            self.key_index,
            self.security_level,
        )
    }
}

/// The public digest of a one-time key, 81 trytes per security level.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Digest {
    trytes: TryteSeq,
    key_index: usize,
    security_level: SecurityLevel,
}

impl Digest {
    pub fn as_trytes(&self) -> &TryteSeq {
        &self.trytes
    }

    pub fn trits(&self) -> Vec<Trit> {
        self.trytes.trits()
    }

    pub fn key_index(&self) -> usize {
        self.key_index
    }

    pub fn security_level(&self) -> SecurityLevel {
        self.security_level
    }
}

/// A source of one-time private keys, keyed by index and security level.
///
/// The seam lets bundle signing accept precomputed keys in tests.
pub trait KeySource {
    fn key(&self, index: usize, level: SecurityLevel) -> Result<PrivateKey, CryptoError>;
}

/// Derives one-time keys from a seed.
pub struct KeyGenerator {
    seed: Seed,
}

impl KeyGenerator {
    pub fn new(seed: Seed) -> Self {
        Self { seed }
    }

    /// Derives the keys for `count` consecutive indexes starting at `start`.
    pub fn keys(
        &self,
        start: usize,
        count: usize,
        level: SecurityLevel,
    ) -> Result<Vec<PrivateKey>, CryptoError> {
        (start..start + count)
            .map(|index| self.key(index, level))
            .collect()
    }

    /// Readies a sponge seeded with the subseed for `index`.
    ///
    /// The subseed is the seed plus the index in balanced ternary, with any
    /// carry past the seed's width discarded. The sponge state is the hash
    /// of that subseed.
    fn subseed_sponge(&self, index: usize) -> Result<Curl, CryptoError> {
        let index = i64::try_from(index).map_err(|_| CryptoError::KeyIndexTooLarge(index))?;

        // Seeds hash in whole 81-tryte blocks.
        let padded_len = self.seed.len().div_ceil(HASH_TRYTES).max(1) * HASH_TRYTES;
        let seed_trits = self.seed.as_trytes().clone().pad_to(padded_len).trits();
        let subseed = add_trits(&seed_trits, &trits_from_int(index, 0));

        let mut sponge = Curl::new();
        sponge.absorb(&subseed);

        let mut buffer = [0 as Trit; HASH_TRITS];
        sponge.squeeze(&mut buffer);
        sponge.reset();
        sponge.absorb(&buffer);

        Ok(sponge)
    }
}

impl KeySource for KeyGenerator {
    /// Derives the one-time key at `index` with `level` fragments.
    fn key(&self, index: usize, level: SecurityLevel) -> Result<PrivateKey, CryptoError> {
        let mut sponge = self.subseed_sponge(index)?;

        let mut key_trits = vec![0 as Trit; FRAGMENT_TRITS * level.fragments()];
        for block in key_trits.chunks_mut(HASH_TRITS) {
            sponge.squeeze(block);
        }

        let key = PrivateKey {
            trytes: TryteSeq::from_trits(&key_trits),
            key_index: index,
            security_level: level,
        };
        key_trits.zeroize();

        Ok(key)
    }
}
