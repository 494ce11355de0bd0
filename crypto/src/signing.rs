//! Signature fragment generation and verification.
//!
//! A signature consists of one 2187-tryte fragment per security level.
//! Fragment `i` signs chunk `i % 3` of the normalized bundle hash: each
//! 243-trit block of the key fragment is re-hashed `13 - value` times when
//! signing, and a verifier hashing `13 + value` more times lands back on
//! the key digest. Between them, every block is hashed exactly 26 times.

use tangle_types::{Address, BundleHash, Curl, Fragment, Trit, TryteSeq, HASH_TRITS};

use crate::error::CryptoError;
use crate::keys::{PrivateKey, FRAGMENT_TRITS};

/// Number of normalized hash values signed per fragment.
const VALUES_PER_CHUNK: usize = 27;

fn rehash(block: &mut [Trit], rounds: i8) {
    for _ in 0..rounds {
        let mut sponge = Curl::new();
        sponge.absorb(block);
        sponge.squeeze(block);
    }
}

/// Signs the normalized `bundle_hash` with `key`, producing one fragment
/// per security level.
///
/// The key is single-use; it must never sign two distinct hashes.
pub fn signature_fragments(
    key: &PrivateKey,
    bundle_hash: &BundleHash,
) -> Result<Vec<Fragment>, CryptoError> {
    let normalized = bundle_hash.normalize();
    let key_trits = key.trits();

    let mut fragments = Vec::with_capacity(key.security_level().fragments());
    for (fragment_seq, fragment) in key_trits.chunks(FRAGMENT_TRITS).enumerate() {
        let chunk_start = (fragment_seq % 3) * VALUES_PER_CHUNK;
        let chunk = &normalized[chunk_start..chunk_start + VALUES_PER_CHUNK];

        let mut signed = fragment.to_vec();
        for (block_seq, block) in signed.chunks_mut(HASH_TRITS).enumerate() {
            rehash(block, 13 - chunk[block_seq]);
        }

        fragments.push(Fragment::from_trits(&signed)?);
    }

    Ok(fragments)
}

/// Checks that `fragments` sign `bundle_hash` on behalf of `address`.
///
/// Re-derives the key digests from the fragments and the address from the
/// digests; a signature is valid exactly when the re-derived address
/// payload matches.
pub fn validate_signature_fragments(
    fragments: &[Fragment],
    bundle_hash: &BundleHash,
    address: &Address,
) -> bool {
    if fragments.is_empty() {
        return false;
    }

    let normalized = bundle_hash.normalize();
    let mut digests = vec![0 as Trit; fragments.len() * HASH_TRITS];

    for (fragment_seq, fragment) in fragments.iter().enumerate() {
        let chunk_start = (fragment_seq % 3) * VALUES_PER_CHUNK;
        let chunk = &normalized[chunk_start..chunk_start + VALUES_PER_CHUNK];

        let mut outer = Curl::new();
        let mut fragment_trits = fragment.trits();
        for (block_seq, block) in fragment_trits.chunks_mut(HASH_TRITS).enumerate() {
            rehash(block, 13 + chunk[block_seq]);
            outer.absorb(block);
        }

        let start = fragment_seq * HASH_TRITS;
        outer.squeeze(&mut digests[start..start + HASH_TRITS]);
    }

    let mut sponge = Curl::new();
    sponge.absorb(&digests);
    let mut derived = [0 as Trit; HASH_TRITS];
    sponge.squeeze(&mut derived);

    address.trits() == derived
}

/// Splits an oversized message into as many fragments as it needs.
pub fn message_fragments(message: &TryteSeq) -> Vec<Fragment> {
    message
        .chunks(tangle_types::FRAGMENT_TRYTES)
        .map(|chunk| {
            // Chunks are emitted at exactly fragment length.
            Fragment::from_trytes(chunk).unwrap_or_else(|_| Fragment::null())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::addresses::address_from_digest;
    use crate::keys::{KeyGenerator, KeySource};
    use tangle_types::{SecurityLevel, Seed};

    fn signed_setup(level: SecurityLevel) -> (Vec<Fragment>, BundleHash, Address) {
        let seed = Seed::from_trytes("TESTVALUE9DONTUSEINPRODUCTION99999").unwrap();
        let key = KeyGenerator::new(seed).key(0, level).unwrap();
        let address = address_from_digest(&key.digest());
        let hash = BundleHash::from_trytes(
            "TAEKW9KCAVQZVGFBCDHJLZTEAJISDZOWECRGIVOMGBPCISSGNCEYTEGMKHIPIRYIIQEODHEAEOROBH999",
        )
        .unwrap();
        let fragments = signature_fragments(&key, &hash).unwrap();
        (fragments, hash, address)
    }

    #[test]
    fn valid_signature_verifies() {
        for level in [SecurityLevel::One, SecurityLevel::Two, SecurityLevel::Three] {
            let (fragments, hash, address) = signed_setup(level);
            assert_eq!(fragments.len(), level.fragments());
            assert!(validate_signature_fragments(&fragments, &hash, &address));
        }
    }

    #[test]
    fn tampered_fragment_fails() {
        let (mut fragments, hash, address) = signed_setup(SecurityLevel::Two);
        let mut trits = fragments[0].trits();
        trits[0] = if trits[0] == 1 { -1 } else { 1 };
        fragments[0] = Fragment::from_trits(&trits).unwrap();
        assert!(!validate_signature_fragments(&fragments, &hash, &address));
    }

    #[test]
    fn wrong_hash_fails() {
        let (fragments, _, address) = signed_setup(SecurityLevel::One);
        let other = BundleHash::from_trytes("M".repeat(81)).unwrap();
        assert!(!validate_signature_fragments(&fragments, &other, &address));
    }

    #[test]
    fn wrong_address_fails() {
        let (fragments, hash, _) = signed_setup(SecurityLevel::One);
        let other = Address::from_trytes("Q".repeat(81)).unwrap();
        assert!(!validate_signature_fragments(&fragments, &hash, &other));
    }

    #[test]
    fn missing_fragment_fails() {
        let (fragments, hash, address) = signed_setup(SecurityLevel::Two);
        assert!(!validate_signature_fragments(&fragments[..1], &hash, &address));
        assert!(!validate_signature_fragments(&[], &hash, &address));
    }

    #[test]
    fn message_splits_into_padded_fragments() {
        let message = TryteSeq::from_ascii(b"CC").unwrap().pad_to(2188);
        let fragments = message_fragments(&message);
        assert_eq!(fragments.len(), 2);
        assert!(fragments[1].is_null());
    }
}
