//! Addresses and their trailing checksums.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::curl::Curl;
use crate::error::TrytesError;
use crate::hash::fixed_trytes;
use crate::security::SecurityLevel;
use crate::trits::Trit;
use crate::trytes::{IntoTrytes, TryteSeq};
use crate::{CHECKSUM_TRYTES, HASH_TRITS, HASH_TRYTES};

fixed_trytes!(
    /// The 9-tryte checksum appended to an address for transcription safety.
    AddressChecksum,
    crate::CHECKSUM_TRYTES
);

/// An 81-tryte address, optionally carrying its 9-tryte checksum.
///
/// The checksum and the attached spending metadata (balance, key index,
/// security level) are conveniences for wallet flows; equality and hashing
/// consider only the 81-tryte payload, which is what appears on the wire.
#[derive(Clone, Debug)]
pub struct Address {
    payload: TryteSeq,
    checksum: Option<AddressChecksum>,
    balance: Option<i64>,
    key_index: Option<usize>,
    security_level: Option<SecurityLevel>,
}

impl Address {
    /// Parses an address from 81 trytes (bare) or 90 trytes (payload plus
    /// checksum). An attached checksum is kept but not verified.
    pub fn from_trytes(input: impl IntoTrytes) -> Result<Self, TrytesError> {
        let trytes = input.into_trytes()?;

        match trytes.len() {
            HASH_TRYTES => Ok(Self::bare(trytes)),
            len if len == HASH_TRYTES + CHECKSUM_TRYTES => {
                let payload = trytes.slice(0..HASH_TRYTES);
                let checksum =
                    AddressChecksum::from_trytes(trytes.slice(HASH_TRYTES..len))?;
                Ok(Self {
                    checksum: Some(checksum),
                    ..Self::bare(payload)
                })
            }
            actual => Err(TrytesError::BadAddressLength { actual }),
        }
    }

    /// Builds a bare address from a full hash worth of trits.
    pub fn from_trit_array(trits: &[Trit; HASH_TRITS]) -> Self {
        Self::bare(TryteSeq::from_trits(trits))
    }

    /// Builds a bare address from exactly 243 trits.
    pub fn from_trits(trits: &[Trit]) -> Result<Self, TrytesError> {
        if trits.len() != HASH_TRITS {
            return Err(TrytesError::WrongLength {
                kind: "Address",
                expected: HASH_TRYTES,
                actual: trits.len() / crate::TRITS_PER_TRYTE,
            });
        }
        Ok(Self::bare(TryteSeq::from_trits(trits)))
    }

    fn bare(payload: TryteSeq) -> Self {
        Self {
            payload,
            checksum: None,
            balance: None,
            key_index: None,
            security_level: None,
        }
    }

    /// The 81-tryte payload, the form used in transaction records.
    pub fn payload(&self) -> &TryteSeq {
        &self.payload
    }

    pub fn as_str(&self) -> &str {
        self.payload.as_str()
    }

    /// The payload as 243 trits.
    pub fn trits(&self) -> Vec<Trit> {
        self.payload.trits()
    }

    /// The currently attached checksum, if any.
    pub fn checksum(&self) -> Option<&AddressChecksum> {
        self.checksum.as_ref()
    }

    /// Derives the correct checksum for this payload.
    pub fn compute_checksum(&self) -> AddressChecksum {
        let mut sponge = Curl::new();
        sponge.absorb(&self.payload.trits());

        let mut out = [0 as Trit; HASH_TRITS];
        sponge.squeeze(&mut out);

        let digest = TryteSeq::from_trits(&out);
        // Construction from a squeezed hash cannot produce a bad length.
        AddressChecksum::from_trytes(
            digest.slice(HASH_TRYTES - CHECKSUM_TRYTES..HASH_TRYTES),
        )
        .unwrap_or_else(|_| AddressChecksum::null())
    }

    /// Returns the address with a freshly computed checksum attached,
    /// replacing any existing one.
    pub fn with_checksum(mut self) -> Self {
        self.checksum = Some(self.compute_checksum());
        self
    }

    /// Returns the address with no checksum attached.
    pub fn without_checksum(mut self) -> Self {
        self.checksum = None;
        self
    }

    /// Whether the attached checksum matches the payload. An address with
    /// no checksum attached is not valid.
    pub fn is_checksum_valid(&self) -> bool {
        match &self.checksum {
            Some(checksum) => *checksum == self.compute_checksum(),
            None => false,
        }
    }

    pub fn balance(&self) -> Option<i64> {
        self.balance
    }

    pub fn key_index(&self) -> Option<usize> {
        self.key_index
    }

    pub fn security_level(&self) -> Option<SecurityLevel> {
        self.security_level
    }

    pub fn with_balance(mut self, balance: i64) -> Self {
        self.balance = Some(balance);
        self
    }

    pub fn with_key_index(mut self, key_index: usize) -> Self {
        self.key_index = Some(key_index);
        self
    }

    pub fn with_security_level(mut self, level: SecurityLevel) -> Self {
        self.security_level = Some(level);
        self
    }

    /// Payload plus checksum when one is attached.
    fn full_trytes(&self) -> TryteSeq {
        match &self.checksum {
            Some(checksum) => self.payload.clone() + checksum.as_trytes(),
            None => self.payload.clone(),
        }
    }
}

impl PartialEq for Address {
    fn eq(&self, other: &Self) -> bool {
        self.payload == other.payload
    }
}

impl Eq for Address {}

impl std::hash::Hash for Address {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.payload.hash(state);
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.full_trytes(), f)
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.full_trytes().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let trytes = TryteSeq::deserialize(deserializer)?;
        Address::from_trytes(trytes).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Address {
        Address::from_trytes("A".repeat(81)).unwrap()
    }

    #[test]
    fn accepts_bare_and_checksummed_lengths() {
        assert!(Address::from_trytes("B".repeat(81)).is_ok());
        assert!(Address::from_trytes("B".repeat(90)).is_ok());
        assert_eq!(
            Address::from_trytes("B".repeat(85)).unwrap_err(),
            TrytesError::BadAddressLength { actual: 85 }
        );
    }

    #[test]
    fn checksum_round_trip() {
        let with = sample().with_checksum();
        assert!(with.is_checksum_valid());
        assert_eq!(with.to_string().len(), 90);

        let reparsed = Address::from_trytes(with.to_string()).unwrap();
        assert!(reparsed.is_checksum_valid());

        let bare = reparsed.without_checksum();
        assert!(bare.checksum().is_none());
        assert!(!bare.is_checksum_valid());
    }

    #[test]
    fn wrong_checksum_detected() {
        let mut trytes = sample().with_checksum().to_string();
        // Flip the last checksum tryte.
        let last = trytes.pop().unwrap();
        trytes.push(if last == 'Z' { 'A' } else { 'Z' });

        let tampered = Address::from_trytes(trytes).unwrap();
        assert!(!tampered.is_checksum_valid());
    }

    #[test]
    fn equality_ignores_checksum_and_metadata() {
        let bare = sample();
        let decorated = sample().with_checksum().with_balance(100).with_key_index(3);
        assert_eq!(bare, decorated);
    }

    #[test]
    fn metadata_accessors() {
        let address = sample()
            .with_balance(42)
            .with_key_index(7)
            .with_security_level(SecurityLevel::Three);
        assert_eq!(address.balance(), Some(42));
        assert_eq!(address.key_index(), Some(7));
        assert_eq!(address.security_level(), Some(SecurityLevel::Three));
    }

    #[test]
    fn serde_keeps_checksum() {
        let address = sample().with_checksum();
        let json = serde_json::to_string(&address).unwrap();
        let back: Address = serde_json::from_str(&json).unwrap();
        assert!(back.is_checksum_valid());
    }
}
