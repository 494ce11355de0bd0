//! The wire-level transaction record.

use serde::{Deserialize, Serialize};

use tangle_types::{
    int_from_trits, trits_from_int, Address, BundleHash, Curl, Fragment, Nonce, Tag, Trit,
    TransactionHash, TransactionTrytes, TryteSeq, TrytesError, HASH_TRITS,
};

// Tryte offsets of each field inside the 2673-tryte record.
const FRAGMENT_RANGE: std::ops::Range<usize> = 0..2187;
const ADDRESS_RANGE: std::ops::Range<usize> = 2187..2268;
const VALUE_RANGE: std::ops::Range<usize> = 2268..2295;
const LEGACY_TAG_RANGE: std::ops::Range<usize> = 2295..2322;
const TIMESTAMP_RANGE: std::ops::Range<usize> = 2322..2331;
const CURRENT_INDEX_RANGE: std::ops::Range<usize> = 2331..2340;
const LAST_INDEX_RANGE: std::ops::Range<usize> = 2340..2349;
const BUNDLE_HASH_RANGE: std::ops::Range<usize> = 2349..2430;
const TRUNK_RANGE: std::ops::Range<usize> = 2430..2511;
const BRANCH_RANGE: std::ops::Range<usize> = 2511..2592;
const TAG_RANGE: std::ops::Range<usize> = 2592..2619;
const ATTACHMENT_TS_RANGE: std::ops::Range<usize> = 2619..2628;
const ATTACHMENT_LOWER_RANGE: std::ops::Range<usize> = 2628..2637;
const ATTACHMENT_UPPER_RANGE: std::ops::Range<usize> = 2637..2646;
const NONCE_RANGE: std::ops::Range<usize> = 2646..2673;

/// Trit widths of the numeric wire fields.
const VALUE_TRITS: usize = 81;
const TIMESTAMP_TRITS: usize = 27;

/// One transaction of a bundle, as carried on the wire.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Signature for inputs, message payload for outputs.
    pub signature_message_fragment: Fragment,
    pub address: Address,
    pub value: i64,
    /// Mutated during finalization to dodge insecure bundle hashes.
    pub legacy_tag: Tag,
    pub timestamp: i64,
    pub current_index: usize,
    pub last_index: usize,
    pub bundle_hash: BundleHash,
    pub trunk_transaction_hash: TransactionHash,
    pub branch_transaction_hash: TransactionHash,
    pub tag: Tag,
    pub attachment_timestamp: i64,
    pub attachment_timestamp_lower_bound: i64,
    pub attachment_timestamp_upper_bound: i64,
    pub nonce: Nonce,
}

impl Transaction {
    /// Parses a transaction from its 2673-tryte wire encoding.
    pub fn from_trytes(trytes: &TransactionTrytes) -> Result<Self, TrytesError> {
        let raw = trytes.as_trytes();

        Ok(Self {
            signature_message_fragment: Fragment::from_trytes(raw.slice(FRAGMENT_RANGE))?,
            address: Address::from_trytes(raw.slice(ADDRESS_RANGE))?,
            value: int_from_trits(&raw.slice(VALUE_RANGE).trits())?,
            legacy_tag: Tag::from_trytes(raw.slice(LEGACY_TAG_RANGE))?,
            timestamp: int_from_trits(&raw.slice(TIMESTAMP_RANGE).trits())?,
            current_index: index_from_field(&raw.slice(CURRENT_INDEX_RANGE))?,
            last_index: index_from_field(&raw.slice(LAST_INDEX_RANGE))?,
            bundle_hash: BundleHash::from_trytes(raw.slice(BUNDLE_HASH_RANGE))?,
            trunk_transaction_hash: TransactionHash::from_trytes(raw.slice(TRUNK_RANGE))?,
            branch_transaction_hash: TransactionHash::from_trytes(raw.slice(BRANCH_RANGE))?,
            tag: Tag::from_trytes(raw.slice(TAG_RANGE))?,
            attachment_timestamp: int_from_trits(&raw.slice(ATTACHMENT_TS_RANGE).trits())?,
            attachment_timestamp_lower_bound: int_from_trits(
                &raw.slice(ATTACHMENT_LOWER_RANGE).trits(),
            )?,
            attachment_timestamp_upper_bound: int_from_trits(
                &raw.slice(ATTACHMENT_UPPER_RANGE).trits(),
            )?,
            nonce: Nonce::from_trytes(raw.slice(NONCE_RANGE))?,
        })
    }

    /// Serializes the transaction to its 2673-tryte wire encoding.
    pub fn as_trytes(&self) -> TransactionTrytes {
        let mut out = self.signature_message_fragment.as_trytes().clone();
        out.push_trytes(self.address.payload());
        out.push_trytes(&int_field(self.value, VALUE_TRITS));
        out.push_trytes(self.legacy_tag.as_trytes());
        out.push_trytes(&int_field(self.timestamp, TIMESTAMP_TRITS));
        out.push_trytes(&int_field(self.current_index as i64, TIMESTAMP_TRITS));
        out.push_trytes(&int_field(self.last_index as i64, TIMESTAMP_TRITS));
        out.push_trytes(self.bundle_hash.as_trytes());
        out.push_trytes(self.trunk_transaction_hash.as_trytes());
        out.push_trytes(self.branch_transaction_hash.as_trytes());
        out.push_trytes(self.tag.as_trytes());
        out.push_trytes(&int_field(self.attachment_timestamp, TIMESTAMP_TRITS));
        out.push_trytes(&int_field(self.attachment_timestamp_lower_bound, TIMESTAMP_TRITS));
        out.push_trytes(&int_field(self.attachment_timestamp_upper_bound, TIMESTAMP_TRITS));
        out.push_trytes(self.nonce.as_trytes());

        // Field widths always total the wire length.
        TransactionTrytes::from_trytes(out).unwrap_or_else(|_| TransactionTrytes::null())
    }

    /// The 486 trits of this transaction that feed the bundle hash.
    pub fn essence(&self) -> Vec<Trit> {
        let mut essence = self.address.trits();
        essence.extend(int_trits(self.value, VALUE_TRITS));
        essence.extend(self.legacy_tag.trits());
        essence.extend(int_trits(self.timestamp, TIMESTAMP_TRITS));
        essence.extend(int_trits(self.current_index as i64, TIMESTAMP_TRITS));
        essence.extend(int_trits(self.last_index as i64, TIMESTAMP_TRITS));
        essence
    }

    /// The Curl hash of the full wire encoding, identifying this
    /// transaction on the network.
    pub fn hash(&self) -> TransactionHash {
        let mut sponge = Curl::new();
        sponge.absorb(&self.as_trytes().trits());

        let mut out = [0 as Trit; HASH_TRITS];
        sponge.squeeze(&mut out);

        // A squeezed hash always has the right width.
        TransactionHash::from_trits(&out).unwrap_or_else(|_| TransactionHash::null())
    }

    /// Whether this is the tail of its bundle, the transaction a node
    /// walks the rest of the bundle from.
    pub fn is_tail(&self) -> bool {
        self.current_index == 0
    }
}

/// Encodes a numeric field at its fixed trit width. The wire layout cannot
/// grow, so a value past the field's range is truncated to width.
fn int_trits(value: i64, width: usize) -> Vec<Trit> {
    let mut trits = trits_from_int(value, width);
    debug_assert!(
        trits.len() == width,
        "value {value} does not fit in {width} trits"
    );
    trits.truncate(width);
    trits
}

fn int_field(value: i64, width: usize) -> TryteSeq {
    TryteSeq::from_trits(&int_trits(value, width))
}

fn index_from_field(raw: &TryteSeq) -> Result<usize, TrytesError> {
    let value = int_from_trits(&raw.trits())?;
    usize::try_from(value).map_err(|_| TrytesError::IntOverflow)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Transaction {
        Transaction {
            signature_message_fragment: Fragment::null(),
            address: Address::from_trytes("A".repeat(81)).unwrap(),
            value: 42,
            legacy_tag: Tag::from_short("LEGACY").unwrap(),
            timestamp: 1_700_000_000,
            current_index: 0,
            last_index: 3,
            bundle_hash: BundleHash::null(),
            trunk_transaction_hash: TransactionHash::null(),
            branch_transaction_hash: TransactionHash::null(),
            tag: Tag::from_short("TAG").unwrap(),
            attachment_timestamp: 0,
            attachment_timestamp_lower_bound: 0,
            attachment_timestamp_upper_bound: 0,
            nonce: Nonce::null(),
        }
    }

    #[test]
    fn wire_round_trip() {
        let transaction = sample();
        let trytes = transaction.as_trytes();
        assert_eq!(Transaction::from_trytes(&trytes).unwrap(), transaction);
    }

    #[test]
    fn wire_encoding_has_fixed_length() {
        assert_eq!(sample().as_trytes().as_trytes().len(), 2673);
    }

    #[test]
    fn negative_value_round_trips() {
        let mut transaction = sample();
        transaction.value = -1_000_000;
        let trytes = transaction.as_trytes();
        assert_eq!(Transaction::from_trytes(&trytes).unwrap().value, -1_000_000);
    }

    #[test]
    #[should_panic(expected = "does not fit")]
    fn oversized_numeric_field_is_caught() {
        let mut transaction = sample();
        // Beyond the 27-trit attachment timestamp field.
        transaction.attachment_timestamp = i64::MAX;
        let _ = transaction.as_trytes();
    }

    #[test]
    fn essence_width() {
        assert_eq!(sample().essence().len(), 486);
    }

    #[test]
    fn essence_changes_with_value() {
        let mut other = sample();
        other.value += 1;
        assert_ne!(sample().essence(), other.essence());
    }

    #[test]
    fn hash_ignores_nothing() {
        let mut other = sample();
        other.nonce = Nonce::from_trytes("9".repeat(26) + "A").unwrap();
        assert_ne!(sample().hash(), other.hash());
    }

    #[test]
    fn tail_detection() {
        assert!(sample().is_tail());
        let mut other = sample();
        other.current_index = 1;
        assert!(!other.is_tail());
    }
}
