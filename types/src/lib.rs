//! Ternary primitives and validated tryte value types for the Tangle protocol.
//!
//! This crate defines the foundation shared by every other crate in the
//! workspace: trit/tryte conversions, the byte and Unicode codecs, the Curl
//! sponge, the generic [`TryteSeq`] sequence type, and the fixed-shape
//! wrappers used on the wire (hashes, addresses, tags, fragments).

pub mod address;
pub mod codec;
pub mod curl;
pub mod error;
pub mod fragment;
pub mod hash;
pub mod security;
pub mod seed;
pub mod tag;
pub mod trits;
pub mod trytes;

pub use address::{Address, AddressChecksum};
pub use codec::ErrorPolicy;
pub use curl::Curl;
pub use error::TrytesError;
pub use fragment::{Fragment, Nonce, TransactionTrytes};
pub use hash::{BundleHash, Hash, TransactionHash};
pub use security::SecurityLevel;
pub use seed::Seed;
pub use tag::Tag;
pub use trits::{add_trits, int_from_trits, trits_from_int, Trit};
pub use trytes::{IntoTrytes, TryteSeq};

/// Number of trits in one tryte.
pub const TRITS_PER_TRYTE: usize = 3;

/// Number of trits in one hash.
pub const HASH_TRITS: usize = 243;

/// Number of trytes in one hash.
pub const HASH_TRYTES: usize = HASH_TRITS / TRITS_PER_TRYTE;

/// Number of trytes in a signature/message fragment.
pub const FRAGMENT_TRYTES: usize = 2187;

/// Number of trytes in one full transaction wire record.
pub const TRANSACTION_TRYTES: usize = 2673;

/// Number of trytes in a tag.
pub const TAG_TRYTES: usize = 27;

/// Number of trytes in an address checksum.
pub const CHECKSUM_TRYTES: usize = 9;
