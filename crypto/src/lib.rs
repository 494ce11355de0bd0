//! Hash-based signing for the Tangle protocol.
//!
//! - **Key derivation**: one-time private keys derived from a seed and a
//!   key index with the Curl sponge
//! - **Digests and addresses**: each private key collapses to a digest,
//!   and the digest to the 81-tryte address that can receive funds
//! - **Signatures**: Winternitz-style fragments over the normalized
//!   bundle hash, one 2187-tryte fragment per security level

pub mod addresses;
pub mod error;
pub mod keys;
pub mod signing;

pub use addresses::{address_from_digest, AddressGenerator};
pub use error::CryptoError;
pub use keys::{Digest, KeyGenerator, KeySource, PrivateKey};
pub use signing::{message_fragments, signature_fragments, validate_signature_fragments};
