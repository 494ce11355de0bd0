//! Errors raised by key derivation and signing.

use thiserror::Error;

use tangle_types::TrytesError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CryptoError {
    #[error(transparent)]
    Trytes(#[from] TrytesError),

    #[error("key index {0} is too large to encode as trits")]
    KeyIndexTooLarge(usize),

    #[error("signature requires {expected} fragments for this security level (got {actual})")]
    WrongFragmentCount { expected: usize, actual: usize },
}
