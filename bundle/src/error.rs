//! Errors raised while building and signing bundles.

use thiserror::Error;

use tangle_crypto::CryptoError;
use tangle_types::TrytesError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BundleError {
    #[error("bundle has no transactions")]
    EmptyBundle,

    #[error("bundle has unspent inputs (balance: {balance}); set a change address")]
    UnspentInputs { balance: i128 },

    #[error("bundle has insufficient inputs (balance: {balance})")]
    InsufficientInputs { balance: i128 },

    #[error("output value must not be negative; use add_inputs for inputs")]
    NegativeValue,

    #[error("address {address} is not a usable input")]
    NotAnInput { address: String },

    #[error("input address {address} has no balance attached")]
    MissingBalance { address: String },

    #[error("input address {address} has no key index attached")]
    MissingKeyIndex { address: String },

    #[error("input address {address} has no security level attached")]
    MissingSecurityLevel { address: String },

    #[error("transaction {index} is already signed")]
    AlreadySigned { index: usize },

    #[error("transaction index {index} is out of range")]
    IndexOutOfRange { index: usize },

    #[error("signature slot group at transaction {index} does not hold exactly {fragments} fragments")]
    MissingSignatureSlots { index: usize, fragments: usize },

    #[error(transparent)]
    Crypto(#[from] CryptoError),

    #[error(transparent)]
    Trytes(#[from] TrytesError),
}
