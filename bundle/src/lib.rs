//! Bundle construction, signing, and validation.
//!
//! Value transfer on the Tangle happens in bundles: an atomic group of
//! transactions whose values sum to zero, bound together by a shared hash
//! over their essences. This crate builds bundles from outputs and inputs,
//! signs the inputs with one-time keys, serializes the result to the wire
//! format, and validates bundles received from the network.

pub mod builder;
pub mod error;
pub mod transaction;
pub mod validator;

pub use builder::{Bundle, ProposedBundle, ProposedTransaction};
pub use error::BundleError;
pub use transaction::Transaction;
pub use validator::BundleValidator;
