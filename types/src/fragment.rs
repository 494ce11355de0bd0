//! Wire-sized payload wrappers.

use crate::hash::fixed_trytes;
use crate::trytes::IntoTrytes;

fixed_trytes!(
    /// A 2187-tryte signature or message fragment.
    Fragment,
    crate::FRAGMENT_TRYTES
);

fixed_trytes!(
    /// The full 2673-tryte wire encoding of one transaction.
    TransactionTrytes,
    crate::TRANSACTION_TRYTES
);

fixed_trytes!(
    /// The 27-tryte proof-of-work nonce.
    Nonce,
    crate::TAG_TRYTES
);

impl Fragment {
    /// Builds a fragment from up to 2187 trytes, padding with null trytes.
    pub fn from_short(input: impl IntoTrytes) -> Result<Self, crate::TrytesError> {
        let trytes = input.into_trytes()?;
        if trytes.len() > Self::LEN {
            return Err(crate::TrytesError::WrongLength {
                kind: "Fragment",
                expected: Self::LEN,
                actual: trytes.len(),
            });
        }
        Self::from_trytes(trytes.pad_to(Self::LEN))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fragment_padding() {
        let fragment = Fragment::from_short("HELLO").unwrap();
        assert_eq!(fragment.as_trytes().len(), 2187);
        assert!(fragment.as_str().starts_with("HELLO9"));
    }

    #[test]
    fn transaction_trytes_length() {
        assert!(TransactionTrytes::from_trytes("9".repeat(2673)).is_ok());
        assert!(TransactionTrytes::from_trytes("9".repeat(2672)).is_err());
    }
}
