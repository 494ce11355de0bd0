//! Fixed-length hash wrappers.

/// Defines a fixed-length wrapper around [`TryteSeq`].
///
/// The wrapper validates its length at construction, so holding one is proof
/// the value has the right shape for its wire slot.
macro_rules! fixed_trytes {
    ($(#[$doc:meta])* $name:ident, $len:expr) => {
        $(#[$doc])*
        #[derive(
            Clone,
            Debug,
            PartialEq,
            Eq,
            Hash,
            serde::Serialize,
            serde::Deserialize,
        )]
        #[serde(try_from = "crate::trytes::TryteSeq", into = "crate::trytes::TryteSeq")]
        pub struct $name(crate::trytes::TryteSeq);

        impl $name {
            /// Length of this value in trytes.
            pub const LEN: usize = $len;

            /// Validates `input` as a $name.
            pub fn from_trytes(
                input: impl crate::trytes::IntoTrytes,
            ) -> Result<Self, crate::error::TrytesError> {
                let trytes = input.into_trytes()?;
                if trytes.len() != Self::LEN {
                    return Err(crate::error::TrytesError::WrongLength {
                        kind: stringify!($name),
                        expected: Self::LEN,
                        actual: trytes.len(),
                    });
                }
                Ok(Self(trytes))
            }

            /// Builds the value from raw trits, which must fill it exactly.
            pub fn from_trits(
                trits: &[crate::trits::Trit],
            ) -> Result<Self, crate::error::TrytesError> {
                if trits.len() != Self::LEN * crate::TRITS_PER_TRYTE {
                    return Err(crate::error::TrytesError::WrongLength {
                        kind: stringify!($name),
                        expected: Self::LEN,
                        actual: trits.len() / crate::TRITS_PER_TRYTE,
                    });
                }
                Ok(Self(crate::trytes::TryteSeq::from_trits(trits)))
            }

            /// An all-null value, the wire placeholder.
            pub fn null() -> Self {
                Self(crate::trytes::TryteSeq::empty().pad_to(Self::LEN))
            }

            /// Whether every tryte is the null tryte.
            pub fn is_null(&self) -> bool {
                self.0.is_null()
            }

            pub fn as_trytes(&self) -> &crate::trytes::TryteSeq {
                &self.0
            }

            pub fn as_str(&self) -> &str {
                self.0.as_str()
            }

            pub fn trits(&self) -> Vec<crate::trits::Trit> {
                self.0.trits()
            }

            pub fn tryte_values(&self) -> Vec<i8> {
                self.0.tryte_values()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                std::fmt::Display::fmt(&self.0, f)
            }
        }

        impl std::convert::TryFrom<crate::trytes::TryteSeq> for $name {
            type Error = crate::error::TrytesError;

            fn try_from(trytes: crate::trytes::TryteSeq) -> Result<Self, Self::Error> {
                Self::from_trytes(trytes)
            }
        }

        impl std::convert::From<$name> for crate::trytes::TryteSeq {
            fn from(value: $name) -> crate::trytes::TryteSeq {
                value.0
            }
        }

        impl std::str::FromStr for $name {
            type Err = crate::error::TrytesError;

            fn from_str(raw: &str) -> Result<Self, Self::Err> {
                Self::from_trytes(raw)
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.0 == *other
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.0 == **other
            }
        }
    };
}

pub(crate) use fixed_trytes;

fixed_trytes!(
    /// An 81-tryte Curl hash.
    Hash,
    crate::HASH_TRYTES
);

fixed_trytes!(
    /// The hash identifying a single transaction.
    TransactionHash,
    crate::HASH_TRYTES
);

fixed_trytes!(
    /// The hash binding all transactions of a bundle together.
    BundleHash,
    crate::HASH_TRYTES
);

impl BundleHash {
    /// Maps the hash to 81 balanced tryte values, forcing each 27-value
    /// chunk to sum to zero.
    ///
    /// Signing consumes the normalized form so that every possible hash
    /// exposes the same expected amount of private key material.
    pub fn normalize(&self) -> Vec<i8> {
        let mut values = self.0.tryte_values();

        for chunk in values.chunks_mut(27) {
            let mut sum: i32 = chunk.iter().map(|&v| v as i32).sum();

            while sum > 0 {
                for value in chunk.iter_mut() {
                    if *value > -13 {
                        *value -= 1;
                        sum -= 1;
                        break;
                    }
                }
            }
            while sum < 0 {
                for value in chunk.iter_mut() {
                    if *value < 13 {
                        *value += 1;
                        sum += 1;
                        break;
                    }
                }
            }
        }

        values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enforces_length() {
        assert!(Hash::from_trytes("ABC").is_err());
        assert!(Hash::from_trytes("9".repeat(81)).is_ok());
        assert!(Hash::from_trytes("9".repeat(82)).is_err());
    }

    #[test]
    fn null_hash_is_null() {
        assert!(Hash::null().is_null());
        assert_eq!(Hash::null().as_str(), "9".repeat(81));
    }

    #[test]
    fn from_trits_requires_exact_width() {
        assert!(Hash::from_trits(&[0; 243]).is_ok());
        assert!(Hash::from_trits(&[0; 242]).is_err());
    }

    #[test]
    fn normalize_balances_each_chunk() {
        let hash = BundleHash::from_trytes(
            "BBBBBBBBBBBBBBBBBBBBBBBBBBB\
             NNNNNNNNNNNNNNNNNNNNNNNNNNN\
             999999999999999999999999999",
        )
        .unwrap();

        let normalized = hash.normalize();
        assert_eq!(normalized.len(), 81);
        for chunk in normalized.chunks(27) {
            let sum: i32 = chunk.iter().map(|&v| v as i32).sum();
            assert_eq!(sum, 0);
        }
        assert!(normalized.iter().all(|&v| (-13..=13).contains(&v)));
    }

    #[test]
    fn normalize_adjusts_leading_values_first() {
        // 'A' is 1, so the chunk sum is 27; the first values absorb it.
        let hash =
            BundleHash::from_trytes(format!("{}{}", "A".repeat(27), "9".repeat(54))).unwrap();
        let normalized = hash.normalize();
        // 1 - 27 = -26 is out of range, so the decrements spread.
        assert_eq!(normalized[0], -13);
        assert_eq!(normalized[1], -12);
        assert_eq!(&normalized[2..27], &[1i8; 25]);
    }

    #[test]
    fn serde_rejects_wrong_length() {
        let ok = format!("\"{}\"", "A".repeat(81));
        assert!(serde_json::from_str::<Hash>(&ok).is_ok());
        assert!(serde_json::from_str::<Hash>("\"AAA\"").is_err());
    }

    #[test]
    fn display_matches_trytes() {
        let hash = Hash::from_trytes("B".repeat(81)).unwrap();
        assert_eq!(hash.to_string(), "B".repeat(81));
    }
}
