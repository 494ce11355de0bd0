//! The generic validated tryte sequence type.

use std::fmt;
use std::ops::Add;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use zeroize::Zeroize;

use crate::error::TrytesError;
use crate::trits::{
    alphabet_index, index_from_tryte_value, int_from_trits, trits_from_int,
    tryte_value_from_index, Trit, TRYTE_ALPHABET,
};
use crate::TRITS_PER_TRYTE;

/// An immutable, validated sequence of trytes.
///
/// Stored as the ASCII representation (`A`-`Z` and `9`), the same form the
/// node's JSON-RPC API uses. A `TryteSeq` is a sequence of symbols, not a
/// number; use [`trits_from_int`]/[`int_from_trits`] for numeric fields.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct TryteSeq {
    trytes: Vec<u8>,
}

/// Conversion into a validated [`TryteSeq`].
///
/// Implemented for exactly the permitted source representations: ASCII text,
/// raw byte buffers holding ASCII trytes, and existing tryte sequences.
/// Every character is checked against the tryte alphabet.
pub trait IntoTrytes {
    fn into_trytes(self) -> Result<TryteSeq, TrytesError>;
}

impl IntoTrytes for TryteSeq {
    fn into_trytes(self) -> Result<TryteSeq, TrytesError> {
        Ok(self)
    }
}

impl IntoTrytes for &TryteSeq {
    fn into_trytes(self) -> Result<TryteSeq, TrytesError> {
        Ok(self.clone())
    }
}

impl IntoTrytes for &str {
    fn into_trytes(self) -> Result<TryteSeq, TrytesError> {
        TryteSeq::from_ascii(self.as_bytes())
    }
}

impl IntoTrytes for String {
    fn into_trytes(self) -> Result<TryteSeq, TrytesError> {
        TryteSeq::from_ascii(self.as_bytes())
    }
}

impl IntoTrytes for &[u8] {
    fn into_trytes(self) -> Result<TryteSeq, TrytesError> {
        TryteSeq::from_ascii(self)
    }
}

impl IntoTrytes for Vec<u8> {
    fn into_trytes(self) -> Result<TryteSeq, TrytesError> {
        TryteSeq::from_ascii(&self)
    }
}

impl<const N: usize> IntoTrytes for &[u8; N] {
    fn into_trytes(self) -> Result<TryteSeq, TrytesError> {
        TryteSeq::from_ascii(self.as_slice())
    }
}

impl TryteSeq {
    /// The empty sequence.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Validates an ASCII buffer as trytes.
    pub fn from_ascii(ascii: &[u8]) -> Result<Self, TrytesError> {
        for (position, &ch) in ascii.iter().enumerate() {
            if alphabet_index(ch).is_none() {
                return Err(TrytesError::InvalidChar {
                    ch: ch as char,
                    position,
                });
            }
        }

        Ok(Self {
            trytes: ascii.to_vec(),
        })
    }

    /// Builds a sequence from raw trits, zero-padding to a whole tryte.
    pub fn from_trits(trits: &[Trit]) -> Self {
        let mut trytes = Vec::with_capacity(trits.len().div_ceil(TRITS_PER_TRYTE));

        for group in trits.chunks(TRITS_PER_TRYTE) {
            let mut padded = [0 as Trit; TRITS_PER_TRYTE];
            padded[..group.len()].copy_from_slice(group);

            // 3 trits always fit in an i64, and the value is in -13..=13.
            let value = int_from_trits(&padded).unwrap_or(0) as i8;
            trytes.push(TRYTE_ALPHABET[index_from_tryte_value(value) as usize]);
        }

        Self { trytes }
    }

    /// Builds a sequence from signed tryte values (-13..=13 each).
    pub fn from_tryte_values(values: &[i8]) -> Self {
        let trytes = values
            .iter()
            .map(|&v| TRYTE_ALPHABET[index_from_tryte_value(v) as usize])
            .collect();

        Self { trytes }
    }

    /// Number of trytes in the sequence.
    pub fn len(&self) -> usize {
        self.trytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trytes.is_empty()
    }

    /// Whether the sequence carries no information (empty or all null trytes).
    pub fn is_null(&self) -> bool {
        self.trytes.iter().all(|&ch| ch == b'9')
    }

    /// The ASCII representation.
    pub fn as_str(&self) -> &str {
        // Construction guarantees the buffer is ASCII.
        std::str::from_utf8(&self.trytes).unwrap_or_default()
    }

    /// The ASCII representation as raw bytes.
    pub fn as_ascii(&self) -> &[u8] {
        &self.trytes
    }

    /// Copies the trytes in `range` into a new sequence.
    ///
    /// # Panics
    /// Panics if the range is out of bounds.
    pub fn slice(&self, range: std::ops::Range<usize>) -> TryteSeq {
        Self {
            trytes: self.trytes[range].to_vec(),
        }
    }

    /// Appends null trytes until the sequence is at least `len` trytes long.
    pub fn pad_to(mut self, len: usize) -> Self {
        while self.trytes.len() < len {
            self.trytes.push(b'9');
        }
        self
    }

    /// Whether `other` occurs as a contiguous subsequence.
    pub fn contains(&self, other: &TryteSeq) -> bool {
        if other.is_empty() {
            return true;
        }
        self.trytes
            .windows(other.trytes.len())
            .any(|w| w == other.trytes.as_slice())
    }

    /// The sequence as trits, three per tryte.
    pub fn trits(&self) -> Vec<Trit> {
        let mut trits = Vec::with_capacity(self.len() * TRITS_PER_TRYTE);

        for value in self.tryte_values() {
            trits.extend(trits_from_int(value as i64, TRITS_PER_TRYTE));
        }

        trits
    }

    /// The sequence as signed tryte values, each in -13..=13.
    pub fn tryte_values(&self) -> Vec<i8> {
        self.trytes
            .iter()
            .map(|&ch| tryte_value_from_index(alphabet_index(ch).unwrap_or(0)))
            .collect()
    }

    /// Iterates over the sequence in `size`-tryte chunks, padding the final
    /// chunk with null trytes if needed.
    pub fn chunks(&self, size: usize) -> TryteChunks<'_> {
        assert!(size > 0, "chunk size must be positive");
        TryteChunks {
            trytes: &self.trytes,
            size,
            offset: 0,
        }
    }

    /// Number of `size`-tryte chunks, rounded up.
    pub fn chunk_count(&self, size: usize) -> usize {
        self.len().div_ceil(size)
    }

    /// Appends `other` to the end of this sequence.
    pub fn push_trytes(&mut self, other: &TryteSeq) {
        self.trytes.extend_from_slice(&other.trytes);
    }
}

/// Iterator over constant-size tryte chunks; the last chunk is padded.
pub struct TryteChunks<'a> {
    trytes: &'a [u8],
    size: usize,
    offset: usize,
}

impl Iterator for TryteChunks<'_> {
    type Item = TryteSeq;

    fn next(&mut self) -> Option<TryteSeq> {
        if self.offset >= self.trytes.len() {
            return None;
        }

        let end = (self.offset + self.size).min(self.trytes.len());
        let mut chunk = self.trytes[self.offset..end].to_vec();
        chunk.resize(self.size, b'9');
        self.offset += self.size;

        Some(TryteSeq { trytes: chunk })
    }
}

impl Add<&TryteSeq> for TryteSeq {
    type Output = TryteSeq;

    fn add(mut self, other: &TryteSeq) -> TryteSeq {
        self.push_trytes(other);
        self
    }
}

impl PartialEq<str> for TryteSeq {
    fn eq(&self, other: &str) -> bool {
        self.trytes == other.as_bytes()
    }
}

impl PartialEq<&str> for TryteSeq {
    fn eq(&self, other: &&str) -> bool {
        self.trytes == other.as_bytes()
    }
}

impl PartialEq<[u8]> for TryteSeq {
    fn eq(&self, other: &[u8]) -> bool {
        self.trytes == other
    }
}

impl fmt::Display for TryteSeq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for TryteSeq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TryteSeq({})", self.as_str())
    }
}

impl Zeroize for TryteSeq {
    fn zeroize(&mut self) {
        self.trytes.zeroize();
    }
}

impl Serialize for TryteSeq {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for TryteSeq {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        TryteSeq::from_ascii(raw.as_bytes()).map_err(serde::de::Error::custom)
    }
}
