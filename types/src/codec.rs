//! Byte and Unicode codecs over trytes.
//!
//! Arbitrary bytes are carried in message fragments as tryte pairs: byte
//! `b` encodes as `alphabet[b % 27]` then `alphabet[b / 27]`. Since a pair
//! can express values up to 728, decoding may meet pairs with no byte
//! counterpart; [`ErrorPolicy`] decides what happens then.

use serde::{Deserialize, Serialize};

use crate::error::TrytesError;
use crate::trits::{alphabet_index, TRYTE_ALPHABET};
use crate::trytes::TryteSeq;

/// How decoding reacts to tryte pairs or byte sequences that have no valid
/// decoding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorPolicy {
    /// Fail the whole decode.
    #[default]
    Strict,
    /// Drop the offending unit and continue.
    Ignore,
    /// Substitute a replacement marker and continue.
    Replace,
}

/// Encodes raw bytes as trytes, two trytes per byte.
pub fn trytes_from_bytes(bytes: &[u8]) -> TryteSeq {
    let mut ascii = Vec::with_capacity(bytes.len() * 2);
    for &byte in bytes {
        ascii.push(TRYTE_ALPHABET[(byte % 27) as usize]);
        ascii.push(TRYTE_ALPHABET[(byte / 27) as usize]);
    }

    // The alphabet only emits valid trytes.
    TryteSeq::from_ascii(&ascii).unwrap_or_default()
}

/// Decodes tryte pairs back into bytes.
///
/// The sequence must have even length. Pairs that encode a value above 255
/// are handled per `policy`; `Replace` substitutes `b'?'`.
pub fn bytes_from_trytes(trytes: &TryteSeq, policy: ErrorPolicy) -> Result<Vec<u8>, TrytesError> {
    let ascii = trytes.as_ascii();
    if ascii.len() % 2 != 0 {
        return Err(TrytesError::OddLength);
    }

    let mut bytes = Vec::with_capacity(ascii.len() / 2);
    for (position, pair) in ascii.chunks_exact(2).enumerate() {
        // Construction of the TryteSeq validated both characters.
        let low = alphabet_index(pair[0]).unwrap_or(0) as u16;
        let high = alphabet_index(pair[1]).unwrap_or(0) as u16;
        let value = low + 27 * high;

        if value > u8::MAX as u16 {
            match policy {
                ErrorPolicy::Strict => {
                    return Err(TrytesError::ByteOutOfRange {
                        pair: [pair[0] as char, pair[1] as char],
                        position,
                    });
                }
                ErrorPolicy::Ignore => continue,
                ErrorPolicy::Replace => bytes.push(b'?'),
            }
        } else {
            bytes.push(value as u8);
        }
    }

    Ok(bytes)
}

/// Encodes a Unicode string as trytes via its UTF-8 bytes.
pub fn trytes_from_str(text: &str) -> TryteSeq {
    trytes_from_bytes(text.as_bytes())
}

/// Decodes trytes back into a Unicode string.
///
/// Trailing null trytes are treated as padding and stripped first; one is
/// put back if stripping leaves an odd number of trytes. Invalid byte
/// pairs and invalid UTF-8 are handled per `policy`; `Replace` substitutes
/// `'?'` and `U+FFFD` respectively.
pub fn string_from_trytes(trytes: &TryteSeq, policy: ErrorPolicy) -> Result<String, TrytesError> {
    let ascii = trytes.as_ascii();
    let mut end = ascii.len();
    while end > 0 && ascii[end - 1] == b'9' {
        end -= 1;
    }
    if end % 2 != 0 {
        end += 1;
    }

    let trimmed = trytes.slice(0..end);
    let bytes = bytes_from_trytes(&trimmed, policy)?;

    match policy {
        ErrorPolicy::Strict => String::from_utf8(bytes).map_err(|_| TrytesError::InvalidUtf8),
        ErrorPolicy::Replace => Ok(String::from_utf8_lossy(&bytes).into_owned()),
        ErrorPolicy::Ignore => Ok(bytes
            .utf8_chunks()
            .map(|chunk| chunk.valid())
            .collect::<String>()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trytes::IntoTrytes;

    #[test]
    fn byte_round_trip() {
        let data: Vec<u8> = (0..=255).collect();
        let trytes = trytes_from_bytes(&data);
        assert_eq!(trytes.len(), 512);
        assert_eq!(bytes_from_trytes(&trytes, ErrorPolicy::Strict).unwrap(), data);
    }

    #[test]
    fn known_encoding() {
        // 'H' is 72 = 18 + 27 * 2, so "RB".
        assert_eq!(trytes_from_str("Hello"), "RBTC9D9DCD");
    }

    #[test]
    fn rejects_odd_length() {
        let trytes = "ABC".into_trytes().unwrap();
        assert_eq!(
            bytes_from_trytes(&trytes, ErrorPolicy::Strict).unwrap_err(),
            TrytesError::OddLength
        );
    }

    #[test]
    fn out_of_range_pair_policies() {
        // "ZZ" is 26 + 27 * 26 = 728, beyond any byte.
        let trytes = "TCZZID".into_trytes().unwrap();

        assert_eq!(
            bytes_from_trytes(&trytes, ErrorPolicy::Strict).unwrap_err(),
            TrytesError::ByteOutOfRange {
                pair: ['Z', 'Z'],
                position: 1
            }
        );
        assert_eq!(
            bytes_from_trytes(&trytes, ErrorPolicy::Ignore).unwrap(),
            b"eu".to_vec()
        );
        assert_eq!(
            bytes_from_trytes(&trytes, ErrorPolicy::Replace).unwrap(),
            b"e?u".to_vec()
        );
    }

    #[test]
    fn string_round_trip() {
        let text = "Hello, world!";
        let trytes = trytes_from_str(text);
        assert_eq!(string_from_trytes(&trytes, ErrorPolicy::Strict).unwrap(), text);
    }

    #[test]
    fn unicode_round_trip() {
        let text = "\u{3042}\u{3044}\u{3046}";
        let trytes = trytes_from_str(text);
        assert_eq!(string_from_trytes(&trytes, ErrorPolicy::Strict).unwrap(), text);
    }

    #[test]
    fn trailing_padding_is_stripped() {
        let padded = trytes_from_str("Hi").pad_to(20);
        assert_eq!(string_from_trytes(&padded, ErrorPolicy::Strict).unwrap(), "Hi");
    }

    #[test]
    fn meaningful_trailing_null_survives() {
        // '9' marks the end of padding only; an odd remainder restores one.
        let trytes = "RB9".into_trytes().unwrap();
        assert_eq!(string_from_trytes(&trytes, ErrorPolicy::Strict).unwrap(), "H");
    }

    #[test]
    fn invalid_utf8_policies() {
        // 0xFF is never valid UTF-8.
        let trytes = trytes_from_bytes(&[b'A', 0xFF]);
        assert_eq!(
            string_from_trytes(&trytes, ErrorPolicy::Strict).unwrap_err(),
            TrytesError::InvalidUtf8
        );
        assert_eq!(string_from_trytes(&trytes, ErrorPolicy::Ignore).unwrap(), "A");
        assert_eq!(
            string_from_trytes(&trytes, ErrorPolicy::Replace).unwrap(),
            "A\u{FFFD}"
        );
    }
}
