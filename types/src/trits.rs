//! Balanced-ternary primitives: trit arithmetic and integer conversions.
//!
//! A trit is the smallest unit of the protocol, with value -1, 0, or 1.
//! Signed integers (transaction values, timestamps, indices) are carried on
//! the wire in balanced ternary, least significant trit first.

use crate::error::TrytesError;

/// A single balanced-ternary digit: -1, 0, or 1.
pub type Trit = i8;

/// ASCII alphabet of the 27 tryte symbols; index 0 is the null tryte `9`.
pub const TRYTE_ALPHABET: &[u8; 27] = b"9ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Returns the alphabet index (0..27) of a tryte character, if valid.
pub(crate) fn alphabet_index(ch: u8) -> Option<u8> {
    match ch {
        b'9' => Some(0),
        b'A'..=b'Z' => Some(ch - b'A' + 1),
        _ => None,
    }
}

/// Converts an alphabet index (0..27) into the signed tryte value (-13..=13).
pub(crate) fn tryte_value_from_index(index: u8) -> i8 {
    let n = index as i8;
    if n > 13 {
        n - 27
    } else {
        n
    }
}

/// Converts a signed tryte value (-13..=13) back into its alphabet index.
pub(crate) fn index_from_tryte_value(value: i8) -> u8 {
    if value < 0 {
        (value + 27) as u8
    } else {
        value as u8
    }
}

/// Encodes an integer in balanced ternary, least significant trit first.
///
/// The result has at least `pad` trits (zero-extended). Zero always encodes
/// as at least one trit, so `trits_from_int(0, 0)` is `[0]`.
pub fn trits_from_int(n: i64, pad: usize) -> Vec<Trit> {
    let mut trits = Vec::with_capacity(pad.max(4));
    let mut n = n;

    while n != 0 {
        let mut rem = n.rem_euclid(3);
        n = n.div_euclid(3);

        if rem == 2 {
            // Lend 1 to the next place so this trit can go negative.
            rem = -1;
            n += 1;
        }

        trits.push(rem as Trit);
    }

    if trits.is_empty() {
        trits.push(0);
    }

    while trits.len() < pad {
        trits.push(0);
    }

    trits
}

/// Decodes a balanced-ternary trit sequence into an integer.
///
/// Fails with [`TrytesError::IntOverflow`] if the value does not fit in an
/// `i64` (possible for adversarial 81-trit wire fields).
pub fn int_from_trits(trits: &[Trit]) -> Result<i64, TrytesError> {
    // Trits are least significant first; walk from the most significant end
    // so intermediate values never exceed the final magnitude.
    let mut total: i128 = 0;

    for &trit in trits.iter().rev() {
        total = total
            .checked_mul(3)
            .and_then(|t| t.checked_add(trit as i128))
            .ok_or(TrytesError::IntOverflow)?;
    }

    i64::try_from(total).map_err(|_| TrytesError::IntOverflow)
}

/// Adds two trit sequences with carry, returning a sequence as long as the
/// longer operand. Overflow wraps into the available trits.
pub fn add_trits(left: &[Trit], right: &[Trit]) -> Vec<Trit> {
    let len = left.len().max(right.len());
    let mut result = vec![0; len];

    let mut carry = 0;
    for (i, slot) in result.iter_mut().enumerate() {
        let a = left.get(i).copied().unwrap_or(0);
        let b = right.get(i).copied().unwrap_or(0);
        let (sum, next_carry) = full_add(a, b, carry);
        *slot = sum;
        carry = next_carry;
    }

    result
}

fn full_add(a: Trit, b: Trit, carry: Trit) -> (Trit, Trit) {
    let sum_ab = clamp_add(a, b);
    let cons_ab = cons(a, b);
    let cons_sc = cons(sum_ab, carry);

    (clamp_add(sum_ab, carry), any(cons_ab, cons_sc))
}

/// Adds two trits; results outside the trit range wrap to the opposite sign.
fn clamp_add(a: Trit, b: Trit) -> Trit {
    let sum = a + b;
    if sum > -2 && sum < 2 {
        sum
    } else {
        -sum.signum()
    }
}

/// Returns the common value of two trits, or 0 if they differ.
fn cons(a: Trit, b: Trit) -> Trit {
    if a == b {
        a
    } else {
        0
    }
}

/// Sign of the sum of two trits.
fn any(a: Trit, b: Trit) -> Trit {
    (a + b).signum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_encodes_as_single_trit() {
        assert_eq!(trits_from_int(0, 0), vec![0]);
        assert_eq!(trits_from_int(0, 3), vec![0, 0, 0]);
    }

    #[test]
    fn small_values_round_trip() {
        for n in -100i64..=100 {
            let trits = trits_from_int(n, 0);
            assert_eq!(int_from_trits(&trits).unwrap(), n, "value {n}");
        }
    }

    #[test]
    fn padding_zero_extends() {
        let trits = trits_from_int(-5, 9);
        assert_eq!(trits.len(), 9);
        assert_eq!(int_from_trits(&trits).unwrap(), -5);
    }

    #[test]
    fn known_encodings() {
        assert_eq!(trits_from_int(1, 0), vec![1]);
        assert_eq!(trits_from_int(-1, 0), vec![-1]);
        assert_eq!(trits_from_int(2, 0), vec![-1, 1]);
        assert_eq!(trits_from_int(-2, 0), vec![1, -1]);
        assert_eq!(trits_from_int(13, 0), vec![1, 1, 1]);
        assert_eq!(trits_from_int(-13, 0), vec![-1, -1, -1]);
    }

    #[test]
    fn add_trits_with_carry() {
        // 5 + 7 = 12
        let sum = add_trits(&trits_from_int(5, 9), &trits_from_int(7, 9));
        assert_eq!(int_from_trits(&sum).unwrap(), 12);
    }

    #[test]
    fn add_trits_overflow_wraps() {
        // Single-trit addition cannot carry out; 1 + 1 wraps to -1.
        assert_eq!(add_trits(&[1], &[1]), vec![-1]);
    }

    #[test]
    fn add_trits_increments_tryte() {
        let tag = trits_from_int(3, 3);
        let bumped = add_trits(&tag, &[1]);
        assert_eq!(int_from_trits(&bumped).unwrap(), 4);
    }

    #[test]
    fn long_zero_padding_decodes() {
        let mut trits = trits_from_int(42, 0);
        trits.resize(120, 0);
        assert_eq!(int_from_trits(&trits).unwrap(), 42);
    }

    #[test]
    fn int_overflow_detected() {
        let trits = vec![1; 120];
        assert_eq!(int_from_trits(&trits), Err(TrytesError::IntOverflow));
    }
}
