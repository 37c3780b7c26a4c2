//! Caesar shift over ASCII letters.
//!
//! This is a toy substitution for text scrambling. It offers no confidentiality.

use crate::buffer::ByteBuffer;

const ALPHABET_LEN: u8 = 26;

/// Default shift used when a pipeline step does not name one.
pub const DEFAULT_SHIFT: i64 = 3;

/// Rotates each ASCII letter within its own case by `shift` positions.
///
/// Any `i64` is accepted; negative shifts rotate backwards. Bytes that are not
/// ASCII letters pass through unchanged.
pub fn caesar_encode(s: &ByteBuffer, shift: i64) -> ByteBuffer {
    let offset = normalize(shift);
    let mut result = ByteBuffer::with_capacity(s.len());
    for &b in s.as_bytes() {
        result.push(rotate(b, offset));
    }
    result
}

/// Undoes [`caesar_encode`] for the same `shift`.
pub fn caesar_decode(s: &ByteBuffer, shift: i64) -> ByteBuffer {
    let inverse = ALPHABET_LEN - normalize(shift);
    caesar_encode(s, i64::from(inverse))
}

fn normalize(shift: i64) -> u8 {
    // rem_euclid keeps the result in 0..26 for negative shifts too.
    shift.rem_euclid(i64::from(ALPHABET_LEN)) as u8
}

fn rotate(b: u8, offset: u8) -> u8 {
    let base = match b {
        b'a'..=b'z' => b'a',
        b'A'..=b'Z' => b'A',
        _ => return b,
    };
    base + (b - base + offset) % ALPHABET_LEN
}
