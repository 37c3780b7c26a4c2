//! Run-length codec.
//!
//! Each maximal run of one byte is written as that byte followed by the decimal
//! digits of the run length: `"aaab"` becomes `"a3b1"`. Run lengths are not capped.
//!
//! Digits double as count characters, so the plain-text alphabet must not contain
//! ASCII digits. [`compress`] rejects such input rather than producing a stream
//! that would decode to something else.

use crate::buffer::{BufferError, ByteBuffer};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RleError {
    /// Plain-text input contained an ASCII digit, which cannot be encoded unambiguously.
    #[error("Input contains ASCII digit at offset {offset}; digits cannot be run-length encoded")]
    DigitInInput { offset: usize },

    /// An encoded token started with a digit where a symbol byte was expected.
    #[error("Expected a symbol byte at offset {offset}, found a digit")]
    UnexpectedDigit { offset: usize },

    /// The symbol at `offset` was not followed by a run length.
    #[error("Symbol at offset {offset} has no run length")]
    MissingCount { offset: usize },

    /// The run length starting at `offset` does not fit in `usize`.
    #[error("Run length at offset {offset} overflows")]
    CountOverflow { offset: usize },

    #[error(transparent)]
    Buffer(#[from] BufferError),
}

/// Encodes `s` as `symbol count` pairs. Empty input encodes to empty output.
///
/// # Errors
/// [`RleError::DigitInInput`] if `s` contains an ASCII digit.
pub fn compress(s: &ByteBuffer) -> Result<ByteBuffer, RleError> {
    let bytes = s.as_bytes();
    if let Some(offset) = bytes.iter().position(u8::is_ascii_digit) {
        return Err(RleError::DigitInInput { offset });
    }

    let mut encoded = ByteBuffer::with_capacity(bytes.len());
    for run in bytes.chunk_by(|a, b| a == b) {
        encoded.push(run[0]);
        encoded.extend_from_slice(run.len().to_string().as_bytes());
    }
    Ok(encoded)
}

/// Decodes a stream produced by [`compress`].
///
/// A run length of zero is accepted and contributes nothing.
///
/// # Errors
/// Malformed streams are rejected with [`RleError::UnexpectedDigit`],
/// [`RleError::MissingCount`] or [`RleError::CountOverflow`]. An expansion too
/// large to allocate yields [`RleError::Buffer`].
pub fn decompress(s: &ByteBuffer) -> Result<ByteBuffer, RleError> {
    let bytes = s.as_bytes();
    let mut decoded = ByteBuffer::new();
    let mut pos = 0;

    while pos < bytes.len() {
        let symbol = bytes[pos];
        if symbol.is_ascii_digit() {
            return Err(RleError::UnexpectedDigit { offset: pos });
        }

        let digits_start = pos + 1;
        let mut cursor = digits_start;
        let mut count: usize = 0;
        while let Some(&digit) = bytes.get(cursor).filter(|b| b.is_ascii_digit()) {
            count = count
                .checked_mul(10)
                .and_then(|c| c.checked_add(usize::from(digit - b'0')))
                .ok_or(RleError::CountOverflow {
                    offset: digits_start,
                })?;
            cursor += 1;
        }
        if cursor == digits_start {
            return Err(RleError::MissingCount { offset: pos });
        }

        decoded.try_extend_repeated(symbol, count)?;
        pos = cursor;
    }
    Ok(decoded)
}
