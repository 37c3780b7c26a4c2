//! Pure text transforms over [`ByteBuffer`].
//!
//! Every function here borrows its inputs and returns a freshly allocated buffer;
//! none of them mutates an argument. All byte handling is ASCII-only.

use crate::buffer::ByteBuffer;
use std::cmp::Ordering;
use thiserror::Error;

/// Legacy "not found" value returned by [`find_index`].
pub const NOT_FOUND: isize = -1;

/// Default bound on full rescans for [`ReplacePolicy::Rescan`].
pub const DEFAULT_MAX_RESCAN_PASSES: usize = 10_000;

const SPACE: u8 = b' ';

/// How [`replace_all`] continues after a substitution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReplacePolicy {
    /// One left-to-right pass. Scanning resumes right after each inserted
    /// replacement, so replaced text is never matched again.
    #[default]
    ForwardScan,
    /// Restart the scan from the beginning after each substitution until no
    /// occurrence remains, giving up after `max_passes` substitutions.
    ///
    /// A replacement that contains the pattern never converges under this policy.
    Rescan { max_passes: usize },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReplaceError {
    #[error("Replacement did not converge after {passes} rescans")]
    DidNotConverge { passes: usize },
}

/// Returns `a`'s bytes followed by `b`'s bytes.
pub fn concatenate(a: &ByteBuffer, b: &ByteBuffer) -> ByteBuffer {
    let mut result = ByteBuffer::with_capacity(a.len().saturating_add(b.len()));
    result.extend_from_slice(a.as_bytes());
    result.extend_from_slice(b.as_bytes());
    result
}

/// [`concatenate`] for callers that may hold no buffer: either side absent
/// yields the empty buffer.
pub fn concatenate_optional(a: Option<&ByteBuffer>, b: Option<&ByteBuffer>) -> ByteBuffer {
    match (a, b) {
        (Some(a), Some(b)) => concatenate(a, b),
        _ => ByteBuffer::new(),
    }
}

/// Lexicographic byte-order comparison. A proper prefix orders before the longer buffer.
pub fn compare(a: &ByteBuffer, b: &ByteBuffer) -> Ordering {
    a.as_bytes().cmp(b.as_bytes())
}

/// Comparison with the legacy integer contract.
///
/// Returns `-1`, `0` or `1` when both buffers are present. If either one is absent
/// the result is a negative sentinel; only its sign is meaningful.
pub fn compare_optional(a: Option<&ByteBuffer>, b: Option<&ByteBuffer>) -> i32 {
    match (a, b) {
        (Some(a), Some(b)) => match compare(a, b) {
            Ordering::Less => -1,
            Ordering::Equal => 0,
            Ordering::Greater => 1,
        },
        _ => -1,
    }
}

/// Extracts up to `len` bytes starting at `start`.
///
/// A `start` at or past the end yields the empty buffer; a `len` running past the
/// end is silently clamped.
pub fn substring(s: &ByteBuffer, start: usize, len: usize) -> ByteBuffer {
    if start >= s.len() {
        return ByteBuffer::new();
    }
    let end = start.saturating_add(len).min(s.len());
    ByteBuffer::from_literal(&s.as_bytes()[start..end])
}

/// Byte offset of the first occurrence of `needle` in `s`.
///
/// An empty needle matches at offset 0.
pub fn find(s: &ByteBuffer, needle: &[u8]) -> Option<usize> {
    find_bytes(s.as_bytes(), needle)
}

/// [`find`] with the legacy sentinel: [`NOT_FOUND`] when `needle` does not occur.
pub fn find_index(s: &ByteBuffer, needle: &[u8]) -> isize {
    find(s, needle)
        .and_then(|offset| isize::try_from(offset).ok())
        .unwrap_or(NOT_FOUND)
}

/// [`find_index`] over possibly absent inputs; absence is reported as [`NOT_FOUND`].
pub fn find_optional(s: Option<&ByteBuffer>, needle: Option<&[u8]>) -> isize {
    match (s, needle) {
        (Some(s), Some(needle)) => find_index(s, needle),
        _ => NOT_FOUND,
    }
}

fn find_bytes(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() {
        return Some(0);
    }
    if needle.len() > haystack.len() {
        return None;
    }
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

/// Replaces every occurrence of `old` in `s` with `new`, following `policy`.
///
/// An empty `old` leaves the input unchanged under both policies.
///
/// # Errors
/// Only [`ReplacePolicy::Rescan`] can fail, with [`ReplaceError::DidNotConverge`]
/// once `max_passes` substitutions have been made and `old` still occurs.
pub fn replace_all(
    s: &ByteBuffer,
    old: &[u8],
    new: &[u8],
    policy: ReplacePolicy,
) -> Result<ByteBuffer, ReplaceError> {
    if old.is_empty() {
        return Ok(s.duplicate());
    }
    match policy {
        ReplacePolicy::ForwardScan => Ok(replace_forward(s.as_bytes(), old, new)),
        ReplacePolicy::Rescan { max_passes } => replace_rescan(s, old, new, max_passes),
    }
}

fn replace_forward(haystack: &[u8], old: &[u8], new: &[u8]) -> ByteBuffer {
    let mut result = ByteBuffer::with_capacity(haystack.len());
    let mut rest = haystack;
    while let Some(pos) = find_bytes(rest, old) {
        result.extend_from_slice(&rest[..pos]);
        result.extend_from_slice(new);
        rest = &rest[pos + old.len()..];
    }
    result.extend_from_slice(rest);
    result
}

fn replace_rescan(
    s: &ByteBuffer,
    old: &[u8],
    new: &[u8],
    max_passes: usize,
) -> Result<ByteBuffer, ReplaceError> {
    let mut working = s.duplicate();
    let mut passes = 0;
    while let Some(pos) = find(&working, old) {
        if passes == max_passes {
            return Err(ReplaceError::DidNotConverge { passes });
        }
        passes += 1;

        let bytes = working.as_bytes();
        let mut next = ByteBuffer::with_capacity(bytes.len() - old.len() + new.len());
        next.extend_from_slice(&bytes[..pos]);
        next.extend_from_slice(new);
        next.extend_from_slice(&bytes[pos + old.len()..]);
        working = next;
        tracing::trace!(pass = passes, offset = pos, "rescan replacement");
    }
    Ok(working)
}

/// Strips ASCII spaces (`0x20`) from both ends. Tabs and newlines are kept.
pub fn trim(s: &ByteBuffer) -> ByteBuffer {
    let bytes = s.as_bytes();
    let Some(start) = bytes.iter().position(|&b| b != SPACE) else {
        return ByteBuffer::new();
    };
    // A non-space byte exists, so `rposition` finds one too.
    let end = bytes.iter().rposition(|&b| b != SPACE).unwrap_or(start);
    ByteBuffer::from_literal(&bytes[start..=end])
}

pub fn trim_optional(s: Option<&ByteBuffer>) -> ByteBuffer {
    s.map(trim).unwrap_or_default()
}

pub fn to_upper(s: &ByteBuffer) -> ByteBuffer {
    map_bytes(s, |b| b.to_ascii_uppercase())
}

pub fn to_lower(s: &ByteBuffer) -> ByteBuffer {
    map_bytes(s, |b| b.to_ascii_lowercase())
}

/// Lower-cases the whole buffer, then upper-cases its first byte.
pub fn capitalize(s: &ByteBuffer) -> ByteBuffer {
    let lowered = to_lower(s);
    let mut bytes = lowered.into_bytes();
    if let Some(first) = bytes.first_mut() {
        first.make_ascii_uppercase();
    }
    ByteBuffer::from(bytes)
}

/// Reverses byte order. Multi-byte UTF-8 sequences are not kept together.
pub fn reverse(s: &ByteBuffer) -> ByteBuffer {
    let mut result = ByteBuffer::with_capacity(s.len());
    for &b in s.as_bytes().iter().rev() {
        result.push(b);
    }
    result
}

/// Splits on every occurrence of `delimiter`.
///
/// `N` delimiters always produce `N + 1` parts; leading, trailing and adjacent
/// delimiters produce empty parts.
pub fn split(s: &ByteBuffer, delimiter: u8) -> Vec<ByteBuffer> {
    s.as_bytes()
        .split(|&b| b == delimiter)
        .map(ByteBuffer::from_literal)
        .collect()
}

fn map_bytes(s: &ByteBuffer, f: impl Fn(u8) -> u8) -> ByteBuffer {
    let mut result = ByteBuffer::with_capacity(s.len());
    for &b in s.as_bytes() {
        result.push(f(b));
    }
    result
}
