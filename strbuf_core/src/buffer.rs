use crate::text::{self, ReplaceError, ReplacePolicy};
use std::collections::TryReserveError;
use std::fmt;
use thiserror::Error;

/// Errors raised by the fallible allocation paths of [`ByteBuffer`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BufferError {
    /// The allocator could not provide storage for `requested` additional bytes,
    /// or the requested size overflowed the platform's capacity limit.
    #[error("Resource exhausted: could not allocate {requested} bytes")]
    ResourceExhausted { requested: usize },
}

impl BufferError {
    fn from_reserve(requested: usize, _err: TryReserveError) -> Self {
        BufferError::ResourceExhausted { requested }
    }
}

/// An owned, length-tracked byte sequence.
///
/// `ByteBuffer` exclusively owns its storage: cloning produces a deep copy and two
/// live buffers never share bytes. The empty buffer is an ordinary value, not an
/// absence marker. Equality and hashing only look at the meaningful bytes, never
/// at spare capacity.
///
/// The content is raw bytes. Nothing in this crate interprets it as UTF-8 except
/// the lossy `Display` impl.
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ByteBuffer {
    data: Vec<u8>,
}

impl ByteBuffer {
    /// Creates an empty buffer without allocating.
    pub fn new() -> Self {
        Self { data: Vec::new() }
    }

    /// Copies `bytes` into a freshly owned buffer.
    pub fn from_literal(bytes: &[u8]) -> Self {
        let mut buffer = Self::with_capacity(bytes.len());
        buffer.data.extend_from_slice(bytes);
        buffer
    }

    /// Like [`ByteBuffer::from_literal`], but an absent literal yields the empty buffer.
    pub fn from_optional(bytes: Option<&[u8]>) -> Self {
        match bytes {
            Some(bytes) => Self::from_literal(bytes),
            None => Self::new(),
        }
    }

    /// Allocates an empty buffer able to hold `capacity` bytes.
    ///
    /// # Errors
    /// Returns [`BufferError::ResourceExhausted`] if the allocation cannot be satisfied.
    pub fn try_with_capacity(capacity: usize) -> Result<Self, BufferError> {
        let mut data = Vec::new();
        data.try_reserve_exact(capacity)
            .map_err(|e| BufferError::from_reserve(capacity, e))?;
        Ok(Self { data })
    }

    /// Allocates an empty buffer able to hold `capacity` bytes.
    ///
    /// Allocation failure is treated as unrecoverable: an error event is emitted and
    /// the process aborts. Use [`ByteBuffer::try_with_capacity`] to handle
    /// exhaustion instead.
    pub fn with_capacity(capacity: usize) -> Self {
        match Self::try_with_capacity(capacity) {
            Ok(buffer) => buffer,
            Err(err) => allocation_failed(&err),
        }
    }

    /// Reserves room for at least `additional` more bytes.
    ///
    /// # Errors
    /// Returns [`BufferError::ResourceExhausted`] if the allocation cannot be satisfied.
    pub fn try_reserve(&mut self, additional: usize) -> Result<(), BufferError> {
        self.data
            .try_reserve(additional)
            .map_err(|e| BufferError::from_reserve(additional, e))
    }

    /// Infallible counterpart of [`ByteBuffer::try_reserve`]; aborts on exhaustion.
    pub fn reserve(&mut self, additional: usize) {
        if let Err(err) = self.try_reserve(additional) {
            allocation_failed(&err);
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.data.capacity()
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.data.as_slice()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Deep-copies this buffer into a new, independently owned one.
    pub fn duplicate(&self) -> Self {
        Self::from_literal(&self.data)
    }

    pub fn push(&mut self, byte: u8) {
        self.reserve(1);
        self.data.push(byte);
    }

    pub fn extend_from_slice(&mut self, bytes: &[u8]) {
        self.reserve(bytes.len());
        self.data.extend_from_slice(bytes);
    }

    /// Appends `byte` repeated `count` times.
    ///
    /// # Errors
    /// Returns [`BufferError::ResourceExhausted`] if the run cannot be allocated; the
    /// buffer is left unchanged in that case.
    pub fn try_extend_repeated(&mut self, byte: u8, count: usize) -> Result<(), BufferError> {
        self.try_reserve(count)?;
        self.data.resize(self.data.len() + count, byte);
        Ok(())
    }

    /// Replaces every occurrence of `old` with `new` inside this buffer.
    ///
    /// This is the mutating variant of [`text::replace_all`] and follows the same
    /// `policy`. On error the buffer keeps its previous content.
    pub fn replace_in_place(
        &mut self,
        old: &[u8],
        new: &[u8],
        policy: ReplacePolicy,
    ) -> Result<(), ReplaceError> {
        let replaced = text::replace_all(self, old, new, policy)?;
        *self = replaced;
        Ok(())
    }
}

/// Length of an optional buffer; an absent buffer has length 0.
pub fn length(buffer: Option<&ByteBuffer>) -> usize {
    buffer.map_or(0, ByteBuffer::len)
}

fn allocation_failed(err: &BufferError) -> ! {
    tracing::error!(error = %err, "byte buffer allocation failed, aborting");
    std::process::abort()
}

impl AsRef<[u8]> for ByteBuffer {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl From<&[u8]> for ByteBuffer {
    fn from(bytes: &[u8]) -> Self {
        Self::from_literal(bytes)
    }
}

impl From<&str> for ByteBuffer {
    fn from(s: &str) -> Self {
        Self::from_literal(s.as_bytes())
    }
}

impl From<Vec<u8>> for ByteBuffer {
    fn from(data: Vec<u8>) -> Self {
        Self { data }
    }
}

impl From<ByteBuffer> for Vec<u8> {
    fn from(buffer: ByteBuffer) -> Self {
        buffer.data
    }
}

impl PartialEq<[u8]> for ByteBuffer {
    fn eq(&self, other: &[u8]) -> bool {
        self.data == other
    }
}

impl PartialEq<&[u8]> for ByteBuffer {
    fn eq(&self, other: &&[u8]) -> bool {
        self.data == *other
    }
}

impl PartialEq<&str> for ByteBuffer {
    fn eq(&self, other: &&str) -> bool {
        self.data == other.as_bytes()
    }
}

impl fmt::Display for ByteBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.data))
    }
}

impl fmt::Debug for ByteBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ByteBuffer({:?})", String::from_utf8_lossy(&self.data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_literal_copies_bytes_and_tracks_length() {
        let source = b"Hello, ".to_vec();
        let buffer = ByteBuffer::from_literal(&source);
        assert_eq!(buffer.len(), 7);
        assert_eq!(buffer.as_bytes(), source.as_slice());
        assert!(!buffer.is_empty());
    }

    #[test]
    fn absent_literal_and_absent_buffer_are_empty() {
        let buffer = ByteBuffer::from_optional(None);
        assert!(buffer.is_empty());
        assert_eq!(buffer.len(), 0);
        assert_eq!(length(None), 0);
        assert_eq!(length(Some(&ByteBuffer::from("abc"))), 3);
    }

    #[test]
    fn empty_buffer_is_a_value_distinct_from_non_empty() {
        let empty = ByteBuffer::from("");
        assert_eq!(empty, ByteBuffer::new());
        assert_ne!(empty, ByteBuffer::from(" "));
    }

    #[test]
    fn duplicate_is_independent_of_the_original() {
        let original = ByteBuffer::from("abc");
        let mut copy = original.duplicate();
        copy.push(b'd');
        assert_eq!(original, "abc");
        assert_eq!(copy, "abcd");
    }

    #[test]
    fn equality_ignores_spare_capacity() {
        let mut roomy = ByteBuffer::with_capacity(64);
        roomy.extend_from_slice(b"xy");
        assert!(roomy.capacity() >= 64);
        assert_eq!(roomy, ByteBuffer::from("xy"));
    }

    #[test]
    fn try_with_capacity_reports_exhaustion() {
        let result = ByteBuffer::try_with_capacity(usize::MAX);
        assert_eq!(
            result,
            Err(BufferError::ResourceExhausted {
                requested: usize::MAX
            }),
            "Capacity overflow should surface as ResourceExhausted"
        );
    }

    #[test]
    fn try_extend_repeated_leaves_buffer_untouched_on_exhaustion() {
        let mut buffer = ByteBuffer::from("ab");
        assert!(buffer.try_extend_repeated(b'z', usize::MAX).is_err());
        assert_eq!(buffer, "ab");

        buffer.try_extend_repeated(b'z', 3).unwrap();
        assert_eq!(buffer, "abzzz");
    }

    #[test]
    fn replace_in_place_rewrites_the_buffer() {
        let mut buffer = ByteBuffer::from("Hello, World!");
        buffer
            .replace_in_place(b"World", b"Everyone", ReplacePolicy::ForwardScan)
            .unwrap();
        assert_eq!(buffer, "Hello, Everyone!");
    }

    #[test]
    fn replace_in_place_keeps_content_when_rescan_gives_up() {
        let mut buffer = ByteBuffer::from("a");
        let result = buffer.replace_in_place(b"a", b"aa", ReplacePolicy::Rescan { max_passes: 1 });
        assert_eq!(result, Err(ReplaceError::DidNotConverge { passes: 1 }));
        assert_eq!(buffer, "a", "Failed replace must not touch the buffer");
    }

    #[test]
    fn display_is_lossy_utf8() {
        let buffer = ByteBuffer::from(vec![b'o', b'k', 0xFF]);
        assert_eq!(buffer.to_string(), "ok\u{FFFD}");
    }
}
