use crate::buffer::ByteBuffer;
use thiserror::Error;

/// Errors that can arise during collection operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CollectionError {
    /// The requested index is not below the collection's current length.
    #[error("Index {index} out of range for collection of length {len}")]
    IndexOutOfRange { index: usize, len: usize },
}

/// An ordered, growable batch of [`ByteBuffer`]s.
///
/// The collection owns its elements; [`StringCollection::append`] stores a copy
/// of the caller's buffer. Insertion order is preserved by every operation.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct StringCollection {
    entries: Vec<ByteBuffer>,
}

impl StringCollection {
    /// Creates a new, empty `StringCollection`.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Appends a deep copy of `buffer` and returns the index it was stored at.
    pub fn append(&mut self, buffer: &ByteBuffer) -> usize {
        self.push(buffer.duplicate())
    }

    /// Moves `buffer` into the collection and returns its index.
    pub fn push(&mut self, buffer: ByteBuffer) -> usize {
        let index = self.entries.len();
        self.entries.push(buffer);
        index
    }

    pub fn get(&self, index: usize) -> Option<&ByteBuffer> {
        self.entries.get(index)
    }

    /// Removes and returns the element at `index`, shifting later elements left.
    ///
    /// An out-of-range index is reported with a warning and leaves the collection
    /// unchanged.
    ///
    /// # Errors
    /// [`CollectionError::IndexOutOfRange`] if `index >= self.len()`.
    pub fn remove_at(&mut self, index: usize) -> Result<ByteBuffer, CollectionError> {
        let len = self.entries.len();
        if index >= len {
            let err = CollectionError::IndexOutOfRange { index, len };
            tracing::warn!(index, len, "collection removal skipped: {}", err);
            return Err(err);
        }
        Ok(self.entries.remove(index))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates the elements in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, ByteBuffer> {
        self.entries.iter()
    }

    /// Concatenates all elements with `delimiter` between neighbours.
    ///
    /// This is the inverse of [`crate::text::split`].
    pub fn join(&self, delimiter: u8) -> ByteBuffer {
        let total = self
            .entries
            .iter()
            .map(ByteBuffer::len)
            .sum::<usize>()
            .saturating_add(self.entries.len().saturating_sub(1));
        let mut joined = ByteBuffer::with_capacity(total);
        for (i, entry) in self.entries.iter().enumerate() {
            if i > 0 {
                joined.push(delimiter);
            }
            joined.extend_from_slice(entry.as_bytes());
        }
        joined
    }
}

impl From<Vec<ByteBuffer>> for StringCollection {
    fn from(entries: Vec<ByteBuffer>) -> Self {
        Self { entries }
    }
}

impl FromIterator<ByteBuffer> for StringCollection {
    fn from_iter<T: IntoIterator<Item = ByteBuffer>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for StringCollection {
    type Item = ByteBuffer;
    type IntoIter = std::vec::IntoIter<ByteBuffer>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a StringCollection {
    type Item = &'a ByteBuffer;
    type IntoIter = std::slice::Iter<'a, ByteBuffer>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
