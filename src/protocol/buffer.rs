//! Stream buffer
//!
//! Accumulates socket bytes until the parser can cut a whole frame off the
//! front. Bytes are appended at the tail and removed only from the head.

use bytes::{Bytes, BytesMut};

use super::DEFAULT_BUFFER_CAPACITY;

/// Bytes received but not yet consumed into a completed frame
#[derive(Debug)]
pub struct StreamBuffer {
    buffer: BytesMut,
}

impl StreamBuffer {
    /// Create an empty buffer with the default capacity
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_BUFFER_CAPACITY)
    }

    /// Create an empty buffer with a custom initial capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: BytesMut::with_capacity(capacity),
        }
    }

    /// Append freshly read bytes
    pub fn extend(&mut self, data: &[u8]) {
        self.buffer.extend_from_slice(data);
    }

    /// View the unconsumed bytes
    pub fn as_slice(&self) -> &[u8] {
        &self.buffer
    }

    /// Remove `len` bytes from the head and return them
    ///
    /// # Panics
    ///
    /// Panics if `len` exceeds the buffered length.
    pub fn take(&mut self, len: usize) -> Bytes {
        self.buffer.split_to(len).freeze()
    }

    /// Get the number of buffered bytes
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Check if the buffer is empty
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Drop everything buffered
    pub fn clear(&mut self) {
        self.buffer.clear();
    }
}

impl Default for StreamBuffer {
    fn default() -> Self {
        Self::new()
    }
}
