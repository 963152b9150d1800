//! Circular dictionary window for back-reference decoding.
//!
//! Unlike a distance-addressed LZ77 history, back-references in Red Archive
//! name an absolute slot of the window. Slot `n` holds the most recent byte
//! whose output index is congruent to `n` modulo the capacity, so a token
//! keeps pointing at the same slot while the write cursor moves on.
//!
//! # Sizes
//!
//! The capacity is `max_offset + 1 = 2^(offset_bits + 8)`:
//! - level 2: 4096 bytes
//! - level 3: 2048 bytes
//! - level 4: 1024 bytes
//! - level 5: 512 bytes
//! - level 6: 256 bytes

/// A fixed-capacity circular window addressed by slot.
#[derive(Debug, Clone)]
pub struct Window {
    /// The underlying buffer.
    buffer: Vec<u8>,
    /// Next slot to be written.
    cursor: usize,
    /// Mask for wrapping (capacity - 1).
    mask: usize,
}

impl Window {
    /// Create a zero-filled window with the specified capacity.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is not a power of 2 or is zero.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "Capacity must be greater than 0");
        assert!(
            capacity.is_power_of_two(),
            "Capacity must be a power of 2, got {}",
            capacity
        );

        Self {
            buffer: vec![0; capacity],
            cursor: 0,
            mask: capacity - 1,
        }
    }

    /// Create the window for a given `max_offset` (highest addressable slot).
    pub fn with_max_offset(max_offset: usize) -> Self {
        Self::new(max_offset + 1)
    }

    /// Get the capacity of the window.
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    /// Highest valid slot index.
    pub fn max_offset(&self) -> usize {
        self.mask
    }

    /// Slot the next byte will be written to.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Advance a slot index by one, wrapping past `max_offset` to 0.
    #[inline]
    pub fn next_slot(&self, slot: usize) -> usize {
        (slot + 1) & self.mask
    }

    /// Write a byte at the cursor and advance it.
    #[inline]
    pub fn push(&mut self, byte: u8) {
        self.buffer[self.cursor] = byte;
        self.cursor = self.next_slot(self.cursor);
    }

    /// Read the byte stored in `slot`.
    ///
    /// Returns `None` if `slot` exceeds `max_offset`.
    #[inline]
    pub fn get(&self, slot: usize) -> Option<u8> {
        self.buffer.get(slot).copied()
    }

    /// Copy one byte from `slot` to the cursor, returning it.
    ///
    /// The read happens before the write, so a slot equal to the cursor
    /// yields the byte about to be overwritten.
    #[inline]
    pub fn copy_slot(&mut self, slot: usize) -> Option<u8> {
        let byte = self.get(slot)?;
        self.push(byte);
        Some(byte)
    }
}
