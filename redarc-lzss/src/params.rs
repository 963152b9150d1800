//! Dictionary coding parameters.
//!
//! Each level splits the second byte of a back-reference token between
//! offset and run length. Lower levels give the offset more bits (bigger
//! window), higher levels give the run length more bits (longer copies).
//!
//! | Level | offset bits | run bits | window | max run |
//! |-------|-------------|----------|--------|---------|
//! | 2     | 4           | 4        | 4096   | 18      |
//! | 3     | 3           | 5        | 2048   | 34      |
//! | 4     | 2           | 6        | 1024   | 66      |
//! | 5     | 1           | 7        | 512    | 130     |
//! | 6     | 0           | 8        | 256    | 258     |
//! | 254   | 8           | 0        | 65536  | 3       |
//! | 255   | 7           | 1        | 32768  | 4       |
//!
//! The last two rows come from `6 - level` wrapping around in 8-bit
//! arithmetic; every other level has no split.

use redarc_core::Method;

/// Offset/run-length split for one dictionary level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DictionaryParams {
    offset_bits: u8,
}

impl DictionaryParams {
    /// Largest split a token byte can hold.
    pub const MAX_OFFSET_BITS: u8 = Method::MAX_OFFSET_BITS;

    /// Create parameters from the number of extra offset bits (0-8).
    pub fn new(offset_bits: u8) -> Option<Self> {
        (offset_bits <= Self::MAX_OFFSET_BITS).then_some(Self { offset_bits })
    }

    /// Parameters for a dictionary level (2-6, 254 or 255).
    pub fn from_level(level: u8) -> Option<Self> {
        match Method::from_level(level) {
            Method::Dictionary { offset_bits, .. } => Self::new(offset_bits),
            _ => None,
        }
    }

    /// Offset bits taken from the second token byte.
    pub fn offset_bits(&self) -> u8 {
        self.offset_bits
    }

    /// Width of the whole offset field (first byte plus low bits of the second).
    pub fn offset_field_bits(&self) -> u8 {
        8 + self.offset_bits
    }

    /// Run-length bits (high bits of the second token byte).
    pub fn run_length_bits(&self) -> u8 {
        8 - self.offset_bits
    }

    /// Largest run length accepted by the decoder.
    pub fn max_run_length(&self) -> u32 {
        (1 << self.run_length_bits()) + 2
    }

    /// Longest run a token can express.
    pub fn longest_run(&self) -> u32 {
        (1 << self.run_length_bits()) + 1
    }

    /// Highest window slot.
    pub fn max_offset(&self) -> usize {
        (1 << self.offset_field_bits()) - 1
    }

    /// Window capacity.
    pub fn window_size(&self) -> usize {
        self.max_offset() + 1
    }
}
