//! Bit-level field access for entry payloads.
//!
//! `BitReader` extracts small bit-width integers from a byte slice and
//! `BitWriter` packs them into a growable buffer. Entries are always coded
//! whole and in memory, so neither type wraps an `io::Read`/`io::Write`.
//!
//! # Bit Ordering
//!
//! Fields are packed LSB-first: the first bit of a field is the least
//! significant bit of the current byte, and a field that spans a byte
//! boundary continues in the low bits of the next byte. A dictionary token
//! is therefore read as one `8 + offset_bits` field followed by one
//! `run_length_bits` field.
//!
//! # Example
//!
//! ```
//! use redarc_core::bitstream::{BitReader, BitWriter};
//!
//! let mut writer = BitWriter::new();
//! writer.write_bits(0x005, 12); // offset field
//! writer.write_bits(0x3, 4); // run-length field
//! let bytes = writer.into_bytes();
//! assert_eq!(bytes, vec![0x05, 0x30]);
//!
//! let mut reader = BitReader::new(&bytes);
//! assert_eq!(reader.read_bits(12).unwrap(), 0x005);
//! assert_eq!(reader.read_bits(4).unwrap(), 0x3);
//! ```

use crate::error::{RedArcError, Result};

/// LSB-first bit reader over an in-memory byte slice.
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    /// Source bytes.
    data: &'a [u8],
    /// Index of the next byte to load into the buffer.
    position: usize,
    /// Bit buffer (LSB-first).
    buffer: u64,
    /// Number of valid bits in buffer.
    bits_in_buffer: u8,
    /// Total bits read.
    total_bits_read: u64,
}

impl<'a> BitReader<'a> {
    /// Create a new `BitReader` over the given bytes.
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            position: 0,
            buffer: 0,
            bits_in_buffer: 0,
            total_bits_read: 0,
        }
    }

    /// Number of whole or partially consumed bytes.
    pub fn bytes_consumed(&self) -> usize {
        self.total_bits_read.div_ceil(8) as usize
    }

    /// Bits still available, buffered or not.
    pub fn remaining_bits(&self) -> u64 {
        (self.data.len() - self.position) as u64 * 8 + self.bits_in_buffer as u64
    }

    /// Check whether every bit has been consumed.
    pub fn is_empty(&self) -> bool {
        self.remaining_bits() == 0
    }

    /// Load bytes until at least `count` bits are buffered.
    #[inline]
    fn fill_buffer(&mut self, count: u8) -> Result<()> {
        while self.bits_in_buffer < count {
            let Some(&byte) = self.data.get(self.position) else {
                let needed = u64::from(count - self.bits_in_buffer).div_ceil(8);
                return Err(RedArcError::truncated_payload(
                    self.position as u64 + needed,
                    self.data.len() as u64,
                ));
            };
            self.buffer |= (byte as u64) << self.bits_in_buffer;
            self.bits_in_buffer += 8;
            self.position += 1;
        }

        Ok(())
    }

    /// Read a field of up to 32 bits.
    ///
    /// The first bit read ends up in the LSB of the result. A zero-width
    /// field reads nothing and yields 0.
    #[inline]
    pub fn read_bits(&mut self, count: u8) -> Result<u32> {
        debug_assert!(count <= 32, "Cannot read more than 32 bits at once");

        if count == 0 {
            return Ok(0);
        }

        self.fill_buffer(count)?;

        let result = (self.buffer & ((1u64 << count) - 1)) as u32;
        self.buffer >>= count;
        self.bits_in_buffer -= count;
        self.total_bits_read += u64::from(count);

        Ok(result)
    }

    /// Read eight bits as a byte.
    #[inline]
    pub fn read_byte(&mut self) -> Result<u8> {
        Ok(self.read_bits(8)? as u8)
    }
}

/// LSB-first bit writer into an owned buffer.
///
/// [`BitWriter::into_bytes`] pads a trailing partial byte with zero bits.
#[derive(Debug, Default, Clone)]
pub struct BitWriter {
    output: Vec<u8>,
    buffer: u64,
    bits_in_buffer: u8,
}

impl BitWriter {
    /// Create an empty `BitWriter`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a `BitWriter` with room for `capacity` bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            output: Vec::with_capacity(capacity),
            ..Self::default()
        }
    }

    /// Write the low `count` bits of `value` (0-32 bits).
    #[inline]
    pub fn write_bits(&mut self, value: u32, count: u8) {
        debug_assert!(count <= 32, "Cannot write more than 32 bits at once");

        if count == 0 {
            return;
        }

        let value = u64::from(value) & ((1u64 << count) - 1);
        self.buffer |= value << self.bits_in_buffer;
        self.bits_in_buffer += count;

        while self.bits_in_buffer >= 8 {
            self.output.push(self.buffer as u8);
            self.buffer >>= 8;
            self.bits_in_buffer -= 8;
        }
    }

    /// Write eight bits.
    #[inline]
    pub fn write_byte(&mut self, byte: u8) {
        self.write_bits(u32::from(byte), 8);
    }

    /// Finish writing and return the packed bytes.
    pub fn into_bytes(mut self) -> Vec<u8> {
        if self.bits_in_buffer > 0 {
            self.output.push(self.buffer as u8);
        }
        self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bitreader_lsb_first() {
        // 0b10110101 = 0xB5
        let data = [0xB5];
        let mut reader = BitReader::new(&data);

        assert_eq!(reader.read_bits(1).unwrap(), 1);
        assert_eq!(reader.read_bits(2).unwrap(), 0b10);
        assert_eq!(reader.read_bits(5).unwrap(), 0b10110);
        assert!(reader.is_empty());
    }

    #[test]
    fn test_bitreader_multi_byte() {
        let data = [0xFF, 0x00];
        let mut reader = BitReader::new(&data);

        assert_eq!(reader.read_bits(4).unwrap(), 0xF);
        assert_eq!(reader.read_bits(8).unwrap(), 0x0F); // Crosses byte boundary
        assert_eq!(reader.read_bits(4).unwrap(), 0x0);
    }

    #[test]
    fn test_token_fields() {
        // Level 3 split: 11-bit offset field, 5-bit run-length field.
        let data = [0xFE, 0b1010_1011];
        let mut reader = BitReader::new(&data);

        assert_eq!(reader.read_bits(11).unwrap(), 0x3FE);
        assert_eq!(reader.read_bits(5).unwrap(), 0b10101);
        assert_eq!(reader.bytes_consumed(), 2);
    }

    #[test]
    fn test_zero_width_field() {
        let data = [0xAB];
        let mut reader = BitReader::new(&data);

        assert_eq!(reader.read_bits(0).unwrap(), 0);
        assert_eq!(reader.bytes_consumed(), 0);
        assert_eq!(reader.read_byte().unwrap(), 0xAB);
    }

    #[test]
    fn test_bitreader_truncated() {
        let data = [0x01];
        let mut reader = BitReader::new(&data);

        assert_eq!(reader.read_byte().unwrap(), 0x01);
        let err = reader.read_bits(16).unwrap_err();
        assert!(matches!(
            err,
            RedArcError::TruncatedPayload {
                expected: 3,
                available: 1
            }
        ));
    }

    #[test]
    fn test_remaining_bits() {
        let data = [0x12, 0x34, 0x56];
        let mut reader = BitReader::new(&data);

        assert_eq!(reader.remaining_bits(), 24);
        reader.read_bits(4).unwrap();
        assert_eq!(reader.remaining_bits(), 20);
        assert_eq!(reader.bytes_consumed(), 1);
        reader.read_bits(20).unwrap();
        assert!(reader.is_empty());
    }

    #[test]
    fn test_bitwriter_multi_bits() {
        let mut writer = BitWriter::new();
        writer.write_bits(0b101, 3);
        writer.write_bits(0b11001, 5);
        // 3 bits: 101, 5 bits: 11001 -> 11001_101 = 0xCD
        assert_eq!(writer.into_bytes(), vec![0xCD]);
    }

    #[test]
    fn test_bitwriter_padding() {
        let mut writer = BitWriter::new();
        writer.write_bits(0b11, 2);
        writer.write_byte(0xFF);
        assert_eq!(writer.into_bytes(), vec![0xFF, 0x03]);
    }

    #[test]
    fn test_bitwriter_masks_value() {
        let mut writer = BitWriter::with_capacity(2);
        writer.write_bits(0xFFFF_FFFF, 12);
        writer.write_bits(0, 4);
        assert_eq!(writer.into_bytes(), vec![0xFF, 0x0F]);
    }

    #[test]
    fn test_roundtrip() {
        let mut writer = BitWriter::new();
        writer.write_bits(0b101, 3);
        writer.write_bits(0b1111, 4);
        writer.write_bits(0b10, 2);
        writer.write_bits(0b110011, 6);
        let output = writer.into_bytes();

        let mut reader = BitReader::new(&output);
        assert_eq!(reader.read_bits(3).unwrap(), 0b101);
        assert_eq!(reader.read_bits(4).unwrap(), 0b1111);
        assert_eq!(reader.read_bits(2).unwrap(), 0b10);
        assert_eq!(reader.read_bits(6).unwrap(), 0b110011);
    }
}
