//! LZSS token layout.
//!
//! Tokens come in blocks: one flag byte, then up to eight items, one per
//! flag bit starting at the least significant bit. A set bit marks a literal
//! byte; a clear bit marks a two-byte back-reference packed LSB-first as
//!
//! ```text
//! [ offset + 1 : 8 + offset_bits ][ run_length - 2 : run_length_bits ]
//! ```
//!
//! The offset is an absolute window slot, not a distance.

use crate::params::DictionaryParams;
use redarc_core::bitstream::{BitReader, BitWriter};
use redarc_core::error::Result;

/// Number of items described by one flag byte.
pub const ITEMS_PER_BLOCK: usize = 8;

/// Shortest run a back-reference can carry.
pub const MIN_RUN_LENGTH: u32 = 2;

/// LZSS token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LzssToken {
    /// A literal byte.
    Literal(u8),
    /// A back-reference into the window.
    Match {
        /// Window slot of the first byte; -1 when the stored field is zero.
        offset: i32,
        /// Number of bytes to copy.
        run_length: u32,
    },
}

impl LzssToken {
    /// Whether the flag bit for this token is set.
    pub fn is_literal(&self) -> bool {
        matches!(self, Self::Literal(_))
    }
}

/// Read the two-byte back-reference fields.
pub fn read_match(reader: &mut BitReader<'_>, params: &DictionaryParams) -> Result<LzssToken> {
    let offset_field = reader.read_bits(params.offset_field_bits())?;
    let run_field = reader.read_bits(params.run_length_bits())?;

    Ok(LzssToken::Match {
        offset: offset_field as i32 - 1,
        run_length: run_field + MIN_RUN_LENGTH,
    })
}

/// Write a token's item bytes (not its flag bit).
pub fn write_token(writer: &mut BitWriter, params: &DictionaryParams, token: &LzssToken) {
    match *token {
        LzssToken::Literal(byte) => writer.write_byte(byte),
        LzssToken::Match { offset, run_length } => {
            debug_assert!(offset >= 0 && (offset as usize) < params.max_offset());
            debug_assert!((MIN_RUN_LENGTH..=params.longest_run()).contains(&run_length));
            writer.write_bits((offset + 1) as u32, params.offset_field_bits());
            writer.write_bits(run_length - MIN_RUN_LENGTH, params.run_length_bits());
        }
    }
}

/// Pack tokens into blocks of a flag byte plus items.
pub fn pack_tokens(tokens: &[LzssToken], params: &DictionaryParams) -> Vec<u8> {
    let mut writer = BitWriter::with_capacity(tokens.len() * 2);

    for block in tokens.chunks(ITEMS_PER_BLOCK) {
        let flags = block
            .iter()
            .enumerate()
            .filter(|(_, token)| token.is_literal())
            .fold(0u8, |acc, (bit, _)| acc | (1 << bit));
        writer.write_byte(flags);

        for token in block {
            write_token(&mut writer, params, token);
        }
    }

    writer.into_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_match_level_2() {
        let params = DictionaryParams::from_level(2).unwrap();
        let bytes = [0x05, 0x30];
        let mut reader = BitReader::new(&bytes);

        let token = read_match(&mut reader, &params).unwrap();
        assert_eq!(
            token,
            LzssToken::Match {
                offset: 4,
                run_length: 5
            }
        );
        assert!(reader.is_empty());
    }

    #[test]
    fn test_read_match_uses_low_bits_for_offset() {
        // Level 4: two offset bits in the second byte
        let params = DictionaryParams::from_level(4).unwrap();
        let bytes = [0x00, 0b0000_0110];
        let mut reader = BitReader::new(&bytes);

        let token = read_match(&mut reader, &params).unwrap();
        assert_eq!(
            token,
            LzssToken::Match {
                offset: 0x200 - 1,
                run_length: 2 + 1
            }
        );
    }

    #[test]
    fn test_read_match_zero_field() {
        let params = DictionaryParams::from_level(6).unwrap();
        let bytes = [0x00, 0xFF];
        let mut reader = BitReader::new(&bytes);

        let token = read_match(&mut reader, &params).unwrap();
        assert_eq!(
            token,
            LzssToken::Match {
                offset: -1,
                run_length: 257
            }
        );
    }

    #[test]
    fn test_pack_tokens_flags() {
        let params = DictionaryParams::from_level(2).unwrap();
        let tokens = [
            LzssToken::Literal(b'A'),
            LzssToken::Match {
                offset: 0,
                run_length: 3,
            },
            LzssToken::Literal(b'B'),
        ];

        let packed = pack_tokens(&tokens, &params);
        assert_eq!(packed, vec![0b0000_0101, b'A', 0x01, 0x10, b'B']);
    }

    #[test]
    fn test_pack_tokens_multiple_blocks() {
        let params = DictionaryParams::from_level(3).unwrap();
        let tokens: Vec<_> = (0..10u8).map(LzssToken::Literal).collect();

        let packed = pack_tokens(&tokens, &params);
        assert_eq!(packed.len(), 1 + 8 + 1 + 2);
        assert_eq!(packed[0], 0xFF);
        assert_eq!(packed[9], 0b0000_0011);
    }
}
