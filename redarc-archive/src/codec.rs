//! Per-entry codec dispatch.
//!
//! The level byte selects the scheme. Decoding never fails for problems
//! confined to one entry: unsupported levels, invalid back-references and
//! size mismatches come back as diagnostics next to whatever data could be
//! produced. Only a payload that ends in the middle of a segment or token
//! is an error.

use redarc_core::Method;
use redarc_core::error::{RedArcError, Result};
use redarc_lzss::{DictionaryParams, decode_lzss, encode_lzss};
use redarc_rle::{decode_rle, encode_rle};

/// Outcome of decoding one entry.
#[derive(Debug, Default)]
pub struct DecodedEntry {
    /// Decoded bytes; `None` when the entry is skipped.
    pub data: Option<Vec<u8>>,
    /// Non-fatal problems found while decoding.
    pub diagnostics: Vec<RedArcError>,
}

impl DecodedEntry {
    fn decoded(data: Vec<u8>) -> Self {
        Self {
            data: Some(data),
            diagnostics: Vec::new(),
        }
    }

    fn skipped(reason: RedArcError) -> Self {
        Self {
            data: None,
            diagnostics: vec![reason],
        }
    }

    /// Whether the entry decoded without any diagnostic.
    pub fn is_clean(&self) -> bool {
        self.data.is_some() && self.diagnostics.is_empty()
    }

    /// Whether the entry was skipped.
    pub fn is_skipped(&self) -> bool {
        self.data.is_none()
    }

    fn check_size(&mut self, field: &'static str, expected: u32, actual: usize) {
        if actual as u64 != u64::from(expected) {
            self.diagnostics.push(RedArcError::size_mismatch(
                field,
                u64::from(expected),
                actual as u64,
            ));
        }
    }
}

/// Decode an entry payload.
///
/// `payload` must hold at least `compressed_size` bytes; only that prefix is
/// decoded.
pub fn decode(
    payload: &[u8],
    compressed_size: u32,
    uncompressed_size: u32,
    level: u8,
) -> Result<DecodedEntry> {
    let payload = payload.get(..compressed_size as usize).ok_or_else(|| {
        RedArcError::truncated_payload(u64::from(compressed_size), payload.len() as u64)
    })?;

    match Method::from_level(level) {
        Method::Store => {
            let mut entry = DecodedEntry::decoded(payload.to_vec());
            if compressed_size != uncompressed_size {
                entry.diagnostics.push(RedArcError::size_mismatch(
                    "stored",
                    u64::from(uncompressed_size),
                    u64::from(compressed_size),
                ));
            }
            Ok(entry)
        }
        Method::RunLength => {
            let data = decode_rle(payload, uncompressed_size as usize)?;
            let produced = data.len();
            let mut entry = DecodedEntry::decoded(data);
            entry.check_size("uncompressed", uncompressed_size, produced);
            Ok(entry)
        }
        Method::Dictionary { level, .. } => {
            let params = DictionaryParams::from_level(level)
                .ok_or_else(|| RedArcError::unsupported_level(level))?;
            let output = decode_lzss(payload, params, uncompressed_size as usize)?;

            let produced = output.data.len();
            let mut entry = DecodedEntry::decoded(output.data);
            entry.diagnostics.extend(output.fault);
            entry.check_size("uncompressed", uncompressed_size, produced);
            entry.check_size("compressed", compressed_size, output.consumed);
            Ok(entry)
        }
        Method::Unsupported(level) => {
            Ok(DecodedEntry::skipped(RedArcError::unsupported_level(level)))
        }
    }
}

/// Encode data at a level.
///
/// Level 0 copies the data; levels 1-6 use the matching encoder.
pub fn encode(data: &[u8], level: u8) -> Result<Vec<u8>> {
    match Method::from_level(level) {
        Method::Store => Ok(data.to_vec()),
        Method::RunLength => Ok(encode_rle(data)),
        Method::Dictionary { level, .. } => {
            let params = DictionaryParams::from_level(level)
                .ok_or_else(|| RedArcError::unsupported_level(level))?;
            Ok(encode_lzss(data, params))
        }
        Method::Unsupported(level) => Err(RedArcError::unsupported_level(level)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store() {
        let entry = decode(b"hello", 5, 5, 0).unwrap();
        assert!(entry.is_clean());
        assert_eq!(entry.data.unwrap(), b"hello");
    }

    #[test]
    fn test_store_size_mismatch_keeps_payload() {
        let entry = decode(b"hello", 5, 9, 0).unwrap();
        assert_eq!(entry.data.as_deref(), Some(&b"hello"[..]));
        assert!(matches!(
            entry.diagnostics[..],
            [RedArcError::SizeMismatch {
                expected: 9,
                actual: 5,
                ..
            }]
        ));
    }

    #[test]
    fn test_run_length() {
        let entry = decode(&[0x02, b'A', b'B', b'C', 0x83, b'X'], 6, 9, 1).unwrap();
        assert!(entry.is_clean());
        assert_eq!(entry.data.unwrap(), b"ABCXXXXXX");
    }

    #[test]
    fn test_run_length_short_output() {
        let entry = decode(&[0x00, b'A'], 2, 4, 1).unwrap();
        assert_eq!(entry.data.as_deref(), Some(&b"A"[..]));
        assert_eq!(entry.diagnostics.len(), 1);
    }

    #[test]
    fn test_run_length_truncated_is_error() {
        let err = decode(&[0x05, b'A'], 2, 6, 1).unwrap_err();
        assert!(matches!(err, RedArcError::TruncatedPayload { .. }));
    }

    #[test]
    fn test_dictionary_fault_is_diagnostic() {
        let payload = [0b0000_0001, b'X', 0x00, 0x00];
        let entry = decode(&payload, 4, 4, 2).unwrap();

        assert_eq!(entry.data.as_deref(), Some(&b"X"[..]));
        assert!(
            entry
                .diagnostics
                .iter()
                .any(|d| matches!(d, RedArcError::InvalidBackReference { .. }))
        );
        assert!(
            entry
                .diagnostics
                .iter()
                .any(|d| matches!(d, RedArcError::SizeMismatch { .. }))
        );
    }

    #[test]
    fn test_unsupported_levels_skip() {
        for level in [7u8, 100, 253] {
            let entry = decode(b"data", 4, 4, level).unwrap();
            assert!(entry.is_skipped());
            assert!(matches!(
                entry.diagnostics[..],
                [RedArcError::UnsupportedLevel { .. }]
            ));
        }
    }

    #[test]
    fn test_wrapped_levels_decode() {
        for level in [254u8, 255] {
            let entry = decode(b"\xFFabcdefgh", 9, 8, level).unwrap();
            assert!(entry.is_clean(), "level {}: {:?}", level, entry.diagnostics);
            assert_eq!(entry.data.as_deref(), Some(&b"abcdefgh"[..]));
        }
    }

    #[test]
    fn test_short_payload() {
        let err = decode(b"abc", 5, 5, 0).unwrap_err();
        assert!(matches!(
            err,
            RedArcError::TruncatedPayload {
                expected: 5,
                available: 3
            }
        ));
    }

    #[test]
    fn test_encode_roundtrip_all_levels() {
        let data = b"Red Archive, red archive, RED ARCHIVE!!!!!!!!!!!!!!!!";
        for level in 0..=6u8 {
            let encoded = encode(data, level).unwrap();
            let entry = decode(&encoded, encoded.len() as u32, data.len() as u32, level).unwrap();
            assert!(entry.is_clean(), "level {}: {:?}", level, entry.diagnostics);
            assert_eq!(entry.data.unwrap(), data, "level {}", level);
        }
    }

    #[test]
    fn test_encode_unsupported() {
        assert!(matches!(
            encode(b"x", 7),
            Err(RedArcError::UnsupportedLevel { level: 7 })
        ));
    }
}
