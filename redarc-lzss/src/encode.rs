//! Dictionary compression.
//!
//! Greedy longest-match search through hash chains over 3-byte prefixes.
//! Positions are tracked as absolute input offsets; a token stores the
//! window slot of its source, which is the source offset modulo the window
//! size.

use crate::lzss::{LzssToken, pack_tokens};
use crate::params::DictionaryParams;

/// Minimum match length worth a token.
pub const MIN_MATCH: usize = 3;

/// Number of hash bits.
const HASH_BITS: u32 = 15;

/// Size of the hash table.
const HASH_SIZE: usize = 1 << HASH_BITS;

/// Chain links followed per position.
const MAX_CHAIN: usize = 128;

/// Empty chain marker.
const NO_POS: usize = usize::MAX;

/// LZSS encoder for one dictionary level.
#[derive(Debug)]
pub struct LzssEncoder {
    params: DictionaryParams,
    /// Hash -> most recent position.
    head: Vec<usize>,
    /// Position (masked) -> previous position with the same hash.
    prev: Vec<usize>,
    mask: usize,
}

impl LzssEncoder {
    /// Create an encoder.
    pub fn new(params: DictionaryParams) -> Self {
        let window_size = params.window_size();
        Self {
            params,
            head: vec![NO_POS; HASH_SIZE],
            prev: vec![NO_POS; window_size],
            mask: window_size - 1,
        }
    }

    fn reset(&mut self) {
        self.head.fill(NO_POS);
        self.prev.fill(NO_POS);
    }

    #[inline(always)]
    fn hash(data: &[u8], pos: usize) -> usize {
        let value =
            (data[pos] as u32) | ((data[pos + 1] as u32) << 8) | ((data[pos + 2] as u32) << 16);
        (value.wrapping_mul(0x9E37_79B1) >> (32 - HASH_BITS)) as usize
    }

    #[inline]
    fn insert(&mut self, data: &[u8], pos: usize) {
        if pos + MIN_MATCH <= data.len() {
            let h = Self::hash(data, pos);
            self.prev[pos & self.mask] = self.head[h];
            self.head[h] = pos;
        }
    }

    /// Find the longest usable match at `pos` as `(source, length)`.
    ///
    /// A source must lie within the last `window_size - 1` bytes so its slot
    /// still holds the same byte when the decoder reads it, and must not map
    /// to slot `max_offset`, whose stored field would overflow.
    fn find_match(&self, data: &[u8], pos: usize) -> Option<(usize, usize)> {
        if pos + MIN_MATCH > data.len() {
            return None;
        }

        let max_len = (self.params.longest_run() as usize).min(data.len() - pos);
        let lowest = pos.saturating_sub(self.mask);
        let mut best: Option<(usize, usize)> = None;
        let mut best_len = MIN_MATCH - 1;

        let mut candidate = self.head[Self::hash(data, pos)];
        let mut chain = MAX_CHAIN;

        while candidate != NO_POS && candidate >= lowest && chain > 0 {
            chain -= 1;

            if candidate & self.mask != self.mask {
                // Overlapping matches read bytes the copy itself produces
                let len = (0..max_len)
                    .take_while(|&k| data[candidate + k] == data[pos + k])
                    .count();
                if len > best_len {
                    best_len = len;
                    best = Some((candidate, len));
                    if len == max_len {
                        break;
                    }
                }
            }

            let next = self.prev[candidate & self.mask];
            if next == NO_POS || next >= candidate {
                break;
            }
            candidate = next;
        }

        best
    }

    /// Split input into literals and back-references.
    pub fn tokenize(&mut self, data: &[u8]) -> Vec<LzssToken> {
        self.reset();

        let mut tokens = Vec::with_capacity(data.len() / 2 + 1);
        let mut pos = 0;

        while pos < data.len() {
            match self.find_match(data, pos) {
                Some((source, len)) => {
                    tokens.push(LzssToken::Match {
                        offset: (source & self.mask) as i32,
                        run_length: len as u32,
                    });
                    for p in pos..pos + len {
                        self.insert(data, p);
                    }
                    pos += len;
                }
                None => {
                    tokens.push(LzssToken::Literal(data[pos]));
                    self.insert(data, pos);
                    pos += 1;
                }
            }
        }

        tokens
    }

    /// Compress data into a dictionary payload.
    pub fn encode(&mut self, data: &[u8]) -> Vec<u8> {
        let tokens = self.tokenize(data);
        pack_tokens(&tokens, &self.params)
    }
}

/// Encode data as a dictionary-coded payload.
pub fn encode_lzss(data: &[u8], params: DictionaryParams) -> Vec<u8> {
    LzssEncoder::new(params).encode(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode_lzss;

    #[test]
    fn test_no_matches_in_short_input() {
        let params = DictionaryParams::from_level(2).unwrap();
        let encoded = encode_lzss(b"ab", params);
        assert_eq!(encoded, vec![0b0000_0011, b'a', b'b']);
    }

    #[test]
    fn test_repeat_becomes_token() {
        let params = DictionaryParams::from_level(2).unwrap();
        let mut encoder = LzssEncoder::new(params);
        let tokens = encoder.tokenize(b"abcabcabc");

        assert_eq!(tokens.len(), 4);
        assert_eq!(
            tokens[3],
            LzssToken::Match {
                offset: 0,
                run_length: 6
            }
        );
    }

    #[test]
    fn test_roundtrip() {
        let data = b"the quick brown fox jumps over the lazy dog, the quick brown fox";
        for level in 2..=6 {
            let params = DictionaryParams::from_level(level).unwrap();
            let encoded = encode_lzss(data, params);
            let decoded = decode_lzss(&encoded, params, data.len()).unwrap();
            assert!(decoded.is_clean(), "level {}", level);
            assert_eq!(decoded.data, data, "level {}", level);
            assert_eq!(decoded.consumed, encoded.len(), "level {}", level);
        }
    }

    #[test]
    fn test_runs_are_capped() {
        let params = DictionaryParams::from_level(2).unwrap();
        let data = vec![b'z'; 100];
        let tokens = LzssEncoder::new(params).tokenize(&data);

        for token in &tokens {
            if let LzssToken::Match { run_length, .. } = token {
                assert!(*run_length <= params.longest_run());
            }
        }
        let encoded = encode_lzss(&data, params);
        assert_eq!(decode_lzss(&encoded, params, 100).unwrap().data, data);
    }

    #[test]
    fn test_empty() {
        let params = DictionaryParams::from_level(4).unwrap();
        assert!(encode_lzss(&[], params).is_empty());
    }
}
