//! Byte-run compression.

use crate::{MAX_LITERAL_RUN, MAX_REPEAT_RUN, MIN_REPEAT_RUN, REPEAT_BIAS};

/// Encode data as a level 1 payload.
///
/// Runs of at least three equal bytes become repeat segments; everything
/// else is emitted as literal segments.
pub fn encode_rle(data: &[u8]) -> Vec<u8> {
    let mut output = Vec::with_capacity(data.len() + data.len() / MAX_LITERAL_RUN + 1);
    let mut literal_start = 0;
    let mut i = 0;

    while i < data.len() {
        let byte = data[i];
        let mut run_len = 1;

        // Count consecutive identical bytes
        while i + run_len < data.len() && data[i + run_len] == byte && run_len < MAX_REPEAT_RUN {
            run_len += 1;
        }

        if run_len >= MIN_REPEAT_RUN {
            push_literals(&mut output, &data[literal_start..i]);
            output.push(run_len as u8 + REPEAT_BIAS);
            output.push(byte);
            literal_start = i + run_len;
        }
        i += run_len;
    }

    push_literals(&mut output, &data[literal_start..]);
    output
}

fn push_literals(output: &mut Vec<u8>, literals: &[u8]) {
    for chunk in literals.chunks(MAX_LITERAL_RUN) {
        output.push((chunk.len() - 1) as u8);
        output.extend_from_slice(chunk);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode_rle;

    #[test]
    fn test_encode_literals() {
        assert_eq!(encode_rle(b"ABC"), vec![0x02, b'A', b'B', b'C']);
    }

    #[test]
    fn test_encode_repeat() {
        assert_eq!(encode_rle(b"XXXXXX"), vec![0x83, b'X']);
    }

    #[test]
    fn test_short_runs_stay_literal() {
        assert_eq!(encode_rle(b"aabb"), vec![0x03, b'a', b'a', b'b', b'b']);
    }

    #[test]
    fn test_long_run_splits() {
        let data = vec![7u8; 300];
        let encoded = encode_rle(&data);
        // 130 + 130 + 40
        assert_eq!(encoded, vec![0xFF, 7, 0xFF, 7, 0xA5, 7]);
        assert_eq!(decode_rle(&encoded, 300).unwrap(), data);
    }

    #[test]
    fn test_long_literal_splits() {
        let data: Vec<u8> = (0..=255u8).chain(0..=43u8).collect();
        let encoded = encode_rle(&data);
        assert_eq!(encoded[0], 0x7F);
        assert_eq!(encoded[129], 0x7F);
        assert_eq!(encoded[258], 43);
        assert_eq!(decode_rle(&encoded, data.len()).unwrap(), data);
    }

    #[test]
    fn test_roundtrip_mixed() {
        let mut data = b"header".to_vec();
        data.extend(std::iter::repeat_n(0u8, 1000));
        data.extend_from_slice(b"xyzzy");
        data.extend(std::iter::repeat_n(0xFFu8, 2));

        let encoded = encode_rle(&data);
        assert!(encoded.len() < data.len() / 10);
        assert_eq!(decode_rle(&encoded, data.len()).unwrap(), data);
    }

    #[test]
    fn test_empty() {
        assert!(encode_rle(&[]).is_empty());
    }
}
