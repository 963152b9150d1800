//! Byte-run decompression.

use crate::{MAX_REPEAT_RUN, REPEAT_BIAS, REPEAT_FLAG};
use redarc_core::error::{RedArcError, Result};

/// Decode a level 1 payload.
///
/// Consumes `input` to its end and returns exactly the bytes produced.
/// `uncompressed_size` only sizes the output allocation; comparing the
/// result against it is left to the caller.
///
/// # Errors
///
/// Returns [`RedArcError::TruncatedPayload`] if a segment needs bytes past
/// the end of `input`.
pub fn decode_rle(input: &[u8], uncompressed_size: usize) -> Result<Vec<u8>> {
    // Two input bytes expand to at most MAX_REPEAT_RUN output bytes.
    let bound = input.len().saturating_mul(MAX_REPEAT_RUN.div_ceil(2));
    let mut output = Vec::with_capacity(uncompressed_size.min(bound));
    let mut pos = 0;

    while pos < input.len() {
        let flag = input[pos];
        pos += 1;

        if flag & REPEAT_FLAG != 0 {
            let count = (flag - REPEAT_BIAS) as usize;
            let &seed = input
                .get(pos)
                .ok_or_else(|| truncated(pos + 1, input.len()))?;
            pos += 1;
            output.resize(output.len() + count, seed);
        } else {
            let count = flag as usize + 1;
            let literal = input
                .get(pos..pos + count)
                .ok_or_else(|| truncated(pos + count, input.len()))?;
            pos += count;
            output.extend_from_slice(literal);
        }
    }

    Ok(output)
}

fn truncated(expected: usize, available: usize) -> RedArcError {
    RedArcError::truncated_payload(expected as u64, available as u64)
}
