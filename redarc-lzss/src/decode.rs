//! Dictionary decompression.

use crate::lzss::{LzssToken, read_match};
use crate::params::DictionaryParams;
use redarc_core::bitstream::BitReader;
use redarc_core::error::{RedArcError, Result};
use redarc_core::window::Window;

/// Output capacity reserved up front, regardless of the declared size.
const MAX_INITIAL_CAPACITY: usize = 1 << 20;

/// Result of decoding one dictionary payload.
#[derive(Debug)]
pub struct LzssOutput {
    /// Bytes produced before the payload ended or a fault stopped decoding.
    pub data: Vec<u8>,
    /// Payload bytes consumed.
    pub consumed: usize,
    /// Recoverable fault that stopped decoding early.
    pub fault: Option<RedArcError>,
}

impl LzssOutput {
    /// Whether decoding ran to completion without a fault.
    pub fn is_clean(&self) -> bool {
        self.fault.is_none()
    }
}

/// LZSS decoder for one entry.
pub struct LzssDecoder<'a> {
    params: DictionaryParams,
    reader: BitReader<'a>,
    window: Window,
    output: Vec<u8>,
    uncompressed_size: usize,
}

impl<'a> LzssDecoder<'a> {
    /// Create a decoder over a payload.
    pub fn new(input: &'a [u8], params: DictionaryParams, uncompressed_size: usize) -> Self {
        Self {
            params,
            reader: BitReader::new(input),
            window: Window::new(params.window_size()),
            output: Vec::with_capacity(uncompressed_size.min(MAX_INITIAL_CAPACITY)),
            uncompressed_size,
        }
    }

    fn is_done(&self) -> bool {
        self.reader.is_empty() || self.output.len() >= self.uncompressed_size
    }

    /// Decode the whole payload.
    ///
    /// Truncated tokens are fatal; invalid back-references stop decoding
    /// and are returned as the output's fault.
    pub fn decode(mut self) -> Result<LzssOutput> {
        let fault = match self.run() {
            Ok(()) => None,
            Err(err @ RedArcError::InvalidBackReference { .. }) => Some(err),
            Err(err) => return Err(err),
        };

        Ok(LzssOutput {
            consumed: self.reader.bytes_consumed(),
            data: self.output,
            fault,
        })
    }

    fn run(&mut self) -> Result<()> {
        while !self.is_done() {
            let flags = self.reader.read_byte()?;

            for bit in 0..8 {
                if self.is_done() {
                    break;
                }

                if flags & (1 << bit) != 0 {
                    let byte = self.reader.read_byte()?;
                    self.emit(byte);
                } else {
                    let token = read_match(&mut self.reader, &self.params)?;
                    self.copy_match(token)?;
                }
            }
        }

        Ok(())
    }

    #[inline]
    fn emit(&mut self, byte: u8) {
        self.output.push(byte);
        self.window.push(byte);
    }

    fn copy_match(&mut self, token: LzssToken) -> Result<()> {
        let LzssToken::Match { offset, run_length } = token else {
            return Ok(());
        };

        if offset < 0 {
            return Err(RedArcError::invalid_back_reference(
                self.output.len(),
                "offset field is zero",
            ));
        }
        if run_length > self.params.max_run_length() {
            return Err(RedArcError::invalid_back_reference(
                self.output.len(),
                format!(
                    "run length {} exceeds {}",
                    run_length,
                    self.params.max_run_length()
                ),
            ));
        }

        let mut slot = offset as usize;
        for _ in 0..run_length {
            if self.output.len() >= self.uncompressed_size {
                break;
            }
            if slot > self.window.max_offset() || slot >= self.output.len() {
                return Err(RedArcError::invalid_back_reference(
                    self.output.len(),
                    format!("slot {} not yet written", slot),
                ));
            }

            let byte = self.window.copy_slot(slot).ok_or_else(|| {
                RedArcError::invalid_back_reference(self.output.len(), "slot outside window")
            })?;
            self.output.push(byte);
            slot = self.window.next_slot(slot);
        }

        Ok(())
    }
}

/// Decode a dictionary-coded payload.
///
/// Decoding stops when the payload is exhausted or `uncompressed_size`
/// bytes have been produced, whichever comes first.
pub fn decode_lzss(
    input: &[u8],
    params: DictionaryParams,
    uncompressed_size: usize,
) -> Result<LzssOutput> {
    LzssDecoder::new(input, params, uncompressed_size).decode()
}
