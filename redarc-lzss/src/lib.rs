//! # Red Archive LZSS
//!
//! Dictionary coding used by level 2-6 entries (and the wrapped levels
//! 254 and 255).
//!
//! Each payload is a sequence of blocks: a flag byte followed by up to
//! eight items, one per flag bit from the least significant. A set bit is a
//! literal byte; a clear bit is a two-byte back-reference whose bits are
//! split between an absolute window slot and a run length. The level picks
//! the split (see [`params`]).
//!
//! ## Example
//!
//! ```rust
//! use redarc_lzss::{DictionaryParams, decode_lzss, encode_lzss};
//!
//! let params = DictionaryParams::from_level(3).unwrap();
//! let data = b"abracadabra abracadabra abracadabra";
//!
//! let packed = encode_lzss(data, params);
//! let unpacked = decode_lzss(&packed, params, data.len()).unwrap();
//!
//! assert!(unpacked.is_clean());
//! assert_eq!(unpacked.data, data);
//! ```
//!
//! ## Faults
//!
//! A back-reference to a slot that has not been written yet, a zero offset
//! field or an oversized run stops decoding. The bytes produced up to that
//! point are kept and the fault is reported in [`LzssOutput::fault`]; only a
//! token cut off by the end of the payload is returned as an error.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod decode;
pub mod encode;
pub mod lzss;
pub mod params;

// Re-exports
pub use decode::{LzssDecoder, LzssOutput, decode_lzss};
pub use encode::{LzssEncoder, encode_lzss};
pub use lzss::LzssToken;
pub use params::DictionaryParams;
