//! # Red Archive RLE
//!
//! Byte-run coding used by level 1 entries.
//!
//! The stream is a sequence of segments, each introduced by a flag byte:
//!
//! | Flag      | Segment                                              |
//! |-----------|------------------------------------------------------|
//! | `0..=127` | `flag + 1` literal bytes follow (1-128)              |
//! | `128..=255` | one seed byte follows, repeated `flag - 125` times (3-130) |
//!
//! ## Example
//!
//! ```rust
//! use redarc_rle::{decode_rle, encode_rle};
//!
//! assert_eq!(decode_rle(&[0x02, b'A', b'B', b'C'], 3).unwrap(), b"ABC");
//! assert_eq!(decode_rle(&[0x83, b'X'], 6).unwrap(), b"XXXXXX");
//!
//! let data = b"AAAAAAAAhello";
//! let packed = encode_rle(data);
//! assert_eq!(decode_rle(&packed, data.len()).unwrap(), data);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod decode;
pub mod encode;

// Re-exports
pub use decode::decode_rle;
pub use encode::encode_rle;

/// Longest literal segment.
pub const MAX_LITERAL_RUN: usize = 128;

/// Shortest repeat segment.
pub const MIN_REPEAT_RUN: usize = 3;

/// Longest repeat segment.
pub const MAX_REPEAT_RUN: usize = 130;

/// Flag bit marking a repeat segment.
pub(crate) const REPEAT_FLAG: u8 = 0x80;

/// Difference between a repeat flag and its count.
pub(crate) const REPEAT_BIAS: u8 = 125;
