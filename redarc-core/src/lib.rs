//! # Red Archive Core
//!
//! Core components for the Red Archive library.
//!
//! This crate provides the building blocks shared by the codecs and the
//! container:
//!
//! - [`bitstream`]: LSB-first bit field reader/writer
//! - [`window`]: Circular dictionary window for back-references
//! - [`entry`]: Entry names, headers, and level classification
//! - [`error`]: Error taxonomy
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ L4: CLI                                                 │
//! │     redarc pack / unpack / list / test                  │
//! ├─────────────────────────────────────────────────────────┤
//! │ L3: Container                                           │
//! │     entry framing, level dispatch, file collaborators   │
//! ├─────────────────────────────────────────────────────────┤
//! │ L2: Codec                                               │
//! │     byte-run (level 1), LZSS dictionary (levels 2-6)    │
//! ├─────────────────────────────────────────────────────────┤
//! │ L1: Core (this crate)                                   │
//! │     BitReader/BitWriter, Window, EntryHeader            │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use redarc_core::bitstream::BitReader;
//! use redarc_core::entry::{EntryName, Method};
//!
//! let token = [0x05, 0x30];
//! let mut reader = BitReader::new(&token);
//! assert_eq!(reader.read_bits(12).unwrap(), 5);
//! assert_eq!(reader.read_bits(4).unwrap(), 3);
//!
//! let name = EntryName::parse(b"DATA.BIN\0").unwrap();
//! assert_eq!(name.as_str(), "DATA.BIN");
//! assert!(!Method::from_level(7).is_supported());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod bitstream;
pub mod entry;
pub mod error;
pub mod window;

// Re-exports for convenience
pub use bitstream::{BitReader, BitWriter};
pub use entry::{EntryHeader, EntryName, Method};
pub use error::{RedArcError, Result};
pub use window::Window;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::bitstream::{BitReader, BitWriter};
    pub use crate::entry::{EntryHeader, EntryName, Method};
    pub use crate::error::{RedArcError, Result};
    pub use crate::window::Window;
}
