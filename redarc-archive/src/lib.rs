//! # Red Archive container
//!
//! Reading and writing of Red Archive files: a flat sequence of named
//! entries, each coded on its own, closed by a single zero byte.
//!
//! ```text
//! Entry   := name NUL compressed_size:u32le uncompressed_size:u32le level:u8 payload
//! Archive := Entry* 0x00
//! ```
//!
//! | Level         | Scheme                              |
//! |---------------|-------------------------------------|
//! | 0             | stored                              |
//! | 1             | byte-run coding ([`redarc_rle`])    |
//! | 2-6, 254, 255 | dictionary coding ([`redarc_lzss`]) |
//!
//! ## Example
//!
//! ```rust
//! use redarc_archive::{ArchiveWriter, MemorySink, unpack};
//! use std::io::Cursor;
//!
//! let mut writer = ArchiveWriter::new(Vec::new());
//! writer.add_file("HELLO.TXT", b"Hello, World!").unwrap();
//! writer.add_file_with_level("ZEROS.BIN", &[0u8; 1000], 1).unwrap();
//! let archive = writer.into_inner().unwrap();
//!
//! let mut sink = MemorySink::new();
//! let summary = unpack(Cursor::new(archive), &mut sink).unwrap();
//!
//! assert!(summary.is_clean());
//! assert_eq!(sink.get("HELLO.TXT"), Some(&b"Hello, World!"[..]));
//! ```
//!
//! ## Error handling
//!
//! Truncated headers or payloads and invalid names stop an unpack with an
//! error. Unsupported levels, invalid back-references and size mismatches
//! only affect their entry: they are logged and kept in the
//! [`EntryReport`] of that entry, and unpacking continues with the next
//! header.
//!
//! ## Features
//!
//! - `parallel`: [`unpack_parallel`] decodes payloads on the rayon pool.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod codec;
pub mod container;
pub mod fs;
pub mod reader;
pub mod sink;
pub mod writer;

// Re-exports
pub use codec::DecodedEntry;
pub use container::{EntryReport, PackSummary, UnpackSummary, pack, unpack};
pub use fs::{
    DirectorySink, list_directory_entries, open_for_read, open_for_write, pack_directory,
    unpack_archive,
};
pub use reader::{ArchiveReader, EntryInfo, RawEntry};
pub use sink::{EntrySink, MemorySink, NullSink};
pub use writer::ArchiveWriter;

#[cfg(feature = "parallel")]
pub use container::unpack_parallel;
#[cfg(feature = "parallel")]
pub use fs::unpack_archive_parallel;
