//! Archive entry metadata.
//!
//! An entry header is a NUL-terminated name followed by a 9-byte tail:
//!
//! ```text
//! name_bytes NUL compressed_size:u32le uncompressed_size:u32le level:u8
//! ```
//!
//! Names are 8.3-style: at most 12 characters drawn from the MS-DOS-safe
//! set, so the name plus its terminator always fits a 13-byte field.

use crate::error::{RedArcError, Result};
use std::fmt;

/// Size of the name field including the terminator.
pub const NAME_FIELD_SIZE: usize = 13;

/// Maximum number of name characters.
pub const MAX_NAME_LEN: usize = NAME_FIELD_SIZE - 1;

/// Size of the fixed header tail (two sizes and the level byte).
pub const HEADER_TAIL_SIZE: usize = 9;

/// Check if a byte may appear in an entry name.
pub fn is_valid_name_byte(byte: u8) -> bool {
    matches!(
        byte,
        b'!' | b'$'..=b')' | b'-' | b'.' | b'0'..=b'9' | b'@'..=b'Z' | b'^'..=b'{' | b'}' | b'~'
    )
}

/// Coding scheme selected by an entry's level byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// Level 0: payload stored verbatim.
    Store,
    /// Level 1: byte-run coding.
    RunLength,
    /// Dictionary coding with `offset_bits = 6 - level` in 8-bit arithmetic:
    /// levels 2-6, plus 254 and 255 where the subtraction wraps to 8 and 7.
    Dictionary {
        /// The level byte.
        level: u8,
        /// Extra offset bits taken from the second token byte (0-8).
        offset_bits: u8,
    },
    /// Any other level; the payload cannot be decoded.
    Unsupported(u8),
}

impl Method {
    /// Level whose split gives no extra offset bits.
    pub const BASE_LEVEL: u8 = 6;

    /// Most offset bits a token can carry.
    pub const MAX_OFFSET_BITS: u8 = 8;

    /// Classify a level byte.
    pub fn from_level(level: u8) -> Self {
        match level {
            0 => Self::Store,
            1 => Self::RunLength,
            _ => {
                let offset_bits = Self::BASE_LEVEL.wrapping_sub(level);
                if offset_bits <= Self::MAX_OFFSET_BITS {
                    Self::Dictionary { level, offset_bits }
                } else {
                    Self::Unsupported(level)
                }
            }
        }
    }

    /// Check if the payload can be decoded.
    pub fn is_supported(&self) -> bool {
        !matches!(self, Self::Unsupported(_))
    }

    /// Short method name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Store => "store",
            Self::RunLength => "rle",
            Self::Dictionary { .. } => "lzss",
            Self::Unsupported(_) => "unknown",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Store | Self::RunLength => write!(f, "{}", self.name()),
            Self::Dictionary { level, .. } => write!(f, "{}-{}", self.name(), level),
            Self::Unsupported(level) => write!(f, "{}({})", self.name(), level),
        }
    }
}

/// A validated entry name held in a fixed-capacity buffer.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntryName {
    bytes: [u8; MAX_NAME_LEN],
    len: u8,
}

impl EntryName {
    /// Parse a name field as read from an archive.
    ///
    /// `field` holds the bytes actually read (up to [`NAME_FIELD_SIZE`]).
    /// The name ends at the first NUL after at least one character; every
    /// byte before it must be a valid name byte. Returns `None` if a byte is
    /// invalid or no terminator occurs within `field`.
    pub fn parse(field: &[u8]) -> Option<Self> {
        let field = &field[..field.len().min(NAME_FIELD_SIZE)];

        for (i, &byte) in field.iter().enumerate() {
            if i > 0 && byte == 0 {
                return Some(Self::from_valid(&field[..i]));
            }
            if !is_valid_name_byte(byte) {
                return None;
            }
        }

        // No terminator within the bytes read
        None
    }

    /// Validate a name for writing into an archive.
    pub fn new(name: &str) -> Option<Self> {
        let raw = name.as_bytes();
        if raw.is_empty() || raw.len() > MAX_NAME_LEN {
            return None;
        }
        if !raw.iter().all(|&b| is_valid_name_byte(b)) {
            return None;
        }
        Some(Self::from_valid(raw))
    }

    fn from_valid(raw: &[u8]) -> Self {
        let mut bytes = [0u8; MAX_NAME_LEN];
        bytes[..raw.len()].copy_from_slice(raw);
        Self {
            bytes,
            len: raw.len() as u8,
        }
    }

    /// Name bytes without the terminator.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len as usize]
    }

    /// Name as a string slice.
    pub fn as_str(&self) -> &str {
        // Every valid name byte is printable ASCII.
        std::str::from_utf8(self.as_bytes()).unwrap_or_default()
    }

    /// Number of name characters.
    pub fn len(&self) -> usize {
        self.len as usize
    }

    /// Always false; a valid name has at least one character.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Bytes the name occupies in an archive, terminator included.
    pub fn encoded_len(&self) -> usize {
        self.len() + 1
    }
}

impl fmt::Debug for EntryName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntryName({:?})", self.as_str())
    }
}

impl fmt::Display for EntryName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for EntryName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Header of one archive entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryHeader {
    /// Entry name.
    pub name: EntryName,
    /// Payload length in the archive.
    pub compressed_size: u32,
    /// Declared decoded length.
    pub uncompressed_size: u32,
    /// Raw level byte.
    pub level: u8,
}

impl EntryHeader {
    /// Decode the 9-byte tail that follows the name.
    pub fn from_tail(name: EntryName, tail: &[u8; HEADER_TAIL_SIZE]) -> Self {
        Self {
            name,
            compressed_size: u32::from_le_bytes([tail[0], tail[1], tail[2], tail[3]]),
            uncompressed_size: u32::from_le_bytes([tail[4], tail[5], tail[6], tail[7]]),
            level: tail[8],
        }
    }

    /// Coding scheme for this entry.
    pub fn method(&self) -> Method {
        Method::from_level(self.level)
    }

    /// Header length in the archive.
    pub fn encoded_len(&self) -> usize {
        self.name.encoded_len() + HEADER_TAIL_SIZE
    }

    /// Serialize the header.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut header = Vec::with_capacity(self.encoded_len());
        header.extend_from_slice(self.name.as_bytes());
        header.push(0);
        header.extend_from_slice(&self.compressed_size.to_le_bytes());
        header.extend_from_slice(&self.uncompressed_size.to_le_bytes());
        header.push(self.level);
        header
    }

    /// Get the compression ratio (compressed/uncompressed).
    pub fn compression_ratio(&self) -> f64 {
        if self.uncompressed_size == 0 {
            1.0
        } else {
            self.compressed_size as f64 / self.uncompressed_size as f64
        }
    }
}

/// Validate `name` for packing, mapping failure to [`RedArcError::InvalidName`].
pub fn checked_name(name: &str) -> Result<EntryName> {
    EntryName::new(name).ok_or_else(|| RedArcError::invalid_name(name.as_bytes(), 0))
}
