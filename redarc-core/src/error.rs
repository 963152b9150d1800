//! Error types for Red Archive operations.
//!
//! A single error enum covers the whole taxonomy. Some variants abort the
//! operation that raised them (header corruption, I/O), others only affect
//! one entry and are reported as diagnostics while unpacking continues.
//! [`RedArcError::is_fatal`] tells the two apart.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for Red Archive operations.
#[derive(Debug, Error)]
pub enum RedArcError {
    /// I/O error from an underlying reader/writer.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// I/O error tied to a file system path.
    #[error("I/O error on {}: {source}", .path.display())]
    FileIo {
        /// The path that could not be opened, read, or written.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: io::Error,
    },

    /// The stream ended inside an entry header field.
    #[error("Truncated header at offset {offset}: could not read {field}")]
    TruncatedHeader {
        /// Name of the field being read.
        field: &'static str,
        /// Byte offset of the entry in the archive.
        offset: u64,
    },

    /// The stream ended before a payload was fully available.
    #[error("Truncated payload: expected {expected} bytes, only {available} available")]
    TruncatedPayload {
        /// Number of bytes required.
        expected: u64,
        /// Number of bytes that were available.
        available: u64,
    },

    /// Entry name with a disallowed character or missing terminator.
    #[error("Invalid filename {:?} at offset {offset}", String::from_utf8_lossy(.name))]
    InvalidName {
        /// Raw name bytes as found.
        name: Vec<u8>,
        /// Byte offset of the entry in the archive.
        offset: u64,
    },

    /// Entry data too large for the 32-bit size fields.
    #[error("Entry {name} is too large: {size} bytes exceeds the 4 GiB limit")]
    EntryTooLarge {
        /// Entry name.
        name: String,
        /// Actual data size.
        size: u64,
    },

    /// Compression level with no supported offset/run-length split.
    #[error("Unsupported compression level: {level}")]
    UnsupportedLevel {
        /// The level byte from the header.
        level: u8,
    },

    /// Back-reference token that points outside the usable window.
    #[error("Invalid back-reference at payload offset {position}: {message}")]
    InvalidBackReference {
        /// Payload offset just after the offending token.
        position: usize,
        /// Description of the violation.
        message: String,
    },

    /// Produced or consumed byte count differs from the header.
    #[error("{field} size mismatch: header declares {expected}, got {actual}")]
    SizeMismatch {
        /// Which size disagrees ("compressed" or "uncompressed").
        field: &'static str,
        /// Value declared in the entry header.
        expected: u64,
        /// Value actually observed.
        actual: u64,
    },
}

/// Result type alias for Red Archive operations.
pub type Result<T> = std::result::Result<T, RedArcError>;

impl RedArcError {
    /// Create a path-carrying I/O error.
    pub fn file_io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::FileIo {
            path: path.into(),
            source,
        }
    }

    /// Create a truncated header error.
    pub fn truncated_header(field: &'static str, offset: u64) -> Self {
        Self::TruncatedHeader { field, offset }
    }

    /// Create a truncated payload error.
    pub fn truncated_payload(expected: u64, available: u64) -> Self {
        Self::TruncatedPayload {
            expected,
            available,
        }
    }

    /// Create an invalid name error.
    pub fn invalid_name(name: impl Into<Vec<u8>>, offset: u64) -> Self {
        Self::InvalidName {
            name: name.into(),
            offset,
        }
    }

    /// Create an entry too large error.
    pub fn entry_too_large(name: impl Into<String>, size: u64) -> Self {
        Self::EntryTooLarge {
            name: name.into(),
            size,
        }
    }

    /// Create an unsupported level error.
    pub fn unsupported_level(level: u8) -> Self {
        Self::UnsupportedLevel { level }
    }

    /// Create an invalid back-reference error.
    pub fn invalid_back_reference(position: usize, message: impl Into<String>) -> Self {
        Self::InvalidBackReference {
            position,
            message: message.into(),
        }
    }

    /// Create a size mismatch diagnostic.
    pub fn size_mismatch(field: &'static str, expected: u64, actual: u64) -> Self {
        Self::SizeMismatch {
            field,
            expected,
            actual,
        }
    }

    /// Whether this error aborts the whole archive operation.
    ///
    /// Non-fatal kinds are confined to the entry they occur in.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            Self::UnsupportedLevel { .. }
                | Self::InvalidBackReference { .. }
                | Self::SizeMismatch { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RedArcError::invalid_name(b"BAD NAME".to_vec(), 42);
        assert!(err.to_string().contains("BAD NAME"));
        assert!(err.to_string().contains("42"));

        let err = RedArcError::truncated_header("compressed size", 7);
        assert!(err.to_string().contains("compressed size"));

        let err = RedArcError::size_mismatch("uncompressed", 10, 8);
        assert_eq!(
            err.to_string(),
            "uncompressed size mismatch: header declares 10, got 8"
        );
    }

    #[test]
    fn test_severity() {
        assert!(RedArcError::truncated_header("name", 0).is_fatal());
        assert!(RedArcError::truncated_payload(4, 2).is_fatal());
        assert!(RedArcError::invalid_name(b"a b".to_vec(), 0).is_fatal());
        assert!(!RedArcError::unsupported_level(7).is_fatal());
        assert!(!RedArcError::invalid_back_reference(2, "offset -1").is_fatal());
        assert!(!RedArcError::size_mismatch("compressed", 1, 2).is_fatal());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: RedArcError = io_err.into();
        assert!(matches!(err, RedArcError::Io(_)));
        assert!(err.is_fatal());

        let err = RedArcError::file_io(
            "missing.red",
            io::Error::new(io::ErrorKind::NotFound, "gone"),
        );
        assert!(err.to_string().contains("missing.red"));
    }
}
