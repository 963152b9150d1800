//! Archive writer.

use crate::codec;
use redarc_core::entry::{EntryHeader, checked_name};
use redarc_core::error::{RedArcError, Result};
use std::io::{self, Write};
use tracing::debug;

/// Red Archive writer.
///
/// Entries are written as they are added; [`finish`](Self::finish) writes
/// the terminator.
pub struct ArchiveWriter<W: Write> {
    writer: W,
    entries: usize,
    bytes_written: u64,
    finished: bool,
}

impl<W: Write> ArchiveWriter<W> {
    /// Create a new writer.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            entries: 0,
            bytes_written: 0,
            finished: false,
        }
    }

    /// Number of entries written so far.
    pub fn entries_written(&self) -> usize {
        self.entries
    }

    /// Number of archive bytes written so far.
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// Add a stored (level 0) entry.
    pub fn add_file(&mut self, name: &str, data: &[u8]) -> Result<EntryHeader> {
        self.add_file_with_level(name, data, 0)
    }

    /// Add an entry encoded at `level`.
    pub fn add_file_with_level(&mut self, name: &str, data: &[u8], level: u8) -> Result<EntryHeader> {
        let name = checked_name(name)?;
        let uncompressed_size = size_field(name.as_str(), data.len())?;
        let payload = codec::encode(data, level)?;
        let compressed_size = size_field(name.as_str(), payload.len())?;

        let header = EntryHeader {
            name,
            compressed_size,
            uncompressed_size,
            level,
        };
        self.write_entry(&header, &payload)?;
        Ok(header)
    }

    /// Write an already encoded entry.
    pub fn write_entry(&mut self, header: &EntryHeader, payload: &[u8]) -> Result<()> {
        if self.finished {
            return Err(RedArcError::Io(io::Error::other(
                "archive already finished",
            )));
        }
        if payload.len() != header.compressed_size as usize {
            return Err(RedArcError::size_mismatch(
                "compressed",
                u64::from(header.compressed_size),
                payload.len() as u64,
            ));
        }

        let bytes = header.to_bytes();
        self.writer.write_all(&bytes)?;
        self.writer.write_all(payload)?;

        self.entries += 1;
        self.bytes_written += (bytes.len() + payload.len()) as u64;

        debug!(
            name = %header.name,
            level = header.level,
            compressed = header.compressed_size,
            uncompressed = header.uncompressed_size,
            "Wrote entry"
        );
        Ok(())
    }

    /// Write the terminator and flush. Later calls do nothing.
    pub fn finish(&mut self) -> Result<()> {
        if !self.finished {
            self.writer.write_all(&[0u8])?;
            self.writer.flush()?;
            self.bytes_written += 1;
            self.finished = true;
        }
        Ok(())
    }

    /// Finish the archive and return the inner writer.
    pub fn into_inner(mut self) -> Result<W> {
        self.finish()?;
        Ok(self.writer)
    }
}

fn size_field(name: &str, len: usize) -> Result<u32> {
    u32::try_from(len).map_err(|_| RedArcError::entry_too_large(name, len as u64))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::ArchiveReader;
    use std::io::Cursor;

    #[test]
    fn test_stored_layout() {
        let mut writer = ArchiveWriter::new(Vec::new());
        writer.add_file("HI.TXT", b"hey").unwrap();
        let bytes = writer.into_inner().unwrap();

        let mut expected = b"HI.TXT\0".to_vec();
        expected.extend_from_slice(&3u32.to_le_bytes());
        expected.extend_from_slice(&3u32.to_le_bytes());
        expected.push(0);
        expected.extend_from_slice(b"hey");
        expected.push(0);
        assert_eq!(bytes, expected);
    }

    #[test]
    fn test_empty_archive() {
        let mut writer = ArchiveWriter::new(Vec::new());
        writer.finish().unwrap();
        writer.finish().unwrap();
        assert_eq!(writer.bytes_written(), 1);
        assert_eq!(writer.into_inner().unwrap(), vec![0u8]);
    }

    #[test]
    fn test_rejects_invalid_names() {
        let mut writer = ArchiveWriter::new(Vec::new());
        for name in ["", "has space", "THIRTEEN.CHAR", "a/b", "*"] {
            assert!(
                matches!(
                    writer.add_file(name, b"x"),
                    Err(RedArcError::InvalidName { .. })
                ),
                "{:?} should be rejected",
                name
            );
        }
        assert_eq!(writer.entries_written(), 0);
    }

    #[test]
    fn test_compressed_levels_read_back() {
        let data = b"abcabcabcabcabcabc----------------abcabcabc".repeat(20);
        let mut writer = ArchiveWriter::new(Vec::new());
        for level in 0..=6u8 {
            let header = writer
                .add_file_with_level(&format!("L{}.BIN", level), &data, level)
                .unwrap();
            assert_eq!(header.uncompressed_size as usize, data.len());
            if level > 0 {
                assert!((header.compressed_size as usize) < data.len());
            }
        }
        let bytes = writer.into_inner().unwrap();

        let mut reader = ArchiveReader::new(Cursor::new(bytes)).unwrap();
        let mut level = 0;
        while let Some(entry) = reader.next_entry().unwrap() {
            assert_eq!(entry.header().level, level);
            let decoded = codec::decode(
                &entry.payload,
                entry.header().compressed_size,
                entry.header().uncompressed_size,
                entry.header().level,
            )
            .unwrap();
            assert!(decoded.is_clean());
            assert_eq!(decoded.data.unwrap(), data);
            level += 1;
        }
        assert_eq!(level, 7);
    }

    #[test]
    fn test_write_after_finish_fails() {
        let mut writer = ArchiveWriter::new(Vec::new());
        writer.finish().unwrap();
        assert!(writer.add_file("LATE", b"x").is_err());
    }

    #[test]
    fn test_unsupported_level() {
        let mut writer = ArchiveWriter::new(Vec::new());
        assert!(matches!(
            writer.add_file_with_level("X", b"x", 7),
            Err(RedArcError::UnsupportedLevel { level: 7 })
        ));
    }
}
