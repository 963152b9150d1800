//! Sequential archive reader.
//!
//! Entries are read in order from the current position of the source. The
//! position of each header is derived from the previous header alone: after
//! an entry the reader moves to its payload start plus the declared
//! compressed size, no matter how much of the payload a codec used.

use redarc_core::entry::{EntryHeader, EntryName, HEADER_TAIL_SIZE, NAME_FIELD_SIZE};
use redarc_core::error::{RedArcError, Result};
use std::io::{self, Read, Seek, SeekFrom};
use tracing::debug;

/// Payload capacity reserved up front, regardless of the declared size.
const MAX_INITIAL_CAPACITY: usize = 1 << 20;

/// Location and header of one entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryInfo {
    /// Parsed header.
    pub header: EntryHeader,
    /// Offset of the name field.
    pub offset: u64,
    /// Offset of the first payload byte.
    pub data_offset: u64,
}

impl EntryInfo {
    /// Offset of the next header.
    pub fn next_offset(&self) -> u64 {
        self.data_offset + u64::from(self.header.compressed_size)
    }
}

/// An entry header together with its raw payload.
#[derive(Debug, Clone)]
pub struct RawEntry {
    /// Header and location.
    pub info: EntryInfo,
    /// Exactly `compressed_size` payload bytes.
    pub payload: Vec<u8>,
}

impl RawEntry {
    /// The entry header.
    pub fn header(&self) -> &EntryHeader {
        &self.info.header
    }

    /// The entry name.
    pub fn name(&self) -> &EntryName {
        &self.info.header.name
    }
}

/// Red Archive reader.
pub struct ArchiveReader<R: Read + Seek> {
    reader: R,
    position: u64,
    finished: bool,
}

impl<R: Read + Seek> ArchiveReader<R> {
    /// Create a reader starting at the current position of `reader`.
    pub fn new(mut reader: R) -> Result<Self> {
        let position = reader.stream_position()?;
        Ok(Self {
            reader,
            position,
            finished: false,
        })
    }

    /// Offset of the next header.
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Whether the terminator has been read.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Read the next header, leaving the source at its payload.
    ///
    /// Returns `None` at the terminator.
    pub fn read_header(&mut self) -> Result<Option<EntryInfo>> {
        if self.finished {
            return Ok(None);
        }

        let offset = self.position;
        self.reader.seek(SeekFrom::Start(offset))?;

        let mut field = Vec::with_capacity(NAME_FIELD_SIZE);
        (&mut self.reader)
            .take(NAME_FIELD_SIZE as u64)
            .read_to_end(&mut field)?;

        // A lone zero byte at the end of the stream is the terminator. A zero
        // byte followed by anything else is an empty name.
        match field[..] {
            [] => return Err(RedArcError::truncated_header("name", offset)),
            [0] => {
                self.position = offset + 1;
                self.finished = true;
                return Ok(None);
            }
            _ => {}
        }

        let name = EntryName::parse(&field).ok_or_else(|| {
            let end = field.iter().position(|&b| b == 0).unwrap_or(field.len());
            RedArcError::invalid_name(&field[..end], offset)
        })?;

        let tail_offset = offset + name.encoded_len() as u64;
        self.reader.seek(SeekFrom::Start(tail_offset))?;

        let compressed = self.read_field::<4>("compressed size", tail_offset)?;
        let uncompressed = self.read_field::<4>("uncompressed size", tail_offset + 4)?;
        let [level] = self.read_field::<1>("level", tail_offset + 8)?;

        let header = EntryHeader {
            name,
            compressed_size: u32::from_le_bytes(compressed),
            uncompressed_size: u32::from_le_bytes(uncompressed),
            level,
        };
        let info = EntryInfo {
            data_offset: tail_offset + HEADER_TAIL_SIZE as u64,
            offset,
            header,
        };

        debug!(
            name = %info.header.name,
            offset,
            level,
            compressed = info.header.compressed_size,
            uncompressed = info.header.uncompressed_size,
            "Read entry header"
        );

        self.position = info.next_offset();
        Ok(Some(info))
    }

    fn read_field<const N: usize>(&mut self, field: &'static str, offset: u64) -> Result<[u8; N]> {
        let mut buf = [0u8; N];
        self.reader.read_exact(&mut buf).map_err(|err| {
            if err.kind() == io::ErrorKind::UnexpectedEof {
                RedArcError::truncated_header(field, offset)
            } else {
                RedArcError::Io(err)
            }
        })?;
        Ok(buf)
    }

    /// Read the next entry and its payload.
    ///
    /// Returns `None` at the terminator.
    pub fn next_entry(&mut self) -> Result<Option<RawEntry>> {
        let Some(info) = self.read_header()? else {
            return Ok(None);
        };

        let size = info.header.compressed_size as usize;
        let mut payload = Vec::with_capacity(size.min(MAX_INITIAL_CAPACITY));
        (&mut self.reader)
            .take(size as u64)
            .read_to_end(&mut payload)?;

        if payload.len() < size {
            return Err(RedArcError::truncated_payload(
                size as u64,
                payload.len() as u64,
            ));
        }

        self.reader.seek(SeekFrom::Start(info.next_offset()))?;
        Ok(Some(RawEntry { info, payload }))
    }

    /// List every remaining header without reading payloads.
    pub fn headers(&mut self) -> Result<Vec<EntryInfo>> {
        let end = self.reader.seek(SeekFrom::End(0))?;
        let mut headers = Vec::new();

        while let Some(info) = self.read_header()? {
            if info.next_offset() > end {
                return Err(RedArcError::truncated_payload(
                    u64::from(info.header.compressed_size),
                    end.saturating_sub(info.data_offset),
                ));
            }
            headers.push(info);
        }

        Ok(headers)
    }
}
