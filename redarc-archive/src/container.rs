//! Whole-archive packing and unpacking.

use crate::codec::{self, DecodedEntry};
use crate::reader::{ArchiveReader, EntryInfo, RawEntry};
use crate::sink::EntrySink;
use crate::writer::ArchiveWriter;
use redarc_core::entry::EntryHeader;
use redarc_core::error::{RedArcError, Result};
use std::io::{Read, Seek, Write};
use tracing::{debug, info, warn};

/// What happened to one entry during unpacking.
#[derive(Debug)]
pub struct EntryReport {
    /// Header and location of the entry.
    pub info: EntryInfo,
    /// Bytes handed to the sink; `None` if the entry was skipped.
    pub written: Option<usize>,
    /// Non-fatal problems found while decoding.
    pub diagnostics: Vec<RedArcError>,
}

impl EntryReport {
    /// The entry header.
    pub fn header(&self) -> &EntryHeader {
        &self.info.header
    }

    /// Whether the entry was written with no diagnostic.
    pub fn is_clean(&self) -> bool {
        self.written.is_some() && self.diagnostics.is_empty()
    }
}

/// Result of unpacking an archive.
#[derive(Debug, Default)]
pub struct UnpackSummary {
    /// One report per entry, in archive order.
    pub entries: Vec<EntryReport>,
}

impl UnpackSummary {
    /// Number of entries handed to the sink.
    pub fn written(&self) -> usize {
        self.entries.iter().filter(|e| e.written.is_some()).count()
    }

    /// Number of entries skipped.
    pub fn skipped(&self) -> usize {
        self.entries.len() - self.written()
    }

    /// Total number of diagnostics.
    pub fn diagnostic_count(&self) -> usize {
        self.entries.iter().map(|e| e.diagnostics.len()).sum()
    }

    /// Whether every entry was written without diagnostics.
    pub fn is_clean(&self) -> bool {
        self.entries.iter().all(EntryReport::is_clean)
    }
}

/// Result of packing an archive.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PackSummary {
    /// Entries written.
    pub entries: usize,
    /// Total bytes of entry data.
    pub input_bytes: u64,
    /// Archive size, terminator included.
    pub archive_bytes: u64,
}

/// Write `entries` as a stored archive.
///
/// Every entry is written at level 0, in iteration order, followed by the
/// terminator.
pub fn pack<W, I, N, D>(entries: I, sink: W) -> Result<PackSummary>
where
    W: Write,
    I: IntoIterator<Item = (N, D)>,
    N: AsRef<str>,
    D: AsRef<[u8]>,
{
    let mut writer = ArchiveWriter::new(sink);
    let mut input_bytes = 0u64;

    for (name, data) in entries {
        let (name, data) = (name.as_ref(), data.as_ref());
        info!("Adding {}", name);
        writer.add_file(name, data)?;
        input_bytes += data.len() as u64;
    }

    writer.finish()?;

    Ok(PackSummary {
        entries: writer.entries_written(),
        input_bytes,
        archive_bytes: writer.bytes_written(),
    })
}

/// Unpack every entry of `source` into `sink`.
///
/// Structural problems (truncated headers or payloads, invalid names) stop
/// the unpack with an error; entries already written stay written. Problems
/// confined to one entry are logged and recorded in its report.
pub fn unpack<R, S>(source: R, mut sink: S) -> Result<UnpackSummary>
where
    R: Read + Seek,
    S: EntrySink,
{
    let mut reader = ArchiveReader::new(source)?;
    let mut summary = UnpackSummary::default();

    while let Some(entry) = reader.next_entry()? {
        info!("Extracting {}", entry.name());
        let decoded = decode_entry(&entry)?;
        summary.entries.push(store(entry.info, decoded, &mut sink)?);
    }

    debug!(
        entries = summary.entries.len(),
        skipped = summary.skipped(),
        "Unpack finished"
    );
    Ok(summary)
}

/// Unpack with payloads decoded in parallel.
///
/// One sequential pass reads every header and payload, the payloads are
/// decoded on the rayon pool, and the results are handed to the sink in
/// archive order. Failures surface at the same entry as with [`unpack`].
#[cfg(feature = "parallel")]
pub fn unpack_parallel<R, S>(source: R, mut sink: S) -> Result<UnpackSummary>
where
    R: Read + Seek,
    S: EntrySink,
{
    use rayon::prelude::*;

    let mut reader = ArchiveReader::new(source)?;
    let mut entries = Vec::new();
    let read_error = loop {
        match reader.next_entry() {
            Ok(Some(entry)) => entries.push(entry),
            Ok(None) => break None,
            Err(err) => break Some(err),
        }
    };

    let decoded: Vec<Result<DecodedEntry>> = entries.par_iter().map(decode_entry).collect();

    let mut summary = UnpackSummary::default();
    for (entry, decoded) in entries.into_iter().zip(decoded) {
        info!("Extracting {}", entry.name());
        summary.entries.push(store(entry.info, decoded?, &mut sink)?);
    }

    match read_error {
        Some(err) => Err(err),
        None => Ok(summary),
    }
}

fn decode_entry(entry: &RawEntry) -> Result<DecodedEntry> {
    let header = entry.header();
    codec::decode(
        &entry.payload,
        header.compressed_size,
        header.uncompressed_size,
        header.level,
    )
}

fn store<S: EntrySink>(info: EntryInfo, decoded: DecodedEntry, sink: &mut S) -> Result<EntryReport> {
    for diagnostic in &decoded.diagnostics {
        warn!("{}: {}", info.header.name, diagnostic);
    }

    let written = match decoded.data {
        Some(data) => {
            sink.write_entry(&info.header.name, &data)?;
            Some(data.len())
        }
        None => None,
    };

    Ok(EntryReport {
        info,
        written,
        diagnostics: decoded.diagnostics,
    })
}
