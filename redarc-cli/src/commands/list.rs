//! List command implementation.

use crate::utils::{print_entries, space_savings};
use redarc_archive::{ArchiveReader, EntryInfo, open_for_read};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// JSON serializable entry data for archive listings.
#[derive(Debug, Serialize, Deserialize)]
struct EntryJson {
    name: String,
    size: u32,
    compressed_size: u32,
    ratio: f64,
    level: u8,
    method: String,
    supported: bool,
    offset: u64,
}

impl EntryJson {
    fn from_info(info: &EntryInfo) -> Self {
        let header = &info.header;
        Self {
            name: header.name.to_string(),
            size: header.uncompressed_size,
            compressed_size: header.compressed_size,
            ratio: header.compression_ratio(),
            level: header.level,
            method: header.method().name().to_string(),
            supported: header.method().is_supported(),
            offset: info.offset,
        }
    }
}

/// JSON output for archive listing.
#[derive(Debug, Serialize, Deserialize)]
struct ArchiveListJson {
    archive: String,
    entries: Vec<EntryJson>,
    total_size: u64,
    total_compressed: u64,
    space_savings: f64,
}

pub fn cmd_list(archive: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let source = open_for_read(archive)?;
    let entries = ArchiveReader::new(source)?.headers()?;

    if json {
        let total_size = entries
            .iter()
            .map(|e| u64::from(e.header.uncompressed_size))
            .sum();
        let total_compressed = entries
            .iter()
            .map(|e| u64::from(e.header.compressed_size))
            .sum();

        let output = ArchiveListJson {
            archive: archive.display().to_string(),
            entries: entries.iter().map(EntryJson::from_info).collect(),
            total_size,
            total_compressed,
            space_savings: space_savings(total_compressed, total_size),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("Archive: {}", archive.display());
    println!();
    print_entries(&entries);
    Ok(())
}
