//! Pack command implementation.

use crate::utils::create_progress_bar;
use redarc_archive::{list_directory_entries, open_for_write, pack};
use std::path::Path;

pub fn cmd_pack(
    directory: &Path,
    archive: &Path,
    progress: bool,
    quiet: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let entries = list_directory_entries(directory)?;
    let pb = create_progress_bar(entries.len() as u64, progress);

    let output = open_for_write(archive)?;
    let summary = pack(
        entries.iter().map(|(name, data)| {
            pb.inc(1);
            (name.as_str(), data.as_slice())
        }),
        output,
    )?;
    pb.finish_and_clear();

    if !quiet {
        println!(
            "Packed {} files ({} bytes) into {} ({} bytes)",
            summary.entries,
            summary.input_bytes,
            archive.display(),
            summary.archive_bytes
        );
    }
    Ok(())
}
