//! Unpack command implementation.

use crate::utils::{ProgressSink, create_progress_bar};
use redarc_archive::{ArchiveReader, DirectorySink, UnpackSummary, open_for_read, unpack};
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

/// Options for unpacking an archive.
pub struct UnpackOptions {
    pub progress: bool,
    pub quiet: bool,
    pub parallel: bool,
}

pub fn cmd_unpack(
    archive: &Path,
    directory: &Path,
    options: &UnpackOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut source = open_for_read(archive)?;

    let total = if options.progress {
        let count = count_entries(&mut source);
        source.seek(SeekFrom::Start(0))?;
        count
    } else {
        0
    };

    let pb = create_progress_bar(total, options.progress);
    let sink = ProgressSink::new(DirectorySink::create(directory)?, pb.clone());

    let summary = if options.parallel {
        unpack_parallel(source, sink)?
    } else {
        unpack(source, sink)?
    };
    pb.finish_and_clear();

    if !options.quiet {
        println!(
            "Unpacked {} of {} entries from {} into {}",
            summary.written(),
            summary.entries.len(),
            archive.display(),
            directory.display()
        );
        if summary.skipped() > 0 {
            println!("  Skipped: {}", summary.skipped());
        }
        if summary.diagnostic_count() > 0 {
            println!("  Warnings: {}", summary.diagnostic_count());
        }
    }
    Ok(())
}

/// Number of headers readable before the terminator or the first damage.
///
/// Damage is reported by the unpack itself, after the entries before it.
fn count_entries<R: Read + Seek>(source: R) -> u64 {
    let Ok(mut reader) = ArchiveReader::new(source) else {
        return 0;
    };
    let mut count = 0;
    while let Ok(Some(_)) = reader.read_header() {
        count += 1;
    }
    count
}

#[cfg(feature = "parallel")]
fn unpack_parallel<S: redarc_archive::EntrySink>(
    source: impl Read + Seek,
    sink: S,
) -> redarc_core::Result<UnpackSummary> {
    redarc_archive::unpack_parallel(source, sink)
}

#[cfg(not(feature = "parallel"))]
fn unpack_parallel<S: redarc_archive::EntrySink>(
    source: impl Read + Seek,
    sink: S,
) -> redarc_core::Result<UnpackSummary> {
    tracing::warn!("Built without the `parallel` feature; unpacking sequentially");
    unpack(source, sink)
}
