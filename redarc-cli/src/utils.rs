//! Utility functions for the CLI.

use indicatif::{ProgressBar, ProgressStyle};
use redarc_archive::{EntryInfo, EntrySink};
use redarc_core::EntryName;
use redarc_core::error::Result;

/// Create a progress bar with standard styling.
pub fn create_progress_bar(len: u64, enable: bool) -> ProgressBar {
    if !enable {
        return ProgressBar::hidden();
    }

    let style = ProgressStyle::default_bar()
        .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▓▒░ ");

    let pb = ProgressBar::new(len);
    pb.set_style(style);
    pb
}

/// Passes entries through to another sink, advancing a progress bar.
pub struct ProgressSink<S> {
    inner: S,
    bar: ProgressBar,
}

impl<S: EntrySink> ProgressSink<S> {
    /// Wrap `inner`.
    pub fn new(inner: S, bar: ProgressBar) -> Self {
        Self { inner, bar }
    }
}

impl<S: EntrySink> EntrySink for ProgressSink<S> {
    fn write_entry(&mut self, name: &EntryName, data: &[u8]) -> Result<()> {
        self.bar.set_message(name.to_string());
        self.inner.write_entry(name, data)?;
        self.bar.inc(1);
        Ok(())
    }
}

/// Space saved by coding, as a percentage of the original size.
pub fn space_savings(compressed: u64, uncompressed: u64) -> f64 {
    if uncompressed == 0 {
        0.0
    } else {
        (1.0 - compressed as f64 / uncompressed as f64) * 100.0
    }
}

/// Print entry headers in a formatted table.
pub fn print_entries(entries: &[EntryInfo]) {
    println!(
        "{:>10} {:>10} {:>7} {:>12}  Name",
        "Size", "Compressed", "Ratio", "Method",
    );
    println!("{}", "-".repeat(58));

    let mut total_size = 0u64;
    let mut total_compressed = 0u64;

    for entry in entries {
        let header = &entry.header;
        let size = u64::from(header.uncompressed_size);
        let compressed = u64::from(header.compressed_size);

        let ratio = if size > 0 {
            format!("{:.1}%", space_savings(compressed, size))
        } else {
            "-".to_string()
        };

        println!(
            "{:>10} {:>10} {:>7} {:>12}  {}",
            size,
            compressed,
            ratio,
            header.method().to_string(),
            header.name
        );

        total_size += size;
        total_compressed += compressed;
    }

    println!("{}", "-".repeat(58));
    println!(
        "{:>10} {:>10} {:>6.1}%               {} files",
        total_size,
        total_compressed,
        space_savings(total_compressed, total_size),
        entries.len()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_space_savings() {
        assert_eq!(space_savings(0, 0), 0.0);
        assert_eq!(space_savings(50, 100), 50.0);
        assert!(space_savings(120, 100) < 0.0);
    }

    #[test]
    fn test_progress_sink_forwards() {
        let mut sink = ProgressSink::new(
            redarc_archive::MemorySink::new(),
            create_progress_bar(1, false),
        );
        let name = EntryName::new("A").unwrap();
        sink.write_entry(&name, b"abc").unwrap();
        assert_eq!(sink.inner.get("A"), Some(&b"abc"[..]));
    }
}
