//! Destinations for unpacked entries.

use redarc_core::EntryName;
use redarc_core::error::Result;

/// Receives decoded entries during unpacking.
pub trait EntrySink {
    /// Store one entry's bytes under its name.
    fn write_entry(&mut self, name: &EntryName, data: &[u8]) -> Result<()>;
}

impl<S: EntrySink + ?Sized> EntrySink for &mut S {
    fn write_entry(&mut self, name: &EntryName, data: &[u8]) -> Result<()> {
        (**self).write_entry(name, data)
    }
}

/// Collects entries in memory, in archive order.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    entries: Vec<(EntryName, Vec<u8>)>,
}

impl MemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries received so far.
    pub fn entries(&self) -> &[(EntryName, Vec<u8>)] {
        &self.entries
    }

    /// Data of the last entry written under `name`.
    pub fn get(&self, name: &str) -> Option<&[u8]> {
        self.entries
            .iter()
            .rev()
            .find(|(entry, _)| entry.as_str() == name)
            .map(|(_, data)| data.as_slice())
    }
}

impl EntrySink for MemorySink {
    fn write_entry(&mut self, name: &EntryName, data: &[u8]) -> Result<()> {
        self.entries.push((*name, data.to_vec()));
        Ok(())
    }
}

/// Discards entries; used to verify an archive without extracting it.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl EntrySink for NullSink {
    fn write_entry(&mut self, _name: &EntryName, _data: &[u8]) -> Result<()> {
        Ok(())
    }
}
