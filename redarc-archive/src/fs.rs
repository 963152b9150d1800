//! Filesystem collaborators: directory listing, file handles and a sink
//! that writes entries into a directory.

use crate::container::{self, PackSummary, UnpackSummary};
use crate::sink::EntrySink;
use redarc_core::EntryName;
use redarc_core::error::{RedArcError, Result};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Open a file for buffered reading.
pub fn open_for_read(path: impl AsRef<Path>) -> Result<BufReader<File>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| RedArcError::file_io(path, e))?;
    Ok(BufReader::new(file))
}

/// Create (or truncate) a file for buffered writing.
pub fn open_for_write(path: impl AsRef<Path>) -> Result<BufWriter<File>> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| RedArcError::file_io(path, e))?;
    Ok(BufWriter::new(file))
}

/// Read every regular file directly inside `dir`.
///
/// Entries come back in the order the OS lists them. Anything that is not a
/// regular file (after following symlinks) is skipped with a warning.
pub fn list_directory_entries(dir: impl AsRef<Path>) -> Result<Vec<(String, Vec<u8>)>> {
    let dir = dir.as_ref();
    let listing = fs::read_dir(dir).map_err(|e| RedArcError::file_io(dir, e))?;
    let mut entries = Vec::new();

    for entry in listing {
        let entry = entry.map_err(|e| RedArcError::file_io(dir, e))?;
        let path = entry.path();
        let metadata = fs::metadata(&path).map_err(|e| RedArcError::file_io(&path, e))?;

        if !metadata.is_file() {
            warn!("Skipping {}: not a regular file", path.display());
            continue;
        }

        let name = entry.file_name().to_string_lossy().into_owned();
        let data = fs::read(&path).map_err(|e| RedArcError::file_io(&path, e))?;
        debug!(name = %name, size = data.len(), "Listed file");
        entries.push((name, data));
    }

    Ok(entries)
}

/// Writes each entry to a file in a directory.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    root: PathBuf,
}

impl DirectorySink {
    /// Use `root` as the destination, creating it (and its parents) if absent.
    pub fn create(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|e| RedArcError::file_io(&root, e))?;
        Ok(Self { root })
    }

    /// Destination directory.
    pub fn path(&self) -> &Path {
        &self.root
    }
}

impl EntrySink for DirectorySink {
    fn write_entry(&mut self, name: &EntryName, data: &[u8]) -> Result<()> {
        let path = self.root.join(name.as_str());
        fs::write(&path, data).map_err(|e| RedArcError::file_io(&path, e))
    }
}

/// Pack the regular files of `dir` into a stored archive at `archive`.
pub fn pack_directory(dir: impl AsRef<Path>, archive: impl AsRef<Path>) -> Result<PackSummary> {
    let entries = list_directory_entries(dir)?;
    let output = open_for_write(archive)?;
    container::pack(entries, output)
}

/// Unpack `archive` into `dir`.
pub fn unpack_archive(archive: impl AsRef<Path>, dir: impl Into<PathBuf>) -> Result<UnpackSummary> {
    let source = open_for_read(archive)?;
    let sink = DirectorySink::create(dir)?;
    container::unpack(source, sink)
}

/// Unpack `archive` into `dir`, decoding payloads in parallel.
#[cfg(feature = "parallel")]
pub fn unpack_archive_parallel(
    archive: impl AsRef<Path>,
    dir: impl Into<PathBuf>,
) -> Result<UnpackSummary> {
    let source = open_for_read(archive)?;
    let sink = DirectorySink::create(dir)?;
    container::unpack_parallel(source, sink)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directory_sink_creates_parents() {
        let temp = tempfile::tempdir().unwrap();
        let root = temp.path().join("a").join("b");

        let mut sink = DirectorySink::create(&root).unwrap();
        sink.write_entry(&EntryName::new("X.DAT").unwrap(), b"xyz")
            .unwrap();

        assert_eq!(fs::read(root.join("X.DAT")).unwrap(), b"xyz");
    }

    #[test]
    fn test_list_skips_directories() {
        let temp = tempfile::tempdir().unwrap();
        fs::write(temp.path().join("ONE"), b"1").unwrap();
        fs::create_dir(temp.path().join("SUB")).unwrap();

        let entries = list_directory_entries(temp.path()).unwrap();
        assert_eq!(entries, vec![("ONE".to_string(), b"1".to_vec())]);
    }

    #[test]
    fn test_missing_paths_name_the_path() {
        let temp = tempfile::tempdir().unwrap();
        let missing = temp.path().join("missing.rar");

        match open_for_read(&missing) {
            Err(RedArcError::FileIo { path, .. }) => assert_eq!(path, missing),
            other => panic!("unexpected result: {other:?}"),
        }
        assert!(matches!(
            list_directory_entries(temp.path().join("nope")),
            Err(RedArcError::FileIo { .. })
        ));
    }
}
