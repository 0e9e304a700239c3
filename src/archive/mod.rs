//! Package archive abstraction
//!
//! The decompression primitive is a collaborator, not part of the core:
//! selection only needs the entry paths, and extraction only needs "write
//! this entry's bytes to that destination". [`PackageArchive`] captures
//! exactly that, so the selector stays testable without touching a real
//! archive; [`zip::ZipPackageArchive`] is the concrete `.nupkg` adapter.

pub mod classify;
pub mod zip;

pub use classify::{classify, AssetEntry, RuntimeAssetKind};
pub use zip::ZipPackageArchive;

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::Path;

use crate::error::{NupkgAssetError, Result};

/// An open package archive yielding entries by path
pub trait PackageArchive {
    /// Paths of all entries, in archive order
    ///
    /// # Errors
    ///
    /// Propagates archive read failures.
    fn entry_paths(&mut self) -> Result<Vec<String>>;

    /// Extract one entry's bytes to `dest`, overwriting any existing file
    ///
    /// # Errors
    ///
    /// Fails when the entry cannot be read or the destination cannot be
    /// written; partial extraction is never silently swallowed.
    fn extract_entry(&mut self, entry_path: &str, dest: &Path) -> Result<()>;
}

/// In-memory archive backed by a path → bytes map
///
/// Primarily a test fixture, but also the adapter for callers that already
/// hold decompressed entries.
#[derive(Debug, Clone, Default)]
pub struct MemoryArchive {
    entries: BTreeMap<String, Vec<u8>>,
    order: Vec<String>,
}

impl MemoryArchive {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, path: impl Into<String>, bytes: impl Into<Vec<u8>>) {
        let path = path.into();
        if !self.entries.contains_key(&path) {
            self.order.push(path.clone());
        }
        self.entries.insert(path, bytes.into());
    }

    pub fn with_entry(mut self, path: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        self.add(path, bytes);
        self
    }
}

impl PackageArchive for MemoryArchive {
    fn entry_paths(&mut self) -> Result<Vec<String>> {
        Ok(self.order.clone())
    }

    fn extract_entry(&mut self, entry_path: &str, dest: &Path) -> Result<()> {
        let bytes = self
            .entries
            .get(entry_path)
            .ok_or_else(|| NupkgAssetError::ArchiveReadFailed {
                entry: entry_path.to_string(),
                reason: "entry not found".to_string(),
            })?;

        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file =
            fs::File::create(dest).map_err(|e| NupkgAssetError::FileWriteFailed {
                path: dest.display().to_string(),
                reason: e.to_string(),
            })?;
        file.write_all(bytes)
            .map_err(|e| NupkgAssetError::FileWriteFailed {
                path: dest.display().to_string(),
                reason: e.to_string(),
            })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_archive_preserves_order() {
        let mut archive = MemoryArchive::new()
            .with_entry("lib/net6.0/B.dll", b"b".to_vec())
            .with_entry("lib/net6.0/A.dll", b"a".to_vec());
        assert_eq!(
            archive.entry_paths().unwrap(),
            vec!["lib/net6.0/B.dll", "lib/net6.0/A.dll"]
        );
    }

    #[test]
    fn test_memory_archive_extract() {
        let dir = tempfile::tempdir().unwrap();
        let mut archive = MemoryArchive::new().with_entry("lib/net6.0/Foo.dll", b"hi".to_vec());

        let dest = dir.path().join("Foo.dll");
        archive.extract_entry("lib/net6.0/Foo.dll", &dest).unwrap();
        assert_eq!(fs::read(&dest).unwrap(), b"hi");
    }

    #[test]
    fn test_memory_archive_extract_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("Foo.dll");
        fs::write(&dest, b"stale").unwrap();

        let mut archive = MemoryArchive::new().with_entry("lib/net6.0/Foo.dll", b"fresh".to_vec());
        archive.extract_entry("lib/net6.0/Foo.dll", &dest).unwrap();
        assert_eq!(fs::read(&dest).unwrap(), b"fresh");
    }

    #[test]
    fn test_memory_archive_missing_entry() {
        let dir = tempfile::tempdir().unwrap();
        let mut archive = MemoryArchive::new();
        let result = archive.extract_entry("nope.dll", &dir.path().join("nope.dll"));
        assert!(matches!(
            result,
            Err(NupkgAssetError::ArchiveReadFailed { .. })
        ));
    }
}
