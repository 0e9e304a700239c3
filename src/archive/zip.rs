//! Zip-backed package archive
//!
//! Plugin packages are zip archives; this adapter exposes one through the
//! [`PackageArchive`](super::PackageArchive) trait.

use std::fs;
use std::io::{Read, Seek};
use std::path::Path;

use zip::ZipArchive;

use crate::error::{NupkgAssetError, Result};

use super::PackageArchive;

/// A package archive read from any seekable zip stream
pub struct ZipPackageArchive<R: Read + Seek> {
    inner: ZipArchive<R>,
}

impl ZipPackageArchive<fs::File> {
    /// Open a `.nupkg` (or any zip) file from disk
    ///
    /// # Errors
    ///
    /// Returns [`NupkgAssetError::ArchiveOpenFailed`] when the file cannot
    /// be opened or is not a readable zip archive.
    pub fn open(path: &Path) -> Result<Self> {
        let file = fs::File::open(path).map_err(|e| NupkgAssetError::ArchiveOpenFailed {
            reason: format!("{}: {e}", path.display()),
        })?;
        Self::new(file)
    }
}

impl<R: Read + Seek> ZipPackageArchive<R> {
    /// Wrap an already-open zip stream
    ///
    /// # Errors
    ///
    /// Returns [`NupkgAssetError::ArchiveOpenFailed`] for streams that are
    /// not valid zip archives.
    pub fn new(reader: R) -> Result<Self> {
        let inner = ZipArchive::new(reader).map_err(|e| NupkgAssetError::ArchiveOpenFailed {
            reason: e.to_string(),
        })?;
        Ok(Self { inner })
    }
}

impl<R: Read + Seek> PackageArchive for ZipPackageArchive<R> {
    fn entry_paths(&mut self) -> Result<Vec<String>> {
        let mut paths = Vec::with_capacity(self.inner.len());
        for index in 0..self.inner.len() {
            let entry =
                self.inner
                    .by_index(index)
                    .map_err(|e| NupkgAssetError::ArchiveReadFailed {
                        entry: format!("#{index}"),
                        reason: e.to_string(),
                    })?;
            paths.push(entry.name().to_string());
        }
        Ok(paths)
    }

    fn extract_entry(&mut self, entry_path: &str, dest: &Path) -> Result<()> {
        let mut entry =
            self.inner
                .by_name(entry_path)
                .map_err(|e| NupkgAssetError::ArchiveReadFailed {
                    entry: entry_path.to_string(),
                    reason: e.to_string(),
                })?;

        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut out = fs::File::create(dest).map_err(|e| NupkgAssetError::FileWriteFailed {
            path: dest.display().to_string(),
            reason: e.to_string(),
        })?;
        std::io::copy(&mut entry, &mut out).map_err(|e| NupkgAssetError::FileWriteFailed {
            path: dest.display().to_string(),
            reason: e.to_string(),
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use zip::write::FileOptions;
    use zip::ZipWriter;

    fn zip_with(entries: &[(&str, &[u8])]) -> Cursor<Vec<u8>> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        for (path, bytes) in entries {
            writer.start_file(*path, FileOptions::default()).unwrap();
            writer.write_all(bytes).unwrap();
        }
        writer.finish().unwrap()
    }

    #[test]
    fn test_entry_paths() {
        let cursor = zip_with(&[
            ("lib/net6.0/Foo.dll", b"foo"),
            ("runtimes/linux-x64/native/lib.so", b"so"),
        ]);
        let mut archive = ZipPackageArchive::new(cursor).unwrap();
        assert_eq!(
            archive.entry_paths().unwrap(),
            vec!["lib/net6.0/Foo.dll", "runtimes/linux-x64/native/lib.so"]
        );
    }

    #[test]
    fn test_extract_entry() {
        let dir = tempfile::tempdir().unwrap();
        let cursor = zip_with(&[("lib/net6.0/Foo.dll", b"foo bytes")]);
        let mut archive = ZipPackageArchive::new(cursor).unwrap();

        let dest = dir.path().join("Foo.dll");
        archive.extract_entry("lib/net6.0/Foo.dll", &dest).unwrap();
        assert_eq!(fs::read(&dest).unwrap(), b"foo bytes");
    }

    #[test]
    fn test_extract_missing_entry() {
        let dir = tempfile::tempdir().unwrap();
        let cursor = zip_with(&[("lib/net6.0/Foo.dll", b"foo")]);
        let mut archive = ZipPackageArchive::new(cursor).unwrap();

        let result = archive.extract_entry("lib/net6.0/Bar.dll", &dir.path().join("Bar.dll"));
        assert!(matches!(
            result,
            Err(NupkgAssetError::ArchiveReadFailed { .. })
        ));
    }

    #[test]
    fn test_open_rejects_non_zip() {
        let result = ZipPackageArchive::new(Cursor::new(b"not a zip".to_vec()));
        assert!(matches!(
            result,
            Err(NupkgAssetError::ArchiveOpenFailed { .. })
        ));
    }
}
