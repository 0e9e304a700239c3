//! Plugin assembly manifest store
//!
//! The manifest is the only durable state of a resolution run: a
//! newline-delimited list of the file names belonging to the primary
//! package's winning managed assets, stored as `pluginAssemblyFiles.txt`
//! directly under the output directory. Later calls read it back to learn
//! the plugin's own assembly list without reparsing the archive.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{NupkgAssetError, Result};

/// File name of the manifest under an output directory
pub const PLUGIN_ASSEMBLY_FILES: &str = "pluginAssemblyFiles.txt";

/// Path of the manifest for a given output directory
pub fn manifest_path(root: &Path) -> PathBuf {
    root.join(PLUGIN_ASSEMBLY_FILES)
}

/// Write (or overwrite) the manifest for `root`
///
/// # Errors
///
/// Returns [`NupkgAssetError::FileWriteFailed`] when the manifest cannot
/// be written.
pub fn write(root: &Path, file_names: &[String]) -> Result<()> {
    let path = manifest_path(root);
    let mut content = file_names.join("\n");
    if !content.is_empty() {
        content.push('\n');
    }
    fs::write(&path, content).map_err(|e| NupkgAssetError::FileWriteFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}

/// Read the manifest for `root`, preserving the written order
///
/// # Errors
///
/// Returns [`NupkgAssetError::ManifestMissing`] when no manifest exists
/// for the directory (the expected state before the first successful
/// install) and [`NupkgAssetError::IoError`] for any other read failure.
pub fn read(root: &Path) -> Result<Vec<String>> {
    let path = manifest_path(root);
    let content = fs::read_to_string(&path).map_err(|e| {
        if e.kind() == ErrorKind::NotFound {
            NupkgAssetError::ManifestMissing {
                path: path.display().to_string(),
            }
        } else {
            NupkgAssetError::IoError {
                message: e.to_string(),
            }
        }
    })?;

    Ok(content
        .lines()
        .filter(|line| !line.is_empty())
        .map(ToString::to_string)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_read_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let files = vec!["Foo.dll".to_string(), "Foo.Extras.dll".to_string()];

        write(dir.path(), &files).unwrap();
        assert_eq!(read(dir.path()).unwrap(), files);
    }

    #[test]
    fn test_write_overwrites_previous_manifest() {
        let dir = tempfile::tempdir().unwrap();

        write(dir.path(), &["Old.dll".to_string()]).unwrap();
        write(dir.path(), &["New.dll".to_string()]).unwrap();
        assert_eq!(read(dir.path()).unwrap(), vec!["New.dll"]);
    }

    #[test]
    fn test_write_empty_manifest() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), &[]).unwrap();
        assert_eq!(read(dir.path()).unwrap(), Vec::<String>::new());
    }

    #[test]
    fn test_read_missing_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let result = read(dir.path());
        assert!(matches!(
            result,
            Err(NupkgAssetError::ManifestMissing { .. })
        ));
    }

    #[test]
    fn test_order_preserved() {
        let dir = tempfile::tempdir().unwrap();
        let files = vec![
            "Zebra.dll".to_string(),
            "Alpha.dll".to_string(),
            "Middle.dll".to_string(),
        ];
        write(dir.path(), &files).unwrap();
        assert_eq!(read(dir.path()).unwrap(), files);
    }
}
