//! Error types and handling for nupkg-assets
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! "Nothing matched" conditions are deliberately *not* errors: an archive
//! entry that fits no asset shape is skipped, and a package with no
//! framework-compatible build yields an empty winning set. Only genuine
//! failures (I/O, unreadable archives, unparsable caller input) surface here.

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for nupkg-assets operations
#[derive(Error, Diagnostic, Debug)]
pub enum NupkgAssetError {
    // Framework errors
    #[error("Failed to parse target framework: {moniker}")]
    #[diagnostic(
        code(nupkg::framework::parse_failed),
        help("Expected a folder name like 'net6.0' or a full name like '.NETCoreApp,Version=v6.0'")
    )]
    FrameworkParseFailed { moniker: String },

    // Runtime graph errors
    #[error("Failed to parse runtime graph descriptor: {reason}")]
    #[diagnostic(
        code(nupkg::runtime::graph_parse_failed),
        help("The descriptor must be a runtime.json-style document with a top-level 'runtimes' object")
    )]
    RuntimeGraphParseFailed { reason: String },

    // Manifest errors
    #[error("Plugin assembly manifest not found: {path}")]
    #[diagnostic(
        code(nupkg::manifest::missing),
        help("The manifest is written by a successful install; run the installer for this directory first")
    )]
    ManifestMissing { path: String },

    // Archive errors
    #[error("Failed to read archive entry '{entry}': {reason}")]
    #[diagnostic(code(nupkg::archive::read_failed))]
    ArchiveReadFailed { entry: String, reason: String },

    #[error("Failed to open package archive: {reason}")]
    #[diagnostic(code(nupkg::archive::open_failed))]
    ArchiveOpenFailed { reason: String },

    // File system errors
    #[error("Failed to write file: {path}")]
    #[diagnostic(code(nupkg::fs::write_failed))]
    FileWriteFailed { path: String, reason: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(nupkg::fs::io_error))]
    IoError { message: String },
}

impl From<std::io::Error> for NupkgAssetError {
    fn from(err: std::io::Error) -> Self {
        NupkgAssetError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for NupkgAssetError {
    fn from(err: serde_json::Error) -> Self {
        NupkgAssetError::RuntimeGraphParseFailed {
            reason: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, NupkgAssetError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = NupkgAssetError::FrameworkParseFailed {
            moniker: "bogus9.9".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Failed to parse target framework: bogus9.9"
        );
    }

    #[test]
    fn test_error_code() {
        let err = NupkgAssetError::ManifestMissing {
            path: "/plugins/pluginAssemblyFiles.txt".to_string(),
        };
        assert_eq!(
            err.code().map(|c| c.to_string()),
            Some("nupkg::manifest::missing".to_string())
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: NupkgAssetError = io_err.into();
        assert!(matches!(err, NupkgAssetError::IoError { .. }));
    }

    #[test]
    fn test_json_error_conversion() {
        let parse_result: std::result::Result<serde_json::Value, _> =
            serde_json::from_str("not json");
        let json_err = parse_result.unwrap_err();
        let err: NupkgAssetError = json_err.into();
        assert!(matches!(
            err,
            NupkgAssetError::RuntimeGraphParseFailed { .. }
        ));
    }

    #[test]
    fn test_manifest_missing_distinct_from_io() {
        let missing = NupkgAssetError::ManifestMissing {
            path: "x".to_string(),
        };
        assert!(!matches!(missing, NupkgAssetError::IoError { .. }));
    }

    #[test]
    fn test_archive_read_failed_error() {
        let err = NupkgAssetError::ArchiveReadFailed {
            entry: "lib/net6.0/Foo.dll".to_string(),
            reason: "corrupt deflate stream".to_string(),
        };
        assert!(err.to_string().contains("lib/net6.0/Foo.dll"));
        assert!(err.to_string().contains("corrupt deflate stream"));
    }
}
