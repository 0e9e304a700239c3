//! Archive entry path classification
//!
//! Buckets an entry path into a typed asset descriptor by its layout:
//!
//! ```text
//! lib/<tfm>/<file>                    managed library asset
//! runtimes/<rid>/native/<file>        native runtime asset
//! runtimes/<rid>/lib/<tfm>/<file>     managed runtime asset
//! ```
//!
//! Anything else (metadata, content files, directory entries) is not an
//! asset and classifies to `None`. The classifier is total: malformed
//! paths never panic and never error.

use crate::framework::FrameworkMoniker;

/// Root folder of managed library assets
pub const LIB_ROOT: &str = "lib";

/// Root folder of runtime-specific assets
pub const RUNTIMES_ROOT: &str = "runtimes";

/// The sub-folder marking native binaries under a RID
const NATIVE_DIR: &str = "native";

/// Suffixes of managed binary modules
const BINARY_SUFFIXES: &[&str] = &[".dll", ".exe"];

/// Sub-kind of a runtime-specific asset
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeAssetKind {
    /// Unmanaged platform binary (`runtimes/<rid>/native/...`)
    Native,
    /// Managed build specific to a RID (`runtimes/<rid>/lib/<tfm>/...`)
    Managed(FrameworkMoniker),
}

/// One classified archive entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetEntry {
    Managed {
        framework: FrameworkMoniker,
        file_name: String,
        full_path: String,
    },
    Runtime {
        rid: String,
        kind: RuntimeAssetKind,
        file_name: String,
        full_path: String,
    },
}

impl AssetEntry {
    pub fn file_name(&self) -> &str {
        match self {
            AssetEntry::Managed { file_name, .. } | AssetEntry::Runtime { file_name, .. } => {
                file_name
            }
        }
    }

    pub fn full_path(&self) -> &str {
        match self {
            AssetEntry::Managed { full_path, .. } | AssetEntry::Runtime { full_path, .. } => {
                full_path
            }
        }
    }
}

/// Classify one archive entry path
///
/// Returns `None` for everything that is not a managed or runtime asset.
pub fn classify(path: &str) -> Option<AssetEntry> {
    let segments: Vec<&str> = path.split('/').collect();
    let root = segments.first()?;

    if root.eq_ignore_ascii_case(LIB_ROOT) {
        return classify_managed(path, &segments);
    }
    if root.eq_ignore_ascii_case(RUNTIMES_ROOT) {
        return classify_runtime(path, &segments);
    }
    None
}

fn classify_managed(path: &str, segments: &[&str]) -> Option<AssetEntry> {
    // lib/<tfm>/<file>, possibly with resource subdirectories in between
    if segments.len() < 3 {
        return None;
    }
    let file_name = *segments.last()?;
    if !has_binary_suffix(file_name) {
        return None;
    }
    let framework = FrameworkMoniker::parse_folder(segments[1])?;
    Some(AssetEntry::Managed {
        framework,
        file_name: file_name.to_string(),
        full_path: path.to_string(),
    })
}

fn classify_runtime(path: &str, segments: &[&str]) -> Option<AssetEntry> {
    let file_name = *segments.last()?;
    if file_name.is_empty() {
        // directory entry
        return None;
    }
    let rid = *segments.get(1)?;
    let sub_root = *segments.get(2)?;

    if sub_root.eq_ignore_ascii_case(NATIVE_DIR) {
        if segments.len() < 4 {
            return None;
        }
        return Some(AssetEntry::Runtime {
            rid: rid.to_string(),
            kind: RuntimeAssetKind::Native,
            file_name: file_name.to_string(),
            full_path: path.to_string(),
        });
    }

    if sub_root.eq_ignore_ascii_case(LIB_ROOT) {
        if segments.len() < 5 {
            return None;
        }
        let framework = FrameworkMoniker::parse_folder(segments[3])?;
        return Some(AssetEntry::Runtime {
            rid: rid.to_string(),
            kind: RuntimeAssetKind::Managed(framework),
            file_name: file_name.to_string(),
            full_path: path.to_string(),
        });
    }

    None
}

fn has_binary_suffix(file_name: &str) -> bool {
    let lower = file_name.to_ascii_lowercase();
    BINARY_SUFFIXES
        .iter()
        .any(|suffix| lower.len() > suffix.len() && lower.ends_with(suffix))
}
