//! Package identity

use serde::{Deserialize, Serialize};

/// Name and version of one package archive
///
/// The identity distinguishes the primary package being installed from any
/// dependency packages contributing assets to the same output directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PackageIdentity {
    pub name: String,
    pub version: String,
}

impl PackageIdentity {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }

    /// The `name.version` label used for per-package subdirectories and
    /// report paths
    pub fn label(&self) -> String {
        format!("{}.{}", self.name, self.version)
    }
}

impl std::fmt::Display for PackageIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
