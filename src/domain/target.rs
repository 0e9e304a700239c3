//! Target platform specification

use crate::error::Result;
use crate::framework::FrameworkMoniker;

/// The platform one resolution run selects assets for
///
/// Supplied by the caller once per run and immutable for its duration.
/// The RID is optional: without one, runtime-specific assets are still
/// reported but none are marked supported. [`crate::runtime::host_rid`]
/// is the explicit collaborator for "target this machine".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetSpec {
    pub framework: FrameworkMoniker,
    pub rid: Option<String>,
}

impl TargetSpec {
    pub fn new(framework: FrameworkMoniker) -> Self {
        Self {
            framework,
            rid: None,
        }
    }

    pub fn with_rid(mut self, rid: impl Into<String>) -> Self {
        self.rid = Some(rid.into());
        self
    }

    /// Parse a target from a framework string in either spelling
    /// (`net6.0` or `.NETCoreApp,Version=v6.0`)
    ///
    /// # Errors
    ///
    /// Returns [`crate::NupkgAssetError::FrameworkParseFailed`] for an
    /// unrecognized framework string.
    pub fn parse(framework: &str) -> Result<Self> {
        Ok(Self::new(FrameworkMoniker::parse(framework)?))
    }
}
