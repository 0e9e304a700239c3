//! Runtime identifier (RID) graph and fallback-chain resolution
//!
//! A RID names an operating-system/architecture combination
//! (`linux-x64`, `osx-arm64`, `win-x86`). The runtime graph maps each RID
//! to its ordered list of immediate fallbacks, as declared by the host's
//! runtime descriptor; expanding a RID yields the full fallback chain used
//! to rank runtime-specific assets.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::error::Result;

/// Mapping from RID to its ordered list of immediate fallback RIDs
///
/// Read from the host's runtime descriptor; never mutated during a
/// resolution run.
#[derive(Debug, Clone, Default)]
pub struct RuntimeGraph {
    runtimes: BTreeMap<String, Vec<String>>,
}

/// runtime.json-style descriptor document
#[derive(Deserialize)]
struct RuntimeDescriptor {
    #[serde(default)]
    runtimes: BTreeMap<String, RuntimeDescriptorEntry>,
}

#[derive(Deserialize)]
struct RuntimeDescriptorEntry {
    #[serde(rename = "#import", default)]
    imports: Vec<String>,
}

impl RuntimeGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a RID and its ordered fallback list
    pub fn insert(
        &mut self,
        rid: impl Into<String>,
        fallbacks: impl IntoIterator<Item = impl Into<String>>,
    ) {
        self.runtimes
            .insert(rid.into(), fallbacks.into_iter().map(Into::into).collect());
    }

    /// Parse a runtime.json-style descriptor
    ///
    /// ```json
    /// { "runtimes": { "linux-x64": { "#import": ["linux", "any"] } } }
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`crate::NupkgAssetError::RuntimeGraphParseFailed`] when the
    /// document is not valid JSON of this shape.
    pub fn from_json(json: &str) -> Result<Self> {
        let descriptor: RuntimeDescriptor = serde_json::from_str(json)?;
        let runtimes = descriptor
            .runtimes
            .into_iter()
            .map(|(rid, entry)| (rid, entry.imports))
            .collect();
        Ok(Self { runtimes })
    }

    pub fn contains(&self, rid: &str) -> bool {
        self.runtimes.contains_key(rid)
    }

    pub fn is_empty(&self) -> bool {
        self.runtimes.is_empty()
    }

    /// Compute the full fallback chain for `rid`
    ///
    /// Breadth-first over the declared fallback lists, first occurrence
    /// wins, so the chain is duplicate-free and finite even when the graph
    /// contains a cycle. A RID absent from the graph (including fallback
    /// targets the graph never declares) terminates its own branch; an
    /// unknown queried RID yields the singleton chain of itself.
    pub fn expand(&self, rid: &str) -> RidChain {
        let mut rids = vec![rid.to_string()];
        let mut next = 0;
        while next < rids.len() {
            if let Some(fallbacks) = self.runtimes.get(&rids[next]) {
                for fallback in fallbacks {
                    if !rids.iter().any(|seen| seen == fallback) {
                        rids.push(fallback.clone());
                    }
                }
            }
            next += 1;
        }
        RidChain { rids }
    }
}

/// Ordered, duplicate-free fallback chain for one queried RID
///
/// Element 0 is always the queried RID; position in the chain is the
/// ranking key for runtime assets (earlier is more specific).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RidChain {
    rids: Vec<String>,
}

impl RidChain {
    /// The empty chain, used when no target RID was supplied
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn contains(&self, rid: &str) -> bool {
        self.rids.iter().any(|r| r == rid)
    }

    /// Position of `rid` in the chain; smaller is more specific
    pub fn position(&self, rid: &str) -> Option<usize> {
        self.rids.iter().position(|r| r == rid)
    }

    /// The queried RID, when the chain is non-empty
    pub fn target(&self) -> Option<&str> {
        self.rids.first().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.rids.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rids.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.rids.iter().map(String::as_str)
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.rids.clone()
    }
}

/// The conventional RID of the current host
///
/// The explicit collaborator for callers that want "this machine" as the
/// target RID; resolution itself never consults it.
pub fn host_rid() -> String {
    let os = match std::env::consts::OS {
        "macos" => "osx",
        "windows" => "win",
        other => other,
    };
    let arch = match std::env::consts::ARCH {
        "x86_64" => "x64",
        "aarch64" => "arm64",
        "x86" => "x86",
        other => other,
    };
    format!("{os}-{arch}")
}
